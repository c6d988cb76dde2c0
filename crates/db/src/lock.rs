//! Distributed lock used to serialize booking attempts per office.
//!
//! The [`DistributedLock`] trait abstracts the backing store; the
//! production implementation uses PostgreSQL advisory locks. Acquisition
//! is a bounded-wait poll; the returned [`LockGuard`] releases the lock
//! when dropped, so every exit path (normal return or error) releases.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use futures::future::{BoxFuture, FutureExt};
use sha2::{Digest, Sha256};
use sqlx::PgPool;

/// Interval between acquisition attempts while waiting for the lock.
const ACQUIRE_POLL_INTERVAL: Duration = Duration::from_millis(100);

#[derive(Debug, thiserror::Error)]
pub enum LockError {
    /// The lock was not acquired within the bounded wait. Retryable.
    #[error("Timed out acquiring lock '{key}' after {waited:?}")]
    Timeout { key: String, waited: Duration },

    #[error("Lock backend error: {0}")]
    Backend(#[from] sqlx::Error),
}

/// A mutual-exclusion lock keyed by an arbitrary string, shared across
/// service instances.
#[async_trait]
pub trait DistributedLock: Send + Sync {
    /// Block until the lock for `key` is acquired, up to `max_wait`.
    async fn acquire(&self, key: &str, max_wait: Duration) -> Result<LockGuard, LockError>;
}

/// Holds an acquired lock; releasing happens on drop.
pub struct LockGuard {
    key: String,
    release: Option<BoxFuture<'static, ()>>,
}

impl LockGuard {
    /// The key this guard holds.
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl Drop for LockGuard {
    fn drop(&mut self) {
        if let Some(release) = self.release.take() {
            tokio::spawn(release);
        }
    }
}

impl std::fmt::Debug for LockGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LockGuard").field("key", &self.key).finish()
    }
}

/// [`DistributedLock`] backed by PostgreSQL advisory locks.
///
/// Advisory locks are session-scoped: each acquired lock pins a dedicated
/// pool connection until release, and Postgres frees the lock itself if
/// the holding session dies, so a crashed holder cannot deadlock other
/// instances.
pub struct PgAdvisoryLock {
    pool: PgPool,
}

impl PgAdvisoryLock {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Map a string key onto the 64-bit advisory lock keyspace.
    ///
    /// SHA-256 rather than a process-local hasher: every service instance
    /// must derive the same id for the same key.
    fn lock_id(key: &str) -> i64 {
        let digest = Sha256::digest(key.as_bytes());
        i64::from_be_bytes(digest[..8].try_into().unwrap())
    }
}

#[async_trait]
impl DistributedLock for PgAdvisoryLock {
    async fn acquire(&self, key: &str, max_wait: Duration) -> Result<LockGuard, LockError> {
        let lock_id = Self::lock_id(key);
        let mut conn = self.pool.acquire().await?;
        let started = Instant::now();

        loop {
            let acquired: bool = sqlx::query_scalar("SELECT pg_try_advisory_lock($1)")
                .bind(lock_id)
                .fetch_one(&mut *conn)
                .await?;
            if acquired {
                break;
            }
            if started.elapsed() >= max_wait {
                return Err(LockError::Timeout {
                    key: key.to_string(),
                    waited: started.elapsed(),
                });
            }
            tokio::time::sleep(ACQUIRE_POLL_INTERVAL).await;
        }

        tracing::debug!(key, lock_id, "acquired advisory lock");

        let release_key = key.to_string();
        let release = async move {
            if let Err(err) = sqlx::query("SELECT pg_advisory_unlock($1)")
                .bind(lock_id)
                .execute(&mut *conn)
                .await
            {
                tracing::warn!(key = %release_key, error = %err, "failed to release advisory lock");
            }
        }
        .boxed();

        Ok(LockGuard {
            key: key.to_string(),
            release: Some(release),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lock_id_is_stable_per_key() {
        let a = PgAdvisoryLock::lock_id("reservation:office:1");
        let b = PgAdvisoryLock::lock_id("reservation:office:1");
        assert_eq!(a, b);
    }

    #[test]
    fn lock_id_differs_across_keys() {
        let a = PgAdvisoryLock::lock_id("reservation:office:1");
        let b = PgAdvisoryLock::lock_id("reservation:office:2");
        assert_ne!(a, b);
    }
}
