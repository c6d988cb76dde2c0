use std::sync::Arc;

use officely_db::lock::DistributedLock;

use crate::config::ServerConfig;
use crate::notify::NotificationDispatcher;
use crate::storage::ObjectStorage;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: officely_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Per-office exclusivity lock used by the booking engine.
    pub lock: Arc<dyn DistributedLock>,
    /// Object storage for uploaded office images.
    pub storage: Arc<dyn ObjectStorage>,
    /// Dispatcher for admin approval notifications.
    pub notifier: Arc<dyn NotificationDispatcher>,
}
