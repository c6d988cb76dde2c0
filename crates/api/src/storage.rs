//! Object storage seam for uploaded office images.
//!
//! The booking and listing logic never touches storage; only the image
//! mutation handlers do, through this trait.

use std::path::PathBuf;

use async_trait::async_trait;
use bytes::Bytes;
use officely_core::error::CoreError;

/// Stores and deletes uploaded blobs. `store` returns the path under which
/// the blob can later be addressed.
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    async fn store(&self, filename: &str, bytes: Bytes) -> Result<String, CoreError>;
    async fn delete(&self, path: &str) -> Result<(), CoreError>;
}

/// Local-filesystem storage rooted at a configurable directory.
pub struct LocalStorage {
    root: PathBuf,
}

impl LocalStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl ObjectStorage for LocalStorage {
    async fn store(&self, filename: &str, bytes: Bytes) -> Result<String, CoreError> {
        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|e| CoreError::Internal(format!("creating storage root: {e}")))?;
        let target = self.root.join(filename);
        tokio::fs::write(&target, &bytes)
            .await
            .map_err(|e| CoreError::Internal(format!("writing {}: {e}", target.display())))?;
        Ok(filename.to_string())
    }

    async fn delete(&self, path: &str) -> Result<(), CoreError> {
        let target = self.root.join(path);
        tokio::fs::remove_file(&target)
            .await
            .map_err(|e| CoreError::Internal(format!("deleting {}: {e}", target.display())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn stores_and_deletes_a_blob() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalStorage::new(dir.path());

        let path = storage
            .store("a.png", Bytes::from_static(b"pretend png"))
            .await
            .unwrap();
        assert_eq!(path, "a.png");
        assert!(dir.path().join("a.png").exists());

        storage.delete(&path).await.unwrap();
        assert!(!dir.path().join("a.png").exists());
    }

    #[tokio::test]
    async fn deleting_missing_blob_fails() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalStorage::new(dir.path());
        assert!(storage.delete("missing.png").await.is_err());
    }
}
