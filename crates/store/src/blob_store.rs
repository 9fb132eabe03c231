//! Blob storage keyed by caller-chosen object keys.

use std::sync::Arc;

use bytes::Bytes;
use object_store::path::Path as ObjectPath;
use object_store::ObjectStore;
use tracing::{debug, info};

use crate::backend::StoreConfig;
use crate::error::Result;

/// Write/read/delete byte blobs under string keys.
///
/// Keys are opaque to the store; the vault layer derives them from the owner
/// id and the uploaded filename so that ownership is recoverable from the key
/// prefix alone.
#[derive(Debug, Clone)]
pub struct BlobStore {
    inner: Arc<dyn ObjectStore>,
}

impl BlobStore {
    /// Create a new blob store from configuration.
    pub async fn new(config: StoreConfig) -> Result<Self> {
        let inner = config.build().await?;
        Ok(Self { inner })
    }

    /// Create a fully ephemeral in-memory blob store. Useful for testing.
    pub async fn memory() -> Result<Self> {
        Self::new(StoreConfig::Memory).await
    }

    /// Write a blob under the given key, replacing any previous contents.
    pub async fn put(&self, key: &str, data: Bytes) -> Result<()> {
        let size = data.len();
        let path = ObjectPath::from(key);
        self.inner.put(&path, data.into()).await?;
        info!(key = %key, size = size, "blob stored");
        Ok(())
    }

    /// Read a blob by key. Returns `None` if the key does not exist.
    pub async fn get(&self, key: &str) -> Result<Option<Bytes>> {
        let path = ObjectPath::from(key);
        match self.inner.get(&path).await {
            Ok(result) => {
                let bytes = result.bytes().await?;
                Ok(Some(bytes))
            }
            Err(object_store::Error::NotFound { .. }) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Delete a blob by key.
    ///
    /// Deleting an already-absent key is treated as success so that retried
    /// deletes stay idempotent at the key level.
    pub async fn delete(&self, key: &str) -> Result<()> {
        let path = ObjectPath::from(key);
        match self.inner.delete(&path).await {
            Ok(()) => {
                debug!(key = %key, "blob deleted");
                Ok(())
            }
            Err(object_store::Error::NotFound { .. }) => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Check whether a blob exists under the given key.
    pub async fn exists(&self, key: &str) -> Result<bool> {
        let path = ObjectPath::from(key);
        match self.inner.head(&path).await {
            Ok(_) => Ok(true),
            Err(object_store::Error::NotFound { .. }) => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_put_get_delete() {
        let store = BlobStore::memory().await.unwrap();

        let key = "user-a/1700000000000-cafe1234-notes.txt";
        let data = Bytes::from("hello world");

        store.put(key, data.clone()).await.unwrap();
        assert!(store.exists(key).await.unwrap());

        let retrieved = store.get(key).await.unwrap().unwrap();
        assert_eq!(retrieved, data);

        store.delete(key).await.unwrap();
        assert!(!store.exists(key).await.unwrap());
        assert!(store.get(key).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_absent_key_is_ok() {
        let store = BlobStore::memory().await.unwrap();
        store.delete("user-a/never-written").await.unwrap();
    }

    #[tokio::test]
    async fn test_put_overwrites() {
        let store = BlobStore::memory().await.unwrap();

        let key = "user-a/key";
        store.put(key, Bytes::from("one")).await.unwrap();
        store.put(key, Bytes::from("two")).await.unwrap();

        let retrieved = store.get(key).await.unwrap().unwrap();
        assert_eq!(retrieved, Bytes::from("two"));
    }

    #[tokio::test]
    async fn test_local_backend() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = BlobStore::new(StoreConfig::Local {
            path: temp_dir.path().to_path_buf(),
        })
        .await
        .unwrap();

        let key = "user-b/1700000000000-beef5678-photo.png";
        let data = Bytes::from("test local storage");

        store.put(key, data.clone()).await.unwrap();
        let retrieved = store.get(key).await.unwrap().unwrap();
        assert_eq!(retrieved, data);

        // Key segments map to directories on disk
        let file_path = temp_dir
            .path()
            .join("user-b")
            .join("1700000000000-beef5678-photo.png");
        assert!(file_path.exists());
    }
}
