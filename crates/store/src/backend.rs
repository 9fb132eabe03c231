//! Backend selection for the blob store.
//!
//! Deserialized from the service config; `Memory` is the default so tests and
//! local development need no storage setup at all.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use futures::TryStreamExt;
use object_store::aws::AmazonS3Builder;
use object_store::local::LocalFileSystem;
use object_store::memory::InMemory;
use object_store::ObjectStore;
use serde::{Deserialize, Serialize};

use crate::error::{Result, StoreError};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StoreConfig {
    /// Ephemeral in-process storage.
    #[default]
    Memory,

    /// A directory on the local filesystem, created on startup if absent.
    Local { path: PathBuf },

    /// Any S3-compatible endpoint (AWS, MinIO, R2). The bucket must already
    /// exist; startup fails if it does not.
    S3 {
        endpoint: String,
        access_key: String,
        secret_key: String,
        bucket: String,
        /// Defaults to "us-east-1" when unset.
        region: Option<String>,
    },
}

impl StoreConfig {
    pub(crate) async fn build(&self) -> Result<Arc<dyn ObjectStore>> {
        match self {
            StoreConfig::Memory => Ok(Arc::new(InMemory::new())),
            StoreConfig::Local { path } => open_local(path).await,
            StoreConfig::S3 {
                endpoint,
                access_key,
                secret_key,
                bucket,
                region,
            } => open_s3(endpoint, access_key, secret_key, bucket, region.as_deref()).await,
        }
    }
}

async fn open_local(path: &Path) -> Result<Arc<dyn ObjectStore>> {
    tokio::fs::create_dir_all(path).await?;
    let fs = LocalFileSystem::new_with_prefix(path)
        .map_err(|e| StoreError::InvalidConfig(e.to_string()))?;
    Ok(Arc::new(fs))
}

async fn open_s3(
    endpoint: &str,
    access_key: &str,
    secret_key: &str,
    bucket: &str,
    region: Option<&str>,
) -> Result<Arc<dyn ObjectStore>> {
    let s3 = AmazonS3Builder::new()
        .with_endpoint(endpoint)
        .with_access_key_id(access_key)
        .with_secret_access_key(secret_key)
        .with_bucket_name(bucket)
        .with_region(region.unwrap_or("us-east-1"))
        .with_allow_http(endpoint.starts_with("http://"))
        .build()
        .map_err(|e| StoreError::InvalidConfig(e.to_string()))?;

    let store: Arc<dyn ObjectStore> = Arc::new(s3);
    probe_bucket(store.as_ref(), bucket).await?;
    Ok(store)
}

/// Lists the bucket root once so a missing bucket fails at startup instead of
/// on the first upload.
async fn probe_bucket(store: &dyn ObjectStore, bucket: &str) -> Result<()> {
    match store.list(None).try_next().await {
        Ok(_) => Ok(()),
        Err(object_store::Error::NotFound { .. }) => {
            Err(StoreError::BucketNotFound(bucket.to_string()))
        }
        Err(err) if mentions_missing_bucket(&err) => {
            Err(StoreError::BucketNotFound(bucket.to_string()))
        }
        Err(err) => Err(err.into()),
    }
}

// S3 implementations disagree on how a missing bucket surfaces; MinIO reports
// a generic error whose message carries the NoSuchBucket code.
fn mentions_missing_bucket(err: &object_store::Error) -> bool {
    let msg = err.to_string();
    msg.contains("NoSuchBucket") || (msg.contains("bucket") && msg.contains("not"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generic_error(text: &str) -> object_store::Error {
        object_store::Error::Generic {
            store: "S3",
            source: text.to_string().into(),
        }
    }

    #[test]
    fn test_missing_bucket_detection() {
        assert!(mentions_missing_bucket(&generic_error(
            "Client error with status 404: NoSuchBucket"
        )));
        assert!(mentions_missing_bucket(&generic_error(
            "the specified bucket does not exist"
        )));
        assert!(!mentions_missing_bucket(&generic_error(
            "connection refused"
        )));
    }

    #[test]
    fn test_config_defaults_to_memory() {
        assert!(matches!(StoreConfig::default(), StoreConfig::Memory));
    }
}
