use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use store::StoreConfig;
use url::Url;

use crate::vault::files::UploadPolicy;

/// Service configuration, loadable from a TOML file. Every field has a
/// sensible default so an empty file (or none at all) yields a working
/// in-memory development setup.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Port for the API HTTP server (private, authenticated).
    pub api_port: u16,
    /// Port for the gateway HTTP server (public, read-only).
    pub gateway_port: u16,

    /// Path to a sqlite database; if not set an in-memory database is used.
    pub sqlite_path: Option<PathBuf>,

    /// Blob storage backend configuration.
    pub blob_store: StoreConfig,

    /// External gateway base URL, used for generating share and download
    /// links.
    pub public_url: Url,

    /// Log level directive (e.g. "info", "paperless_server=debug").
    pub log_level: String,
    /// Directory for log files (stdout only if not set).
    pub log_dir: Option<PathBuf>,

    /// MIME allow-list for uploads.
    pub allowed_types: Vec<String>,
    /// Per-file upload size ceiling in bytes.
    pub max_upload_bytes: i64,
    /// Per-account cumulative storage ceiling in bytes.
    pub storage_limit_bytes: i64,

    /// Validity window for signed download URLs, in seconds.
    pub download_url_ttl_secs: u64,
    /// 64-hex-char signing secret for download URLs; a random per-process
    /// key is used when absent (minted URLs stop verifying on restart).
    pub signing_key: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_port: 5430,
            gateway_port: 5431,
            sqlite_path: None,
            blob_store: StoreConfig::default(),
            public_url: Url::parse("http://localhost:5431").expect("static URL must parse"),
            log_level: "info".to_string(),
            log_dir: None,
            allowed_types: UploadPolicy::default_allowed_types(),
            max_upload_bytes: 1024 * 1024,
            storage_limit_bytes: 1024 * 1024 * 1024,
            download_url_ttl_secs: 60,
            signing_key: None,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file, or defaults when no path is
    /// given.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => {
                let raw = std::fs::read_to_string(path)
                    .map_err(|e| ConfigError::Unreadable(path.to_path_buf(), e))?;
                Ok(toml::from_str(&raw)?)
            }
            None => Ok(Self::default()),
        }
    }

    pub fn upload_policy(&self) -> UploadPolicy {
        UploadPolicy {
            allowed_types: self.allowed_types.clone(),
            max_upload_bytes: self.max_upload_bytes,
            storage_limit_bytes: self.storage_limit_bytes,
        }
    }

    pub fn tracing_level(&self) -> tracing::Level {
        self.log_level
            .parse()
            .unwrap_or(tracing::Level::INFO)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("unable to read config file {0}: {1}")]
    Unreadable(PathBuf, std::io::Error),
    #[error("invalid config file: {0}")]
    Invalid(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.max_upload_bytes, 1024 * 1024);
        assert_eq!(config.download_url_ttl_secs, 60);
        assert_eq!(config.allowed_types.len(), 10);
        assert!(config.sqlite_path.is_none());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("paperless.toml");
        std::fs::write(&path, "gateway_port = 8443\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.gateway_port, 8443);
        assert_eq!(config.api_port, 5430);

        assert!(Config::load(Some(&dir.path().join("missing.toml"))).is_err());
        assert_eq!(Config::load(None).unwrap().api_port, 5430);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
            api_port = 9000
            max_upload_bytes = 2048

            [blob_store]
            type = "memory"
            "#,
        )
        .unwrap();

        assert_eq!(config.api_port, 9000);
        assert_eq!(config.max_upload_bytes, 2048);
        assert_eq!(config.gateway_port, 5431);
        assert_eq!(config.storage_limit_bytes, 1024 * 1024 * 1024);
    }
}
