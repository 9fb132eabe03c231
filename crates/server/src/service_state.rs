use std::sync::Arc;
use std::time::Duration;

use axum::extract::FromRef;
use store::{BlobStore, UrlSigner};
use url::Url;

use crate::database::{Database, DatabaseSetupError};
use crate::service_config::Config;
use crate::vault::files::UploadPolicy;

/// Main service state - shared by the API and gateway servers.
#[derive(Clone)]
pub struct State {
    database: Database,
    blobs: BlobStore,
    signer: UrlSigner,
    policy: Arc<UploadPolicy>,
    public_url: Url,
    download_ttl: Duration,
}

impl State {
    pub async fn from_config(config: &Config) -> Result<Self, StateSetupError> {
        // 1. Setup database
        let sqlite_database_url = match config.sqlite_path {
            Some(ref path) => Url::parse(&format!("sqlite://{}", path.display()))
                .map_err(|_| StateSetupError::InvalidDatabaseUrl),
            // otherwise just set up an in-memory database
            None => Url::parse("sqlite::memory:").map_err(|_| StateSetupError::InvalidDatabaseUrl),
        }?;
        tracing::info!("Database URL: {:?}", sqlite_database_url);
        let database = Database::connect(&sqlite_database_url).await?;

        // 2. Setup blob store
        let blobs = BlobStore::new(config.blob_store.clone()).await?;

        // 3. Setup download URL signer
        let signer = match &config.signing_key {
            Some(secret_hex) => UrlSigner::from_hex(config.public_url.clone(), secret_hex)?,
            None => {
                tracing::warn!(
                    "no signing_key configured; download URLs will not survive a restart"
                );
                UrlSigner::generate(config.public_url.clone())
            }
        };

        Ok(Self {
            database,
            blobs,
            signer,
            policy: Arc::new(config.upload_policy()),
            public_url: config.public_url.clone(),
            download_ttl: Duration::from_secs(config.download_url_ttl_secs),
        })
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn blobs(&self) -> &BlobStore {
        &self.blobs
    }

    pub fn signer(&self) -> &UrlSigner {
        &self.signer
    }

    pub fn upload_policy(&self) -> &UploadPolicy {
        &self.policy
    }

    pub fn public_url(&self) -> &Url {
        &self.public_url
    }

    pub fn download_ttl(&self) -> Duration {
        self.download_ttl
    }

    /// Build the public URL for a share link.
    pub fn share_url(&self, kind: &str, token: &str) -> Url {
        let mut url = self.public_url.clone();
        url.set_path(&format!("/share/{}/{}", kind, token));
        url
    }
}

#[cfg(test)]
impl State {
    /// In-memory state (SQLite `:memory:` + memory blob store) for handler
    /// unit tests.
    pub(crate) async fn for_testing() -> Self {
        Self::from_config(&Config::default())
            .await
            .expect("in-memory state")
    }
}

impl AsRef<Database> for State {
    fn as_ref(&self) -> &Database {
        &self.database
    }
}

impl FromRef<State> for Database {
    fn from_ref(state: &State) -> Self {
        state.database.clone()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StateSetupError {
    #[error("Database setup error: {0}")]
    DatabaseSetupError(#[from] DatabaseSetupError),
    #[error("Invalid database URL")]
    InvalidDatabaseUrl,
    #[error("Blob store error: {0}")]
    BlobStoreError(#[from] store::StoreError),
}
