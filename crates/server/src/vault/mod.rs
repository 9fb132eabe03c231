//! Resource lifecycle operations: the owner-guarded note and file
//! operations plus share-link issuance and resolution.
//!
//! Handlers stay thin; everything that touches the database or the blob
//! store on a caller's behalf lives here.

pub mod files;
pub mod home;
pub mod notes;
pub mod shares;

use crate::guard::Deny;

/// Error taxonomy for vault operations.
///
/// Maps onto the HTTP surface as 401 (Unauthenticated), 403 (Forbidden),
/// 404 (NotFound), 400 (the validation variants), and 500 (Storage,
/// Database).
#[derive(Debug, thiserror::Error)]
pub enum VaultError {
    #[error("Unauthorized")]
    Unauthenticated,

    #[error("Forbidden")]
    Forbidden,

    #[error("Not found")]
    NotFound,

    #[error("{0}")]
    Validation(String),

    #[error("Unsupported file type")]
    UnsupportedType(String),

    #[error("File exceeds size limit")]
    SizeLimitExceeded,

    #[error("Storage quota exceeded")]
    QuotaExceeded,

    #[error("storage error: {0}")]
    Storage(#[from] store::StoreError),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl From<Deny> for VaultError {
    fn from(deny: Deny) -> Self {
        match deny {
            Deny::Unauthenticated => VaultError::Unauthenticated,
            Deny::NotFound => VaultError::NotFound,
            Deny::Forbidden => VaultError::Forbidden,
        }
    }
}

pub type Result<T> = std::result::Result<T, VaultError>;
