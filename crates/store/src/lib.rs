//! Object storage capability for the Paperless vault.
//!
//! [`BlobStore`] writes, reads, and deletes byte blobs under caller-chosen
//! string keys, backed by memory, local filesystem, or S3-compatible storage.
//! [`UrlSigner`] mints and verifies the time-limited download URLs that the
//! public gateway honors without any further authorization.

mod backend;
mod blob_store;
mod error;
mod signer;

pub use backend::StoreConfig;
pub use blob_store::BlobStore;
pub use error::{Result, StoreError};
pub use signer::{SignedDownload, UrlSigner};
