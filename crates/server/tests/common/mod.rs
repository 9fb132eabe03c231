//! Shared test utilities for vault integration tests
#![allow(dead_code)]

use paperless_server::vault::files::UploadPolicy;
use paperless_server::Database;
use store::{BlobStore, UrlSigner};
use url::Url;

pub const USER_A: &str = "user-a";
pub const USER_B: &str = "user-b";

pub struct TestEnv {
    pub db: Database,
    pub blobs: BlobStore,
    pub signer: UrlSigner,
    pub policy: UploadPolicy,
}

/// Set up a fresh in-memory environment: empty database, empty blob store,
/// per-run signing key.
pub async fn setup() -> TestEnv {
    let db = Database::memory().await.unwrap();
    let blobs = BlobStore::memory().await.unwrap();
    let signer = UrlSigner::generate(Url::parse("http://localhost:5431").unwrap());

    TestEnv {
        db,
        blobs,
        signer,
        policy: UploadPolicy::default(),
    }
}

/// A policy with small limits so tests can hit them without large payloads.
pub fn tiny_policy() -> UploadPolicy {
    UploadPolicy {
        max_upload_bytes: 16,
        storage_limit_bytes: 32,
        ..UploadPolicy::default()
    }
}
