//! File lifecycle operations: upload, rename, delete, download, listing.

use std::time::Duration;

use bytes::Bytes;
use store::{BlobStore, UrlSigner};
use time::OffsetDateTime;
use url::Url;
use uuid::Uuid;

use crate::database::models::File;
use crate::database::Database;
use crate::guard::{self, Deny};
use crate::vault::{Result, VaultError};

/// Upload-time validation limits.
#[derive(Debug, Clone)]
pub struct UploadPolicy {
    /// MIME allow-list checked against the declared content type.
    pub allowed_types: Vec<String>,
    /// Per-file size ceiling in bytes.
    pub max_upload_bytes: i64,
    /// Per-account cumulative storage ceiling in bytes.
    pub storage_limit_bytes: i64,
}

impl UploadPolicy {
    /// The stock allow-list: documents, plain text, common images, zip.
    pub fn default_allowed_types() -> Vec<String> {
        [
            "application/pdf",
            "application/msword",
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
            "application/vnd.openxmlformats-officedocument.presentationml.presentation",
            "text/plain",
            "image/jpeg",
            "image/png",
            "image/webp",
            "image/gif",
            "application/zip",
        ]
        .into_iter()
        .map(String::from)
        .collect()
    }
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self {
            allowed_types: Self::default_allowed_types(),
            max_upload_bytes: 1024 * 1024,
            storage_limit_bytes: 1024 * 1024 * 1024,
        }
    }
}

/// Validate, store the blob, then persist metadata.
///
/// Order matters: nothing is written until validation passes, and the
/// metadata row is only created after the blob write succeeds, so a storage
/// failure leaves no partial state. (A metadata failure after a successful
/// blob write orphans the blob; accepted as a rare, bounded inconsistency.)
pub async fn upload_file(
    db: &Database,
    blobs: &BlobStore,
    policy: &UploadPolicy,
    user_id: &str,
    declared_name: &str,
    declared_type: &str,
    data: Bytes,
) -> Result<File> {
    if !policy.allowed_types.iter().any(|t| t == declared_type) {
        return Err(VaultError::UnsupportedType(declared_type.to_string()));
    }

    let size = data.len() as i64;
    if size > policy.max_upload_bytes {
        return Err(VaultError::SizeLimitExceeded);
    }

    let used = File::storage_used(user_id, db).await?;
    if used + size > policy.storage_limit_bytes {
        return Err(VaultError::QuotaExceeded);
    }

    // The display name is stored as declared; only the storage key gets the
    // sanitized form.
    let clean_name = sanitize_name(declared_name);
    let key = storage_key(user_id, &clean_name);

    blobs.put(&key, data).await?;

    let file = File::create(user_id, declared_name, &key, size, declared_type, db).await?;
    tracing::info!(file_id = %file.id, key = %key, size = size, "file uploaded");
    Ok(file)
}

/// Change a file's display name. The storage key never moves.
pub async fn rename_file(db: &Database, user_id: &str, id: Uuid, new_name: &str) -> Result<File> {
    let new_name = new_name.trim();
    if new_name.is_empty() {
        return Err(VaultError::Validation("Invalid name".into()));
    }

    if !File::rename_owned(id, user_id, new_name, db).await? {
        return Err(classify_miss(db, user_id, id).await?);
    }

    File::get(id, db).await?.ok_or(VaultError::NotFound)
}

/// Delete a file: blob first, then the metadata row.
///
/// A blob-store failure aborts before the row is touched, so metadata never
/// claims a file whose bytes may be gone, and bytes are never stranded by a
/// half-finished delete.
pub async fn delete_file(db: &Database, blobs: &BlobStore, user_id: &str, id: Uuid) -> Result<()> {
    let file = File::get(id, db).await?;
    guard::authorize(Some(user_id), file.as_ref())?;
    let file = file.ok_or(VaultError::NotFound)?;

    blobs.delete(&file.key).await?;

    // Conditional delete: if the row vanished since the read, the outcome is
    // the same (file gone) and re-deleting the blob was a no-op anyway.
    File::delete_owned(id, user_id, db).await?;
    tracing::info!(file_id = %id, key = %file.key, "file deleted");
    Ok(())
}

/// Mint a short-lived signed URL for downloading the caller's file.
pub async fn download_url(
    db: &Database,
    signer: &UrlSigner,
    user_id: &str,
    id: Uuid,
    validity: Duration,
) -> Result<Url> {
    let file = File::get(id, db).await?;
    guard::authorize(Some(user_id), file.as_ref())?;
    let file = file.ok_or(VaultError::NotFound)?;

    Ok(signer.sign(&file.key, &file.name, validity))
}

/// List the caller's files, newest first.
pub async fn list_files(db: &Database, user_id: &str) -> Result<Vec<File>> {
    Ok(File::list_for_user(user_id, db).await?)
}

/// Total bytes the caller has stored.
pub async fn storage_used(db: &Database, user_id: &str) -> Result<i64> {
    Ok(File::storage_used(user_id, db).await?)
}

/// Replace every character outside `[A-Za-z0-9._-]` with `_` so nothing
/// path- or key-unsafe reaches the storage key.
pub fn sanitize_name(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Derive a storage key unique per upload.
///
/// The owner prefix keeps ownership recoverable from the key alone; the
/// millisecond timestamp keeps keys roughly chronological; the random suffix
/// rules out same-millisecond collisions between concurrent uploads.
fn storage_key(user_id: &str, clean_name: &str) -> String {
    let millis = OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000;
    let suffix = Uuid::new_v4().simple().to_string();
    format!("{}/{}-{}-{}", user_id, millis, &suffix[..8], clean_name)
}

async fn classify_miss(
    db: &Database,
    user_id: &str,
    id: Uuid,
) -> std::result::Result<VaultError, sqlx::Error> {
    let file = File::get(id, db).await?;
    Ok(match guard::authorize(Some(user_id), file.as_ref()) {
        Err(deny) => deny.into(),
        Ok(()) => Deny::NotFound.into(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_name() {
        assert_eq!(sanitize_name("report.pdf"), "report.pdf");
        assert_eq!(sanitize_name("a b!.txt"), "a_b_.txt");
        assert_eq!(sanitize_name("../../etc/passwd"), ".._.._etc_passwd");
        assert_eq!(sanitize_name("snake_case-kept.tar"), "snake_case-kept.tar");
        assert_eq!(sanitize_name("héllo.png"), "h_llo.png");
    }

    #[test]
    fn test_storage_key_shape() {
        let key = storage_key("user-1", "a_b_.txt");
        assert!(key.starts_with("user-1/"));
        assert!(key.ends_with("-a_b_.txt"));

        // Same inputs never collide.
        assert_ne!(key, storage_key("user-1", "a_b_.txt"));
    }
}
