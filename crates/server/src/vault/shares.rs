//! Share-link issuance, resolution, and revocation.
//!
//! A share token is a bearer capability: redemption never consults session
//! identity or ownership. Issuance and revocation, by contrast, are
//! owner-guarded.

use rand::rngs::OsRng;
use rand::RngCore;
use time::{Duration, OffsetDateTime};
use uuid::Uuid;

use crate::database::models::{File, Note, ShareToken};
use crate::database::types::ShareKind;
use crate::database::Database;
use crate::guard;
use crate::vault::{Result, VaultError};

/// A resource reached through a share token.
#[derive(Debug, Clone)]
pub enum SharedResource {
    Note(Note),
    File(File),
}

/// Mint a share token for a resource the caller owns.
///
/// `expires_in_hours` may be fractional; absent means the token never
/// expires. The token carries 256 bits from the OS random source.
pub async fn create_share(
    db: &Database,
    user_id: &str,
    kind: ShareKind,
    resource_id: Uuid,
    expires_in_hours: Option<f64>,
) -> Result<ShareToken> {
    // Issuance is owner-guarded: no minting capabilities for foreign or
    // nonexistent resources.
    match kind {
        ShareKind::Note => {
            let note = Note::get(resource_id, db).await?;
            guard::authorize(Some(user_id), note.as_ref())?;
        }
        ShareKind::File => {
            let file = File::get(resource_id, db).await?;
            guard::authorize(Some(user_id), file.as_ref())?;
        }
    }

    let expires_at = match expires_in_hours {
        Some(hours) => {
            if !hours.is_finite() || hours < 0.0 {
                return Err(VaultError::Validation("Invalid expiry".into()));
            }
            Some(OffsetDateTime::now_utc() + Duration::seconds_f64(hours * 3600.0))
        }
        None => None,
    };

    let mut raw = [0u8; 32];
    OsRng.fill_bytes(&mut raw);
    let token = hex::encode(raw);

    let share = ShareToken::create(
        &token,
        kind,
        &resource_id.to_string(),
        user_id,
        expires_at,
        db,
    )
    .await?;
    tracing::info!(kind = %kind, resource_id = %resource_id, "share token issued");
    Ok(share)
}

/// Resolve a share token against the current clock.
pub async fn resolve_share(
    db: &Database,
    token: &str,
    expected: ShareKind,
) -> Result<SharedResource> {
    resolve_share_at(db, token, expected, OffsetDateTime::now_utc()).await
}

/// Resolve a share token against an explicit clock.
///
/// Every failure mode — unknown token, kind mismatch, expiry, dangling
/// resource pointer — collapses to NotFound; a public caller learns nothing
/// beyond "this link does not work".
pub async fn resolve_share_at(
    db: &Database,
    token: &str,
    expected: ShareKind,
    now: OffsetDateTime,
) -> Result<SharedResource> {
    let share = ShareToken::get(token, db).await?.ok_or(VaultError::NotFound)?;

    if share.kind != expected {
        return Err(VaultError::NotFound);
    }
    if let Some(expires_at) = share.expires_at {
        if expires_at < now {
            return Err(VaultError::NotFound);
        }
    }

    // The pointer is polymorphic and unchecked at write time; a deleted
    // resource leaves it dangling, which reads as not-found.
    let resource_id = Uuid::parse_str(&share.resource_id).map_err(|_| VaultError::NotFound)?;
    match share.kind {
        ShareKind::Note => Note::get(resource_id, db)
            .await?
            .map(SharedResource::Note)
            .ok_or(VaultError::NotFound),
        ShareKind::File => File::get(resource_id, db)
            .await?
            .map(SharedResource::File)
            .ok_or(VaultError::NotFound),
    }
}

/// Revoke a share token before its natural expiry.
///
/// Guarded by ownership of the underlying resource; when that resource is
/// already gone the issuer may still remove the dangling token.
pub async fn revoke_share(db: &Database, user_id: &str, token: &str) -> Result<()> {
    let share = ShareToken::get(token, db).await?.ok_or(VaultError::NotFound)?;

    let resource_id = Uuid::parse_str(&share.resource_id).ok();
    let owner = match (share.kind, resource_id) {
        (ShareKind::Note, Some(id)) => Note::get(id, db).await?.map(|n| n.user_id),
        (ShareKind::File, Some(id)) => File::get(id, db).await?.map(|f| f.user_id),
        (_, None) => None,
    };

    let allowed = match owner {
        Some(owner) => owner == user_id,
        None => share.user_id == user_id,
    };
    if !allowed {
        return Err(VaultError::Forbidden);
    }

    ShareToken::delete(token, db).await?;
    tracing::info!(kind = %share.kind, "share token revoked");
    Ok(())
}
