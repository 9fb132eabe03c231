//! Integration tests for share-link issuance, resolution, and revocation

mod common;

use bytes::Bytes;
use paperless_server::vault::shares::{self, SharedResource};
use paperless_server::vault::{files, notes, VaultError};
use paperless_server::ShareKind;
use time::{Duration, OffsetDateTime};
use uuid::Uuid;

#[tokio::test]
async fn test_note_share_round_trip() {
    let env = common::setup().await;

    let note = notes::create_note(&env.db, common::USER_A, "Shared", Some("visible"))
        .await
        .unwrap();

    let share = shares::create_share(&env.db, common::USER_A, ShareKind::Note, *note.id, None)
        .await
        .unwrap();
    assert_eq!(share.token.len(), 64);
    assert!(share.expires_at.is_none());

    // Redemption requires no identity
    let resolved = shares::resolve_share(&env.db, &share.token, ShareKind::Note)
        .await
        .unwrap();
    match resolved {
        SharedResource::Note(n) => assert_eq!(n.title, "Shared"),
        SharedResource::File(_) => panic!("expected a note"),
    }
}

#[tokio::test]
async fn test_share_requires_ownership_and_existence() {
    let env = common::setup().await;

    let note = notes::create_note(&env.db, common::USER_A, "Mine", None)
        .await
        .unwrap();

    let err = shares::create_share(&env.db, common::USER_B, ShareKind::Note, *note.id, None)
        .await
        .unwrap_err();
    assert!(matches!(err, VaultError::Forbidden));

    let err = shares::create_share(&env.db, common::USER_A, ShareKind::Note, Uuid::new_v4(), None)
        .await
        .unwrap_err();
    assert!(matches!(err, VaultError::NotFound));
}

#[tokio::test]
async fn test_share_rejects_invalid_expiry() {
    let env = common::setup().await;

    let note = notes::create_note(&env.db, common::USER_A, "Mine", None)
        .await
        .unwrap();

    for bad in [-1.0, f64::NAN, f64::INFINITY] {
        let err = shares::create_share(
            &env.db,
            common::USER_A,
            ShareKind::Note,
            *note.id,
            Some(bad),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, VaultError::Validation(_)));
    }
}

#[tokio::test]
async fn test_share_expiry_boundary() {
    let env = common::setup().await;

    let file = files::upload_file(
        &env.db,
        &env.blobs,
        &env.policy,
        common::USER_A,
        "shared.txt",
        "text/plain",
        Bytes::from("payload"),
    )
    .await
    .unwrap();

    let share = shares::create_share(
        &env.db,
        common::USER_A,
        ShareKind::File,
        *file.id,
        Some(24.0),
    )
    .await
    .unwrap();
    let expires_at = share.expires_at.unwrap();

    // Valid right up to and including the expiry instant
    let resolved = shares::resolve_share_at(&env.db, &share.token, ShareKind::File, expires_at)
        .await
        .unwrap();
    assert!(matches!(resolved, SharedResource::File(_)));

    // 23 hours in: still fine. 25 hours in: gone.
    let now = OffsetDateTime::now_utc();
    shares::resolve_share_at(&env.db, &share.token, ShareKind::File, now + Duration::hours(23))
        .await
        .unwrap();

    let err = shares::resolve_share_at(
        &env.db,
        &share.token,
        ShareKind::File,
        now + Duration::hours(25),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, VaultError::NotFound));
}

#[tokio::test]
async fn test_share_kind_binding() {
    let env = common::setup().await;

    let note = notes::create_note(&env.db, common::USER_A, "Typed", None)
        .await
        .unwrap();
    let share = shares::create_share(&env.db, common::USER_A, ShareKind::Note, *note.id, None)
        .await
        .unwrap();

    // A note token does not resolve through the file path
    let err = shares::resolve_share(&env.db, &share.token, ShareKind::File)
        .await
        .unwrap_err();
    assert!(matches!(err, VaultError::NotFound));
}

#[tokio::test]
async fn test_dangling_share_reads_as_not_found() {
    let env = common::setup().await;

    let note = notes::create_note(&env.db, common::USER_A, "Doomed", None)
        .await
        .unwrap();
    let share = shares::create_share(&env.db, common::USER_A, ShareKind::Note, *note.id, None)
        .await
        .unwrap();

    notes::delete_note(&env.db, common::USER_A, *note.id)
        .await
        .unwrap();

    let err = shares::resolve_share(&env.db, &share.token, ShareKind::Note)
        .await
        .unwrap_err();
    assert!(matches!(err, VaultError::NotFound));
}

#[tokio::test]
async fn test_unknown_and_truncated_tokens() {
    let env = common::setup().await;

    let err = shares::resolve_share(&env.db, "deadbeef", ShareKind::Note)
        .await
        .unwrap_err();
    assert!(matches!(err, VaultError::NotFound));

    let note = notes::create_note(&env.db, common::USER_A, "Guess me", None)
        .await
        .unwrap();
    let share = shares::create_share(&env.db, common::USER_A, ShareKind::Note, *note.id, None)
        .await
        .unwrap();

    let truncated = &share.token[..share.token.len() - 1];
    let err = shares::resolve_share(&env.db, truncated, ShareKind::Note)
        .await
        .unwrap_err();
    assert!(matches!(err, VaultError::NotFound));
}

#[tokio::test]
async fn test_revoke_share() {
    let env = common::setup().await;

    let note = notes::create_note(&env.db, common::USER_A, "Revocable", None)
        .await
        .unwrap();
    let share = shares::create_share(&env.db, common::USER_A, ShareKind::Note, *note.id, None)
        .await
        .unwrap();

    // Only the owner may revoke
    let err = shares::revoke_share(&env.db, common::USER_B, &share.token)
        .await
        .unwrap_err();
    assert!(matches!(err, VaultError::Forbidden));

    shares::revoke_share(&env.db, common::USER_A, &share.token)
        .await
        .unwrap();

    let err = shares::resolve_share(&env.db, &share.token, ShareKind::Note)
        .await
        .unwrap_err();
    assert!(matches!(err, VaultError::NotFound));

    // Revoking a token that no longer exists reads as absence
    let err = shares::revoke_share(&env.db, common::USER_A, &share.token)
        .await
        .unwrap_err();
    assert!(matches!(err, VaultError::NotFound));
}

#[tokio::test]
async fn test_revoke_dangling_share_falls_back_to_issuer() {
    let env = common::setup().await;

    let note = notes::create_note(&env.db, common::USER_A, "Doomed", None)
        .await
        .unwrap();
    let share = shares::create_share(&env.db, common::USER_A, ShareKind::Note, *note.id, None)
        .await
        .unwrap();
    notes::delete_note(&env.db, common::USER_A, *note.id)
        .await
        .unwrap();

    // The underlying resource is gone; the issuer may still clean up
    let err = shares::revoke_share(&env.db, common::USER_B, &share.token)
        .await
        .unwrap_err();
    assert!(matches!(err, VaultError::Forbidden));

    shares::revoke_share(&env.db, common::USER_A, &share.token)
        .await
        .unwrap();
}
