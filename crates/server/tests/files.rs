//! Integration tests for file upload, rename, delete, and signed downloads

mod common;

use bytes::Bytes;
use paperless_server::vault::{files, VaultError};
use std::time::Duration;
use uuid::Uuid;

#[tokio::test]
async fn test_upload_preserves_name_and_sanitizes_key() {
    let env = common::setup().await;

    let file = files::upload_file(
        &env.db,
        &env.blobs,
        &env.policy,
        common::USER_A,
        "a b!.txt",
        "text/plain",
        Bytes::from("0123456789"),
    )
    .await
    .unwrap();

    // Display name is as declared; only the key gets the sanitized form
    assert_eq!(file.name, "a b!.txt");
    assert!(file.key.starts_with("user-a/"));
    assert!(file.key.ends_with("-a_b_.txt"));
    assert_eq!(file.size, 10);
    assert_eq!(file.mime, "text/plain");

    assert!(env.blobs.exists(&file.key).await.unwrap());
    assert_eq!(
        files::storage_used(&env.db, common::USER_A).await.unwrap(),
        10
    );
}

#[tokio::test]
async fn test_upload_rejects_disallowed_type() {
    let env = common::setup().await;

    let err = files::upload_file(
        &env.db,
        &env.blobs,
        &env.policy,
        common::USER_A,
        "page.html",
        "text/html",
        Bytes::from("<html>"),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, VaultError::UnsupportedType(_)));

    // Validation failures leave no trace: no metadata, no bytes
    assert!(files::list_files(&env.db, common::USER_A)
        .await
        .unwrap()
        .is_empty());
    assert_eq!(
        files::storage_used(&env.db, common::USER_A).await.unwrap(),
        0
    );
}

#[tokio::test]
async fn test_upload_rejects_oversize() {
    let env = common::setup().await;
    let policy = common::tiny_policy();

    let err = files::upload_file(
        &env.db,
        &env.blobs,
        &policy,
        common::USER_A,
        "big.txt",
        "text/plain",
        Bytes::from(vec![0u8; 17]),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, VaultError::SizeLimitExceeded));

    assert!(files::list_files(&env.db, common::USER_A)
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn test_upload_enforces_cumulative_quota() {
    let env = common::setup().await;
    let policy = common::tiny_policy();

    // Two 16-byte uploads exactly fill the 32-byte quota
    for name in ["one.txt", "two.txt"] {
        files::upload_file(
            &env.db,
            &env.blobs,
            &policy,
            common::USER_A,
            name,
            "text/plain",
            Bytes::from(vec![b'x'; 16]),
        )
        .await
        .unwrap();
    }

    let err = files::upload_file(
        &env.db,
        &env.blobs,
        &policy,
        common::USER_A,
        "three.txt",
        "text/plain",
        Bytes::from("x"),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, VaultError::QuotaExceeded));

    // Another user's quota is unaffected
    files::upload_file(
        &env.db,
        &env.blobs,
        &policy,
        common::USER_B,
        "mine.txt",
        "text/plain",
        Bytes::from("y"),
    )
    .await
    .unwrap();
}

#[tokio::test]
async fn test_rename_is_metadata_only() {
    let env = common::setup().await;

    let file = files::upload_file(
        &env.db,
        &env.blobs,
        &env.policy,
        common::USER_A,
        "draft.pdf",
        "application/pdf",
        Bytes::from("pdf bytes"),
    )
    .await
    .unwrap();

    let renamed = files::rename_file(&env.db, common::USER_A, *file.id, "final.pdf")
        .await
        .unwrap();
    assert_eq!(renamed.name, "final.pdf");
    assert_eq!(renamed.key, file.key);
    assert!(env.blobs.exists(&file.key).await.unwrap());

    let err = files::rename_file(&env.db, common::USER_A, *file.id, "  ")
        .await
        .unwrap_err();
    assert!(matches!(err, VaultError::Validation(_)));

    let err = files::rename_file(&env.db, common::USER_B, *file.id, "stolen.pdf")
        .await
        .unwrap_err();
    assert!(matches!(err, VaultError::Forbidden));
}

#[tokio::test]
async fn test_delete_removes_blob_and_metadata() {
    let env = common::setup().await;

    let file = files::upload_file(
        &env.db,
        &env.blobs,
        &env.policy,
        common::USER_A,
        "gone.txt",
        "text/plain",
        Bytes::from("bye"),
    )
    .await
    .unwrap();

    files::delete_file(&env.db, &env.blobs, common::USER_A, *file.id)
        .await
        .unwrap();

    assert!(!env.blobs.exists(&file.key).await.unwrap());
    assert!(files::list_files(&env.db, common::USER_A)
        .await
        .unwrap()
        .is_empty());

    let err = files::delete_file(&env.db, &env.blobs, common::USER_A, *file.id)
        .await
        .unwrap_err();
    assert!(matches!(err, VaultError::NotFound));

    let err = files::delete_file(&env.db, &env.blobs, common::USER_A, Uuid::new_v4())
        .await
        .unwrap_err();
    assert!(matches!(err, VaultError::NotFound));
}

#[tokio::test]
async fn test_foreign_delete_leaves_everything_in_place() {
    let env = common::setup().await;

    let file = files::upload_file(
        &env.db,
        &env.blobs,
        &env.policy,
        common::USER_A,
        "keep.txt",
        "text/plain",
        Bytes::from("mine"),
    )
    .await
    .unwrap();

    let err = files::delete_file(&env.db, &env.blobs, common::USER_B, *file.id)
        .await
        .unwrap_err();
    assert!(matches!(err, VaultError::Forbidden));

    assert!(env.blobs.exists(&file.key).await.unwrap());
    assert_eq!(
        files::list_files(&env.db, common::USER_A).await.unwrap().len(),
        1
    );
}

#[tokio::test]
async fn test_download_url_round_trips_through_signer() {
    let env = common::setup().await;

    let file = files::upload_file(
        &env.db,
        &env.blobs,
        &env.policy,
        common::USER_A,
        "a b!.txt",
        "text/plain",
        Bytes::from("0123456789"),
    )
    .await
    .unwrap();

    let url = files::download_url(
        &env.db,
        &env.signer,
        common::USER_A,
        *file.id,
        Duration::from_secs(60),
    )
    .await
    .unwrap();

    assert_eq!(url.path(), format!("/dl/{}", file.key));

    let mut expires = None;
    let mut name = None;
    let mut sig = None;
    for (k, v) in url.query_pairs() {
        match k.as_ref() {
            "expires" => expires = v.parse::<i64>().ok(),
            "name" => name = Some(v.into_owned()),
            "sig" => sig = Some(v.into_owned()),
            _ => {}
        }
    }
    let params = store::SignedDownload {
        expires: expires.unwrap(),
        name: name.unwrap(),
        sig: sig.unwrap(),
    };
    assert_eq!(params.name, "a b!.txt");
    assert!(env.signer.verify(&file.key, &params));

    // Owner-only
    let err = files::download_url(
        &env.db,
        &env.signer,
        common::USER_B,
        *file.id,
        Duration::from_secs(60),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, VaultError::Forbidden));
}

#[tokio::test]
async fn test_list_files_newest_first() {
    let env = common::setup().await;

    for name in ["first.txt", "second.txt", "third.txt"] {
        files::upload_file(
            &env.db,
            &env.blobs,
            &env.policy,
            common::USER_A,
            name,
            "text/plain",
            Bytes::from("x"),
        )
        .await
        .unwrap();
        tokio::time::sleep(Duration::from_millis(2)).await;
    }

    let listed = files::list_files(&env.db, common::USER_A).await.unwrap();
    let names: Vec<_> = listed.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["third.txt", "second.txt", "first.txt"]);
}
