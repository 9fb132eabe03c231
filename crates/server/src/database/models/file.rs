use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::database::types::DUuid;
use crate::database::Database;

/// Metadata for an uploaded file.
///
/// `name` is the mutable display name; `key` is the immutable storage
/// locator in the blob store. The two are decoupled so renames never move
/// bytes.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct File {
    pub id: DUuid,
    pub user_id: String,
    pub name: String,
    pub key: String,
    pub size: i64,
    pub mime: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl File {
    /// Persist metadata for a blob already written to storage.
    pub async fn create(
        user_id: &str,
        name: &str,
        key: &str,
        size: i64,
        mime: &str,
        db: &Database,
    ) -> Result<File, sqlx::Error> {
        let id = DUuid::new();
        let now = OffsetDateTime::now_utc();

        sqlx::query(
            r#"
            INSERT INTO files (id, user_id, name, key, size, mime, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
        )
        .bind(id)
        .bind(user_id)
        .bind(name)
        .bind(key)
        .bind(size)
        .bind(mime)
        .bind(now)
        .execute(&**db)
        .await?;

        Self::get(*id, db).await?.ok_or(sqlx::Error::RowNotFound)
    }

    /// Get file metadata by id, regardless of owner.
    pub async fn get(id: Uuid, db: &Database) -> Result<Option<File>, sqlx::Error> {
        let id = DUuid::from(id);
        sqlx::query_as::<_, File>(
            r#"
            SELECT id, user_id, name, key, size, mime, created_at
            FROM files
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&**db)
        .await
    }

    /// List a user's files, newest first.
    pub async fn list_for_user(user_id: &str, db: &Database) -> Result<Vec<File>, sqlx::Error> {
        sqlx::query_as::<_, File>(
            r#"
            SELECT id, user_id, name, key, size, mime, created_at
            FROM files
            WHERE user_id = ?1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&**db)
        .await
    }

    /// Change the display name in a single write scoped by owner.
    pub async fn rename_owned(
        id: Uuid,
        user_id: &str,
        name: &str,
        db: &Database,
    ) -> Result<bool, sqlx::Error> {
        let id = DUuid::from(id);
        let result = sqlx::query("UPDATE files SET name = ?1 WHERE id = ?2 AND user_id = ?3")
            .bind(name)
            .bind(id)
            .bind(user_id)
            .execute(&**db)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete the metadata row in a single write scoped by owner.
    pub async fn delete_owned(id: Uuid, user_id: &str, db: &Database) -> Result<bool, sqlx::Error> {
        let id = DUuid::from(id);
        let result = sqlx::query("DELETE FROM files WHERE id = ?1 AND user_id = ?2")
            .bind(id)
            .bind(user_id)
            .execute(&**db)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn count_for_user(user_id: &str, db: &Database) -> Result<i64, sqlx::Error> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM files WHERE user_id = ?1")
            .bind(user_id)
            .fetch_one(&**db)
            .await?;
        Ok(count.0)
    }

    /// Total bytes stored across all of a user's files.
    pub async fn storage_used(user_id: &str, db: &Database) -> Result<i64, sqlx::Error> {
        let sum: (i64,) =
            sqlx::query_as("SELECT COALESCE(SUM(size), 0) FROM files WHERE user_id = ?1")
                .bind(user_id)
                .fetch_one(&**db)
                .await?;
        Ok(sum.0)
    }
}
