use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::database::types::DUuid;
use crate::database::Database;

/// A short text note owned by a single user.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Note {
    pub id: DUuid,
    pub user_id: String,
    pub title: String,
    pub content: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

/// id + title projection for summary views.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct NoteSummary {
    pub id: DUuid,
    pub title: String,
}

impl Note {
    /// Insert a new note owned by `user_id`.
    pub async fn create(
        user_id: &str,
        title: &str,
        content: &str,
        db: &Database,
    ) -> Result<Note, sqlx::Error> {
        let id = DUuid::new();
        let now = OffsetDateTime::now_utc();

        sqlx::query(
            r#"
            INSERT INTO notes (id, user_id, title, content, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(id)
        .bind(user_id)
        .bind(title)
        .bind(content)
        .bind(now)
        .bind(now)
        .execute(&**db)
        .await?;

        Self::get(*id, db).await?.ok_or(sqlx::Error::RowNotFound)
    }

    /// Get a note by id, regardless of owner.
    pub async fn get(id: Uuid, db: &Database) -> Result<Option<Note>, sqlx::Error> {
        let id = DUuid::from(id);
        sqlx::query_as::<_, Note>(
            r#"
            SELECT id, user_id, title, content, created_at, updated_at
            FROM notes
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&**db)
        .await
    }

    /// Overwrite title and content in a single write scoped by owner.
    ///
    /// Returns false when no row matched (absent or foreign), leaving the
    /// caller to classify which.
    pub async fn update_owned(
        id: Uuid,
        user_id: &str,
        title: &str,
        content: &str,
        db: &Database,
    ) -> Result<bool, sqlx::Error> {
        let id = DUuid::from(id);
        let now = OffsetDateTime::now_utc();
        let result = sqlx::query(
            r#"
            UPDATE notes
            SET title = ?1, content = ?2, updated_at = ?3
            WHERE id = ?4 AND user_id = ?5
            "#,
        )
        .bind(title)
        .bind(content)
        .bind(now)
        .bind(id)
        .bind(user_id)
        .execute(&**db)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Hard-delete a note in a single write scoped by owner.
    pub async fn delete_owned(id: Uuid, user_id: &str, db: &Database) -> Result<bool, sqlx::Error> {
        let id = DUuid::from(id);
        let result = sqlx::query("DELETE FROM notes WHERE id = ?1 AND user_id = ?2")
            .bind(id)
            .bind(user_id)
            .execute(&**db)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// List a user's notes, most recently modified first, optionally filtered
    /// by a case-insensitive substring match against title or content.
    pub async fn list_for_user(
        user_id: &str,
        query: Option<&str>,
        db: &Database,
    ) -> Result<Vec<Note>, sqlx::Error> {
        match query.map(str::trim).filter(|q| !q.is_empty()) {
            Some(q) => {
                let pattern = format!("%{}%", escape_like(q));
                sqlx::query_as::<_, Note>(
                    r#"
                    SELECT id, user_id, title, content, created_at, updated_at
                    FROM notes
                    WHERE user_id = ?1
                      AND (title LIKE ?2 ESCAPE '\' OR content LIKE ?2 ESCAPE '\')
                    ORDER BY updated_at DESC
                    "#,
                )
                .bind(user_id)
                .bind(pattern)
                .fetch_all(&**db)
                .await
            }
            None => {
                sqlx::query_as::<_, Note>(
                    r#"
                    SELECT id, user_id, title, content, created_at, updated_at
                    FROM notes
                    WHERE user_id = ?1
                    ORDER BY updated_at DESC
                    "#,
                )
                .bind(user_id)
                .fetch_all(&**db)
                .await
            }
        }
    }

    /// The user's most recently modified notes, projected to id + title.
    pub async fn recent_for_user(
        user_id: &str,
        limit: u32,
        db: &Database,
    ) -> Result<Vec<NoteSummary>, sqlx::Error> {
        sqlx::query_as::<_, NoteSummary>(
            r#"
            SELECT id, title
            FROM notes
            WHERE user_id = ?1
            ORDER BY updated_at DESC
            LIMIT ?2
            "#,
        )
        .bind(user_id)
        .bind(limit as i64)
        .fetch_all(&**db)
        .await
    }

    pub async fn count_for_user(user_id: &str, db: &Database) -> Result<i64, sqlx::Error> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM notes WHERE user_id = ?1")
            .bind(user_id)
            .fetch_one(&**db)
            .await?;
        Ok(count.0)
    }
}

/// Escape LIKE wildcards so user input matches literally.
fn escape_like(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
