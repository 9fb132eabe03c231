use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;

use crate::database::types::ShareKind;
use crate::database::Database;

/// A bearer capability granting read access to one resource.
///
/// `resource_id` points into notes or files depending on `kind`; it is not a
/// foreign key and may dangle once the resource is deleted. `user_id` records
/// the issuer but plays no part in redemption.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ShareToken {
    pub token: String,
    pub kind: ShareKind,
    pub resource_id: String,
    pub user_id: String,
    #[serde(with = "time::serde::rfc3339::option")]
    pub expires_at: Option<OffsetDateTime>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl ShareToken {
    /// Persist a freshly minted token.
    pub async fn create(
        token: &str,
        kind: ShareKind,
        resource_id: &str,
        user_id: &str,
        expires_at: Option<OffsetDateTime>,
        db: &Database,
    ) -> Result<ShareToken, sqlx::Error> {
        let now = OffsetDateTime::now_utc();

        sqlx::query(
            r#"
            INSERT INTO share_tokens (token, kind, resource_id, user_id, expires_at, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(token)
        .bind(kind)
        .bind(resource_id)
        .bind(user_id)
        .bind(expires_at)
        .bind(now)
        .execute(&**db)
        .await?;

        Self::get(token, db).await?.ok_or(sqlx::Error::RowNotFound)
    }

    /// Look up a token by exact, case-sensitive match.
    pub async fn get(token: &str, db: &Database) -> Result<Option<ShareToken>, sqlx::Error> {
        sqlx::query_as::<_, ShareToken>(
            r#"
            SELECT token, kind, resource_id, user_id, expires_at, created_at
            FROM share_tokens
            WHERE token = ?1
            "#,
        )
        .bind(token)
        .fetch_optional(&**db)
        .await
    }

    /// Remove a token. Returns false when it did not exist.
    pub async fn delete(token: &str, db: &Database) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM share_tokens WHERE token = ?1")
            .bind(token)
            .execute(&**db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
