use rand::rngs::OsRng;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::{Duration, OffsetDateTime};

use crate::database::Database;

/// An authenticated session minted by the identity provider.
///
/// This service only consumes sessions: a bearer token resolves to a stable
/// user id or nothing. `create` exists for the dev CLI and tests.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Session {
    pub token: String,
    pub user_id: String,
    #[serde(with = "time::serde::rfc3339::option")]
    pub expires_at: Option<OffsetDateTime>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl Session {
    /// Mint a session for `user_id`, optionally expiring after `ttl`.
    pub async fn create(
        user_id: &str,
        ttl: Option<Duration>,
        db: &Database,
    ) -> Result<Session, sqlx::Error> {
        let mut raw = [0u8; 32];
        OsRng.fill_bytes(&mut raw);
        let token = hex::encode(raw);

        let now = OffsetDateTime::now_utc();
        let expires_at = ttl.map(|ttl| now + ttl);

        sqlx::query(
            r#"
            INSERT INTO sessions (token, user_id, expires_at, created_at)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(&token)
        .bind(user_id)
        .bind(expires_at)
        .bind(now)
        .execute(&**db)
        .await?;

        Ok(Session {
            token,
            user_id: user_id.to_string(),
            expires_at,
            created_at: now,
        })
    }

    /// Resolve a bearer token to a user id, honoring expiry.
    pub async fn resolve(token: &str, db: &Database) -> Result<Option<String>, sqlx::Error> {
        let session = sqlx::query_as::<_, Session>(
            r#"
            SELECT token, user_id, expires_at, created_at
            FROM sessions
            WHERE token = ?1
            "#,
        )
        .bind(token)
        .fetch_optional(&**db)
        .await?;

        let now = OffsetDateTime::now_utc();
        Ok(session
            .filter(|s| s.expires_at.map(|at| at >= now).unwrap_or(true))
            .map(|s| s.user_id))
    }
}
