//! Identity resolution for API requests.
//!
//! Sessions are issued by the external identity provider; this layer only
//! consumes them. A request either resolves to a stable user id or it is
//! unauthenticated — nothing else about the session is inspected.

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use http::request::Parts;

use crate::database::models::Session;
use crate::ServiceState;

/// The authenticated caller, resolved from a bearer session token.
#[derive(Debug, Clone)]
pub struct Identity {
    pub user_id: String,
}

#[async_trait]
impl FromRequestParts<ServiceState> for Identity {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ServiceState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts).ok_or(AuthError::Unauthorized)?;

        let user_id = Session::resolve(token, state.database())
            .await?
            .ok_or(AuthError::Unauthorized)?;

        Ok(Identity { user_id })
    }
}

fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(http::header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Unauthorized")]
    Unauthorized,
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        match self {
            AuthError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                Json(serde_json::json!({"error": "Unauthorized"})),
            )
                .into_response(),
            AuthError::Database(e) => {
                tracing::error!("session lookup failed: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(serde_json::json!({"error": "Internal error"})),
                )
                    .into_response()
            }
        }
    }
}
