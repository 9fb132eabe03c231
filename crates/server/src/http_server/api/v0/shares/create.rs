use std::str::FromStr;

use axum::extract::{Json, State};
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::Identity;
use crate::database::types::ShareKind;
use crate::vault::{shares, VaultError};
use crate::ServiceState;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateShareRequest {
    /// "note" or "file".
    #[serde(rename = "type")]
    pub kind: String,
    pub resource_id: Uuid,
    /// Fractional hours are allowed; absent means the link never expires.
    #[serde(default)]
    pub expires_in_hours: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateShareResponse {
    pub url: String,
}

pub async fn handler(
    State(state): State<ServiceState>,
    identity: Identity,
    Json(req): Json<CreateShareRequest>,
) -> Result<Response, CreateShareError> {
    let kind = ShareKind::from_str(&req.kind)
        .map_err(|_| VaultError::Validation("Invalid share type".into()))?;

    let share = shares::create_share(
        state.database(),
        &identity.user_id,
        kind,
        req.resource_id,
        req.expires_in_hours,
    )
    .await?;

    let url = state.share_url(kind.as_str(), &share.token);
    Ok((
        http::StatusCode::OK,
        Json(CreateShareResponse {
            url: url.to_string(),
        }),
    )
        .into_response())
}

#[derive(Debug, thiserror::Error)]
pub enum CreateShareError {
    #[error(transparent)]
    Vault(#[from] VaultError),
}

impl IntoResponse for CreateShareError {
    fn into_response(self) -> Response {
        match self {
            CreateShareError::Vault(e) => crate::http_server::api::v0::vault_error_response(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vault::notes;
    use crate::ServiceState;

    #[tokio::test]
    async fn test_created_share_returns_200() {
        let state = ServiceState::for_testing().await;
        let note = notes::create_note(state.database(), "user-a", "Shared", None)
            .await
            .unwrap();
        let identity = Identity {
            user_id: "user-a".to_string(),
        };

        let response = handler(
            State(state),
            identity,
            Json(CreateShareRequest {
                kind: "note".to_string(),
                resource_id: *note.id,
                expires_in_hours: None,
            }),
        )
        .await
        .unwrap()
        .into_response();

        assert_eq!(response.status(), http::StatusCode::OK);
    }

    #[tokio::test]
    async fn test_unknown_share_type_is_bad_request() {
        let state = ServiceState::for_testing().await;
        let identity = Identity {
            user_id: "user-a".to_string(),
        };

        let err = handler(
            State(state),
            identity,
            Json(CreateShareRequest {
                kind: "bucket".to_string(),
                resource_id: uuid::Uuid::new_v4(),
                expires_in_hours: None,
            }),
        )
        .await
        .unwrap_err();

        assert_eq!(err.into_response().status(), http::StatusCode::BAD_REQUEST);
    }
}
