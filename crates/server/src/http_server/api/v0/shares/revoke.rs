use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::auth::Identity;
use crate::vault::{shares, VaultError};
use crate::ServiceState;

pub async fn handler(
    State(state): State<ServiceState>,
    identity: Identity,
    Path(token): Path<String>,
) -> Result<impl IntoResponse, RevokeShareError> {
    shares::revoke_share(state.database(), &identity.user_id, &token).await?;

    Ok((
        http::StatusCode::OK,
        Json(serde_json::json!({"success": true})),
    )
        .into_response())
}

#[derive(Debug, thiserror::Error)]
pub enum RevokeShareError {
    #[error(transparent)]
    Vault(#[from] VaultError),
}

impl IntoResponse for RevokeShareError {
    fn into_response(self) -> Response {
        match self {
            RevokeShareError::Vault(e) => crate::http_server::api::v0::vault_error_response(e),
        }
    }
}
