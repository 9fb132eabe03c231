use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::auth::{AuthError, Identity};
use crate::vault::{files, VaultError};
use crate::ServiceState;

/// Unauthenticated callers get a 401 with an empty array body, so list
/// consumers can always parse the payload as `File[]`. A failed session
/// lookup is not "unauthenticated" and keeps its 500.
pub async fn handler(
    State(state): State<ServiceState>,
    identity: Result<Identity, AuthError>,
) -> Result<impl IntoResponse, ListFilesError> {
    let identity = match identity {
        Ok(identity) => identity,
        Err(AuthError::Unauthorized) => {
            return Ok((
                http::StatusCode::UNAUTHORIZED,
                Json(serde_json::json!([])),
            )
                .into_response())
        }
        Err(err) => return Ok(err.into_response()),
    };

    let files = files::list_files(state.database(), &identity.user_id).await?;

    Ok((http::StatusCode::OK, Json(files)).into_response())
}

#[derive(Debug, thiserror::Error)]
pub enum ListFilesError {
    #[error(transparent)]
    Vault(#[from] VaultError),
}

impl IntoResponse for ListFilesError {
    fn into_response(self) -> Response {
        match self {
            ListFilesError::Vault(e) => crate::http_server::api::v0::vault_error_response(e),
        }
    }
}
