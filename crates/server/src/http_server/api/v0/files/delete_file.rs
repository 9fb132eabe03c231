use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use uuid::Uuid;

use crate::auth::Identity;
use crate::vault::{files, VaultError};
use crate::ServiceState;

pub async fn handler(
    State(state): State<ServiceState>,
    identity: Identity,
    Path(file_id): Path<Uuid>,
) -> Result<impl IntoResponse, DeleteFileError> {
    files::delete_file(state.database(), state.blobs(), &identity.user_id, file_id).await?;

    Ok((
        http::StatusCode::OK,
        Json(serde_json::json!({"success": true})),
    )
        .into_response())
}

#[derive(Debug, thiserror::Error)]
pub enum DeleteFileError {
    #[error(transparent)]
    Vault(#[from] VaultError),
}

impl IntoResponse for DeleteFileError {
    fn into_response(self) -> Response {
        match self {
            DeleteFileError::Vault(e) => crate::http_server::api::v0::vault_error_response(e),
        }
    }
}
