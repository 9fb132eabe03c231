use axum::extract::{Json, Path, State};
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::Identity;
use crate::vault::{files, VaultError};
use crate::ServiceState;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenameFileRequest {
    pub name: String,
}

pub async fn handler(
    State(state): State<ServiceState>,
    identity: Identity,
    Path(file_id): Path<Uuid>,
    Json(req): Json<RenameFileRequest>,
) -> Result<impl IntoResponse, RenameFileError> {
    let file = files::rename_file(state.database(), &identity.user_id, file_id, &req.name).await?;

    Ok((http::StatusCode::OK, Json(file)).into_response())
}

#[derive(Debug, thiserror::Error)]
pub enum RenameFileError {
    #[error(transparent)]
    Vault(#[from] VaultError),
}

impl IntoResponse for RenameFileError {
    fn into_response(self) -> Response {
        match self {
            RenameFileError::Vault(e) => crate::http_server::api::v0::vault_error_response(e),
        }
    }
}
