use axum::extract::{Json, Path, State};
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::Identity;
use crate::vault::{notes, VaultError};
use crate::ServiceState;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateNoteRequest {
    pub title: String,
    #[serde(default)]
    pub content: String,
}

pub async fn handler(
    State(state): State<ServiceState>,
    identity: Identity,
    Path(note_id): Path<Uuid>,
    Json(req): Json<UpdateNoteRequest>,
) -> Result<impl IntoResponse, UpdateNoteError> {
    let note = notes::update_note(
        state.database(),
        &identity.user_id,
        note_id,
        &req.title,
        &req.content,
    )
    .await?;

    Ok((http::StatusCode::OK, Json(note)).into_response())
}

#[derive(Debug, thiserror::Error)]
pub enum UpdateNoteError {
    #[error(transparent)]
    Vault(#[from] VaultError),
}

impl IntoResponse for UpdateNoteError {
    fn into_response(self) -> Response {
        match self {
            UpdateNoteError::Vault(e) => crate::http_server::api::v0::vault_error_response(e),
        }
    }
}
