use axum::extract::{Json, State};
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use crate::auth::Identity;
use crate::database::models::Note;
use crate::vault::{notes, VaultError};
use crate::ServiceState;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateNoteRequest {
    pub title: String,
    #[serde(default)]
    pub content: Option<String>,
}

pub async fn handler(
    State(state): State<ServiceState>,
    identity: Identity,
    Json(req): Json<CreateNoteRequest>,
) -> Result<Response, CreateNoteError> {
    let note = notes::create_note(
        state.database(),
        &identity.user_id,
        &req.title,
        req.content.as_deref(),
    )
    .await?;

    Ok((http::StatusCode::OK, Json(note)).into_response())
}

#[derive(Debug, thiserror::Error)]
pub enum CreateNoteError {
    #[error(transparent)]
    Vault(#[from] VaultError),
}

impl IntoResponse for CreateNoteError {
    fn into_response(self) -> Response {
        match self {
            CreateNoteError::Vault(e) => crate::http_server::api::v0::vault_error_response(e),
        }
    }
}

pub type CreateNoteResponse = Note;
