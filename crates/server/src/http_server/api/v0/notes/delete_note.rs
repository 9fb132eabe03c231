use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use uuid::Uuid;

use crate::auth::Identity;
use crate::vault::{notes, VaultError};
use crate::ServiceState;

pub async fn handler(
    State(state): State<ServiceState>,
    identity: Identity,
    Path(note_id): Path<Uuid>,
) -> Result<impl IntoResponse, DeleteNoteError> {
    notes::delete_note(state.database(), &identity.user_id, note_id).await?;

    Ok((
        http::StatusCode::OK,
        Json(serde_json::json!({"success": true})),
    )
        .into_response())
}

#[derive(Debug, thiserror::Error)]
pub enum DeleteNoteError {
    #[error(transparent)]
    Vault(#[from] VaultError),
}

impl IntoResponse for DeleteNoteError {
    fn into_response(self) -> Response {
        match self {
            DeleteNoteError::Vault(e) => crate::http_server::api::v0::vault_error_response(e),
        }
    }
}
