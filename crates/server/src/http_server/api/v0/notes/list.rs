use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::auth::Identity;
use crate::vault::{notes, VaultError};
use crate::ServiceState;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListNotesQuery {
    /// Case-insensitive substring filter against title and content.
    pub q: Option<String>,
}

pub async fn handler(
    State(state): State<ServiceState>,
    identity: Identity,
    Query(query): Query<ListNotesQuery>,
) -> Result<impl IntoResponse, ListNotesError> {
    let notes = notes::list_notes(state.database(), &identity.user_id, query.q.as_deref()).await?;

    Ok((http::StatusCode::OK, Json(notes)).into_response())
}

#[derive(Debug, thiserror::Error)]
pub enum ListNotesError {
    #[error(transparent)]
    Vault(#[from] VaultError),
}

impl IntoResponse for ListNotesError {
    fn into_response(self) -> Response {
        match self {
            ListNotesError::Vault(e) => crate::http_server::api::v0::vault_error_response(e),
        }
    }
}
