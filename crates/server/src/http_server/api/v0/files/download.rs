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
) -> Result<impl IntoResponse, DownloadFileError> {
    let url = files::download_url(
        state.database(),
        state.signer(),
        &identity.user_id,
        file_id,
        state.download_ttl(),
    )
    .await?;

    Ok((
        http::StatusCode::OK,
        Json(serde_json::json!({"url": url.to_string()})),
    )
        .into_response())
}

#[derive(Debug, thiserror::Error)]
pub enum DownloadFileError {
    #[error(transparent)]
    Vault(#[from] VaultError),
}

impl IntoResponse for DownloadFileError {
    fn into_response(self) -> Response {
        match self {
            DownloadFileError::Vault(e) => crate::http_server::api::v0::vault_error_response(e),
        }
    }
}
