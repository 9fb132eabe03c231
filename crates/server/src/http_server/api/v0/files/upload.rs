use axum::extract::multipart::MultipartError;
use axum::extract::{Multipart, State};
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::auth::Identity;
use crate::vault::{files, VaultError};
use crate::ServiceState;

const FILE_FIELD: &str = "file";

pub async fn handler(
    State(state): State<ServiceState>,
    identity: Identity,
    mut multipart: Multipart,
) -> Result<Response, UploadFileError> {
    let mut upload = None;
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let name = field
            .file_name()
            .map(str::to_string)
            .filter(|n| !n.is_empty())
            .ok_or(UploadFileError::NoFile)?;
        let content_type = field
            .content_type()
            .map(str::to_string)
            .unwrap_or_else(|| "application/octet-stream".to_string());
        let data = field.bytes().await?;

        upload = Some((name, content_type, data));
        break;
    }

    let (name, content_type, data) = upload.ok_or(UploadFileError::NoFile)?;

    let file = files::upload_file(
        state.database(),
        state.blobs(),
        state.upload_policy(),
        &identity.user_id,
        &name,
        &content_type,
        data,
    )
    .await?;

    Ok((http::StatusCode::OK, Json(file)).into_response())
}

#[derive(Debug, thiserror::Error)]
pub enum UploadFileError {
    #[error("No file provided")]
    NoFile,
    #[error("Invalid multipart body: {0}")]
    Multipart(#[from] MultipartError),
    #[error(transparent)]
    Vault(#[from] VaultError),
}

impl IntoResponse for UploadFileError {
    fn into_response(self) -> Response {
        match self {
            UploadFileError::NoFile => (
                http::StatusCode::BAD_REQUEST,
                Json(serde_json::json!({"error": "No file provided"})),
            )
                .into_response(),
            UploadFileError::Multipart(e) => (
                http::StatusCode::BAD_REQUEST,
                Json(serde_json::json!({"error": format!("Invalid upload: {}", e)})),
            )
                .into_response(),
            UploadFileError::Vault(e) => crate::http_server::api::v0::vault_error_response(e),
        }
    }
}
