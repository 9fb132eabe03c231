use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::auth::Identity;
use crate::vault::home::{home_summary, HomeSummary};
use crate::vault::VaultError;
use crate::ServiceState;

pub type HomeResponse = HomeSummary;

pub async fn handler(
    State(state): State<ServiceState>,
    identity: Identity,
) -> Result<impl IntoResponse, HomeError> {
    let summary = home_summary(
        state.database(),
        &identity.user_id,
        state.upload_policy().storage_limit_bytes,
    )
    .await?;

    Ok((http::StatusCode::OK, Json(summary)).into_response())
}

#[derive(Debug, thiserror::Error)]
pub enum HomeError {
    #[error(transparent)]
    Vault(#[from] VaultError),
}

impl IntoResponse for HomeError {
    fn into_response(self) -> Response {
        match self {
            HomeError::Vault(e) => super::vault_error_response(e),
        }
    }
}
