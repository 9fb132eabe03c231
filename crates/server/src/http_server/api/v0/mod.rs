use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Json;
use axum::Router;

pub mod files;
pub mod home;
pub mod notes;
pub mod shares;

use crate::vault::VaultError;
use crate::ServiceState;

pub fn router(state: ServiceState) -> Router<ServiceState> {
    Router::new()
        .route("/home", get(home::handler))
        .nest("/notes", notes::router(state.clone()))
        .nest("/files", files::router(state.clone()))
        .nest("/shares", shares::router(state.clone()))
        .with_state(state)
}

/// Map a vault error onto the API's JSON error surface.
///
/// Infrastructure failures are logged here and reported as an opaque 500;
/// everything else surfaces its message verbatim.
pub(crate) fn vault_error_response(err: VaultError) -> Response {
    let status = match &err {
        VaultError::Unauthenticated => StatusCode::UNAUTHORIZED,
        VaultError::Forbidden => StatusCode::FORBIDDEN,
        VaultError::NotFound => StatusCode::NOT_FOUND,
        VaultError::Validation(_)
        | VaultError::UnsupportedType(_)
        | VaultError::SizeLimitExceeded
        | VaultError::QuotaExceeded => StatusCode::BAD_REQUEST,
        VaultError::Storage(_) | VaultError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
        tracing::error!("vault operation failed: {err}");
        "Internal server error".to_string()
    } else {
        err.to_string()
    };

    (status, Json(serde_json::json!({"error": message}))).into_response()
}
