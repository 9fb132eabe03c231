use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::database::types::ShareKind;
use crate::vault::shares::{self, SharedResource};
use crate::vault::VaultError;
use crate::ServiceState;

/// Redeem a file share by redirecting to a freshly signed download URL.
///
/// The redirect target inherits the standard download TTL, so a stale copy
/// of the Location header goes dead on its own schedule even though the
/// share token itself may live longer.
pub async fn handler(State(state): State<ServiceState>, Path(token): Path<String>) -> Response {
    let file = match shares::resolve_share(state.database(), &token, ShareKind::File).await {
        Ok(SharedResource::File(file)) => file,
        // Resolution is kind-checked; anything else reads as absence.
        Ok(SharedResource::Note(_)) => return super::gateway_error_response(VaultError::NotFound),
        Err(e) => return super::gateway_error_response(e),
    };

    let url = state
        .signer()
        .sign(&file.key, &file.name, state.download_ttl());

    (StatusCode::FOUND, [(header::LOCATION, url.to_string())]).into_response()
}
