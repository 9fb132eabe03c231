use axum::body::Body;
use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use store::SignedDownload;

use crate::ServiceState;

/// Serve a blob named by a signed URL.
///
/// The MAC covers the key, the filename, and the expiry, so a valid
/// signature proves the whole tuple was minted by us. Verification failures
/// and missing blobs are indistinguishable from the outside.
pub async fn handler(
    State(state): State<ServiceState>,
    Path(key): Path<String>,
    Query(params): Query<SignedDownload>,
) -> Response {
    if !state.signer().verify(&key, &params) {
        return not_found();
    }

    let data = match state.blobs().get(&key).await {
        Ok(Some(data)) => data,
        Ok(None) => return not_found(),
        Err(e) => {
            tracing::error!(key = %key, "blob read failed: {e}");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                [(header::CONTENT_TYPE, "text/plain")],
                "internal error",
            )
                .into_response();
        }
    };

    let disposition = format!("attachment; filename=\"{}\"", quote_safe(&params.name));

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "application/octet-stream")
        .header(header::CONTENT_DISPOSITION, disposition)
        .header(header::CONTENT_LENGTH, data.len())
        .body(Body::from(data))
        .unwrap_or_else(|_| StatusCode::INTERNAL_SERVER_ERROR.into_response())
}

fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        [(header::CONTENT_TYPE, "text/plain")],
        "not found",
    )
        .into_response()
}

/// Strip characters that would break out of a quoted filename parameter.
fn quote_safe(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, '"' | '\\' | '\r' | '\n'))
        .collect()
}
