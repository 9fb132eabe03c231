//! Public gateway handlers: share-link redemption and signed downloads.
//!
//! Nothing here consults session identity. A share token or a signed URL is
//! the entire credential, and every failure mode reads as 404 so a probing
//! caller learns nothing about what exists.

mod download;
mod file_redirect;
mod note_page;

pub use download::handler as download_handler;
pub use file_redirect::handler as shared_file_handler;
pub use note_page::handler as shared_note_handler;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::vault::VaultError;

/// Collapse a vault error to the gateway's plain-text surface.
pub(crate) fn gateway_error_response(err: VaultError) -> Response {
    match err {
        VaultError::NotFound => (
            StatusCode::NOT_FOUND,
            [(axum::http::header::CONTENT_TYPE, "text/plain")],
            "not found",
        )
            .into_response(),
        other => {
            tracing::error!("gateway share resolution failed: {other}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                [(axum::http::header::CONTENT_TYPE, "text/plain")],
                "internal error",
            )
                .into_response()
        }
    }
}
