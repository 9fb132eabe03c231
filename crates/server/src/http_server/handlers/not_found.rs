use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;

/// Fallback for unrouted paths. API clients send `Accept: application/json`
/// and get the usual error envelope; everything else gets plain text.
pub async fn not_found_handler(headers: HeaderMap) -> Response {
    if wants_json(&headers) {
        let body = Json(serde_json::json!({"error": "not found"}));
        return (StatusCode::NOT_FOUND, body).into_response();
    }

    (
        StatusCode::NOT_FOUND,
        [(header::CONTENT_TYPE, "text/plain")],
        "not found",
    )
        .into_response()
}

fn wants_json(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|accept| accept.contains("application/json"))
}
