use axum::extract::{Path, State};
use axum::response::{Html, IntoResponse, Response};

use crate::database::types::ShareKind;
use crate::vault::shares::{self, SharedResource};
use crate::ServiceState;

pub async fn handler(State(state): State<ServiceState>, Path(token): Path<String>) -> Response {
    let note = match shares::resolve_share(state.database(), &token, ShareKind::Note).await {
        Ok(SharedResource::Note(note)) => note,
        // Resolution is kind-checked; anything else reads as absence.
        Ok(SharedResource::File(_)) => {
            return super::gateway_error_response(crate::vault::VaultError::NotFound)
        }
        Err(e) => return super::gateway_error_response(e),
    };

    let title = escape_html(&note.title);
    let content = escape_html(note.content.as_deref().unwrap_or(""));

    let page = format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<style>
  body {{ font-family: sans-serif; max-width: 42rem; margin: 2rem auto; padding: 0 1rem; }}
  .badge {{ color: #666; font-size: 0.8rem; text-transform: uppercase; letter-spacing: 0.05em; }}
  pre {{ white-space: pre-wrap; font-family: inherit; }}
</style>
</head>
<body>
<p class="badge">Read-only</p>
<h1>{title}</h1>
<pre>{content}</pre>
</body>
</html>
"#
    );

    Html(page).into_response()
}

fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}
