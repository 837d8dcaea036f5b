//! Middleware for logging requests and responses.

use axum::{
    body::{Body, Bytes},
    extract::Request,
    http::{Method, header::CONTENT_TYPE},
    middleware::Next,
    response::{IntoResponse, Response},
};

/// Request bodies are truncated to this many bytes at the `info` level.
pub const LOG_BODY_LENGTH_LIMIT: usize = 64;

/// Form fields whose values never appear in the logs.
const REDACTED_FIELDS: [&str; 3] = ["current_password", "new_password", "confirm_password"];

const REDACTED_VALUE: &str = "********";

/// Log the request and response for each request.
///
/// Both the request and response are logged at the `info` level.
/// If a body is longer than [LOG_BODY_LENGTH_LIMIT] bytes, it is
/// truncated and the full body is logged at the `debug` level.
/// Password fields in submitted forms are redacted.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let (parts, body) = request.into_parts();
    let body_bytes = match axum::body::to_bytes(body, usize::MAX).await {
        Ok(bytes) => bytes,
        Err(error) => {
            tracing::error!("Could not read request body: {error}");
            return axum::http::StatusCode::BAD_REQUEST.into_response();
        }
    };
    let body_text = String::from_utf8_lossy(&body_bytes);

    if is_form_submission(&parts) {
        log_request(&parts, &redact_form_fields(&body_text, &REDACTED_FIELDS));
    } else {
        log_request(&parts, &body_text);
    }

    let request = Request::from_parts(parts, Body::from(body_bytes.clone()));
    let response = next.run(request).await;

    let (parts, body) = response.into_parts();
    let body_bytes = match axum::body::to_bytes(body, usize::MAX).await {
        Ok(bytes) => bytes,
        Err(error) => {
            tracing::error!("Could not read response body: {error}");
            Bytes::new()
        }
    };
    log_response(&parts, &String::from_utf8_lossy(&body_bytes));

    Response::from_parts(parts, Body::from(body_bytes))
}

fn is_form_submission(parts: &axum::http::request::Parts) -> bool {
    let is_write = matches!(parts.method, Method::POST | Method::PUT);
    let is_form = parts
        .headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("application/x-www-form-urlencoded"));

    is_write && is_form
}

/// Replace the values of `fields` in the URL encoded `form_text`.
///
/// Text that is not a valid URL encoded form is returned unchanged.
fn redact_form_fields(form_text: &str, fields: &[&str]) -> String {
    let Ok(pairs) = serde_urlencoded::from_str::<Vec<(String, String)>>(form_text) else {
        return form_text.to_owned();
    };

    let redacted: Vec<(String, String)> = pairs
        .into_iter()
        .map(|(name, value)| {
            if fields.contains(&name.as_str()) {
                (name, REDACTED_VALUE.to_owned())
            } else {
                (name, value)
            }
        })
        .collect();

    serde_urlencoded::to_string(redacted).unwrap_or_else(|_| form_text.to_owned())
}

/// The first `limit` bytes of `text`, moved back to a character boundary.
fn truncate(text: &str, limit: usize) -> &str {
    let mut end = limit.min(text.len());

    while !text.is_char_boundary(end) {
        end -= 1;
    }

    &text[..end]
}

fn log_request(parts: &axum::http::request::Parts, body: &str) {
    if body.len() > LOG_BODY_LENGTH_LIMIT {
        tracing::info!(
            "Received request: {} {}\nbody: {}...",
            parts.method,
            parts.uri,
            truncate(body, LOG_BODY_LENGTH_LIMIT)
        );
        tracing::debug!("Full request body: {body:?}");
    } else {
        tracing::info!(
            "Received request: {} {}\nbody: {body:?}",
            parts.method,
            parts.uri
        );
    }
}

fn log_response(parts: &axum::http::response::Parts, body: &str) {
    if body.len() > LOG_BODY_LENGTH_LIMIT {
        tracing::info!(
            "Sending response: {}\nbody: {}...",
            parts.status,
            truncate(body, LOG_BODY_LENGTH_LIMIT)
        );
        tracing::debug!("Full response body: {body:?}");
    } else {
        tracing::info!("Sending response: {}\nbody: {body:?}", parts.status);
    }
}
