// src/logging_middleware.rs
//! Middleware for logging request and response bodies in debug mode
//!
//! Credentials never reach the log: `password` values are replaced and
//! `access`/`refresh` tokens are shortened before anything is printed.

use axum::body::{to_bytes, Bytes};
use axum::{body::Body, extract::Request, http::StatusCode, middleware::Next, response::Response};
use serde_json::Value;
use tracing::{debug, enabled, Level};

use crate::common::helpers::safe_token_log;

const REDACTED: &str = "********";

/// Same ceiling as axum's default `DefaultBodyLimit`
const MAX_LOGGED_BODY_BYTES: usize = 2 * 1024 * 1024;

/// Middleware to log request and response bodies in debug mode
pub async fn log_request_response(request: Request, next: Next) -> Result<Response, StatusCode> {
    // Buffering bodies is only worth it when someone is listening.
    if !enabled!(Level::DEBUG) {
        return Ok(next.run(request).await);
    }

    let (parts, body) = request.into_parts();

    let bytes = buffer_request_body(body).await?;

    if let Some(logged) = loggable_body(&bytes) {
        debug!(
            method = %parts.method,
            uri = %parts.uri,
            request_body = %logged,
            "📥 Request"
        );
    }

    // Reconstruct request
    let request = Request::from_parts(parts, Body::from(bytes));

    let response = next.run(request).await;

    let (parts, body) = response.into_parts();
    let bytes = to_bytes(body, usize::MAX)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    if let Some(logged) = loggable_body(&bytes) {
        debug!(
            status = %parts.status,
            response_body = %logged,
            "📤 Response"
        );
    }

    Ok(Response::from_parts(parts, Body::from(bytes)))
}

/// Reads the request body, refusing anything over the body limit
async fn buffer_request_body(body: Body) -> Result<Bytes, StatusCode> {
    to_bytes(body, MAX_LOGGED_BODY_BYTES)
        .await
        .map_err(|_| StatusCode::PAYLOAD_TOO_LARGE)
}

/// Renders a body for logging; JSON is pretty-printed with secrets masked.
/// Empty or non-UTF-8 bodies are not logged.
fn loggable_body(bytes: &[u8]) -> Option<String> {
    if bytes.is_empty() {
        return None;
    }
    let body_str = std::str::from_utf8(bytes).ok()?;

    match serde_json::from_str::<Value>(body_str) {
        Ok(mut json) => {
            redact_secrets(&mut json);
            Some(serde_json::to_string_pretty(&json).unwrap_or_else(|_| REDACTED.to_string()))
        }
        Err(_) => Some(body_str.to_string()),
    }
}

fn redact_secrets(value: &mut Value) {
    match value {
        Value::Object(map) => {
            for (key, field) in map.iter_mut() {
                match key.as_str() {
                    "password" => *field = Value::String(REDACTED.to_string()),
                    "access" | "refresh" => {
                        if let Value::String(token) = field {
                            *field = Value::String(safe_token_log(token));
                        }
                    }
                    _ => redact_secrets(field),
                }
            }
        }
        Value::Array(items) => items.iter_mut().for_each(redact_secrets),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_password_is_masked() {
        let logged =
            loggable_body(br#"{"username":"jane","password":"hunter2","email":"j@x.io"}"#).unwrap();

        assert!(!logged.contains("hunter2"));
        assert!(logged.contains(REDACTED));
        assert!(logged.contains("jane"));
    }

    #[test]
    fn test_tokens_are_shortened() {
        let mut body = json!({
            "access": "eyJhbGciOiJIUzI1NiJ9.payload.signature",
            "refresh": "short",
        });
        redact_secrets(&mut body);

        assert_eq!(body["access"], "eyJh...ture");
        assert_eq!(body["refresh"], "***");
    }

    #[test]
    fn test_nested_values_are_masked() {
        let mut body = json!({ "users": [{ "password": "x" }] });
        redact_secrets(&mut body);
        assert_eq!(body["users"][0]["password"], REDACTED);
    }

    #[tokio::test]
    async fn test_request_body_is_capped() {
        let small = buffer_request_body(Body::from(r#"{"username":"jane"}"#)).await.unwrap();
        assert_eq!(&small[..], br#"{"username":"jane"}"#);

        let at_limit = buffer_request_body(Body::from(vec![b'a'; MAX_LOGGED_BODY_BYTES])).await;
        assert!(at_limit.is_ok());

        let oversized =
            buffer_request_body(Body::from(vec![b'a'; MAX_LOGGED_BODY_BYTES + 1])).await;
        assert_eq!(oversized.unwrap_err(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[test]
    fn test_non_json_and_empty_bodies() {
        assert_eq!(loggable_body(b"plain text").as_deref(), Some("plain text"));
        assert_eq!(loggable_body(b""), None);
        assert_eq!(loggable_body(&[0xff, 0xfe]), None);
    }
}
