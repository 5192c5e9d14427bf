// Error handling types for the API

use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use tracing::error;

use super::validation::ValidationResult;
use crate::services::accounts::AccountStoreError;
use crate::services::password::PasswordError;
use crate::services::tokens::TokenError;

/// API error types
///
/// Every variant except `FieldErrors` renders as `{"detail": "..."}`.
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    ValidationError(String),
    Conflict(String),
    FieldErrors(BTreeMap<String, Vec<String>>),
    Unauthorized(String),
    UnsupportedMediaType(String),
    InternalServer(String),
    DatabaseError(sqlx::Error),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
            ApiError::ValidationError(msg) => write!(f, "Validation Error: {}", msg),
            ApiError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            ApiError::FieldErrors(errors) => {
                let fields: Vec<&str> = errors.keys().map(String::as_str).collect();
                write!(f, "Field Errors: {}", fields.join(", "))
            }
            ApiError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            ApiError::UnsupportedMediaType(msg) => write!(f, "Unsupported Media Type: {}", msg),
            ApiError::InternalServer(msg) => write!(f, "Internal Server Error: {}", msg),
            ApiError::DatabaseError(e) => write!(f, "Database Error: {}", e),
        }
    }
}

impl std::error::Error for ApiError {}

/// JSON error response structure
#[derive(Serialize)]
pub struct ErrorResponse {
    pub detail: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, detail) = match self {
            ApiError::FieldErrors(errors) => {
                return (StatusCode::BAD_REQUEST, Json(errors)).into_response();
            }
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg),
            // Duplicate usernames are a plain 400, not a 409.
            ApiError::Conflict(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::UnsupportedMediaType(msg) => (StatusCode::UNSUPPORTED_MEDIA_TYPE, msg),
            ApiError::InternalServer(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            ApiError::DatabaseError(e) => {
                error!(error = %e, "Database error occurred");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Database operation failed".to_string(),
                )
            }
        };

        (status, Json(ErrorResponse { detail })).into_response()
    }
}

/// Converts a failed validation into per-field error lists
impl From<ValidationResult> for ApiError {
    fn from(result: ValidationResult) -> Self {
        if result.is_valid {
            ApiError::InternalServer(
                "Validation result was valid but converted to error".to_string(),
            )
        } else {
            ApiError::FieldErrors(result.field_errors())
        }
    }
}

impl From<AccountStoreError> for ApiError {
    fn from(err: AccountStoreError) -> Self {
        match err {
            AccountStoreError::UsernameTaken => {
                ApiError::Conflict(crate::auth::models::USERNAME_TAKEN.to_string())
            }
            AccountStoreError::Database(e) => ApiError::DatabaseError(e),
        }
    }
}

impl From<PasswordError> for ApiError {
    fn from(err: PasswordError) -> Self {
        error!(error = %err, "Password hashing failed");
        ApiError::InternalServer("Could not process credentials".to_string())
    }
}

impl From<TokenError> for ApiError {
    fn from(err: TokenError) -> Self {
        error!(error = %err, "Token issuing failed");
        ApiError::InternalServer("Could not issue tokens".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::models::TokenType;
    use axum::body::to_bytes;
    use serde_json::{json, Value};

    async fn render(err: ApiError) -> (StatusCode, Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_username_taken_renders_as_bad_request() {
        let (status, body) = render(AccountStoreError::UsernameTaken.into()).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "detail": "Username already exists." }));
    }

    #[tokio::test]
    async fn test_database_failures_hide_the_cause() {
        let (status, body) =
            render(AccountStoreError::Database(sqlx::Error::PoolTimedOut).into()).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "detail": "Database operation failed" }));
    }

    #[tokio::test]
    async fn test_password_failures_hide_the_cause() {
        let err = PasswordError::MalformedHash("$argon2id$garbage".to_string());
        let (status, body) = render(err.into()).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "detail": "Could not process credentials" }));
    }

    #[tokio::test]
    async fn test_token_failures_hide_the_cause() {
        let err = TokenError::WrongType {
            expected: TokenType::Access,
            actual: TokenType::Refresh,
        };
        let (status, body) = render(err.into()).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "detail": "Could not issue tokens" }));
    }

    #[tokio::test]
    async fn test_field_errors_render_as_a_bare_map() {
        let mut result = ValidationResult::new();
        result.add_error("username", "This field may not be blank.");
        result.add_error("password", "This field is required.");

        let (status, body) = render(result.into()).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body,
            json!({
                "username": ["This field may not be blank."],
                "password": ["This field is required."],
            })
        );
    }

    #[tokio::test]
    async fn test_detail_variants_map_to_status_codes() {
        let cases = [
            (ApiError::BadRequest("JSON parse error - x".into()), StatusCode::BAD_REQUEST),
            (ApiError::ValidationError("All fields are required.".into()), StatusCode::BAD_REQUEST),
            (ApiError::Unauthorized("nope".into()), StatusCode::UNAUTHORIZED),
            (
                ApiError::UnsupportedMediaType("json only".into()),
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
            ),
        ];

        for (err, expected) in cases {
            let message = err.to_string();
            let (status, body) = render(err).await;
            assert_eq!(status, expected, "{}", message);
            assert!(body["detail"].is_string(), "{}", message);
        }
    }
}
