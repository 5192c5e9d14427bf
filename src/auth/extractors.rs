//! Request extractors for the auth endpoints

use async_trait::async_trait;
use axum::{
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use tracing::warn;

use crate::common::ApiError;

/// JSON body extractor whose rejections render as `{"detail": "..."}`
///
/// Axum's own `Json` rejects with a plain-text body; clients of this API
/// always expect a JSON error object.
#[derive(Debug)]
pub struct DetailJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for DetailJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(JsonRejection::MissingJsonContentType(_)) => {
                warn!("Request body rejected: missing application/json content type");
                Err(ApiError::UnsupportedMediaType(
                    "Unsupported media type in request.".to_string(),
                ))
            }
            Err(rejection) => {
                warn!(error = %rejection.body_text(), "Request body rejected: invalid JSON");
                Err(ApiError::BadRequest(format!(
                    "JSON parse error - {}",
                    rejection.body_text()
                )))
            }
        }
    }
}
