//! HTTP mapping for service errors.
//!
//! Handlers return `Result<T, ApiError>`. Every error becomes a JSON body
//! `{"error": ...}`; fetch failures add `"details"` with the remote cause.

use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;
use tracing::debug;

use crate::proxy::ProxyError;

/// Errors returned by API handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Failure from a proxy service.
    #[error(transparent)]
    Proxy(#[from] ProxyError),

    /// Unparseable query string or request body.
    #[error("{0}")]
    BadRequest(String),

    /// Unknown route-level entity (e.g. a resource subject).
    #[error("{0}")]
    NotFound(String),
}

impl ApiError {
    /// Creates an [`ApiError::BadRequest`].
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    /// Creates an [`ApiError::NotFound`].
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    /// Status code for this error.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Proxy(ProxyError::NotFound(_)) | Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Proxy(ProxyError::BadRequest(_) | ProxyError::InvalidContent { .. })
            | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Proxy(ProxyError::Fetch(_)) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        debug!(error = %rejection, "query rejected");
        Self::BadRequest(format!("Invalid query: {}", rejection.body_text()))
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        debug!(error = %rejection, "body rejected");
        Self::BadRequest(format!("Invalid request body: {}", rejection.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            Self::Proxy(err) => match err.details() {
                Some(details) => json!({ "error": err.to_string(), "details": details }),
                None => json!({ "error": err.to_string() }),
            },
            other => json!({ "error": other.to_string() }),
        };
        (status, Json(body)).into_response()
    }
}
