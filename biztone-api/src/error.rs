//! Error types for biztone-api
//!
//! Every error body is `{"error": "<message>"}`. Upstream failures never
//! expose their detail to the client.

use axum::{
    extract::rejection::BytesRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use biztone_common::api::{ErrorResponse, InputError};
use thiserror::Error;

/// Client-facing message for any completion service failure
pub const UPSTREAM_FAILURE_MESSAGE: &str =
    "AI 변환 중 오류가 발생했습니다. 잠시 후 다시 시도해 주세요.";

/// Client-facing message for a body over the size limit
pub const PAYLOAD_TOO_LARGE_MESSAGE: &str = "Text is too long";

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Invalid request (400)
    #[error("{0}")]
    InvalidInput(#[from] InputError),

    /// Request body over the configured limit (413)
    #[error("{}", PAYLOAD_TOO_LARGE_MESSAGE)]
    PayloadTooLarge,

    /// Completion service failed (500); detail goes to the error log
    #[error("Upstream completion failure")]
    UpstreamFailure,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InvalidInput(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            ApiError::PayloadTooLarge => (
                StatusCode::PAYLOAD_TOO_LARGE,
                PAYLOAD_TOO_LARGE_MESSAGE.to_string(),
            ),
            ApiError::UpstreamFailure => (
                StatusCode::INTERNAL_SERVER_ERROR,
                UPSTREAM_FAILURE_MESSAGE.to_string(),
            ),
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

impl From<BytesRejection> for ApiError {
    /// An unreadable body counts as missing text unless it hit the size limit
    fn from(rejection: BytesRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::PayloadTooLarge
        } else {
            ApiError::InvalidInput(InputError::MissingText)
        }
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
