//! API error types and conversions

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// Errors raised by the HTTP layer itself, before or around a lookup.
///
/// Lookup failures are not `ApiError`s: they are answered with the
/// `LookupResult` body the chain produced.
#[derive(Debug)]
pub enum ApiError {
    /// 400 Bad Request
    BadRequest(String),
    /// 405 Method Not Allowed
    MethodNotAllowed(String),
    /// 500 Internal Server Error
    Internal(String),
}

/// Error envelope, shaped like a failed `LookupResult`
#[derive(Serialize)]
struct ErrorResponse {
    success: bool,
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg),
            ApiError::MethodNotAllowed(msg) => {
                // Plain text, as non-POST callers are usually browsers or curl
                return (StatusCode::METHOD_NOT_ALLOWED, msg).into_response();
            }
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", msg),
        };

        // Log errors at appropriate levels
        if status.is_server_error() {
            tracing::error!(error = error_type, %message, "API error");
        } else {
            tracing::debug!(error = error_type, %message, "API client error");
        }

        let body = Json(ErrorResponse {
            success: false,
            error: message,
        });

        (status, body).into_response()
    }
}
