use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use gk_core::Error;

use crate::types::ErrorResponse;

/// Error answered as `{error, message}`, where `error` is the status reason
/// phrase.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    /// Validation errors become 400, everything else 500. The cause is kept
    /// in the message.
    pub fn from_error(context: &str, err: Error) -> Self {
        if let Some(upstream) = err.upstream_status() {
            tracing::warn!("{}: upstream answered {}", context, upstream);
        }
        let status = if err.is_validation() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };
        Self {
            status,
            message: format!("{}: {}", context, err),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!("{}", self.message);
        }
        let body = ErrorResponse {
            error: self.status.canonical_reason().unwrap_or("Error").to_string(),
            message: self.message,
        };
        (self.status, Json(body)).into_response()
    }
}
