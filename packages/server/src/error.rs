//! API error type and response mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

/// Errors surfaced to API clients.
#[derive(Debug)]
pub enum ApiError {
    /// Malformed request shape (400)
    Validation(String),

    /// Unknown resource (404)
    NotFound(String),

    /// Upstream generation failure with no safe substitute (502)
    Upstream(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Validation(message) => (StatusCode::BAD_REQUEST, message),
            ApiError::NotFound(message) => (StatusCode::NOT_FOUND, message),
            ApiError::Upstream(message) => (StatusCode::BAD_GATEWAY, message),
        };

        (status, Json(json!({ "message": message }))).into_response()
    }
}
