//! Error types for coach-insights

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use coach_common::Insight;
use serde_json::json;
use thiserror::Error;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Invalid request (400)
    #[error("{0}")]
    BadRequest(String),

    /// Both models failed (500); the body still carries displayable text
    #[error("{0}")]
    Generation(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(message) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "error": message }))).into_response()
            }
            ApiError::Generation(message) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(Insight::service_failure(message)),
            )
                .into_response(),
        }
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
