//! Error handling for the HTTP API
//!
//! Maps internal todo errors to HTTP status codes and JSON error bodies.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use todo_core::TodoError;

/// HTTP API errors
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Todo not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Convert to the HTTP status code for the response
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Database(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Caller-facing message for the JSON error body.
    ///
    /// Not-found and server-side failures use fixed messages; internal
    /// detail is logged, never exposed to the caller.
    pub fn public_message(&self) -> String {
        match self {
            ApiError::NotFound(_) => "Todo not found".to_string(),
            ApiError::Validation(message) => message.clone(),
            ApiError::Database(_) | ApiError::Internal(_) => "Internal server error".to_string(),
        }
    }
}

/// Convert from TodoError to ApiError
impl From<TodoError> for ApiError {
    fn from(err: TodoError) -> Self {
        match err {
            TodoError::NotFound(msg) => ApiError::NotFound(msg),
            TodoError::Validation(msg) => ApiError::Validation(msg),
            TodoError::Database(msg) => ApiError::Database(msg),
            TodoError::Configuration(msg) => {
                ApiError::Internal(format!("Configuration error: {msg}"))
            }
            TodoError::Internal(msg) => ApiError::Internal(msg),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }
        (status, Json(json!({ "error": self.public_message() }))).into_response()
    }
}
