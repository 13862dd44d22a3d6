//! Error types for Bookshelf server

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Service unavailable: {0}")]
    Unavailable(String),
}

impl AppError {
    /// HTTP status used when this error reaches the boundary.
    ///
    /// Registry failures (not found, conflict) are reported inside a
    /// `success: false` envelope with status 200; malformed requests and
    /// infrastructure failures keep their usual status codes.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) | AppError::Conflict(_) => StatusCode::OK,
            AppError::Validation(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    /// Message string surfaced in the `error` field of the envelope.
    pub fn public_message(&self) -> String {
        match self {
            AppError::Database(_) => "Database error".to_string(),
            AppError::Internal(_) => "Internal server error".to_string(),
            other => other.to_string(),
        }
    }

    /// Log the details that `public_message` hides from the client.
    pub fn log_masked(&self) {
        match self {
            AppError::Database(e) => tracing::error!("Database error: {:?}", e),
            AppError::Internal(msg) => tracing::error!("Internal error: {}", msg),
            _ => {}
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Validation(errors.to_string())
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

/// Failure envelope body
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Always `false`
    pub success: bool,
    /// Operation-level description of what failed
    pub message: String,
    /// Error detail
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>, error: &AppError) -> Self {
        Self {
            success: false,
            message: message.into(),
            error: error.public_message(),
        }
    }
}

/// Errors raised before a handler runs (extractor rejections) have no
/// operation attached, so they use a generic message.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.log_masked();
        let body = Json(ErrorResponse::new("Invalid request", &self));
        (self.status_code(), body).into_response()
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
