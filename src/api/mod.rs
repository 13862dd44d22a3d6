//! API handlers for Bookshelf REST endpoints

pub mod books;
pub mod health;
pub mod openapi;

use axum::{
    extract::{FromRequest, FromRequestParts},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get},
    Json, Router,
};
use serde::Serialize;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    error::{AppError, ErrorResponse},
    AppState,
};

/// Success envelope: `{ success: true, message, data? }`
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn with_data(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
        }
    }
}

impl ApiResponse<()> {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: None,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

/// An [`AppError`] tagged with the message of the operation that failed.
#[derive(Debug)]
pub struct ApiError {
    pub message: &'static str,
    pub source: AppError,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        self.source.log_masked();
        let body = Json(ErrorResponse::new(self.message, &self.source));
        (self.source.status_code(), body).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

/// Attach an operation-level failure message to a service result
pub trait OrFail<T> {
    fn or_fail(self, message: &'static str) -> ApiResult<T>;
}

impl<T> OrFail<T> for Result<T, AppError> {
    fn or_fail(self, message: &'static str) -> ApiResult<T> {
        self.map_err(|source| ApiError { message, source })
    }
}

/// JSON body extractor whose rejections render as a failure envelope
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

/// Path extractor whose rejections render as a failure envelope
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct AppPath<T>(pub T);

/// Query extractor whose rejections render as a failure envelope
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct AppQuery<T>(pub T);

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let routes = Router::new()
        // Health check
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        // Books
        .route("/books", get(books::list_books).post(books::create_book))
        .route("/books/title/:title", get(books::get_book_by_title))
        .route("/books/isbn/:isbn", get(books::get_book_by_isbn))
        .route(
            "/books/:id",
            get(books::get_book)
                .patch(books::update_book)
                .delete(books::delete_book),
        )
        .route("/books/:id/permanent", delete(books::hard_delete_book))
        .with_state(state);

    Router::new()
        .merge(routes)
        .merge(openapi::create_openapi_router())
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

async fn not_found() -> (StatusCode, Json<ErrorResponse>) {
    let error = AppError::NotFound("Route not found".to_string());
    (StatusCode::NOT_FOUND, Json(ErrorResponse::new("Not found", &error)))
}
