//! OpenAPI documentation

use axum::Router;
use serde::Serialize;
use utoipa::{OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    api::{books, health},
    models::book::Book,
};

/// Envelope carrying a single book
#[derive(Serialize, ToSchema)]
pub struct BookEnvelope {
    pub success: bool,
    pub message: String,
    pub data: Book,
}

/// Envelope carrying a list of books
#[derive(Serialize, ToSchema)]
pub struct BookListEnvelope {
    pub success: bool,
    pub message: String,
    pub data: Vec<Book>,
}

/// Envelope carrying only a confirmation message
#[derive(Serialize, ToSchema)]
pub struct MessageEnvelope {
    pub success: bool,
    pub message: String,
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Bookshelf API",
        version = "0.1.0",
        description = "Book catalog REST API"
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Books
        books::create_book,
        books::list_books,
        books::get_book,
        books::get_book_by_title,
        books::get_book_by_isbn,
        books::update_book,
        books::delete_book,
        books::hard_delete_book,
    ),
    components(
        schemas(
            // Books
            crate::models::book::Book,
            crate::models::book::CreateBook,
            crate::models::book::UpdateBook,
            BookEnvelope,
            BookListEnvelope,
            MessageEnvelope,
            // Health
            health::HealthResponse,
            health::ReadinessResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "books", description = "Book catalog management")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
