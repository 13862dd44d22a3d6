//! Book endpoints

use axum::{extract::State, http::StatusCode};

use crate::{
    error::ErrorResponse,
    models::book::{Book, BookQuery, CreateBook, UpdateBook},
    AppState,
};

use super::{
    openapi::{BookEnvelope, BookListEnvelope, MessageEnvelope},
    ApiResponse, ApiResult, AppJson, AppPath, AppQuery, OrFail,
};

/// Register a new book
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    request_body = CreateBook,
    responses(
        (status = 201, description = "Book registered", body = BookEnvelope),
        (status = 200, description = "Title already taken", body = ErrorResponse),
        (status = 400, description = "Invalid input", body = ErrorResponse)
    )
)]
pub async fn create_book(
    State(state): State<AppState>,
    AppJson(data): AppJson<CreateBook>,
) -> ApiResult<(StatusCode, ApiResponse<Book>)> {
    let book = state
        .services
        .books
        .create(&data)
        .await
        .or_fail("Failed to register book")?;
    Ok((
        StatusCode::CREATED,
        ApiResponse::with_data("Book registered successfully", book),
    ))
}

/// List active books
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    params(BookQuery),
    responses(
        (status = 200, description = "Active books", body = BookListEnvelope)
    )
)]
pub async fn list_books(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<BookQuery>,
) -> ApiResult<ApiResponse<Vec<Book>>> {
    let books = if query.active_only() {
        state.services.books.list_all_active().await
    } else {
        state.services.books.list_all().await
    }
    .or_fail("Failed to retrieve books")?;

    Ok(ApiResponse::with_data(
        format!("Retrieved {} books", books.len()),
        books,
    ))
}

/// Get a book by id
#[utoipa::path(
    get,
    path = "/books/{id}",
    tag = "books",
    params(("id" = i32, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book, or a failure envelope if unknown", body = BookEnvelope)
    )
)]
pub async fn get_book(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
) -> ApiResult<ApiResponse<Book>> {
    let book = state
        .services
        .books
        .get_by_id(id)
        .await
        .or_fail("Failed to retrieve book")?;
    Ok(ApiResponse::with_data("Book retrieved successfully", book))
}

/// Get a book by exact title
#[utoipa::path(
    get,
    path = "/books/title/{title}",
    tag = "books",
    params(("title" = String, Path, description = "Exact book title")),
    responses(
        (status = 200, description = "Book, or a failure envelope if unknown", body = BookEnvelope)
    )
)]
pub async fn get_book_by_title(
    State(state): State<AppState>,
    AppPath(title): AppPath<String>,
) -> ApiResult<ApiResponse<Book>> {
    let book = state
        .services
        .books
        .get_by_title(&title)
        .await
        .or_fail("Failed to retrieve book")?;
    Ok(ApiResponse::with_data("Book retrieved successfully", book))
}

/// Get a book by ISBN
#[utoipa::path(
    get,
    path = "/books/isbn/{isbn}",
    tag = "books",
    params(("isbn" = String, Path, description = "ISBN")),
    responses(
        (status = 200, description = "Book, or a failure envelope if unknown", body = BookEnvelope)
    )
)]
pub async fn get_book_by_isbn(
    State(state): State<AppState>,
    AppPath(isbn): AppPath<String>,
) -> ApiResult<ApiResponse<Book>> {
    let book = state
        .services
        .books
        .get_by_isbn(&isbn)
        .await
        .or_fail("Failed to retrieve book")?;
    Ok(ApiResponse::with_data("Book retrieved successfully", book))
}

/// Partially update a book
#[utoipa::path(
    patch,
    path = "/books/{id}",
    tag = "books",
    params(("id" = i32, Path, description = "Book ID")),
    request_body = UpdateBook,
    responses(
        (status = 200, description = "Updated book, or a failure envelope on unknown id or title conflict", body = BookEnvelope),
        (status = 400, description = "Invalid input", body = ErrorResponse)
    )
)]
pub async fn update_book(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
    AppJson(patch): AppJson<UpdateBook>,
) -> ApiResult<ApiResponse<Book>> {
    let book = state
        .services
        .books
        .update(id, &patch)
        .await
        .or_fail("Failed to update book")?;
    Ok(ApiResponse::with_data("Book updated successfully", book))
}

/// Deactivate a book (soft delete)
#[utoipa::path(
    delete,
    path = "/books/{id}",
    tag = "books",
    params(("id" = i32, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book deactivated", body = MessageEnvelope)
    )
)]
pub async fn delete_book(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
) -> ApiResult<ApiResponse<()>> {
    let message = state
        .services
        .books
        .soft_delete(id)
        .await
        .or_fail("Failed to delete book")?;
    Ok(ApiResponse::message(message))
}

/// Permanently delete a book
#[utoipa::path(
    delete,
    path = "/books/{id}/permanent",
    tag = "books",
    params(("id" = i32, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book removed", body = MessageEnvelope)
    )
)]
pub async fn hard_delete_book(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
) -> ApiResult<ApiResponse<()>> {
    let message = state
        .services
        .books
        .hard_delete(id)
        .await
        .or_fail("Failed to permanently delete book")?;
    Ok(ApiResponse::message(message))
}
