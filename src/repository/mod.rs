//! Repository layer: record stores backing the book registry

pub mod memory;
pub mod postgres;

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::book::{Book, CreateBook},
};

/// Storage contract for book records.
///
/// Implementations must reject a title already held by another record in
/// `insert` and `update` with `AppError::Conflict`, atomically with the write.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookStore: Send + Sync {
    /// Persist a new book with a fresh id and `is_available = true`.
    async fn insert(&self, data: &CreateBook) -> AppResult<Book>;

    /// Books with `is_available = true`, ordered by id.
    async fn list_available(&self) -> AppResult<Vec<Book>>;

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Book>>;

    async fn find_by_title(&self, title: &str) -> AppResult<Option<Book>>;

    /// First book (by id) carrying this ISBN.
    async fn find_by_isbn(&self, isbn: &str) -> AppResult<Option<Book>>;

    /// Overwrite every column of the row with `book.id`. `None` if absent.
    async fn update(&self, book: &Book) -> AppResult<Option<Book>>;

    /// Returns `false` when no row has this id.
    async fn set_available(&self, id: i32, is_available: bool) -> AppResult<bool>;

    /// Returns `false` when no row has this id.
    async fn delete(&self, id: i32) -> AppResult<bool>;

    /// Cheap round trip used by the readiness probe.
    async fn ping(&self) -> AppResult<()>;
}

/// Main repository struct holding the configured store
#[derive(Clone)]
pub struct Repository {
    pub books: Arc<dyn BookStore>,
}

impl Repository {
    /// Create a repository backed by PostgreSQL
    pub fn postgres(pool: Pool<Postgres>) -> Self {
        Self {
            books: Arc::new(postgres::PgBookStore::new(pool)),
        }
    }

    /// Create a repository that keeps books in process memory
    pub fn in_memory() -> Self {
        Self {
            books: Arc::new(memory::MemoryBookStore::new()),
        }
    }
}
