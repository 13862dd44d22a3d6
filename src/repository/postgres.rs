//! PostgreSQL book store

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use super::BookStore;
use crate::{
    error::{AppError, AppResult},
    models::book::{Book, CreateBook},
};

const BOOK_COLUMNS: &str =
    "id, title, author_name, published_year, isbn, available_copies, is_available";

/// Map a unique violation on `books.title` to a conflict; everything else
/// stays a database error.
fn map_title_conflict(e: sqlx::Error, title: &str) -> AppError {
    match e {
        sqlx::Error::Database(ref db) if db.is_unique_violation() => {
            AppError::Conflict(format!("Book with title {} already exists", title))
        }
        other => AppError::Database(other),
    }
}

#[derive(Clone)]
pub struct PgBookStore {
    pool: Pool<Postgres>,
}

impl PgBookStore {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookStore for PgBookStore {
    async fn insert(&self, data: &CreateBook) -> AppResult<Book> {
        let query = format!(
            r#"
            INSERT INTO books (title, author_name, published_year, isbn, available_copies, is_available)
            VALUES ($1, $2, $3, $4, $5, TRUE)
            RETURNING {}
            "#,
            BOOK_COLUMNS
        );
        sqlx::query_as::<_, Book>(&query)
            .bind(&data.title)
            .bind(&data.author_name)
            .bind(data.published_year)
            .bind(&data.isbn)
            .bind(data.available_copies)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_title_conflict(e, &data.title))
    }

    async fn list_available(&self) -> AppResult<Vec<Book>> {
        let query = format!(
            "SELECT {} FROM books WHERE is_available = TRUE ORDER BY id",
            BOOK_COLUMNS
        );
        let rows = sqlx::query_as::<_, Book>(&query)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Book>> {
        let query = format!("SELECT {} FROM books WHERE id = $1", BOOK_COLUMNS);
        let row = sqlx::query_as::<_, Book>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn find_by_title(&self, title: &str) -> AppResult<Option<Book>> {
        let query = format!("SELECT {} FROM books WHERE title = $1", BOOK_COLUMNS);
        let row = sqlx::query_as::<_, Book>(&query)
            .bind(title)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn find_by_isbn(&self, isbn: &str) -> AppResult<Option<Book>> {
        let query = format!(
            "SELECT {} FROM books WHERE isbn = $1 ORDER BY id LIMIT 1",
            BOOK_COLUMNS
        );
        let row = sqlx::query_as::<_, Book>(&query)
            .bind(isbn)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn update(&self, book: &Book) -> AppResult<Option<Book>> {
        let query = format!(
            r#"
            UPDATE books
            SET title = $1, author_name = $2, published_year = $3, isbn = $4,
                available_copies = $5, is_available = $6
            WHERE id = $7
            RETURNING {}
            "#,
            BOOK_COLUMNS
        );
        sqlx::query_as::<_, Book>(&query)
            .bind(&book.title)
            .bind(&book.author_name)
            .bind(book.published_year)
            .bind(&book.isbn)
            .bind(book.available_copies)
            .bind(book.is_available)
            .bind(book.id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_title_conflict(e, &book.title))
    }

    async fn set_available(&self, id: i32, is_available: bool) -> AppResult<bool> {
        let result = sqlx::query("UPDATE books SET is_available = $1 WHERE id = $2")
            .bind(is_available)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: i32) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
