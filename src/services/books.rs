//! Book registry service
//!
//! Owns the record lifecycle: title uniqueness, existence checks, and the
//! difference between deactivating a book and deleting it.

use std::sync::Arc;

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, CreateBook, UpdateBook},
    repository::BookStore,
};

#[derive(Clone)]
pub struct BooksService {
    store: Arc<dyn BookStore>,
}

impl BooksService {
    pub fn new(store: Arc<dyn BookStore>) -> Self {
        Self { store }
    }

    /// Register a new book. Fails with a conflict if the title is taken,
    /// including by a deactivated book.
    pub async fn create(&self, data: &CreateBook) -> AppResult<Book> {
        data.validate()?;

        if self.store.find_by_title(&data.title).await?.is_some() {
            tracing::warn!("Rejected book creation: title {:?} already exists", data.title);
            return Err(AppError::Conflict(format!(
                "Book with title {} already exists",
                data.title
            )));
        }

        let book = self.store.insert(data).await?;
        tracing::info!("Registered book id={} title={:?}", book.id, book.title);
        Ok(book)
    }

    /// List active books
    pub async fn list_all(&self) -> AppResult<Vec<Book>> {
        self.store.list_available().await
    }

    /// List active books (same result as `list_all`)
    pub async fn list_all_active(&self) -> AppResult<Vec<Book>> {
        self.store.list_available().await
    }

    /// Get a book by id, active or not
    pub async fn get_by_id(&self, id: i32) -> AppResult<Book> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id)))
    }

    pub async fn get_by_title(&self, title: &str) -> AppResult<Book> {
        self.store
            .find_by_title(title)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book with title {} not found", title)))
    }

    pub async fn get_by_isbn(&self, isbn: &str) -> AppResult<Book> {
        self.store
            .find_by_isbn(isbn)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book with ISBN {} not found", isbn)))
    }

    /// Merge `patch` into an existing book.
    /// Title uniqueness is only re-checked when the title actually changes.
    pub async fn update(&self, id: i32, patch: &UpdateBook) -> AppResult<Book> {
        patch.validate()?;

        let mut book = self.get_by_id(id).await?;

        if let Some(title) = patch.title_change(&book.title) {
            if self.store.find_by_title(title).await?.is_some() {
                tracing::warn!("Rejected update of book id={}: title {:?} is taken", id, title);
                return Err(AppError::Conflict(
                    "Another book with the same title already exists".to_string(),
                ));
            }
        }

        patch.apply_to(&mut book);

        // The store rejects the title itself if another writer took it after our check
        let updated = match self.store.update(&book).await {
            Ok(updated) => updated,
            Err(AppError::Conflict(_)) => {
                tracing::warn!("Rejected update of book id={}: title {:?} is taken", id, book.title);
                return Err(AppError::Conflict(
                    "Another book with the same title already exists".to_string(),
                ));
            }
            Err(e) => return Err(e),
        }
        .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id)))?;
        tracing::info!("Updated book id={}", id);
        Ok(updated)
    }

    /// Mark a book unavailable; it stays addressable by id, title and ISBN.
    pub async fn soft_delete(&self, id: i32) -> AppResult<String> {
        self.get_by_id(id).await?;

        if !self.store.set_available(id, false).await? {
            return Err(AppError::NotFound(format!("Book with id {} not found", id)));
        }

        tracing::info!("Deactivated book id={}", id);
        Ok(format!("Book with id {} has been deactivated.", id))
    }

    /// Remove a book for good.
    pub async fn hard_delete(&self, id: i32) -> AppResult<String> {
        let book = self.get_by_id(id).await?;

        if !self.store.delete(id).await? {
            return Err(AppError::NotFound(format!("Book with id {} not found", id)));
        }

        tracing::info!("Permanently deleted book id={} title={:?}", id, book.title);
        Ok(format!(
            "Book with id {} (\"{}\") has been permanently deleted.",
            id, book.title
        ))
    }

    /// Readiness of the underlying store
    pub async fn ping(&self) -> AppResult<()> {
        self.store.ping().await
    }
}
