//! In-process book store

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::BookStore;
use crate::{
    error::{AppError, AppResult},
    models::book::{Book, CreateBook},
};

#[derive(Debug, Default)]
struct Shelf {
    last_id: i32,
    /// Kept in ascending id order
    books: Vec<Book>,
}

impl Shelf {
    fn title_taken(&self, title: &str, except_id: Option<i32>) -> bool {
        self.books
            .iter()
            .any(|b| b.title == title && Some(b.id) != except_id)
    }

    fn position(&self, id: i32) -> Option<usize> {
        self.books.iter().position(|b| b.id == id)
    }
}

#[derive(Debug, Default)]
pub struct MemoryBookStore {
    shelf: RwLock<Shelf>,
}

impl MemoryBookStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BookStore for MemoryBookStore {
    async fn insert(&self, data: &CreateBook) -> AppResult<Book> {
        let mut shelf = self.shelf.write().await;
        if shelf.title_taken(&data.title, None) {
            return Err(AppError::Conflict(format!(
                "Book with title {} already exists",
                data.title
            )));
        }

        let id = shelf
            .last_id
            .checked_add(1)
            .ok_or_else(|| AppError::Internal("Book id space exhausted".to_string()))?;
        shelf.last_id = id;

        let book = Book {
            id,
            title: data.title.clone(),
            author_name: data.author_name.clone(),
            published_year: data.published_year,
            isbn: data.isbn.clone(),
            available_copies: data.available_copies,
            is_available: true,
        };
        shelf.books.push(book.clone());
        Ok(book)
    }

    async fn list_available(&self) -> AppResult<Vec<Book>> {
        let shelf = self.shelf.read().await;
        Ok(shelf.books.iter().filter(|b| b.is_available).cloned().collect())
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Book>> {
        let shelf = self.shelf.read().await;
        Ok(shelf.books.iter().find(|b| b.id == id).cloned())
    }

    async fn find_by_title(&self, title: &str) -> AppResult<Option<Book>> {
        let shelf = self.shelf.read().await;
        Ok(shelf.books.iter().find(|b| b.title == title).cloned())
    }

    async fn find_by_isbn(&self, isbn: &str) -> AppResult<Option<Book>> {
        let shelf = self.shelf.read().await;
        Ok(shelf.books.iter().find(|b| b.isbn == isbn).cloned())
    }

    async fn update(&self, book: &Book) -> AppResult<Option<Book>> {
        let mut shelf = self.shelf.write().await;
        let Some(idx) = shelf.position(book.id) else {
            return Ok(None);
        };
        if shelf.title_taken(&book.title, Some(book.id)) {
            return Err(AppError::Conflict(format!(
                "Book with title {} already exists",
                book.title
            )));
        }
        shelf.books[idx] = book.clone();
        Ok(Some(book.clone()))
    }

    async fn set_available(&self, id: i32, is_available: bool) -> AppResult<bool> {
        let mut shelf = self.shelf.write().await;
        match shelf.books.iter_mut().find(|b| b.id == id) {
            Some(book) => {
                book.is_available = is_available;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: i32) -> AppResult<bool> {
        let mut shelf = self.shelf.write().await;
        match shelf.position(id) {
            Some(idx) => {
                shelf.books.remove(idx);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}
