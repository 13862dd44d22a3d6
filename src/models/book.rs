//! Book model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Book record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: i32,
    /// Title, unique across all records (active or not)
    pub title: String,
    pub author_name: String,
    pub published_year: i32,
    pub isbn: String,
    pub available_copies: i32,
    /// Soft-delete marker; `false` hides the book from listings
    pub is_available: bool,
}

/// Create book request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBook {
    #[validate(length(min = 1, max = 255, message = "Title must be 1-255 characters"))]
    pub title: String,
    #[validate(length(min = 1, max = 255, message = "Author name must be 1-255 characters"))]
    pub author_name: String,
    #[validate(range(min = 0, max = 9999, message = "Published year must be between 0 and 9999"))]
    pub published_year: i32,
    #[validate(length(min = 1, max = 255, message = "ISBN must be 1-255 characters"))]
    pub isbn: String,
    #[validate(range(min = 0, message = "Available copies cannot be negative"))]
    pub available_copies: i32,
}

/// Update book request. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBook {
    #[validate(length(min = 1, max = 255, message = "Title must be 1-255 characters"))]
    pub title: Option<String>,
    #[validate(length(min = 1, max = 255, message = "Author name must be 1-255 characters"))]
    pub author_name: Option<String>,
    #[validate(range(min = 0, max = 9999, message = "Published year must be between 0 and 9999"))]
    pub published_year: Option<i32>,
    #[validate(length(min = 1, max = 255, message = "ISBN must be 1-255 characters"))]
    pub isbn: Option<String>,
    #[validate(range(min = 0, message = "Available copies cannot be negative"))]
    pub available_copies: Option<i32>,
    /// Set back to `true` to reactivate a deactivated book
    pub is_available: Option<bool>,
}

impl UpdateBook {
    /// Merge the provided fields over `book`. The id is never touched.
    pub fn apply_to(&self, book: &mut Book) {
        if let Some(ref title) = self.title {
            book.title = title.clone();
        }
        if let Some(ref author_name) = self.author_name {
            book.author_name = author_name.clone();
        }
        if let Some(published_year) = self.published_year {
            book.published_year = published_year;
        }
        if let Some(ref isbn) = self.isbn {
            book.isbn = isbn.clone();
        }
        if let Some(available_copies) = self.available_copies {
            book.available_copies = available_copies;
        }
        if let Some(is_available) = self.is_available {
            book.is_available = is_available;
        }
    }

    /// Title carried by the patch, if it differs from `current`.
    pub fn title_change<'a>(&'a self, current: &str) -> Option<&'a str> {
        self.title.as_deref().filter(|title| *title != current)
    }
}

/// Book listing query
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct BookQuery {
    /// `active` to list only active books
    pub active: Option<String>,
}

impl BookQuery {
    pub fn active_only(&self) -> bool {
        self.active.as_deref() == Some("active")
    }
}
