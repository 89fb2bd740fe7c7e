//! Book (title) model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::clean;

/// Catalog title
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub author: Option<String>,
    pub genre: Option<String>,
    pub publisher: Option<String>,
    pub year: Option<i32>,
    pub isbn: Option<String>,
    /// Shelf location code where the title normally lives
    pub default_location: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Create book request. Also the row shape of a bulk import.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize, Validate, ToSchema)]
pub struct CreateBook {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    pub author: Option<String>,
    pub genre: Option<String>,
    pub publisher: Option<String>,
    #[validate(range(min = 0, max = 9999, message = "Year must be between 0 and 9999"))]
    pub year: Option<i32>,
    pub isbn: Option<String>,
    pub default_location: Option<String>,
    pub notes: Option<String>,
}

impl CreateBook {
    /// Trimmed copy with blank optional fields dropped, so that
    /// equal-looking rows deduplicate to the same record.
    pub fn normalized(self) -> Self {
        Self {
            title: self.title.trim().to_string(),
            author: clean(self.author),
            genre: clean(self.genre),
            publisher: clean(self.publisher),
            year: self.year,
            isbn: clean(self.isbn),
            default_location: clean(self.default_location),
            notes: clean(self.notes),
        }
    }
}

/// Update book request; absent fields keep their stored value
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateBook {
    #[validate(length(min = 1, message = "Title cannot be empty"))]
    pub title: Option<String>,
    pub author: Option<String>,
    pub genre: Option<String>,
    pub publisher: Option<String>,
    #[validate(range(min = 0, max = 9999, message = "Year must be between 0 and 9999"))]
    pub year: Option<i32>,
    pub isbn: Option<String>,
    pub default_location: Option<String>,
    pub notes: Option<String>,
}

impl UpdateBook {
    /// Apply the changes on top of an existing record
    pub fn apply(self, book: &Book) -> CreateBook {
        CreateBook {
            title: self.title.unwrap_or_else(|| book.title.clone()),
            author: self.author.or_else(|| book.author.clone()),
            genre: self.genre.or_else(|| book.genre.clone()),
            publisher: self.publisher.or_else(|| book.publisher.clone()),
            year: self.year.or(book.year),
            isbn: self.isbn.or_else(|| book.isbn.clone()),
            default_location: self.default_location.or_else(|| book.default_location.clone()),
            notes: self.notes.or_else(|| book.notes.clone()),
        }
        .normalized()
    }
}

/// Title/author search with paging
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct BookQuery {
    /// Case-insensitive fragment of the title or author
    pub q: Option<String>,
    pub genre: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
