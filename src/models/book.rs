//! Book model and related types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Catalog entry identified by title and author
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub title: String,
    pub author: String,
    pub year_published: i32,
    pub num_pages: i32,
    /// Copies currently on the shelf (not on loan)
    pub num_copies: i32,
}

/// Composite primary key of a book
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BookKey {
    pub title: String,
    pub author: String,
}

impl BookKey {
    pub fn new(title: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
        }
    }
}

impl std::fmt::Display for BookKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "'{}' by {}", self.title, self.author)
    }
}

/// Create book request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBook {
    #[validate(length(min = 1, message = "Title must not be empty"))]
    pub title: String,
    #[validate(length(min = 1, message = "Author must not be empty"))]
    pub author: String,
    pub year_published: i32,
    #[validate(range(min = 0, message = "Page count must not be negative"))]
    pub num_pages: i32,
    #[validate(range(min = 0, message = "Copy count must not be negative"))]
    pub num_copies: i32,
}

/// Partial book update: absent fields are left untouched
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateBook {
    pub year_published: Option<i32>,
    #[validate(range(min = 0, message = "Page count must not be negative"))]
    pub num_pages: Option<i32>,
    #[validate(range(min = 0, message = "Copy count must not be negative"))]
    pub num_copies: Option<i32>,
}

impl From<CreateBook> for Book {
    fn from(book: CreateBook) -> Self {
        Self {
            title: book.title,
            author: book.author,
            year_published: book.year_published,
            num_pages: book.num_pages,
            num_copies: book.num_copies,
        }
    }
}
