//! Borrow (active loan) model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::book::BookKey;

/// Active loan of one book copy to one member
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Borrow {
    /// Borrowing member's name
    pub name: String,
    pub title: String,
    pub author: String,
    pub borrowed_at: DateTime<Utc>,
}

/// Primary key of a loan: at most one active loan per member and book
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BorrowKey {
    pub name: String,
    pub book: BookKey,
}

impl BorrowKey {
    pub fn new(name: impl Into<String>, title: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            book: BookKey::new(title, author),
        }
    }
}

/// Borrow request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBorrow {
    #[validate(length(min = 1, message = "Member name must not be empty"))]
    pub name: String,
    #[validate(length(min = 1, message = "Title must not be empty"))]
    pub title: String,
    #[validate(length(min = 1, message = "Author must not be empty"))]
    pub author: String,
}

impl From<CreateBorrow> for BorrowKey {
    fn from(request: CreateBorrow) -> Self {
        BorrowKey::new(request.name, request.title, request.author)
    }
}
