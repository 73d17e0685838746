//! Per-member report

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{book::Book, member::Member};

/// Member details, the books they currently hold, and summary statistics
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MemberReport {
    pub member_details: Member,
    pub statistics: ReportStatistics,
    pub borrowed_books: Vec<Book>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ReportStatistics {
    pub books_borrowed: i64,
    /// Mean page count, one decimal; null when nothing is borrowed
    pub avg_book_length: Option<f64>,
    /// Mean publication year, one decimal; null when nothing is borrowed
    pub avg_book_year: Option<f64>,
}

impl ReportStatistics {
    pub fn from_books(books: &[Book]) -> Self {
        let mean = |value: fn(&Book) -> i32| -> Option<f64> {
            if books.is_empty() {
                return None;
            }
            let sum: i64 = books.iter().map(|b| value(b) as i64).sum();
            Some(round_one_decimal(sum as f64 / books.len() as f64))
        };

        Self {
            books_borrowed: books.len() as i64,
            avg_book_length: mean(|b| b.num_pages),
            avg_book_year: mean(|b| b.year_published),
        }
    }
}

/// Round half away from zero to one decimal place
fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
