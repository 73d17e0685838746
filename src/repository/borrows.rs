//! Borrows repository for database operations

use chrono::Utc;
use sqlx::{Pool, Sqlite, SqliteConnection};

use crate::{
    error::{on_unique_violation, AppError, AppResult},
    models::{
        book::{Book, BookKey},
        borrow::{Borrow, BorrowKey},
    },
};

#[derive(Clone)]
pub struct BorrowsRepository {
    pool: Pool<Sqlite>,
}

impl BorrowsRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    /// List all active borrows, oldest first
    pub async fn list(&self) -> AppResult<Vec<Borrow>> {
        let borrows = sqlx::query_as::<_, Borrow>(
            "SELECT name, title, author, borrowed_at FROM borrows ORDER BY borrowed_at, name, title, author",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(borrows)
    }

    /// Number of active loans of one book
    pub async fn count_for_book(&self, key: &BookKey) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM borrows WHERE title = ? AND author = ?")
            .bind(&key.title)
            .bind(&key.author)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Whether the member currently holds this book
    pub async fn exists(conn: &mut SqliteConnection, key: &BorrowKey) -> AppResult<bool> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM borrows WHERE name = ? AND title = ? AND author = ?",
        )
        .bind(&key.name)
        .bind(&key.book.title)
        .bind(&key.book.author)
        .fetch_one(&mut *conn)
        .await?;
        Ok(count > 0)
    }

    /// Record a new loan
    pub async fn insert(conn: &mut SqliteConnection, key: &BorrowKey) -> AppResult<Borrow> {
        let borrow = Borrow {
            name: key.name.clone(),
            title: key.book.title.clone(),
            author: key.book.author.clone(),
            borrowed_at: Utc::now(),
        };

        sqlx::query("INSERT INTO borrows (name, title, author, borrowed_at) VALUES (?, ?, ?, ?)")
            .bind(&borrow.name)
            .bind(&borrow.title)
            .bind(&borrow.author)
            .bind(borrow.borrowed_at)
            .execute(&mut *conn)
            .await
            .map_err(|e| {
                on_unique_violation(e, || AppError::AlreadyBorrowed("Book already borrowed".to_string()))
            })?;

        Ok(borrow)
    }

    /// Remove a loan. Returns `false` if there was none.
    pub async fn delete(conn: &mut SqliteConnection, key: &BorrowKey) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM borrows WHERE name = ? AND title = ? AND author = ?")
            .bind(&key.name)
            .bind(&key.book.title)
            .bind(&key.book.author)
            .execute(&mut *conn)
            .await?;

        Ok(result.rows_affected() == 1)
    }

    /// Full records of the books a member currently holds
    pub async fn books_for_member(conn: &mut SqliteConnection, name: &str) -> AppResult<Vec<Book>> {
        let books = sqlx::query_as::<_, Book>(
            r#"
            SELECT bk.title, bk.author, bk.year_published, bk.num_pages, bk.num_copies
            FROM borrows b
            JOIN books bk ON b.title = bk.title AND b.author = bk.author
            WHERE b.name = ?
            ORDER BY b.borrowed_at, bk.title, bk.author
            "#,
        )
        .bind(name)
        .fetch_all(&mut *conn)
        .await?;
        Ok(books)
    }
}
