//! Books repository for database operations

use sqlx::{Pool, Sqlite, SqliteConnection};

use crate::{
    error::{on_unique_violation, AppError, AppResult},
    models::book::{Book, BookKey, UpdateBook},
};

const BOOK_COLUMNS: &str = "title, author, year_published, num_pages, num_copies";

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Sqlite>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    /// Get book by title and author
    pub async fn get(&self, key: &BookKey) -> AppResult<Book> {
        let mut conn = self.pool.acquire().await?;
        Self::find(&mut conn, key)
            .await?
            .ok_or_else(|| AppError::NotFound("Book not found".to_string()))
    }

    /// Look a book up on an existing connection or transaction
    pub async fn find(conn: &mut SqliteConnection, key: &BookKey) -> AppResult<Option<Book>> {
        let book = sqlx::query_as::<_, Book>(&format!(
            "SELECT {} FROM books WHERE title = ? AND author = ?",
            BOOK_COLUMNS
        ))
        .bind(&key.title)
        .bind(&key.author)
        .fetch_optional(&mut *conn)
        .await?;
        Ok(book)
    }

    /// List all books ordered by title, then author
    pub async fn list(&self) -> AppResult<Vec<Book>> {
        let books = sqlx::query_as::<_, Book>(&format!(
            "SELECT {} FROM books ORDER BY title, author",
            BOOK_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(books)
    }

    /// Insert a new book
    pub async fn create(&self, book: &Book) -> AppResult<Book> {
        sqlx::query(
            r#"
            INSERT INTO books (title, author, year_published, num_pages, num_copies)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&book.title)
        .bind(&book.author)
        .bind(book.year_published)
        .bind(book.num_pages)
        .bind(book.num_copies)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            on_unique_violation(e, || AppError::Conflict("Book already exists".to_string()))
        })?;

        Ok(book.clone())
    }

    /// Apply the fields present in `update`, leaving the others as they are
    pub async fn update(&self, key: &BookKey, update: &UpdateBook) -> AppResult<Book> {
        let mut tx = self.pool.begin().await?;

        let mut sets = Vec::new();

        macro_rules! add_field {
            ($field:expr, $name:expr) => {
                if $field.is_some() {
                    sets.push(concat!($name, " = ?"));
                }
            };
        }

        add_field!(update.year_published, "year_published");
        add_field!(update.num_pages, "num_pages");
        add_field!(update.num_copies, "num_copies");

        if !sets.is_empty() {
            let query = format!(
                "UPDATE books SET {} WHERE title = ? AND author = ?",
                sets.join(", ")
            );
            let mut builder = sqlx::query(&query);

            macro_rules! bind_field {
                ($field:expr) => {
                    if let Some(val) = $field {
                        builder = builder.bind(val);
                    }
                };
            }

            bind_field!(update.year_published);
            bind_field!(update.num_pages);
            bind_field!(update.num_copies);

            let result = builder
                .bind(&key.title)
                .bind(&key.author)
                .execute(&mut *tx)
                .await?;

            if result.rows_affected() == 0 {
                return Err(AppError::NotFound("Book not found".to_string()));
            }
        }

        let book = Self::find(&mut tx, key)
            .await?
            .ok_or_else(|| AppError::NotFound("Book not found".to_string()))?;

        tx.commit().await?;
        Ok(book)
    }

    /// Delete a book unless copies of it are still on loan
    pub async fn delete(&self, key: &BookKey) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            DELETE FROM books
            WHERE title = ? AND author = ?
              AND NOT EXISTS (
                  SELECT 1 FROM borrows
                  WHERE borrows.title = ? AND borrows.author = ?
              )
            "#,
        )
        .bind(&key.title)
        .bind(&key.author)
        .bind(&key.title)
        .bind(&key.author)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            if Self::find(&mut tx, key).await?.is_none() {
                return Err(AppError::NotFound("Book not found".to_string()));
            }
            return Err(AppError::ActiveBorrows(
                "Book has copies on loan that must be returned first".to_string(),
            ));
        }

        tx.commit().await?;
        Ok(())
    }

    /// Take one copy off the shelf if any is available.
    ///
    /// Returns `false` when the book is missing or has no copies left. Being a
    /// write, this also acquires the database write lock for the enclosing
    /// transaction.
    pub async fn take_copy(conn: &mut SqliteConnection, key: &BookKey) -> AppResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE books SET num_copies = num_copies - 1
            WHERE title = ? AND author = ? AND num_copies > 0
            "#,
        )
        .bind(&key.title)
        .bind(&key.author)
        .execute(&mut *conn)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    /// Put one copy back on the shelf. Returns `false` if the book no longer exists.
    pub async fn restore_copy(conn: &mut SqliteConnection, key: &BookKey) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE books SET num_copies = num_copies + 1 WHERE title = ? AND author = ?",
        )
        .bind(&key.title)
        .bind(&key.author)
        .execute(&mut *conn)
        .await?;

        Ok(result.rows_affected() == 1)
    }
}
