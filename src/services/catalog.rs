//! Book catalog service

use crate::{
    error::AppResult,
    models::book::{Book, BookKey, CreateBook, UpdateBook},
    repository::Repository,
};

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
}

impl CatalogService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Add a book with its initial copy count
    pub async fn create_book(&self, book: CreateBook) -> AppResult<Book> {
        let created = self.repository.books.create(&book.into()).await?;
        tracing::info!(
            title = %created.title,
            author = %created.author,
            copies = created.num_copies,
            "Book added"
        );
        Ok(created)
    }

    pub async fn list_books(&self) -> AppResult<Vec<Book>> {
        self.repository.books.list().await
    }

    pub async fn get_book(&self, key: &BookKey) -> AppResult<Book> {
        self.repository.books.get(key).await
    }

    /// Update descriptive fields and/or the shelf copy count
    pub async fn update_book(&self, key: &BookKey, update: UpdateBook) -> AppResult<Book> {
        let updated = self.repository.books.update(key, &update).await?;
        tracing::info!("Book {} updated", key);
        Ok(updated)
    }

    /// Delete a book. Refused while copies are on loan.
    pub async fn delete_book(&self, key: &BookKey) -> AppResult<()> {
        self.repository.books.delete(key).await?;
        tracing::info!("Book {} deleted", key);
        Ok(())
    }
}
