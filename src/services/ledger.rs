//! Inventory ledger: the borrow/return state machine
//!
//! A (member, book) pair is either not borrowed or borrowed. `borrow` moves one
//! copy from the shelf to the member, `return` moves it back. Each transition
//! runs in a single transaction so a copy is never created, lost, or lent twice.

use crate::{
    error::{AppError, AppResult},
    models::{
        book::BookKey,
        borrow::{Borrow, BorrowKey},
    },
    repository::{
        books::BooksRepository, borrows::BorrowsRepository, members::MembersRepository, Repository,
    },
};

#[derive(Clone)]
pub struct LedgerService {
    repository: Repository,
}

impl LedgerService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Lend one copy of a book to a member.
    ///
    /// Fails with `NotFound` (member, then book), `OutOfStock` or
    /// `AlreadyBorrowed`, in that order, without changing anything.
    pub async fn borrow(&self, key: BorrowKey) -> AppResult<Borrow> {
        let mut tx = self.repository.pool.begin().await?;

        // The reservation is the first statement so the write lock is held
        // while the remaining checks are read. Every early return below
        // drops `tx` and rolls it back.
        let reserved = BooksRepository::take_copy(&mut tx, &key.book).await?;

        if MembersRepository::find(&mut tx, &key.name).await?.is_none() {
            tracing::debug!(member = %key.name, "Borrow rejected: unknown member");
            return Err(AppError::NotFound("Member not found".to_string()));
        }

        if BooksRepository::find(&mut tx, &key.book).await?.is_none() {
            tracing::debug!("Borrow rejected: unknown book {}", key.book);
            return Err(AppError::NotFound("Book not found".to_string()));
        }

        if !reserved {
            tracing::debug!("Borrow rejected: no copies of {} left", key.book);
            return Err(AppError::OutOfStock("No copies available".to_string()));
        }

        if BorrowsRepository::exists(&mut tx, &key).await? {
            tracing::debug!(member = %key.name, "Borrow rejected: {} already held", key.book);
            return Err(AppError::AlreadyBorrowed("Book already borrowed".to_string()));
        }

        let borrow = BorrowsRepository::insert(&mut tx, &key).await?;
        tx.commit().await?;

        tracing::info!(member = %borrow.name, title = %borrow.title, author = %borrow.author, "Book borrowed");
        Ok(borrow)
    }

    /// List every active loan
    pub async fn list_borrows(&self) -> AppResult<Vec<Borrow>> {
        self.repository.borrows.list().await
    }

    /// Take a book back from a member.
    ///
    /// The copy count is only restored if the book still exists; the loan
    /// record is removed either way.
    pub async fn return_book(&self, key: BorrowKey) -> AppResult<()> {
        let mut tx = self.repository.pool.begin().await?;

        if !BorrowsRepository::delete(&mut tx, &key).await? {
            return Err(AppError::NotFound("Borrow record not found".to_string()));
        }

        if !BooksRepository::restore_copy(&mut tx, &key.book).await? {
            tracing::warn!("Returned {} no longer exists in the catalog", key.book);
        }

        tx.commit().await?;

        tracing::info!(member = %key.name, title = %key.book.title, author = %key.book.author, "Book returned");
        Ok(())
    }

    /// Copies currently lent out for a book
    pub async fn copies_on_loan(&self, key: &BookKey) -> AppResult<i64> {
        self.repository.borrows.count_for_book(key).await
    }
}
