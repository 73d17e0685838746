//! Member report aggregation

use crate::{
    error::{AppError, AppResult},
    models::report::{MemberReport, ReportStatistics},
    repository::{borrows::BorrowsRepository, members::MembersRepository, Repository},
};

#[derive(Clone)]
pub struct ReportsService {
    repository: Repository,
}

impl ReportsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Member details with the books they hold and summary statistics.
    ///
    /// Both reads share one transaction, so the report never mixes states
    /// from before and after a concurrent borrow or return.
    pub async fn member_report(&self, name: &str) -> AppResult<MemberReport> {
        let mut tx = self.repository.pool.begin().await?;

        let member = MembersRepository::find(&mut tx, name)
            .await?
            .ok_or_else(|| AppError::NotFound("Member not found".to_string()))?;
        let borrowed_books = BorrowsRepository::books_for_member(&mut tx, name).await?;

        tx.commit().await?;

        Ok(MemberReport {
            statistics: ReportStatistics::from_books(&borrowed_books),
            member_details: member,
            borrowed_books,
        })
    }
}
