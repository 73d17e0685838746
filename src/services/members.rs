//! Member management service

use crate::{
    error::AppResult,
    models::member::{CreateMember, Member, UpdateMember},
    repository::Repository,
};

#[derive(Clone)]
pub struct MembersService {
    repository: Repository,
}

impl MembersService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Register a new member
    pub async fn create_member(&self, member: CreateMember) -> AppResult<Member> {
        let created = self.repository.members.create(&member.into()).await?;
        tracing::info!(member = %created.name, "Member added");
        Ok(created)
    }

    pub async fn list_members(&self) -> AppResult<Vec<Member>> {
        self.repository.members.list().await
    }

    pub async fn get_member(&self, name: &str) -> AppResult<Member> {
        self.repository.members.get_by_name(name).await
    }

    /// Update email and/or age of an existing member
    pub async fn update_member(&self, name: &str, update: UpdateMember) -> AppResult<Member> {
        let updated = self.repository.members.update(name, &update).await?;
        tracing::info!(member = %name, "Member updated");
        Ok(updated)
    }

    /// Delete a member. Refused while the member still holds books.
    pub async fn delete_member(&self, name: &str) -> AppResult<()> {
        self.repository.members.delete(name).await?;
        tracing::info!(member = %name, "Member deleted");
        Ok(())
    }
}
