//! Member management service

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
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

    /// Register a new member with zero debt
    pub async fn create_member(&self, member: CreateMember) -> AppResult<Member> {
        member.validate()?;

        let mut tx = self.repository.pool.begin().await?;

        // Check if the membership code is already taken
        if self
            .repository
            .members
            .member_id_exists(&mut tx, &member.member_id, None)
            .await?
        {
            return Err(AppError::UniqueConstraint(
                "A member with this member ID already exists".to_string(),
            ));
        }

        let created = self.repository.members.insert(&mut tx, &member).await?;
        tx.commit().await?;

        tracing::info!(
            "Member created: id={}, member_id={}",
            created.id,
            created.member_id
        );
        Ok(created)
    }

    /// Get a member by ID
    pub async fn get_member(&self, id: i64) -> AppResult<Member> {
        self.repository.members.get_by_id(id).await
    }

    /// List all members
    pub async fn list_members(&self) -> AppResult<Vec<Member>> {
        self.repository.members.list().await
    }

    /// Edit a member's profile; absent fields keep their stored values.
    ///
    /// Outstanding debt is not an editable field, it only moves through
    /// the transaction engine.
    pub async fn update_member(&self, id: i64, update: UpdateMember) -> AppResult<Member> {
        update.validate()?;

        let mut tx = self.repository.pool.begin().await?;

        let mut member = self.repository.members.get_for_update(&mut tx, id).await?;
        if let Some(name) = update.name {
            member.name = name;
        }
        if let Some(email) = update.email {
            member.email = email;
        }
        if let Some(member_id) = update.member_id {
            member.member_id = member_id;
        }

        // Check if the membership code is already taken by another member
        if self
            .repository
            .members
            .member_id_exists(&mut tx, &member.member_id, Some(id))
            .await?
        {
            return Err(AppError::UniqueConstraint(
                "A member with this member ID already exists".to_string(),
            ));
        }

        self.repository
            .members
            .update_profile(&mut tx, member.id, &member.name, &member.email, &member.member_id)
            .await?;
        tx.commit().await?;

        tracing::info!("Member updated: id={}", member.id);
        Ok(member)
    }

    /// Remove a member and their transaction history
    pub async fn delete_member(&self, id: i64) -> AppResult<()> {
        self.repository.members.delete(id).await?;
        tracing::info!("Member deleted: id={}", id);
        Ok(())
    }
}
