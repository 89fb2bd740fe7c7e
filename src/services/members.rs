//! Member management service

use validator::Validate;

use crate::{
    error::AppResult,
    models::{
        member::{CreateMember, Member, MemberQuery, UpdateMember},
        transaction::{TransactionDetails, TransactionQuery},
    },
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

    /// Register a member. Names may repeat; members are told apart by id.
    pub async fn create(&self, member: CreateMember) -> AppResult<Member> {
        let member = member.normalized();
        member.validate()?;
        let created = self.repository.members.create(&member).await?;
        tracing::info!(member_id = created.id, "Member created");
        Ok(created)
    }

    pub async fn get(&self, id: i64) -> AppResult<Member> {
        self.repository.members.get_by_id(id).await
    }

    pub async fn list(&self, query: &MemberQuery) -> AppResult<Vec<Member>> {
        self.repository.members.list(query).await
    }

    pub async fn update(&self, id: i64, changes: UpdateMember) -> AppResult<Member> {
        let current = self.repository.members.get_by_id(id).await?;
        let updated = changes.apply(&current);
        updated.validate()?;
        self.repository.members.update(id, &updated).await
    }

    /// Loans the member has not returned yet
    pub async fn open_loans(&self, member_id: i64) -> AppResult<Vec<TransactionDetails>> {
        self.repository.members.get_by_id(member_id).await?;
        let query = TransactionQuery {
            open_only: true,
            member_id: Some(member_id),
            limit: None,
        };
        self.repository.transactions.history(&query, 1000).await
    }
}
