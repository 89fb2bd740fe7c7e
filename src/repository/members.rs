//! Members repository for database operations

use sqlx::{Pool, Sqlite};

use crate::{
    error::{AppError, AppResult},
    models::member::{CreateMember, Member, MemberQuery},
};

use super::{like_pattern, page};

#[derive(Clone)]
pub struct MembersRepository {
    pool: Pool<Sqlite>,
}

impl MembersRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    /// Get member by ID
    pub async fn get_by_id(&self, id: i64) -> AppResult<Member> {
        sqlx::query_as::<_, Member>("SELECT * FROM members WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Member with id {} not found", id)))
    }

    /// List members ordered by name
    pub async fn list(&self, query: &MemberQuery) -> AppResult<Vec<Member>> {
        let pattern = like_pattern(query.name.as_deref());
        let (limit, offset) = page(query.limit, query.offset, 200);

        let members = sqlx::query_as::<_, Member>(
            r#"
            SELECT * FROM members
            WHERE (?1 IS NULL OR LOWER(name) LIKE ?1)
            ORDER BY name, id
            LIMIT ?2 OFFSET ?3
            "#,
        )
        .bind(pattern)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(members)
    }

    /// Create a new member
    pub async fn create(&self, member: &CreateMember) -> AppResult<Member> {
        let created = sqlx::query_as::<_, Member>(
            r#"
            INSERT INTO members (name, phone, email, notes)
            VALUES (?, ?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(&member.name)
        .bind(&member.phone)
        .bind(&member.email)
        .bind(&member.notes)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    /// Overwrite every field of a member
    pub async fn update(&self, id: i64, member: &CreateMember) -> AppResult<Member> {
        sqlx::query_as::<_, Member>(
            r#"
            UPDATE members SET name = ?, phone = ?, email = ?, notes = ?
            WHERE id = ?
            RETURNING *
            "#,
        )
        .bind(&member.name)
        .bind(&member.phone)
        .bind(&member.email)
        .bind(&member.notes)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Member with id {} not found", id)))
    }

    /// Every member, unpaged, in id order
    pub async fn all(&self) -> AppResult<Vec<Member>> {
        let members = sqlx::query_as::<_, Member>("SELECT * FROM members ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(members)
    }
}
