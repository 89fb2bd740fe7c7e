//! Member (borrower) model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::clean;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Member {
    pub id: i64,
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Identity and display name only
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct MemberShort {
    pub id: i64,
    pub name: String,
}

impl From<Member> for MemberShort {
    fn from(m: Member) -> Self {
        Self { id: m.id, name: m.name }
    }
}

/// Create member request. Names need not be unique.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct CreateMember {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub notes: Option<String>,
}

impl CreateMember {
    pub fn normalized(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            phone: clean(self.phone),
            email: clean(self.email),
            notes: clean(self.notes),
        }
    }
}

/// Update member request
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateMember {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub notes: Option<String>,
}

impl UpdateMember {
    pub fn apply(self, member: &Member) -> CreateMember {
        CreateMember {
            name: self.name.unwrap_or_else(|| member.name.clone()),
            phone: self.phone.or_else(|| member.phone.clone()),
            email: self.email.or_else(|| member.email.clone()),
            notes: self.notes.or_else(|| member.notes.clone()),
        }
        .normalized()
    }
}

#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct MemberQuery {
    /// Case-insensitive fragment of the name
    pub name: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
