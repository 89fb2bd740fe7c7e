//! Lending transaction model and derived loan status

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};

use super::member::MemberShort;

/// One loan. Open while `return_date` is `None`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Transaction {
    pub id: i64,
    pub copy_id: i64,
    pub member_id: i64,
    pub issue_date: NaiveDate,
    pub due_date: Option<NaiveDate>,
    pub return_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    pub fn is_open(&self) -> bool {
        self.return_date.is_none()
    }

    /// Open, has a due date, and that date is strictly before `today`
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.is_open() && self.due_date.map(|due| due < today).unwrap_or(false)
    }
}

/// Transaction joined with its copy, title and member, for listings
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct TransactionDetails {
    pub id: i64,
    pub copy_id: i64,
    pub accession_no: Option<String>,
    pub title: String,
    pub member_id: i64,
    pub member_name: String,
    pub issue_date: NaiveDate,
    pub due_date: Option<NaiveDate>,
    pub return_date: Option<NaiveDate>,
}

/// Derived loan status of a copy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum Availability {
    Available,
    Issued,
}

impl std::fmt::Display for Availability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Availability::Available => write!(f, "Available"),
            Availability::Issued => write!(f, "Issued"),
        }
    }
}

/// Availability of a copy together with the open loan, if any
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CopyStatus {
    pub copy_id: i64,
    pub accession_no: Option<String>,
    pub availability: Availability,
    pub holder: Option<MemberShort>,
    pub transaction_id: Option<i64>,
    pub due_date: Option<NaiveDate>,
}

/// Issue request. The copy is named either by id or by accession number.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct IssueCopy {
    pub copy_id: Option<i64>,
    pub accession_no: Option<String>,
    pub member_id: i64,
    /// Defaults to today
    pub issue_date: Option<NaiveDate>,
    /// Defaults to the issue date plus the configured loan term
    pub due_date: Option<NaiveDate>,
}

/// Return request
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct ReturnCopy {
    /// Defaults to today
    pub return_date: Option<NaiveDate>,
}

/// Transaction history filters
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct TransactionQuery {
    /// Only loans that have not been returned
    #[serde(default)]
    pub open_only: bool,
    pub member_id: Option<i64>,
    pub limit: Option<i64>,
}
