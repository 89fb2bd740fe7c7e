//! Read-only reporting views

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Headline counts for the dashboard
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Dashboard {
    pub total_titles: i64,
    pub total_copies: i64,
    /// Transactions with no return date
    pub issued_now: i64,
    pub overdue: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct GenreCount {
    /// `None` groups titles without a genre
    pub genre: Option<String>,
    pub titles: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct OverdueEntry {
    pub transaction_id: i64,
    pub accession_no: Option<String>,
    pub title: String,
    pub member_id: i64,
    pub member_name: String,
    pub issue_date: NaiveDate,
    pub due_date: NaiveDate,
    /// Whole days past the due date as of the report date
    pub days_overdue: i64,
}
