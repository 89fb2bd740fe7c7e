//! Copy (physical instance of a book) model and related types

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::{member::MemberShort, transaction::Availability};

/// Physical state of a copy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema, sqlx::Type)]
pub enum CopyCondition {
    #[default]
    Good,
    Worn,
    Damaged,
}

impl std::fmt::Display for CopyCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            CopyCondition::Good => "Good",
            CopyCondition::Worn => "Worn",
            CopyCondition::Damaged => "Damaged",
        };
        write!(f, "{}", label)
    }
}

/// Physical copy. Loan status is never stored here; see `CopyStatus`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BookCopy {
    pub id: i64,
    /// Human-facing label, unique when present
    pub accession_no: Option<String>,
    pub book_id: i64,
    pub condition: CopyCondition,
    pub acquired_date: Option<NaiveDate>,
    #[schema(value_type = Option<String>)]
    pub purchase_price: Option<Decimal>,
    pub current_location: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Copy with its title and derived loan status, for listings
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CopyListing {
    pub id: i64,
    pub accession_no: Option<String>,
    pub book_id: i64,
    pub title: String,
    pub condition: CopyCondition,
    pub current_location: Option<String>,
    pub availability: Availability,
    pub issued_to: Option<MemberShort>,
}

/// Create copy request
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct CreateCopy {
    pub book_id: i64,
    pub accession_no: Option<String>,
    #[serde(default)]
    pub condition: CopyCondition,
    pub acquired_date: Option<NaiveDate>,
    #[schema(value_type = Option<String>)]
    pub purchase_price: Option<Decimal>,
    pub current_location: Option<String>,
}

/// Update copy request; absent fields keep their stored value
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateCopy {
    #[validate(length(min = 1, message = "Accession number cannot be empty"))]
    pub accession_no: Option<String>,
    pub condition: Option<CopyCondition>,
    #[schema(value_type = Option<String>)]
    pub purchase_price: Option<Decimal>,
    pub current_location: Option<String>,
}

/// Copy listing filters
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct CopyQuery {
    /// Case-insensitive fragment of the title, author or accession number
    pub q: Option<String>,
    pub book_id: Option<i64>,
    /// `Available` lists only copies that can be issued right now
    pub availability: Option<Availability>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Text handed to an external label/QR encoder
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CopyLabel {
    pub copy_id: i64,
    pub payload: String,
}
