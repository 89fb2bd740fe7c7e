//! Shelf location model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Location {
    pub id: i64,
    /// Unique human-facing code, e.g. `Compartment 12`
    pub code: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateLocation {
    #[validate(length(min = 1, message = "Location code is required"))]
    pub code: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateLocation {
    pub description: Option<String>,
}

/// Code of the n-th seeded shelf slot
pub fn compartment_code(n: u32) -> String {
    format!("Compartment {}", n)
}
