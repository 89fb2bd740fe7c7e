//! Bulk import report

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Outcome of importing a batch of book rows.
/// Importing the same rows again yields only duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ImportReport {
    /// Rows in the batch
    pub received: usize,
    /// Rows stored as new titles
    pub created: usize,
    /// Rows identical to a title already in the catalog
    pub duplicates: usize,
    /// Rows dropped for having no title
    pub skipped: usize,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}
