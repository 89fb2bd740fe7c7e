//! Full-store snapshot

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{book::Book, copy::BookCopy, location::Location, member::Member, transaction::Transaction};

/// Every row of every table, unpaged, each list in id order
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LibrarySnapshot {
    pub exported_at: DateTime<Utc>,
    pub books: Vec<Book>,
    pub copies: Vec<BookCopy>,
    pub members: Vec<Member>,
    pub transactions: Vec<Transaction>,
    pub locations: Vec<Location>,
}
