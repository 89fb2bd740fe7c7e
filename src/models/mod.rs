//! Data models for the KEN library

pub mod book;
pub mod copy;
pub mod export;
pub mod import_report;
pub mod location;
pub mod member;
pub mod report;
pub mod transaction;

// Re-export commonly used types
pub use book::Book;
pub use copy::{BookCopy, CopyCondition};
pub use location::Location;
pub use member::{Member, MemberShort};
pub use transaction::{Availability, CopyStatus, Transaction, TransactionDetails};

/// Trim a free-text field, folding blank input into `None`.
pub(crate) fn clean(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
