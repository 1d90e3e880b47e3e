//! Data models for Librarium

pub mod book;
pub mod member;
pub mod purchase;
pub mod transaction;

// Re-export commonly used types
pub use book::{Book, BookSummary, CreateBook, UpdateBook};
pub use member::{CreateMember, Member, MemberSummary, UpdateMember, MAX_OUTSTANDING_DEBT};
pub use purchase::{NewPurchase, Purchase};
pub use transaction::{
    NewTransaction, Transaction, TransactionSummary, TransactionType, UpdateTransaction,
};

use rust_decimal::Decimal;

/// Parse a decimal stored as TEXT in SQLite.
///
/// SQLite has no native decimal type, so monetary columns are stored as
/// strings. A value that fails to parse is reported as a column decode
/// error, the same way a malformed native column would be.
pub(crate) fn parse_decimal_column(
    value: &str,
    column: &'static str,
) -> Result<Decimal, sqlx::Error> {
    value.parse::<Decimal>().map_err(|e| sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(e),
    })
}
