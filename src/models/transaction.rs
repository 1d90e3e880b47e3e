//! Transaction model and related types

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::error::AppError;
use crate::models::parse_decimal_column;

/// Direction of a circulation event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Issue,
    Return,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Issue => "issue",
            TransactionType::Return => "return",
        }
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for TransactionType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "issue" => Ok(TransactionType::Issue),
            "return" => Ok(TransactionType::Return),
            _ => Err(AppError::InvalidTransactionType(format!(
                "'{}' (expected 'issue' or 'return')",
                s
            ))),
        }
    }
}

/// Internal row structure for database queries (with String fields)
#[derive(Debug, Clone, FromRow)]
pub struct TransactionRow {
    id: i64,
    book_id: i64,
    member_id: i64,
    transaction_type: String,
    transaction_date: DateTime<Utc>,
    fee_charged: String,
    amount_paid: String,
}

impl TryFrom<TransactionRow> for Transaction {
    type Error = sqlx::Error;

    fn try_from(row: TransactionRow) -> Result<Self, Self::Error> {
        let transaction_type = row
            .transaction_type
            .parse::<TransactionType>()
            .map_err(|e| sqlx::Error::ColumnDecode {
                index: "transaction_type".to_string(),
                source: Box::new(e),
            })?;
        Ok(Transaction {
            id: row.id,
            book_id: row.book_id,
            member_id: row.member_id,
            transaction_type,
            transaction_date: row.transaction_date,
            fee_charged: parse_decimal_column(&row.fee_charged, "fee_charged")?,
            amount_paid: parse_decimal_column(&row.amount_paid, "amount_paid")?,
        })
    }
}

/// A committed circulation event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub book_id: i64,
    pub member_id: i64,
    pub transaction_type: TransactionType,
    pub transaction_date: DateTime<Utc>,
    pub fee_charged: Decimal,
    pub amount_paid: Decimal,
}

impl Transaction {
    /// Net movement this event applies to the member's debt.
    ///
    /// Only issues carry money; a return changes stock and nothing else.
    pub fn financial_effect(&self) -> Decimal {
        match self.transaction_type {
            TransactionType::Issue => self.fee_charged - self.amount_paid,
            TransactionType::Return => Decimal::ZERO,
        }
    }
}

/// Short transaction representation for search results
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TransactionSummary {
    pub id: i64,
    pub book_isbn: String,
    pub member_ref: String,
    pub transaction_type: String,
    pub transaction_date: DateTime<Utc>,
}

/// Create transaction request.
///
/// The type arrives as free text and is parsed before anything is
/// touched, so an unknown value is rejected up front.
#[derive(Debug, Deserialize)]
pub struct NewTransaction {
    pub book_id: i64,
    pub member_id: i64,
    pub transaction_type: String,
    pub fee_charged: Decimal,
    pub amount_paid: Decimal,
}

/// Correct the amounts on a recorded transaction.
///
/// Only the money fields are editable; the parties, the type and the
/// date of a committed event are fixed.
#[derive(Debug, Deserialize)]
pub struct UpdateTransaction {
    pub fee_charged: Option<Decimal>,
    pub amount_paid: Option<Decimal>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transaction_type_parses_case_insensitively() {
        assert_eq!("issue".parse::<TransactionType>().unwrap(), TransactionType::Issue);
        assert_eq!("Return".parse::<TransactionType>().unwrap(), TransactionType::Return);
    }

    #[test]
    fn transaction_type_rejects_unknown_values() {
        let err = "borrow".parse::<TransactionType>().unwrap_err();
        assert!(matches!(err, AppError::InvalidTransactionType(_)));
    }

    #[test]
    fn issue_effect_is_fee_minus_paid() {
        let tx = Transaction {
            id: 1,
            book_id: 1,
            member_id: 1,
            transaction_type: TransactionType::Issue,
            transaction_date: Utc::now(),
            fee_charged: Decimal::from(10),
            amount_paid: Decimal::from(3),
        };
        assert_eq!(tx.financial_effect(), Decimal::from(7));
    }

    #[test]
    fn return_effect_is_zero() {
        let tx = Transaction {
            id: 2,
            book_id: 1,
            member_id: 1,
            transaction_type: TransactionType::Return,
            transaction_date: Utc::now(),
            fee_charged: Decimal::from(10),
            amount_paid: Decimal::from(3),
        };
        assert_eq!(tx.financial_effect(), Decimal::ZERO);
    }
}
