//! Member model and related types

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::models::parse_decimal_column;

/// Hard ceiling on a member's outstanding debt, in KES.
pub const MAX_OUTSTANDING_DEBT: i64 = 500;

/// Internal row structure for database queries (debt stored as TEXT)
#[derive(Debug, Clone, FromRow)]
pub struct MemberRow {
    id: i64,
    name: String,
    email: String,
    member_id: String,
    outstanding_debt: String,
}

impl TryFrom<MemberRow> for Member {
    type Error = sqlx::Error;

    fn try_from(row: MemberRow) -> Result<Self, Self::Error> {
        Ok(Member {
            id: row.id,
            name: row.name,
            email: row.email,
            member_id: row.member_id,
            outstanding_debt: parse_decimal_column(&row.outstanding_debt, "outstanding_debt")?,
        })
    }
}

/// A registered library member
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Member {
    pub id: i64,
    pub name: String,
    pub email: String,
    /// Human-facing membership code, unique across members
    pub member_id: String,
    /// May go negative when a member overpays (credit)
    pub outstanding_debt: Decimal,
}

impl Member {
    /// Debt after charging a fee and collecting a payment in one move.
    pub fn charge(&self, fee: Decimal, paid: Decimal) -> AppResult<Decimal> {
        self.shift_debt(fee - paid)
    }

    /// Debt after applying a signed correction.
    ///
    /// Fails when the result would cross the ceiling; there is no floor,
    /// overpayment is carried as credit.
    pub fn shift_debt(&self, delta: Decimal) -> AppResult<Decimal> {
        let new_debt = self.outstanding_debt + delta;
        if new_debt > Decimal::from(MAX_OUTSTANDING_DEBT) {
            return Err(AppError::DebtCeilingExceeded(format!(
                "debt for '{}' would reach KES {}, above the KES {} ceiling",
                self.name, new_debt, MAX_OUTSTANDING_DEBT
            )));
        }
        Ok(new_debt)
    }
}

/// Short member representation for search results
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MemberSummary {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub member_id: String,
}

/// Create member request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateMember {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(min = 1, max = 10, message = "Member ID must be 1-10 characters"))]
    pub member_id: String,
}

/// Update member request.
///
/// Outstanding debt is deliberately absent: it only moves through
/// transactions, never through a profile edit.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateMember {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: Option<String>,
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
    #[validate(length(min = 1, max = 10, message = "Member ID must be 1-10 characters"))]
    pub member_id: Option<String>,
}
