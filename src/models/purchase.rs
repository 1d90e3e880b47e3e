//! Purchase model and related types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// An acquisition record, kept verbatim as entered
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Purchase {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub quantity_purchased: i64,
    pub date: NaiveDate,
}

/// Record purchase request
#[derive(Debug, Deserialize, Validate)]
pub struct NewPurchase {
    #[validate(length(min = 1, max = 100, message = "Title must be 1-100 characters"))]
    pub title: String,
    #[validate(length(min = 1, max = 100, message = "Author must be 1-100 characters"))]
    pub author: String,
    #[validate(length(equal = 13, message = "ISBN must be exactly 13 characters"))]
    pub isbn: String,
    #[validate(range(min = 0, message = "Quantity cannot be negative"))]
    pub quantity_purchased: i64,
}
