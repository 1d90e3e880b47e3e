//! Book model and related types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::error::{AppError, AppResult};

/// A catalogued title with its stock counters
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub author: String,
    /// 13-character ISBN, unique across the catalogue
    pub isbn: String,
    pub quantity_available: i64,
    pub quantity_total: i64,
}

impl Book {
    /// Stock count after issuing one copy.
    ///
    /// Fails when no copy is on the shelf; the caller persists the
    /// returned count together with the transaction row.
    pub fn issue_one(&self) -> AppResult<i64> {
        if self.quantity_available <= 0 {
            return Err(AppError::OutOfStock(format!(
                "no copies of '{}' are available",
                self.title
            )));
        }
        Ok(self.quantity_available - 1)
    }

    /// Stock count after taking one copy back.
    ///
    /// Capped at the total owned so that a stray return can never
    /// leave more copies available than the library holds.
    pub fn return_one(&self) -> i64 {
        (self.quantity_available + 1).min(self.quantity_total)
    }
}

/// Short book representation for search results
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct BookSummary {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub quantity_available: i64,
}

/// Create book request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateBook {
    #[validate(length(min = 1, max = 100, message = "Title must be 1-100 characters"))]
    pub title: String,
    #[validate(length(min = 1, max = 100, message = "Author must be 1-100 characters"))]
    pub author: String,
    #[validate(length(equal = 13, message = "ISBN must be exactly 13 characters"))]
    pub isbn: String,
    #[validate(range(min = 0, message = "Available quantity cannot be negative"))]
    pub quantity_available: i64,
    #[validate(range(min = 0, message = "Total quantity cannot be negative"))]
    pub quantity_total: i64,
}

/// Update book request
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateBook {
    #[validate(length(min = 1, max = 100, message = "Title must be 1-100 characters"))]
    pub title: Option<String>,
    #[validate(length(min = 1, max = 100, message = "Author must be 1-100 characters"))]
    pub author: Option<String>,
    #[validate(length(equal = 13, message = "ISBN must be exactly 13 characters"))]
    pub isbn: Option<String>,
    #[validate(range(min = 0, message = "Available quantity cannot be negative"))]
    pub quantity_available: Option<i64>,
    #[validate(range(min = 0, message = "Total quantity cannot be negative"))]
    pub quantity_total: Option<i64>,
}
