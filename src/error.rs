//! Error types for librarium

use thiserror::Error;

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid transaction type: {0}")]
    InvalidTransactionType(String),

    #[error("Out of stock: {0}")]
    OutOfStock(String),

    #[error("Debt ceiling exceeded: {0}")]
    DebtCeilingExceeded(String),

    #[error("Unique constraint violated: {0}")]
    UniqueConstraint(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Validation(errors.to_string())
    }
}

impl AppError {
    /// Replace a database unique-violation with a domain-level message.
    ///
    /// Uniqueness is checked up front by the services; this covers the
    /// window where a concurrent insert slips between the check and the
    /// write. Any other error passes through untouched.
    pub fn map_unique_violation(self, message: &str) -> Self {
        match self {
            AppError::Database(sqlx::Error::Database(ref db)) if db.is_unique_violation() => {
                AppError::UniqueConstraint(message.to_string())
            }
            other => other,
        }
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
