//! Library overview service

use serde::Serialize;

use crate::{error::AppResult, repository::Repository};

/// Aggregate counters for a dashboard view
#[derive(Debug, Clone, Serialize)]
pub struct LibraryOverview {
    pub book_titles: i64,
    pub copies_total: i64,
    pub copies_available: i64,
    pub members: i64,
    pub transactions: i64,
    pub purchases: i64,
}

#[derive(Clone)]
pub struct OverviewService {
    repository: Repository,
}

impl OverviewService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Count everything the library keeps records of
    pub async fn overview(&self) -> AppResult<LibraryOverview> {
        let pool = &self.repository.pool;

        let book_titles: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books")
            .fetch_one(pool)
            .await?;

        let copies_total: i64 =
            sqlx::query_scalar("SELECT COALESCE(SUM(quantity_total), 0) FROM books")
                .fetch_one(pool)
                .await?;

        let copies_available: i64 =
            sqlx::query_scalar("SELECT COALESCE(SUM(quantity_available), 0) FROM books")
                .fetch_one(pool)
                .await?;

        let members: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM members")
            .fetch_one(pool)
            .await?;

        let transactions: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM transactions")
            .fetch_one(pool)
            .await?;

        let purchases: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM purchases")
            .fetch_one(pool)
            .await?;

        Ok(LibraryOverview {
            book_titles,
            copies_total,
            copies_available,
            members,
            transactions,
            purchases,
        })
    }
}
