//! Search service: filtered lookups over books, members and transactions

use crate::{
    error::AppResult,
    models::{BookSummary, MemberSummary, TransactionSummary},
    repository::Repository,
};

#[derive(Clone)]
pub struct SearchService {
    repository: Repository,
}

impl SearchService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Search books by `title`, `author` or `isbn`
    pub async fn search_books(&self, field: &str, query: &str) -> AppResult<Vec<BookSummary>> {
        self.repository.books.search(field, query).await
    }

    /// Search members by `name`, `email` or `member_id`
    pub async fn search_members(&self, field: &str, query: &str) -> AppResult<Vec<MemberSummary>> {
        self.repository.members.search(field, query).await
    }

    /// Search transactions by `book` (ISBN), `member` (membership code)
    /// or `type`
    pub async fn search_transactions(
        &self,
        field: &str,
        query: &str,
    ) -> AppResult<Vec<TransactionSummary>> {
        self.repository.transactions.search(field, query).await
    }
}
