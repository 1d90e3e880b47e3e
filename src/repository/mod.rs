//! Repository layer for database operations

pub mod books;
pub mod members;
pub mod purchases;
pub mod transactions;

use sqlx::{Pool, Sqlite};

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Sqlite>,
    pub books: books::BooksRepository,
    pub members: members::MembersRepository,
    pub transactions: transactions::TransactionsRepository,
    pub purchases: purchases::PurchasesRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self {
            books: books::BooksRepository::new(pool.clone()),
            members: members::MembersRepository::new(pool.clone()),
            transactions: transactions::TransactionsRepository::new(pool.clone()),
            purchases: purchases::PurchasesRepository::new(pool.clone()),
            pool,
        }
    }
}

/// Build a LIKE pattern for a contains search.
///
/// Wildcards in the query are escaped so user input always matches
/// literally; queries using it must carry `ESCAPE '\'`.
pub(crate) fn like_pattern(query: &str) -> String {
    let mut escaped = String::with_capacity(query.len() + 2);
    for c in query.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    format!("%{}%", escaped)
}
