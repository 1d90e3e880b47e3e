//! Shared test harness
#![allow(dead_code)]

use rust_decimal::Decimal;
use sqlx::sqlite::SqlitePoolOptions;

use librarium::models::{Book, CreateBook, CreateMember, Member, NewTransaction, Transaction};
use librarium::repository::Repository;
use librarium::services::Services;

/// Fresh in-memory database with migrations applied.
///
/// One connection only: each SQLite `:memory:` connection is its own
/// database, so a larger pool would scatter the tables.
pub async fn setup() -> Services {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to open in-memory database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    Services::new(Repository::new(pool))
}

/// Catalogue a book directly with the given stock counters
pub async fn add_book(services: &Services, isbn: &str, available: i64, total: i64) -> Book {
    services
        .inventory
        .create_book(CreateBook {
            title: format!("Book {}", isbn),
            author: "Test Author".to_string(),
            isbn: isbn.to_string(),
            quantity_available: available,
            quantity_total: total,
        })
        .await
        .expect("Failed to create book")
}

/// Register a member with the given membership code
pub async fn add_member(services: &Services, member_id: &str) -> Member {
    services
        .members
        .create_member(CreateMember {
            name: format!("Member {}", member_id),
            email: format!("{}@example.org", member_id),
            member_id: member_id.to_string(),
        })
        .await
        .expect("Failed to create member")
}

/// Issue a book to a member with the given whole-unit amounts
pub async fn issue(
    services: &Services,
    book_id: i64,
    member_id: i64,
    fee: i64,
    paid: i64,
) -> Transaction {
    services
        .circulation
        .create_transaction(NewTransaction {
            book_id,
            member_id,
            transaction_type: "issue".to_string(),
            fee_charged: Decimal::from(fee),
            amount_paid: Decimal::from(paid),
        })
        .await
        .expect("Failed to issue book")
}
