//! Inventory and member management integration tests

mod common;

use anyhow::Result;
use rust_decimal::Decimal;
use librarium::config::DatabaseConfig;
use librarium::models::{CreateBook, CreateMember, NewPurchase, UpdateBook, UpdateMember};
use librarium::{AppConfig, AppError, AppState};

#[tokio::test]
async fn test_create_book_rejects_duplicate_isbn() -> Result<()> {
    let services = common::setup().await;
    common::add_book(&services, "9780441013593", 5, 5).await;

    let err = services
        .inventory
        .create_book(CreateBook {
            title: "Dune".to_string(),
            author: "Frank Herbert".to_string(),
            isbn: "9780441013593".to_string(),
            quantity_available: 1,
            quantity_total: 1,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::UniqueConstraint(_)));
    Ok(())
}

#[tokio::test]
async fn test_create_book_rejects_available_above_total() {
    let services = common::setup().await;

    let err = services
        .inventory
        .create_book(CreateBook {
            title: "Dune".to_string(),
            author: "Frank Herbert".to_string(),
            isbn: "9780441013593".to_string(),
            quantity_available: 5,
            quantity_total: 3,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn test_update_book_merges_partial_fields() -> Result<()> {
    let services = common::setup().await;
    let book = common::add_book(&services, "9780441013593", 5, 5).await;

    let updated = services
        .inventory
        .update_book(
            book.id,
            UpdateBook {
                title: Some("Dune Messiah".to_string()),
                author: None,
                isbn: None,
                quantity_available: None,
                quantity_total: None,
            },
        )
        .await?;

    assert_eq!(updated.title, "Dune Messiah");
    assert_eq!(updated.author, book.author);
    assert_eq!(updated.isbn, book.isbn);
    assert_eq!(updated.quantity_available, 5);
    Ok(())
}

#[tokio::test]
async fn test_update_book_rejects_available_above_total() -> Result<()> {
    let services = common::setup().await;
    let book = common::add_book(&services, "9780441013593", 3, 5).await;

    let err = services
        .inventory
        .update_book(
            book.id,
            UpdateBook {
                title: None,
                author: None,
                isbn: None,
                quantity_available: Some(6),
                quantity_total: None,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
    Ok(())
}

#[tokio::test]
async fn test_update_book_rejects_isbn_already_taken() -> Result<()> {
    let services = common::setup().await;
    common::add_book(&services, "9780441013593", 5, 5).await;
    let other = common::add_book(&services, "9780135957059", 2, 2).await;

    let err = services
        .inventory
        .update_book(
            other.id,
            UpdateBook {
                title: None,
                author: None,
                isbn: Some("9780441013593".to_string()),
                quantity_available: None,
                quantity_total: None,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::UniqueConstraint(_)));
    Ok(())
}

#[tokio::test]
async fn test_delete_book_cascades_to_transactions() -> Result<()> {
    let services = common::setup().await;
    let book = common::add_book(&services, "9780441013593", 5, 5).await;
    let member = common::add_member(&services, "M1").await;
    let transaction = common::issue(&services, book.id, member.id, 10, 0).await;

    services.inventory.delete_book(book.id).await?;

    let err = services.inventory.get_book(book.id).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    let err = services.circulation.get_transaction(transaction.id).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    // The debt the transaction created outlives the cascade
    let member = services.members.get_member(member.id).await?;
    assert_eq!(member.outstanding_debt, Decimal::from(10));
    Ok(())
}

#[tokio::test]
async fn test_create_member_rejects_duplicate_member_id() -> Result<()> {
    let services = common::setup().await;
    common::add_member(&services, "M1").await;

    let err = services
        .members
        .create_member(CreateMember {
            name: "Paul Atreides".to_string(),
            email: "paul@example.org".to_string(),
            member_id: "M1".to_string(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::UniqueConstraint(_)));
    Ok(())
}

#[tokio::test]
async fn test_create_member_rejects_malformed_email() {
    let services = common::setup().await;

    let err = services
        .members
        .create_member(CreateMember {
            name: "Paul Atreides".to_string(),
            email: "not-an-email".to_string(),
            member_id: "M1".to_string(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn test_update_member_never_touches_debt() -> Result<()> {
    let services = common::setup().await;
    let book = common::add_book(&services, "9780441013593", 5, 5).await;
    let member = common::add_member(&services, "M1").await;
    common::issue(&services, book.id, member.id, 5, 0).await;

    let updated = services
        .members
        .update_member(
            member.id,
            UpdateMember {
                name: Some("Paul Atreides".to_string()),
                email: Some("muaddib@example.org".to_string()),
                member_id: None,
            },
        )
        .await?;

    assert_eq!(updated.name, "Paul Atreides");
    assert_eq!(updated.email, "muaddib@example.org");
    assert_eq!(updated.member_id, "M1");
    assert_eq!(updated.outstanding_debt, Decimal::from(5));
    Ok(())
}

#[tokio::test]
async fn test_delete_member_cascades_to_transactions() -> Result<()> {
    let services = common::setup().await;
    let book = common::add_book(&services, "9780441013593", 5, 5).await;
    let member = common::add_member(&services, "M1").await;
    let transaction = common::issue(&services, book.id, member.id, 10, 0).await;

    services.members.delete_member(member.id).await?;

    let err = services.circulation.get_transaction(transaction.id).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    // Stock stays where the issue left it
    let book = services.inventory.get_book(book.id).await?;
    assert_eq!(book.quantity_available, 4);
    Ok(())
}

#[tokio::test]
async fn test_missing_records_are_not_found() {
    let services = common::setup().await;

    let err = services.inventory.get_book(42).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    let err = services.members.get_member(42).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn test_adjust_stock_applies_signed_deltas() -> Result<()> {
    let services = common::setup().await;
    let book = common::add_book(&services, "9780441013593", 5, 5).await;

    let book = services.inventory.adjust_stock(book.id, 2, 2).await?;
    assert_eq!(book.quantity_available, 7);
    assert_eq!(book.quantity_total, 7);

    let book = services.inventory.adjust_stock(book.id, -3, 0).await?;
    assert_eq!(book.quantity_available, 4);
    assert_eq!(book.quantity_total, 7);
    Ok(())
}

#[tokio::test]
async fn test_adjust_stock_below_zero_hits_the_database_check() -> Result<()> {
    let services = common::setup().await;
    let book = common::add_book(&services, "9780441013593", 5, 5).await;

    let err = services.inventory.adjust_stock(book.id, -6, 0).await.unwrap_err();
    assert!(matches!(err, AppError::Database(_)));

    let book = services.inventory.get_book(book.id).await?;
    assert_eq!(book.quantity_available, 5);
    Ok(())
}

#[tokio::test]
async fn test_overview_counts_the_whole_collection() -> Result<()> {
    let services = common::setup().await;
    let book = common::add_book(&services, "9780441013593", 5, 5).await;
    common::add_book(&services, "9780135957059", 2, 2).await;
    let member = common::add_member(&services, "M1").await;
    common::issue(&services, book.id, member.id, 10, 0).await;
    services
        .purchasing
        .record_purchase(NewPurchase {
            title: "The Dispossessed".to_string(),
            author: "Ursula K. Le Guin".to_string(),
            isbn: "9780061054884".to_string(),
            quantity_purchased: 4,
        })
        .await?;

    let overview = services.overview.overview().await?;
    assert_eq!(overview.book_titles, 3);
    assert_eq!(overview.copies_total, 11);
    assert_eq!(overview.copies_available, 10);
    assert_eq!(overview.members, 1);
    assert_eq!(overview.transactions, 1);
    assert_eq!(overview.purchases, 1);
    Ok(())
}

#[tokio::test]
async fn test_app_state_runs_migrations_and_serves_queries() -> Result<()> {
    let config = AppConfig {
        database: DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
            busy_timeout_seconds: 5,
        },
        ..AppConfig::default()
    };

    let state = AppState::initialize(config).await?;

    let overview = state.services.overview.overview().await?;
    assert_eq!(overview.book_titles, 0);
    assert_eq!(overview.members, 0);
    Ok(())
}
