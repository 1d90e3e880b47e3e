//! Purchase processor integration tests

mod common;

use anyhow::Result;
use librarium::models::NewPurchase;
use librarium::AppError;

fn purchase(isbn: &str, quantity: i64) -> NewPurchase {
    NewPurchase {
        title: "Dune".to_string(),
        author: "Frank Herbert".to_string(),
        isbn: isbn.to_string(),
        quantity_purchased: quantity,
    }
}

#[tokio::test]
async fn test_first_purchase_creates_the_book() -> Result<()> {
    let services = common::setup().await;

    let book = services
        .purchasing
        .record_purchase(purchase("9780441013593", 3))
        .await?;

    assert_eq!(book.isbn, "9780441013593");
    assert_eq!(book.quantity_available, 3);
    assert_eq!(book.quantity_total, 3);

    let stored = services.inventory.get_book(book.id).await?;
    assert_eq!(stored.quantity_total, 3);

    let history = services.purchasing.list_purchases().await?;
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].quantity_purchased, 3);
    Ok(())
}

#[tokio::test]
async fn test_repeat_purchase_accumulates_stock() -> Result<()> {
    let services = common::setup().await;

    services.purchasing.record_purchase(purchase("9780441013593", 3)).await?;
    let book = services
        .purchasing
        .record_purchase(purchase("9780441013593", 2))
        .await?;

    // Same acquisition twice is two events, not one
    assert_eq!(book.quantity_available, 5);
    assert_eq!(book.quantity_total, 5);

    let books = services.inventory.list_books().await?;
    assert_eq!(books.len(), 1);

    let history = services.purchasing.list_purchases().await?;
    assert_eq!(history.len(), 2);
    Ok(())
}

#[tokio::test]
async fn test_purchase_keeps_stock_issued_in_between() -> Result<()> {
    let services = common::setup().await;

    let book = services
        .purchasing
        .record_purchase(purchase("9780441013593", 3))
        .await?;
    let member = common::add_member(&services, "M1").await;
    common::issue(&services, book.id, member.id, 0, 0).await;

    let book = services
        .purchasing
        .record_purchase(purchase("9780441013593", 2))
        .await?;

    // 3 bought - 1 issued + 2 bought
    assert_eq!(book.quantity_available, 4);
    assert_eq!(book.quantity_total, 5);
    Ok(())
}

#[tokio::test]
async fn test_zero_quantity_purchase_is_still_recorded() -> Result<()> {
    let services = common::setup().await;

    let book = services
        .purchasing
        .record_purchase(purchase("9780441013593", 0))
        .await?;

    assert_eq!(book.quantity_available, 0);
    assert_eq!(book.quantity_total, 0);
    assert_eq!(services.purchasing.list_purchases().await?.len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_purchase_rejects_malformed_isbn() {
    let services = common::setup().await;

    let err = services
        .purchasing
        .record_purchase(purchase("123", 3))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn test_purchase_history_is_newest_first() -> Result<()> {
    let services = common::setup().await;

    services.purchasing.record_purchase(purchase("9780441013593", 1)).await?;
    services.purchasing.record_purchase(purchase("9780441013593", 2)).await?;

    let history = services.purchasing.list_purchases().await?;
    assert_eq!(history[0].quantity_purchased, 2);
    assert_eq!(history[1].quantity_purchased, 1);
    Ok(())
}
