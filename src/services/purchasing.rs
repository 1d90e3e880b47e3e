//! Purchase processing service

use chrono::Utc;
use validator::Validate;

use crate::{
    error::AppResult,
    models::book::{Book, CreateBook},
    models::purchase::{NewPurchase, Purchase},
    repository::Repository,
};

#[derive(Clone)]
pub struct PurchasingService {
    repository: Repository,
}

impl PurchasingService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Record an acquisition and fold it into the catalogue.
    ///
    /// A known ISBN grows the existing book's stock by the purchased
    /// quantity; an unknown one creates the book. The purchase row is
    /// written either way, so the acquisition history stays complete.
    /// Each call is a distinct event: recording the same purchase twice
    /// adds the copies twice.
    pub async fn record_purchase(&self, purchase: NewPurchase) -> AppResult<Book> {
        purchase.validate()?;

        let mut tx = self.repository.pool.begin().await?;

        let book = match self.repository.books.find_by_isbn(&mut tx, &purchase.isbn).await? {
            Some(book) => {
                let quantity_available = book.quantity_available + purchase.quantity_purchased;
                let quantity_total = book.quantity_total + purchase.quantity_purchased;
                self.repository
                    .books
                    .update_stock(&mut tx, book.id, quantity_available, quantity_total)
                    .await?;
                Book {
                    quantity_available,
                    quantity_total,
                    ..book
                }
            }
            None => {
                let create = CreateBook {
                    title: purchase.title.clone(),
                    author: purchase.author.clone(),
                    isbn: purchase.isbn.clone(),
                    quantity_available: purchase.quantity_purchased,
                    quantity_total: purchase.quantity_purchased,
                };
                self.repository.books.insert(&mut tx, &create).await?
            }
        };

        let recorded = self
            .repository
            .purchases
            .insert(&mut tx, &purchase, Utc::now().date_naive())
            .await?;
        tx.commit().await?;

        tracing::info!(
            "Purchase recorded: id={}, isbn={}, quantity={}",
            recorded.id,
            recorded.isbn,
            recorded.quantity_purchased
        );
        Ok(book)
    }

    /// Acquisition history, newest first
    pub async fn list_purchases(&self) -> AppResult<Vec<Purchase>> {
        self.repository.purchases.list().await
    }
}
