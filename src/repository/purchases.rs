//! Purchases repository for database operations

use chrono::NaiveDate;
use sqlx::{Pool, Sqlite, SqliteConnection};

use crate::{
    error::AppResult,
    models::purchase::{NewPurchase, Purchase},
};

#[derive(Clone)]
pub struct PurchasesRepository {
    pool: Pool<Sqlite>,
}

impl PurchasesRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    /// Insert an acquisition record, verbatim as entered
    pub async fn insert(
        &self,
        conn: &mut SqliteConnection,
        purchase: &NewPurchase,
        date: NaiveDate,
    ) -> AppResult<Purchase> {
        let purchase = sqlx::query_as::<_, Purchase>(
            r#"
            INSERT INTO purchases (title, author, isbn, quantity_purchased, date)
            VALUES (?, ?, ?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(&purchase.title)
        .bind(&purchase.author)
        .bind(&purchase.isbn)
        .bind(purchase.quantity_purchased)
        .bind(date)
        .fetch_one(&mut *conn)
        .await?;
        Ok(purchase)
    }

    /// List all purchases, newest first
    pub async fn list(&self) -> AppResult<Vec<Purchase>> {
        let purchases =
            sqlx::query_as::<_, Purchase>("SELECT * FROM purchases ORDER BY date DESC, id DESC")
                .fetch_all(&self.pool)
                .await?;
        Ok(purchases)
    }
}
