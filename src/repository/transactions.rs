//! Transactions repository for database operations

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{Pool, Sqlite, SqliteConnection};

use crate::{
    error::{AppError, AppResult},
    models::transaction::{Transaction, TransactionRow, TransactionSummary, TransactionType},
    repository::like_pattern,
};

#[derive(Clone)]
pub struct TransactionsRepository {
    pool: Pool<Sqlite>,
}

impl TransactionsRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    /// Get transaction by ID
    pub async fn get_by_id(&self, id: i64) -> AppResult<Transaction> {
        let row = sqlx::query_as::<_, TransactionRow>("SELECT * FROM transactions WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Transaction with id {} not found", id)))?;
        Ok(Transaction::try_from(row)?)
    }

    /// Get transaction by ID inside an open transaction, before correcting it
    pub async fn get_for_update(
        &self,
        conn: &mut SqliteConnection,
        id: i64,
    ) -> AppResult<Transaction> {
        let row = sqlx::query_as::<_, TransactionRow>("SELECT * FROM transactions WHERE id = ?")
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Transaction with id {} not found", id)))?;
        Ok(Transaction::try_from(row)?)
    }

    /// List all transactions, newest first
    pub async fn list(&self) -> AppResult<Vec<Transaction>> {
        let rows = sqlx::query_as::<_, TransactionRow>(
            "SELECT * FROM transactions ORDER BY transaction_date DESC, id DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        let transactions = rows
            .into_iter()
            .map(Transaction::try_from)
            .collect::<Result<Vec<_>, sqlx::Error>>()?;
        Ok(transactions)
    }

    /// Insert a committed circulation event
    #[allow(clippy::too_many_arguments)]
    pub async fn insert(
        &self,
        conn: &mut SqliteConnection,
        book_id: i64,
        member_id: i64,
        transaction_type: TransactionType,
        transaction_date: DateTime<Utc>,
        fee_charged: Decimal,
        amount_paid: Decimal,
    ) -> AppResult<Transaction> {
        let row = sqlx::query_as::<_, TransactionRow>(
            r#"
            INSERT INTO transactions
                (book_id, member_id, transaction_type, transaction_date, fee_charged, amount_paid)
            VALUES (?, ?, ?, ?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(book_id)
        .bind(member_id)
        .bind(transaction_type.as_str())
        .bind(transaction_date)
        .bind(fee_charged.to_string())
        .bind(amount_paid.to_string())
        .fetch_one(&mut *conn)
        .await?;
        Ok(Transaction::try_from(row)?)
    }

    /// Overwrite the money fields of a recorded transaction
    pub async fn update_amounts(
        &self,
        conn: &mut SqliteConnection,
        id: i64,
        fee_charged: Decimal,
        amount_paid: Decimal,
    ) -> AppResult<()> {
        let result =
            sqlx::query("UPDATE transactions SET fee_charged = ?, amount_paid = ? WHERE id = ?")
                .bind(fee_charged.to_string())
                .bind(amount_paid.to_string())
                .bind(id)
                .execute(&mut *conn)
                .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Transaction with id {} not found", id)));
        }
        Ok(())
    }

    /// Remove a transaction record, leaving stock and debt as they are
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM transactions WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Transaction with id {} not found", id)));
        }
        Ok(())
    }

    /// Case-insensitive contains search across the circulation history.
    ///
    /// Searchable fields are the book's ISBN, the member's membership
    /// code and the transaction type. An unrecognised field matches
    /// nothing rather than erroring.
    pub async fn search(&self, field: &str, query: &str) -> AppResult<Vec<TransactionSummary>> {
        const SELECT: &str = "SELECT t.id, b.isbn AS book_isbn, m.member_id AS member_ref, \
             t.transaction_type, t.transaction_date \
             FROM transactions t \
             JOIN books b ON t.book_id = b.id \
             JOIN members m ON t.member_id = m.id ";

        let predicate = match field {
            "book" => "WHERE b.isbn LIKE ? ESCAPE '\\' ",
            "member" => "WHERE m.member_id LIKE ? ESCAPE '\\' ",
            "type" => "WHERE t.transaction_type LIKE ? ESCAPE '\\' ",
            _ => return Ok(Vec::new()),
        };

        let sql = format!("{SELECT}{predicate}ORDER BY t.id");
        let transactions = sqlx::query_as::<_, TransactionSummary>(&sql)
            .bind(like_pattern(query))
            .fetch_all(&self.pool)
            .await?;
        Ok(transactions)
    }
}
