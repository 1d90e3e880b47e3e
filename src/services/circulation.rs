//! Circulation service: the transaction engine

use chrono::Utc;
use rust_decimal::Decimal;

use crate::{
    error::{AppError, AppResult},
    models::transaction::{NewTransaction, Transaction, TransactionType, UpdateTransaction},
    repository::Repository,
};

#[derive(Clone)]
pub struct CirculationService {
    repository: Repository,
}

impl CirculationService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Issue or return a book.
    ///
    /// All checks run before anything is written: an invalid type, a
    /// missing party, an empty shelf or a breached debt ceiling rejects
    /// the transaction and leaves every record as it was. On success the
    /// transaction row, the stock counter and (for issues) the member's
    /// debt are committed as one unit.
    pub async fn create_transaction(&self, new: NewTransaction) -> AppResult<Transaction> {
        // Reject an unknown type before touching storage
        let transaction_type: TransactionType = new.transaction_type.parse()?;

        if new.fee_charged < Decimal::ZERO || new.amount_paid < Decimal::ZERO {
            return Err(AppError::Validation(
                "Fee and amount paid cannot be negative".to_string(),
            ));
        }

        let mut tx = self.repository.pool.begin().await?;

        let book = self.repository.books.get_for_update(&mut tx, new.book_id).await?;
        let member = self.repository.members.get_for_update(&mut tx, new.member_id).await?;

        let transaction = match transaction_type {
            TransactionType::Issue => {
                let quantity_available = book.issue_one()?;
                let new_debt = member.charge(new.fee_charged, new.amount_paid)?;

                let transaction = self
                    .repository
                    .transactions
                    .insert(
                        &mut tx,
                        book.id,
                        member.id,
                        transaction_type,
                        Utc::now(),
                        new.fee_charged,
                        new.amount_paid,
                    )
                    .await?;
                self.repository
                    .books
                    .update_stock(&mut tx, book.id, quantity_available, book.quantity_total)
                    .await?;
                self.repository.members.update_debt(&mut tx, member.id, new_debt).await?;
                transaction
            }
            TransactionType::Return => {
                // A return moves stock only; whatever was owed stays owed
                let quantity_available = book.return_one();

                let transaction = self
                    .repository
                    .transactions
                    .insert(
                        &mut tx,
                        book.id,
                        member.id,
                        transaction_type,
                        Utc::now(),
                        new.fee_charged,
                        new.amount_paid,
                    )
                    .await?;
                self.repository
                    .books
                    .update_stock(&mut tx, book.id, quantity_available, book.quantity_total)
                    .await?;
                transaction
            }
        };

        tx.commit().await?;

        tracing::info!(
            "Transaction committed: id={}, type={}, book={}, member={}",
            transaction.id,
            transaction.transaction_type,
            transaction.book_id,
            transaction.member_id
        );
        Ok(transaction)
    }

    /// Get a transaction by ID
    pub async fn get_transaction(&self, id: i64) -> AppResult<Transaction> {
        self.repository.transactions.get_by_id(id).await
    }

    /// List all transactions, newest first
    pub async fn list_transactions(&self) -> AppResult<Vec<Transaction>> {
        self.repository.transactions.list().await
    }

    /// Correct the amounts on a recorded transaction.
    ///
    /// The member's debt is shifted by the difference between the new
    /// and old financial effect, under the usual ceiling. Editing a
    /// return shifts nothing, and stock is never re-applied: the copies
    /// moved when the transaction was committed, not now.
    pub async fn edit_transaction(
        &self,
        id: i64,
        update: UpdateTransaction,
    ) -> AppResult<Transaction> {
        let mut tx = self.repository.pool.begin().await?;

        let mut transaction = self.repository.transactions.get_for_update(&mut tx, id).await?;
        let old_effect = transaction.financial_effect();

        if let Some(fee_charged) = update.fee_charged {
            transaction.fee_charged = fee_charged;
        }
        if let Some(amount_paid) = update.amount_paid {
            transaction.amount_paid = amount_paid;
        }

        if transaction.fee_charged < Decimal::ZERO || transaction.amount_paid < Decimal::ZERO {
            return Err(AppError::Validation(
                "Fee and amount paid cannot be negative".to_string(),
            ));
        }

        // Withdraw the old financial effect, apply the new one
        let delta = transaction.financial_effect() - old_effect;
        if !delta.is_zero() {
            let member = self
                .repository
                .members
                .get_for_update(&mut tx, transaction.member_id)
                .await?;
            let new_debt = member.shift_debt(delta)?;
            self.repository.members.update_debt(&mut tx, member.id, new_debt).await?;
        }

        self.repository
            .transactions
            .update_amounts(&mut tx, id, transaction.fee_charged, transaction.amount_paid)
            .await?;
        tx.commit().await?;

        tracing::info!("Transaction corrected: id={}, debt shift={}", id, delta);
        Ok(transaction)
    }

    /// Remove a transaction record.
    ///
    /// The stock and debt effects it caused at commit time stand; this
    /// removes the record, not the consequences.
    pub async fn delete_transaction(&self, id: i64) -> AppResult<()> {
        self.repository.transactions.delete(id).await?;
        tracing::info!("Transaction deleted: id={}", id);
        Ok(())
    }
}
