//! Book inventory management service

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, CreateBook, UpdateBook},
    repository::Repository,
};

#[derive(Clone)]
pub struct InventoryService {
    repository: Repository,
}

impl InventoryService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Add a book to the catalogue
    pub async fn create_book(&self, book: CreateBook) -> AppResult<Book> {
        book.validate()?;
        if book.quantity_available > book.quantity_total {
            return Err(AppError::Validation(
                "Available quantity cannot exceed total quantity".to_string(),
            ));
        }

        let mut tx = self.repository.pool.begin().await?;

        // Check if the ISBN is already catalogued
        if self.repository.books.isbn_exists(&mut tx, &book.isbn, None).await? {
            return Err(AppError::UniqueConstraint(
                "A book with this ISBN already exists".to_string(),
            ));
        }

        let created = self.repository.books.insert(&mut tx, &book).await?;
        tx.commit().await?;

        tracing::info!("Book created: id={}, isbn={}", created.id, created.isbn);
        Ok(created)
    }

    /// Get a book by ID
    pub async fn get_book(&self, id: i64) -> AppResult<Book> {
        self.repository.books.get_by_id(id).await
    }

    /// List the whole catalogue
    pub async fn list_books(&self) -> AppResult<Vec<Book>> {
        self.repository.books.list().await
    }

    /// Edit a book; absent fields keep their stored values
    pub async fn update_book(&self, id: i64, update: UpdateBook) -> AppResult<Book> {
        update.validate()?;

        let mut tx = self.repository.pool.begin().await?;

        let mut book = self.repository.books.get_for_update(&mut tx, id).await?;
        if let Some(title) = update.title {
            book.title = title;
        }
        if let Some(author) = update.author {
            book.author = author;
        }
        if let Some(isbn) = update.isbn {
            book.isbn = isbn;
        }
        if let Some(quantity_available) = update.quantity_available {
            book.quantity_available = quantity_available;
        }
        if let Some(quantity_total) = update.quantity_total {
            book.quantity_total = quantity_total;
        }

        if book.quantity_available > book.quantity_total {
            return Err(AppError::Validation(
                "Available quantity cannot exceed total quantity".to_string(),
            ));
        }

        // Check if the ISBN is already taken by another book
        if self.repository.books.isbn_exists(&mut tx, &book.isbn, Some(id)).await? {
            return Err(AppError::UniqueConstraint(
                "A book with this ISBN already exists".to_string(),
            ));
        }

        self.repository.books.update(&mut tx, &book).await?;
        tx.commit().await?;

        tracing::info!("Book updated: id={}", book.id);
        Ok(book)
    }

    /// Apply signed stock deltas to a book.
    ///
    /// The caller owns the delta signs; the database constraints reject
    /// counters that would go negative or exceed the total.
    pub async fn adjust_stock(
        &self,
        id: i64,
        delta_available: i64,
        delta_total: i64,
    ) -> AppResult<Book> {
        let mut tx = self.repository.pool.begin().await?;

        let mut book = self.repository.books.get_for_update(&mut tx, id).await?;
        book.quantity_available += delta_available;
        book.quantity_total += delta_total;

        self.repository
            .books
            .update_stock(&mut tx, book.id, book.quantity_available, book.quantity_total)
            .await?;
        tx.commit().await?;

        tracing::info!(
            "Stock adjusted: id={}, available={}, total={}",
            book.id,
            book.quantity_available,
            book.quantity_total
        );
        Ok(book)
    }

    /// Remove a book and its transaction history
    pub async fn delete_book(&self, id: i64) -> AppResult<()> {
        self.repository.books.delete(id).await?;
        tracing::info!("Book deleted: id={}", id);
        Ok(())
    }
}
