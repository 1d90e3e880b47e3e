//! Books repository for database operations

use sqlx::{Pool, Sqlite, SqliteConnection};

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, BookSummary, CreateBook},
    repository::like_pattern,
};

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Sqlite>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    /// Get book by ID
    pub async fn get_by_id(&self, id: i64) -> AppResult<Book> {
        sqlx::query_as::<_, Book>("SELECT * FROM books WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id)))
    }

    /// Get book by ID inside an open transaction, before mutating its stock
    pub async fn get_for_update(&self, conn: &mut SqliteConnection, id: i64) -> AppResult<Book> {
        sqlx::query_as::<_, Book>("SELECT * FROM books WHERE id = ?")
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id)))
    }

    /// Look up a book by ISBN inside an open transaction
    pub async fn find_by_isbn(
        &self,
        conn: &mut SqliteConnection,
        isbn: &str,
    ) -> AppResult<Option<Book>> {
        let book = sqlx::query_as::<_, Book>("SELECT * FROM books WHERE isbn = ?")
            .bind(isbn)
            .fetch_optional(&mut *conn)
            .await?;
        Ok(book)
    }

    /// Check if an ISBN is already catalogued (optionally excluding a book)
    pub async fn isbn_exists(
        &self,
        conn: &mut SqliteConnection,
        isbn: &str,
        exclude_id: Option<i64>,
    ) -> AppResult<bool> {
        let exists: bool = if let Some(id) = exclude_id {
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM books WHERE isbn = ? AND id != ?)")
                .bind(isbn)
                .bind(id)
                .fetch_one(&mut *conn)
                .await?
        } else {
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM books WHERE isbn = ?)")
                .bind(isbn)
                .fetch_one(&mut *conn)
                .await?
        };
        Ok(exists)
    }

    /// List all books
    pub async fn list(&self) -> AppResult<Vec<Book>> {
        let books = sqlx::query_as::<_, Book>("SELECT * FROM books ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(books)
    }

    /// Insert a new book
    pub async fn insert(&self, conn: &mut SqliteConnection, book: &CreateBook) -> AppResult<Book> {
        sqlx::query_as::<_, Book>(
            r#"
            INSERT INTO books (title, author, isbn, quantity_available, quantity_total)
            VALUES (?, ?, ?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(&book.title)
        .bind(&book.author)
        .bind(&book.isbn)
        .bind(book.quantity_available)
        .bind(book.quantity_total)
        .fetch_one(&mut *conn)
        .await
        .map_err(|e| {
            AppError::from(e).map_unique_violation("A book with this ISBN already exists")
        })
    }

    /// Persist an edited book
    pub async fn update(&self, conn: &mut SqliteConnection, book: &Book) -> AppResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE books
            SET title = ?, author = ?, isbn = ?, quantity_available = ?, quantity_total = ?
            WHERE id = ?
            "#,
        )
        .bind(&book.title)
        .bind(&book.author)
        .bind(&book.isbn)
        .bind(book.quantity_available)
        .bind(book.quantity_total)
        .bind(book.id)
        .execute(&mut *conn)
        .await
        .map_err(|e| {
            AppError::from(e).map_unique_violation("A book with this ISBN already exists")
        })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Book with id {} not found", book.id)));
        }
        Ok(())
    }

    /// Write new stock counters for a book
    pub async fn update_stock(
        &self,
        conn: &mut SqliteConnection,
        id: i64,
        quantity_available: i64,
        quantity_total: i64,
    ) -> AppResult<()> {
        let result =
            sqlx::query("UPDATE books SET quantity_available = ?, quantity_total = ? WHERE id = ?")
                .bind(quantity_available)
                .bind(quantity_total)
                .bind(id)
                .execute(&mut *conn)
                .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Book with id {} not found", id)));
        }
        Ok(())
    }

    /// Delete a book; its transactions go with it
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM books WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Book with id {} not found", id)));
        }
        Ok(())
    }

    /// Case-insensitive contains search over one catalogue field.
    ///
    /// An unrecognised field matches nothing rather than erroring.
    pub async fn search(&self, field: &str, query: &str) -> AppResult<Vec<BookSummary>> {
        let sql = match field {
            "title" => {
                "SELECT id, title, author, isbn, quantity_available FROM books \
                 WHERE title LIKE ? ESCAPE '\\' ORDER BY id"
            }
            "author" => {
                "SELECT id, title, author, isbn, quantity_available FROM books \
                 WHERE author LIKE ? ESCAPE '\\' ORDER BY id"
            }
            "isbn" => {
                "SELECT id, title, author, isbn, quantity_available FROM books \
                 WHERE isbn LIKE ? ESCAPE '\\' ORDER BY id"
            }
            _ => return Ok(Vec::new()),
        };

        let books = sqlx::query_as::<_, BookSummary>(sql)
            .bind(like_pattern(query))
            .fetch_all(&self.pool)
            .await?;
        Ok(books)
    }
}
