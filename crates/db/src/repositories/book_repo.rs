//! Repository for the `books` table (catalog items, books and movies).

use sqlx::PgPool;
use libris_core::status::{BOOK_AVAILABLE, MEDIA_BOOK};
use libris_core::types::DbId;

use crate::models::book::{Book, CreateBook, UpdateBook};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, title, author, media_type, category, serial_no, cost, status, created_at, updated_at";

/// Provides CRUD and status operations for catalog items.
pub struct BookRepo;

impl BookRepo {
    /// Insert a new catalog item, returning the created row.
    ///
    /// New items start as `available`; `media_type` defaults to `book` and
    /// `cost` to 0 when omitted.
    pub async fn create(pool: &PgPool, input: &CreateBook) -> Result<Book, sqlx::Error> {
        let query = format!(
            "INSERT INTO books (title, author, media_type, category, serial_no, cost, status)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Book>(&query)
            .bind(&input.title)
            .bind(&input.author)
            .bind(input.media_type.as_deref().unwrap_or(MEDIA_BOOK))
            .bind(&input.category)
            .bind(&input.serial_no)
            .bind(input.cost.unwrap_or(0))
            .bind(BOOK_AVAILABLE)
            .fetch_one(pool)
            .await
    }

    /// Find a catalog item by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Book>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM books WHERE id = $1");
        sqlx::query_as::<_, Book>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a catalog item by its unique serial number.
    pub async fn find_by_serial_no(
        pool: &PgPool,
        serial_no: &str,
    ) -> Result<Option<Book>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM books WHERE serial_no = $1");
        sqlx::query_as::<_, Book>(&query)
            .bind(serial_no)
            .fetch_optional(pool)
            .await
    }

    /// List catalog items, optionally filtered by media type.
    pub async fn list(pool: &PgPool, media_type: Option<&str>) -> Result<Vec<Book>, sqlx::Error> {
        match media_type {
            Some(media) => {
                let query = format!(
                    "SELECT {COLUMNS} FROM books WHERE media_type = $1 ORDER BY title"
                );
                sqlx::query_as::<_, Book>(&query)
                    .bind(media)
                    .fetch_all(pool)
                    .await
            }
            None => {
                let query = format!("SELECT {COLUMNS} FROM books ORDER BY title");
                sqlx::query_as::<_, Book>(&query).fetch_all(pool).await
            }
        }
    }

    /// Update a catalog item. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateBook,
    ) -> Result<Option<Book>, sqlx::Error> {
        let query = format!(
            "UPDATE books SET
                title = COALESCE($2, title),
                author = COALESCE($3, author),
                media_type = COALESCE($4, media_type),
                category = COALESCE($5, category),
                serial_no = COALESCE($6, serial_no),
                cost = COALESCE($7, cost),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Book>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.author)
            .bind(&input.media_type)
            .bind(&input.category)
            .bind(&input.serial_no)
            .bind(input.cost)
            .fetch_optional(pool)
            .await
    }

    /// Hard-delete a catalog item. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
