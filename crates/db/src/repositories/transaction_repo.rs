//! Repository for the `transactions` table (checkouts and returns).
//!
//! Issue and return each touch two rows (the transaction and the book
//! status), so both run inside a SQL transaction with a conditional update
//! guarding the book/row state. A lost race shows up as zero rows affected
//! and is reported to the caller as `None`.

use sqlx::PgPool;
use libris_core::status::{BOOK_AVAILABLE, BOOK_ISSUED};
use libris_core::types::{DbId, Timestamp};

use crate::models::transaction::{CompleteReturn, CreateTransaction, Transaction};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, book_id, book_name, author_name, serial_no, issue_date, \
                        expected_return_date, actual_return_date, remarks, fine_amount, \
                        fine_paid, created_at, updated_at";

/// Provides checkout, return, and report queries.
pub struct TransactionRepo;

impl TransactionRepo {
    /// Record a checkout: flip the book to `issued` and insert the
    /// transaction row, atomically.
    ///
    /// Returns `None` when the book was not `available` at update time,
    /// which also covers a concurrent issue of the same copy.
    pub async fn issue(
        pool: &PgPool,
        input: &CreateTransaction,
    ) -> Result<Option<Transaction>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let flipped = sqlx::query(
            "UPDATE books SET status = $2, updated_at = NOW()
             WHERE id = $1 AND status = $3",
        )
        .bind(input.book_id)
        .bind(BOOK_ISSUED)
        .bind(BOOK_AVAILABLE)
        .execute(&mut *tx)
        .await?;

        if flipped.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(None);
        }

        let query = format!(
            "INSERT INTO transactions
                (user_id, book_id, book_name, author_name, serial_no,
                 issue_date, expected_return_date, remarks)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        let transaction = sqlx::query_as::<_, Transaction>(&query)
            .bind(input.user_id)
            .bind(input.book_id)
            .bind(&input.book_name)
            .bind(&input.author_name)
            .bind(&input.serial_no)
            .bind(input.issue_date)
            .bind(input.expected_return_date)
            .bind(&input.remarks)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(transaction))
    }

    /// Record a completed return: stamp the transaction row and flip the
    /// book back to `available`, atomically.
    ///
    /// Returns `None` when the transaction was already returned at update
    /// time (the `actual_return_date IS NULL` guard lost).
    pub async fn complete_return(
        pool: &PgPool,
        id: DbId,
        input: &CompleteReturn,
    ) -> Result<Option<Transaction>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE transactions SET
                actual_return_date = $2,
                fine_amount = $3,
                fine_paid = $4,
                remarks = $5,
                updated_at = NOW()
             WHERE id = $1 AND actual_return_date IS NULL
             RETURNING {COLUMNS}"
        );
        let returned = sqlx::query_as::<_, Transaction>(&query)
            .bind(id)
            .bind(input.actual_return_date)
            .bind(input.fine_amount)
            .bind(input.fine_paid)
            .bind(&input.remarks)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(transaction) = returned else {
            tx.rollback().await?;
            return Ok(None);
        };

        sqlx::query("UPDATE books SET status = $2, updated_at = NOW() WHERE id = $1")
            .bind(transaction.book_id)
            .bind(BOOK_AVAILABLE)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(transaction))
    }

    /// Find a transaction by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Transaction>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM transactions WHERE id = $1");
        sqlx::query_as::<_, Transaction>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List unreturned checkouts, optionally scoped to one user.
    pub async fn list_unreturned(
        pool: &PgPool,
        user_id: Option<DbId>,
    ) -> Result<Vec<Transaction>, sqlx::Error> {
        Self::list_filtered(pool, "actual_return_date IS NULL", user_id).await
    }

    /// List completed returns, optionally scoped to one user.
    pub async fn list_returned(
        pool: &PgPool,
        user_id: Option<DbId>,
    ) -> Result<Vec<Transaction>, sqlx::Error> {
        Self::list_filtered(pool, "actual_return_date IS NOT NULL", user_id).await
    }

    /// List transactions that accrued a fine, optionally scoped to one user.
    pub async fn list_with_fines(
        pool: &PgPool,
        user_id: Option<DbId>,
    ) -> Result<Vec<Transaction>, sqlx::Error> {
        Self::list_filtered(pool, "fine_amount > 0", user_id).await
    }

    /// List unreturned checkouts whose due date has passed as of `now`.
    ///
    /// Overdue-ness is computed at query time against the caller's clock;
    /// nothing is persisted.
    pub async fn list_overdue(
        pool: &PgPool,
        now: Timestamp,
        user_id: Option<DbId>,
    ) -> Result<Vec<Transaction>, sqlx::Error> {
        match user_id {
            Some(uid) => {
                let query = format!(
                    "SELECT {COLUMNS} FROM transactions
                     WHERE actual_return_date IS NULL AND expected_return_date < $1
                       AND user_id = $2
                     ORDER BY expected_return_date"
                );
                sqlx::query_as::<_, Transaction>(&query)
                    .bind(now)
                    .bind(uid)
                    .fetch_all(pool)
                    .await
            }
            None => {
                let query = format!(
                    "SELECT {COLUMNS} FROM transactions
                     WHERE actual_return_date IS NULL AND expected_return_date < $1
                     ORDER BY expected_return_date"
                );
                sqlx::query_as::<_, Transaction>(&query)
                    .bind(now)
                    .fetch_all(pool)
                    .await
            }
        }
    }

    /// List every transaction, optionally scoped to one user.
    pub async fn list_all(
        pool: &PgPool,
        user_id: Option<DbId>,
    ) -> Result<Vec<Transaction>, sqlx::Error> {
        Self::list_filtered(pool, "TRUE", user_id).await
    }

    /// Shared listing with a fixed predicate and optional user scope.
    ///
    /// `predicate` is always a string literal from this module, never
    /// caller input.
    async fn list_filtered(
        pool: &PgPool,
        predicate: &str,
        user_id: Option<DbId>,
    ) -> Result<Vec<Transaction>, sqlx::Error> {
        match user_id {
            Some(uid) => {
                let query = format!(
                    "SELECT {COLUMNS} FROM transactions
                     WHERE {predicate} AND user_id = $1
                     ORDER BY issue_date DESC"
                );
                sqlx::query_as::<_, Transaction>(&query)
                    .bind(uid)
                    .fetch_all(pool)
                    .await
            }
            None => {
                let query = format!(
                    "SELECT {COLUMNS} FROM transactions
                     WHERE {predicate}
                     ORDER BY issue_date DESC"
                );
                sqlx::query_as::<_, Transaction>(&query).fetch_all(pool).await
            }
        }
    }
}
