//! Checkout transaction model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use libris_core::types::{DbId, Timestamp};

/// Full row from the `transactions` table.
///
/// One row per checkout. `actual_return_date` is NULL while the copy is
/// out; the return mutates the row exactly once.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Transaction {
    pub id: DbId,
    pub user_id: DbId,
    pub book_id: DbId,
    pub book_name: String,
    pub author_name: String,
    pub serial_no: String,
    pub issue_date: Timestamp,
    pub expected_return_date: Timestamp,
    pub actual_return_date: Option<Timestamp>,
    pub remarks: String,
    pub fine_amount: i64,
    pub fine_paid: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for recording a checkout. The book snapshot fields are copied from
/// the catalog row at issue time.
#[derive(Debug)]
pub struct CreateTransaction {
    pub user_id: DbId,
    pub book_id: DbId,
    pub book_name: String,
    pub author_name: String,
    pub serial_no: String,
    pub issue_date: Timestamp,
    pub expected_return_date: Timestamp,
    pub remarks: String,
}

/// DTO for completing a return.
#[derive(Debug)]
pub struct CompleteReturn {
    pub actual_return_date: Timestamp,
    pub fine_amount: i64,
    pub fine_paid: bool,
    pub remarks: String,
}

/// An overdue row annotated with the fine accrued as of the query time.
///
/// `accrued_fine` is computed, never persisted; the authoritative fine is
/// only written when the return completes.
#[derive(Debug, Serialize)]
pub struct OverdueTransaction {
    #[serde(flatten)]
    pub transaction: Transaction,
    pub late_days: i64,
    pub accrued_fine: i64,
}

/// Request body for `POST /issue-book`.
#[derive(Debug, Deserialize)]
pub struct IssueBookRequest {
    pub user_id: DbId,
    pub book_id: DbId,
    #[serde(default)]
    pub remarks: Option<String>,
}

/// Request body for `POST /return-book`.
#[derive(Debug, Deserialize)]
pub struct ReturnBookRequest {
    pub transaction_id: DbId,
    pub actual_return_date: Timestamp,
    #[serde(default)]
    pub fine_paid: bool,
    #[serde(default)]
    pub remarks: Option<String>,
}
