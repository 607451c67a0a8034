//! Handlers for the checkout/return workflow.
//!
//! Issue and return each touch the transaction ledger and the book's
//! availability status; the repository runs both writes in one SQL
//! transaction with a conditional update, so a lost race surfaces here as a
//! precondition failure rather than a double issue.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use serde::Serialize;
use libris_core::error::CoreError;
use libris_core::fine;
use libris_core::status::BOOK_AVAILABLE;
use libris_db::models::transaction::{
    CompleteReturn, CreateTransaction, IssueBookRequest, ReturnBookRequest, Transaction,
};
use libris_db::repositories::{BookRepo, MembershipRepo, TransactionRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Mutation acknowledgement carrying the affected transaction row.
#[derive(Debug, Serialize)]
pub struct TransactionResponse {
    pub message: &'static str,
    pub transaction: Transaction,
}

/// POST /api/v1/issue-book
///
/// Check a copy out to a member. Requires an active membership for the
/// borrower and an available copy; the due date is the issue date plus the
/// loan period.
pub async fn issue_book(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<IssueBookRequest>,
) -> AppResult<impl IntoResponse> {
    let membership = MembershipRepo::find_active_by_user_id(&state.pool, input.user_id).await?;
    if membership.is_none() {
        return Err(AppError::BadRequest(
            "User does not have an active membership".into(),
        ));
    }

    let book = BookRepo::find_by_id(&state.pool, input.book_id).await?;
    let Some(book) = book.filter(|b| b.status == BOOK_AVAILABLE) else {
        return Err(AppError::BadRequest("Book not available for issue".into()));
    };

    let issue_date = Utc::now();
    let create = CreateTransaction {
        user_id: input.user_id,
        book_id: book.id,
        book_name: book.title,
        author_name: book.author,
        serial_no: book.serial_no,
        issue_date,
        expected_return_date: fine::due_date(issue_date),
        remarks: input.remarks.unwrap_or_default(),
    };

    // The conditional status flip inside `issue` re-checks availability, so
    // a concurrent issue of the same copy loses cleanly here.
    let transaction = TransactionRepo::issue(&state.pool, &create)
        .await?
        .ok_or_else(|| AppError::BadRequest("Book not available for issue".into()))?;

    tracing::info!(
        transaction_id = transaction.id,
        book_id = transaction.book_id,
        borrower_id = transaction.user_id,
        issued_by = auth.user_id,
        "Book issued"
    );

    Ok((
        StatusCode::CREATED,
        Json(TransactionResponse {
            message: "Book issued successfully",
            transaction,
        }),
    ))
}

/// POST /api/v1/return-book
///
/// Complete a return. The caller must own the transaction or be an admin.
/// A late return accrues a fine; the return is refused until the fine is
/// flagged paid.
pub async fn return_book(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<ReturnBookRequest>,
) -> AppResult<impl IntoResponse> {
    let transaction = TransactionRepo::find_by_id(&state.pool, input.transaction_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Transaction",
            id: input.transaction_id,
        }))?;

    if !auth.is_admin() && transaction.user_id != auth.user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "You can only return your own books".into(),
        )));
    }

    if transaction.actual_return_date.is_some() {
        return Err(AppError::BadRequest("Book already returned".into()));
    }

    let fine_amount = fine::fine_amount(transaction.expected_return_date, input.actual_return_date);
    if fine_amount > 0 && !input.fine_paid {
        return Err(AppError::BadRequest(
            "Fine is pending, cannot complete return".into(),
        ));
    }

    let complete = CompleteReturn {
        actual_return_date: input.actual_return_date,
        fine_amount,
        // A zero fine counts as settled regardless of what the client sent.
        fine_paid: true,
        remarks: input.remarks.unwrap_or_default(),
    };
    let transaction = TransactionRepo::complete_return(&state.pool, transaction.id, &complete)
        .await?
        .ok_or_else(|| AppError::BadRequest("Book already returned".into()))?;

    tracing::info!(
        transaction_id = transaction.id,
        book_id = transaction.book_id,
        fine_amount,
        returned_by = auth.user_id,
        "Book returned"
    );

    Ok(Json(TransactionResponse {
        message: "Book returned successfully",
        transaction,
    }))
}

/// GET /api/v1/my-issued-books
///
/// The caller's unreturned checkouts.
pub async fn my_issued_books(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let transactions = TransactionRepo::list_unreturned(&state.pool, Some(auth.user_id)).await?;

    Ok(Json(DataResponse { data: transactions }))
}
