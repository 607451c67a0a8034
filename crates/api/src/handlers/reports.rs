//! Tabular report handlers.
//!
//! Every transaction-derived report is scoped: admins see all rows,
//! everyone else only their own. Overdue-ness and the accrued fine are
//! computed against the clock at query time, never persisted.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use libris_core::fine;
use libris_core::status::{MEDIA_BOOK, MEDIA_MOVIE};
use libris_core::types::DbId;
use libris_db::models::transaction::OverdueTransaction;
use libris_db::repositories::{BookRepo, TransactionRepo};

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Admins see every row; other callers are scoped to their own.
fn report_scope(auth: &AuthUser) -> Option<DbId> {
    if auth.is_admin() {
        None
    } else {
        Some(auth.user_id)
    }
}

/// GET /api/v1/issued-books
///
/// All currently unreturned checkouts.
pub async fn issued_books(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let transactions = TransactionRepo::list_unreturned(&state.pool, report_scope(&auth)).await?;

    Ok(Json(DataResponse { data: transactions }))
}

/// GET /api/v1/returned-books
///
/// All completed returns.
pub async fn returned_books(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let transactions = TransactionRepo::list_returned(&state.pool, report_scope(&auth)).await?;

    Ok(Json(DataResponse { data: transactions }))
}

/// GET /api/v1/fines
///
/// Transactions that accrued a fine.
pub async fn fines(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let transactions = TransactionRepo::list_with_fines(&state.pool, report_scope(&auth)).await?;

    Ok(Json(DataResponse { data: transactions }))
}

/// GET /api/v1/overdue-returns
///
/// Unreturned checkouts past their due date, annotated with the fine that
/// would be owed if returned right now.
pub async fn overdue_returns(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let now = Utc::now();
    let transactions = TransactionRepo::list_overdue(&state.pool, now, report_scope(&auth)).await?;

    let rows: Vec<OverdueTransaction> = transactions
        .into_iter()
        .map(|t| {
            let late_days = fine::late_days(t.expected_return_date, now);
            OverdueTransaction {
                late_days,
                accrued_fine: late_days * fine::FINE_PER_DAY,
                transaction: t,
            }
        })
        .collect();

    Ok(Json(DataResponse { data: rows }))
}

/// GET /api/v1/issue-requests
///
/// The transaction ledger viewed as a request log: `created_at` is the
/// requested date, `issue_date` the fulfilled date.
pub async fn issue_requests(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let transactions = TransactionRepo::list_all(&state.pool, report_scope(&auth)).await?;

    Ok(Json(DataResponse { data: transactions }))
}

/// GET /api/v1/master-list-books
pub async fn master_list_books(
    _auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let books = BookRepo::list(&state.pool, Some(MEDIA_BOOK)).await?;

    Ok(Json(DataResponse { data: books }))
}

/// GET /api/v1/master-list-movies
pub async fn master_list_movies(
    _auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let movies = BookRepo::list(&state.pool, Some(MEDIA_MOVIE)).await?;

    Ok(Json(DataResponse { data: movies }))
}
