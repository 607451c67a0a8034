//! Route definitions for tabular reports.

use axum::routing::get;
use axum::Router;

use crate::handlers::reports;
use crate::state::AppState;

/// Routes mounted at the API root.
///
/// ```text
/// GET /issued-books        unreturned checkouts (scoped)
/// GET /returned-books      completed returns (scoped)
/// GET /fines               checkouts with fines (scoped)
/// GET /overdue-returns     past-due checkouts, fine computed now (scoped)
/// GET /issue-requests      request ledger (scoped)
/// GET /master-list-books   catalog, books only
/// GET /master-list-movies  catalog, movies only
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/issued-books", get(reports::issued_books))
        .route("/returned-books", get(reports::returned_books))
        .route("/fines", get(reports::fines))
        .route("/overdue-returns", get(reports::overdue_returns))
        .route("/issue-requests", get(reports::issue_requests))
        .route("/master-list-books", get(reports::master_list_books))
        .route("/master-list-movies", get(reports::master_list_movies))
}
