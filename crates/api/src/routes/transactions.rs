//! Route definitions for the checkout/return workflow.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::transactions;
use crate::state::AppState;

/// Routes mounted at the API root.
///
/// ```text
/// POST /issue-book       issue_book
/// POST /return-book      return_book (owner or admin)
/// GET  /my-issued-books  my_issued_books
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/issue-book", post(transactions::issue_book))
        .route("/return-book", post(transactions::return_book))
        .route("/my-issued-books", get(transactions::my_issued_books))
}
