//! Route definitions for catalog maintenance.

use axum::routing::get;
use axum::Router;

use crate::handlers::books;
use crate::state::AppState;

/// Routes mounted at the API root.
///
/// ```text
/// GET    /books        list_books
/// POST   /books        create_book (admin)
/// GET    /books/{id}   get_book
/// PUT    /books/{id}   update_book (admin)
/// DELETE /books/{id}   delete_book (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/books", get(books::list_books).post(books::create_book))
        .route(
            "/books/{id}",
            get(books::get_book)
                .put(books::update_book)
                .delete(books::delete_book),
        )
}
