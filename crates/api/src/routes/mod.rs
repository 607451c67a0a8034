pub mod books;
pub mod health;
pub mod memberships;
pub mod reports;
pub mod transactions;
pub mod users;

use axum::routing::post;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /login                              login (public)
/// /me                                 current user (auth)
///
/// /books                              list (auth), create (admin)
/// /books/{id}                         get (auth), update, delete (admin)
///
/// /membership                         create (admin)
/// /membership/{membership_number}     get, update (admin)
/// /memberships                        master list (auth)
///
/// /addUser                            create (admin)
/// /addUser/{id}                       get, update (admin)
/// /users                              list (admin)
///
/// /issue-book                         checkout (auth)
/// /return-book                        return (owner or admin)
/// /my-issued-books                    caller's open checkouts (auth)
///
/// /issued-books                       report (scoped)
/// /returned-books                     report (scoped)
/// /fines                              report (scoped)
/// /overdue-returns                    report (scoped, computed now)
/// /issue-requests                     report (scoped)
/// /master-list-books                  catalog report (auth)
/// /master-list-movies                 catalog report (auth)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(handlers::auth::login))
        .merge(books::router())
        .merge(memberships::router())
        .merge(users::router())
        .merge(transactions::router())
        .merge(reports::router())
}
