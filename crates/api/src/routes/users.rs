//! Route definitions for account management and the current-user lookup.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{auth, users};
use crate::state::AppState;

/// Routes mounted at the API root.
///
/// The `/addUser` path name is the one every client of this API already
/// uses, so it stays.
///
/// ```text
/// POST /addUser        add_user (admin)
/// GET  /addUser/{id}   get_user (admin)
/// PUT  /addUser/{id}   update_user (admin)
/// GET  /users          list_users (admin)
/// GET  /me             current user
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/addUser", post(users::add_user))
        .route("/addUser/{id}", get(users::get_user).put(users::update_user))
        .route("/users", get(users::list_users))
        .route("/me", get(auth::me))
}
