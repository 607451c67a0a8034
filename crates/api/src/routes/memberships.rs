//! Route definitions for membership maintenance.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::memberships;
use crate::state::AppState;

/// Routes mounted at the API root.
///
/// ```text
/// POST /membership                          create_membership (admin)
/// GET  /membership/{membership_number}      get_membership (admin)
/// PUT  /membership/{membership_number}      update_membership (admin)
/// GET  /memberships                         list_memberships
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/membership", post(memberships::create_membership))
        .route(
            "/membership/{membership_number}",
            get(memberships::get_membership).put(memberships::update_membership),
        )
        .route("/memberships", get(memberships::list_memberships))
}
