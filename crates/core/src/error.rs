//! Domain-level errors, independent of HTTP and storage.
//!
//! Validation failures and uniqueness conflicts are not modeled here; the
//! API layer reports those directly from the request precondition checks
//! and the database's unique indexes.

use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// An account, catalog entry, membership, or transaction looked up by
    /// id does not exist.
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: DbId },

    /// The caller presented no session token, or an invalid one.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// The caller is authenticated but lacks the required role or does not
    /// own the resource.
    #[error("Forbidden: {0}")]
    Forbidden(String),
}
