//! Well-known status and media-type string constants.
//!
//! Stored as TEXT columns with CHECK constraints in the migrations; the
//! constants here must stay in sync with those constraints.

/// Catalog item can be issued.
pub const BOOK_AVAILABLE: &str = "available";
/// Catalog item is currently checked out.
pub const BOOK_ISSUED: &str = "issued";

pub const MEDIA_BOOK: &str = "book";
pub const MEDIA_MOVIE: &str = "movie";

pub const MEMBERSHIP_ACTIVE: &str = "active";
pub const MEMBERSHIP_CANCELLED: &str = "cancelled";
