//! Catalog item (book/movie) model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use libris_core::types::{DbId, Timestamp};

/// Full catalog row from the `books` table. Movies live here too, tagged
/// with `media_type = "movie"`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Book {
    pub id: DbId,
    pub title: String,
    pub author: String,
    pub media_type: String,
    pub category: String,
    pub serial_no: String,
    pub cost: i64,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for adding a catalog item.
#[derive(Debug, Deserialize)]
pub struct CreateBook {
    pub title: String,
    pub author: String,
    #[serde(default)]
    pub media_type: Option<String>,
    pub category: String,
    pub serial_no: String,
    #[serde(default)]
    pub cost: Option<i64>,
}

/// DTO for updating a catalog item. All fields are optional.
#[derive(Debug, Deserialize)]
pub struct UpdateBook {
    pub title: Option<String>,
    pub author: Option<String>,
    pub media_type: Option<String>,
    pub category: Option<String>,
    pub serial_no: Option<String>,
    pub cost: Option<i64>,
}
