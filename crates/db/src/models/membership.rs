//! Membership model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use libris_core::types::{DbId, Timestamp};

/// Full row from the `memberships` table.
///
/// The contact fields are a snapshot taken when the membership was created;
/// they are not kept in sync with later user edits.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Membership {
    pub id: DbId,
    pub user_id: DbId,
    pub membership_number: String,
    pub contact_name: Option<String>,
    pub phone: Option<String>,
    pub aadhar: Option<String>,
    pub address: Option<String>,
    pub term: String,
    pub start_date: Timestamp,
    pub end_date: Timestamp,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for issuing a membership. Dates and number are computed server-side.
#[derive(Debug)]
pub struct CreateMembership {
    pub user_id: DbId,
    pub membership_number: String,
    pub contact_name: Option<String>,
    pub phone: Option<String>,
    pub aadhar: Option<String>,
    pub address: Option<String>,
    pub term: String,
    pub start_date: Timestamp,
    pub end_date: Timestamp,
}

/// Request body for `PUT /membership/{membership_number}`.
///
/// `term` extends the membership (end date recomputed from now);
/// `status` switches between `active` and `cancelled`.
#[derive(Debug, Deserialize)]
pub struct UpdateMembershipRequest {
    pub term: Option<String>,
    pub status: Option<String>,
}
