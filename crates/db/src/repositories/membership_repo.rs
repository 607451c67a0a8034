//! Repository for the `memberships` table.

use sqlx::PgPool;
use libris_core::status::MEMBERSHIP_ACTIVE;
use libris_core::types::{DbId, Timestamp};

use crate::models::membership::{CreateMembership, Membership};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, membership_number, contact_name, phone, aadhar, address, \
                        term, start_date, end_date, status, created_at, updated_at";

/// Provides CRUD operations for memberships.
pub struct MembershipRepo;

impl MembershipRepo {
    /// Insert a new membership, returning the created row.
    ///
    /// The `uq_memberships_user_id` index rejects a second membership for
    /// the same user even if the caller's existence check raced.
    pub async fn create(pool: &PgPool, input: &CreateMembership) -> Result<Membership, sqlx::Error> {
        let query = format!(
            "INSERT INTO memberships
                (user_id, membership_number, contact_name, phone, aadhar, address,
                 term, start_date, end_date, status)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Membership>(&query)
            .bind(input.user_id)
            .bind(&input.membership_number)
            .bind(&input.contact_name)
            .bind(&input.phone)
            .bind(&input.aadhar)
            .bind(&input.address)
            .bind(&input.term)
            .bind(input.start_date)
            .bind(input.end_date)
            .bind(MEMBERSHIP_ACTIVE)
            .fetch_one(pool)
            .await
    }

    /// Find a user's membership regardless of status.
    pub async fn find_by_user_id(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<Membership>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM memberships WHERE user_id = $1");
        sqlx::query_as::<_, Membership>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user's membership only if it is currently `active`.
    pub async fn find_active_by_user_id(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<Membership>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM memberships WHERE user_id = $1 AND status = $2"
        );
        sqlx::query_as::<_, Membership>(&query)
            .bind(user_id)
            .bind(MEMBERSHIP_ACTIVE)
            .fetch_optional(pool)
            .await
    }

    /// Find a membership by its public membership number.
    pub async fn find_by_number(
        pool: &PgPool,
        membership_number: &str,
    ) -> Result<Option<Membership>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM memberships WHERE membership_number = $1");
        sqlx::query_as::<_, Membership>(&query)
            .bind(membership_number)
            .fetch_optional(pool)
            .await
    }

    /// List all memberships, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Membership>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM memberships ORDER BY created_at DESC");
        sqlx::query_as::<_, Membership>(&query).fetch_all(pool).await
    }

    /// Apply a term extension and/or status change to a membership.
    ///
    /// `term`/`end_date` travel together: a `None` term leaves both columns
    /// untouched. Returns `None` if no row matches the membership number.
    pub async fn update_terms(
        pool: &PgPool,
        membership_number: &str,
        term: Option<&str>,
        end_date: Option<Timestamp>,
        status: Option<&str>,
    ) -> Result<Option<Membership>, sqlx::Error> {
        let query = format!(
            "UPDATE memberships SET
                term = COALESCE($2, term),
                end_date = COALESCE($3, end_date),
                status = COALESCE($4, status),
                updated_at = NOW()
             WHERE membership_number = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Membership>(&query)
            .bind(membership_number)
            .bind(term)
            .bind(end_date)
            .bind(status)
            .fetch_optional(pool)
            .await
    }
}
