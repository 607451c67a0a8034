//! Handlers for membership issuance and maintenance.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use serde::Deserialize;
use libris_core::error::CoreError;
use libris_core::membership::{membership_number, MembershipTerm};
use libris_core::status::{MEMBERSHIP_ACTIVE, MEMBERSHIP_CANCELLED};
use libris_core::types::DbId;
use libris_db::models::membership::{CreateMembership, UpdateMembershipRequest};
use libris_db::repositories::{MembershipRepo, UserRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /membership`.
#[derive(Debug, Deserialize)]
pub struct CreateMembershipRequest {
    pub user_id: DbId,
    pub term: String,
    pub contact_name: Option<String>,
    pub phone: Option<String>,
    pub aadhar: Option<String>,
    pub address: Option<String>,
}

/// Parse and validate a term string from a request.
fn parse_term(term: &str) -> AppResult<MembershipTerm> {
    MembershipTerm::parse(term)
        .ok_or_else(|| AppError::BadRequest(format!("Invalid membership type: {term}")))
}

/// POST /api/v1/membership
///
/// Issue a membership. Admin only. The start date is now, the end date
/// follows from the term, and the number is generated server-side. A user
/// can hold at most one membership; if the check here races, the
/// `uq_memberships_user_id` index still rejects the duplicate.
pub async fn create_membership(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateMembershipRequest>,
) -> AppResult<impl IntoResponse> {
    let term = parse_term(&input.term)?;

    let user = UserRepo::find_by_id(&state.pool, input.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: input.user_id,
        }))?;

    if MembershipRepo::find_by_user_id(&state.pool, user.id)
        .await?
        .is_some()
    {
        return Err(AppError::BadRequest(
            "User already has a membership".into(),
        ));
    }

    let start_date = Utc::now();
    let create = CreateMembership {
        user_id: user.id,
        membership_number: membership_number(start_date),
        contact_name: input.contact_name,
        phone: input.phone,
        aadhar: input.aadhar,
        address: input.address,
        term: term.as_str().to_string(),
        start_date,
        end_date: term.end_date(start_date),
    };
    let membership = MembershipRepo::create(&state.pool, &create).await?;

    tracing::info!(
        membership_id = membership.id,
        membership_number = %membership.membership_number,
        user_id = membership.user_id,
        created_by = admin.user_id,
        "Membership created"
    );

    Ok((StatusCode::CREATED, Json(membership)))
}

/// GET /api/v1/memberships
///
/// Master list of memberships, available to any authenticated user.
pub async fn list_memberships(
    _auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let memberships = MembershipRepo::list(&state.pool).await?;

    Ok(Json(DataResponse { data: memberships }))
}

/// GET /api/v1/membership/{membership_number}
pub async fn get_membership(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(membership_number): Path<String>,
) -> AppResult<impl IntoResponse> {
    let membership = MembershipRepo::find_by_number(&state.pool, &membership_number)
        .await?
        .ok_or_else(|| AppError::NotFound("Membership not found".into()))?;

    Ok(Json(membership))
}

/// PUT /api/v1/membership/{membership_number}
///
/// Extend (new term, end date recomputed from now) and/or change status.
/// Admin only.
pub async fn update_membership(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(membership_number): Path<String>,
    Json(input): Json<UpdateMembershipRequest>,
) -> AppResult<impl IntoResponse> {
    let (term, end_date) = match input.term.as_deref() {
        Some(term) => {
            let term = parse_term(term)?;
            // Extension runs from the update time, not the original start.
            (Some(term.as_str()), Some(term.end_date(Utc::now())))
        }
        None => (None, None),
    };

    if let Some(status) = input.status.as_deref() {
        if status != MEMBERSHIP_ACTIVE && status != MEMBERSHIP_CANCELLED {
            return Err(AppError::BadRequest(format!("Invalid status: {status}")));
        }
    }

    let membership = MembershipRepo::update_terms(
        &state.pool,
        &membership_number,
        term,
        end_date,
        input.status.as_deref(),
    )
    .await?
    .ok_or_else(|| AppError::NotFound("Membership not found".into()))?;

    tracing::info!(
        membership_number = %membership.membership_number,
        status = %membership.status,
        updated_by = admin.user_id,
        "Membership updated"
    );

    Ok(Json(membership))
}
