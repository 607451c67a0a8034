//! Handlers for user management. Admin only.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use libris_core::error::CoreError;
use libris_core::roles::{ROLE_ADMIN, ROLE_USER};
use libris_core::types::DbId;
use libris_db::models::user::{CreateUser, UpdateUser, UserResponse};
use libris_db::repositories::UserRepo;

use crate::auth::password::{hash_password, validate_password_strength};
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// Minimum accepted password length for new accounts.
const MIN_PASSWORD_LENGTH: usize = 8;

/// Request body for `POST /addUser`.
#[derive(Debug, Deserialize)]
pub struct AddUserRequest {
    pub name: String,
    pub email: String,
    pub role: String,
    pub password: String,
}

/// Reject role names outside the two the system knows.
fn validate_role(role: &str) -> AppResult<()> {
    if role != ROLE_ADMIN && role != ROLE_USER {
        return Err(AppError::BadRequest(format!("Invalid role: {role}")));
    }
    Ok(())
}

/// POST /api/v1/addUser
///
/// Create an account. All fields are required; the password is stored as an
/// Argon2id hash. Duplicate emails surface as 409 via the unique index.
pub async fn add_user(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<AddUserRequest>,
) -> AppResult<impl IntoResponse> {
    if input.name.is_empty() || input.email.is_empty() {
        return Err(AppError::BadRequest("All fields required".into()));
    }
    validate_role(&input.role)?;
    validate_password_strength(&input.password, MIN_PASSWORD_LENGTH)
        .map_err(AppError::BadRequest)?;

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let create = CreateUser {
        name: input.name,
        email: input.email,
        password_hash,
        role: input.role,
    };
    let user = UserRepo::create(&state.pool, &create).await?;

    tracing::info!(user_id = user.id, created_by = admin.user_id, "User created");

    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

/// GET /api/v1/addUser/{id}
pub async fn get_user(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(user_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let user = UserRepo::find_by_id(&state.pool, user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: user_id,
        }))?;

    Ok(Json(UserResponse::from(user)))
}

/// PUT /api/v1/addUser/{id}
///
/// Update name, email, and/or role.
pub async fn update_user(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(user_id): Path<DbId>,
    Json(input): Json<UpdateUser>,
) -> AppResult<impl IntoResponse> {
    if let Some(role) = input.role.as_deref() {
        validate_role(role)?;
    }

    let user = UserRepo::update(&state.pool, user_id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: user_id,
        }))?;

    tracing::info!(user_id, updated_by = admin.user_id, "User updated");

    Ok(Json(UserResponse::from(user)))
}

/// GET /api/v1/users
///
/// List all accounts, newest first.
pub async fn list_users(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let users = UserRepo::list(&state.pool).await?;
    let users: Vec<UserResponse> = users.into_iter().map(UserResponse::from).collect();

    Ok(Json(DataResponse { data: users }))
}
