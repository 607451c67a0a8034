//! Handlers for login and the current-user lookup.

use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::http::HeaderValue;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use libris_core::error::CoreError;
use libris_db::models::user::UserResponse;
use libris_db::repositories::UserRepo;

use crate::auth::jwt::generate_token;
use crate::auth::password::verify_password;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::{AuthUser, TOKEN_COOKIE};
use crate::state::AppState;

/// Request body for `POST /login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Successful login response. The same token also travels in an HTTP-only
/// `token` cookie for browser clients.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub role: String,
    pub user: UserResponse,
}

/// POST /api/v1/login
///
/// Authenticate with email + password. The signed session token embeds both
/// the user id and the role claim, so later admin checks read role straight
/// from the token.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Response> {
    let user = UserRepo::find_by_email(&state.pool, &input.email)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".into()))?;

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;

    if !password_valid {
        return Err(AppError::Core(CoreError::Unauthorized(
            "Wrong password".into(),
        )));
    }

    let token = generate_token(user.id, &user.role, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    tracing::info!(user_id = user.id, role = %user.role, "User logged in");

    let cookie = format!(
        "{TOKEN_COOKIE}={token}; HttpOnly; SameSite=Lax; Path=/; Max-Age={}",
        state.config.jwt.token_expiry_days * 24 * 60 * 60
    );
    let cookie = HeaderValue::from_str(&cookie)
        .map_err(|e| AppError::InternalError(format!("Cookie encoding error: {e}")))?;

    let body = LoginResponse {
        token,
        role: user.role.clone(),
        user: user.into(),
    };

    let mut response = Json(body).into_response();
    response.headers_mut().insert(SET_COOKIE, cookie);
    Ok(response)
}

/// GET /api/v1/me
///
/// Return the authenticated user's own record (no password hash).
pub async fn me(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<UserResponse>> {
    let user = UserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: auth.user_id,
        }))?;

    Ok(Json(user.into()))
}
