//! JWT-based authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::header::COOKIE;
use axum::http::request::Parts;
use libris_core::error::CoreError;
use libris_core::types::DbId;

use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// Name of the HTTP-only cookie carrying the session token.
pub const TOKEN_COOKIE: &str = "token";

/// Authenticated user extracted from the session token.
///
/// The token is read from the `Authorization: Bearer <token>` header when
/// present, falling back to the `token` cookie set at login. Use this as an
/// extractor parameter in any handler that requires authentication:
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = user.user_id, role = %user.role, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The user's internal database id (from `claims.sub`).
    pub user_id: DbId,
    /// The user's role name (`"admin"` or `"user"`).
    pub role: String,
}

impl AuthUser {
    /// Whether this user carries the admin role.
    pub fn is_admin(&self) -> bool {
        self.role == libris_core::roles::ROLE_ADMIN
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let bearer = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "));

        let token = match bearer {
            Some(token) => token,
            None => token_from_cookie(parts).ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized("No token, unauthorized".into()))
            })?,
        };

        let claims = validate_token(token, &state.config.jwt).map_err(|_| {
            AppError::Core(CoreError::Unauthorized("Invalid or expired token".into()))
        })?;

        Ok(AuthUser {
            user_id: claims.sub,
            role: claims.role,
        })
    }
}

/// Extract the session token value from the `Cookie` header, if present.
fn token_from_cookie(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(COOKIE)?
        .to_str()
        .ok()?
        .split(';')
        .map(str::trim)
        .find_map(|pair| pair.strip_prefix("token="))
        .filter(|v| !v.is_empty())
}
