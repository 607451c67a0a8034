//! Handlers for catalog (book/movie) maintenance.
//!
//! Reads are open to any authenticated user; mutations are admin only.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use libris_core::error::CoreError;
use libris_core::status::{MEDIA_BOOK, MEDIA_MOVIE};
use libris_core::types::DbId;
use libris_db::models::book::{CreateBook, UpdateBook};
use libris_db::repositories::BookRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::response::{DataResponse, MessageResponse};
use crate::state::AppState;

/// Query parameters for `GET /books`.
#[derive(Debug, Deserialize)]
pub struct BookListParams {
    pub media_type: Option<String>,
}

/// Reject media types outside the catalog's two kinds.
fn validate_media_type(media_type: &str) -> AppResult<()> {
    if media_type != MEDIA_BOOK && media_type != MEDIA_MOVIE {
        return Err(AppError::BadRequest(format!(
            "Invalid media type: {media_type}"
        )));
    }
    Ok(())
}

/// POST /api/v1/books
///
/// Add a catalog item. Admin only. Duplicate serial numbers are rejected
/// up front; the `uq_books_serial_no` index is the backstop.
pub async fn create_book(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateBook>,
) -> AppResult<impl IntoResponse> {
    if let Some(media) = input.media_type.as_deref() {
        validate_media_type(media)?;
    }

    if BookRepo::find_by_serial_no(&state.pool, &input.serial_no)
        .await?
        .is_some()
    {
        return Err(AppError::BadRequest(
            "Serial number already exists".into(),
        ));
    }

    let book = BookRepo::create(&state.pool, &input).await?;

    tracing::info!(book_id = book.id, serial_no = %book.serial_no, user_id = admin.user_id, "Book created");

    Ok((StatusCode::CREATED, Json(book)))
}

/// GET /api/v1/books
///
/// List the catalog, optionally filtered by media type.
pub async fn list_books(
    _auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<BookListParams>,
) -> AppResult<impl IntoResponse> {
    if let Some(media) = params.media_type.as_deref() {
        validate_media_type(media)?;
    }

    let books = BookRepo::list(&state.pool, params.media_type.as_deref()).await?;

    Ok(Json(DataResponse { data: books }))
}

/// GET /api/v1/books/{id}
pub async fn get_book(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(book_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let book = BookRepo::find_by_id(&state.pool, book_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Book",
            id: book_id,
        }))?;

    Ok(Json(book))
}

/// PUT /api/v1/books/{id}
///
/// Partial update of a catalog item. Admin only.
pub async fn update_book(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(book_id): Path<DbId>,
    Json(input): Json<UpdateBook>,
) -> AppResult<impl IntoResponse> {
    if let Some(media) = input.media_type.as_deref() {
        validate_media_type(media)?;
    }

    let book = BookRepo::update(&state.pool, book_id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Book",
            id: book_id,
        }))?;

    tracing::info!(book_id, user_id = admin.user_id, "Book updated");

    Ok(Json(book))
}

/// DELETE /api/v1/books/{id}
///
/// Remove a catalog item. Admin only.
pub async fn delete_book(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(book_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let deleted = BookRepo::delete(&state.pool, book_id).await?;

    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Book",
            id: book_id,
        }));
    }

    tracing::info!(book_id, user_id = admin.user_id, "Book deleted");

    Ok(Json(MessageResponse {
        message: "Book deleted successfully",
    }))
}
