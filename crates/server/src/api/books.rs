//! Saved book handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use shelfmark_core::{Book, BookDetails, BookEntry};

use super::lists::{shelf_error, ListErrorResponse};
use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request body for saving a book.
///
/// Exactly one of `book` (a catalog result) or `manual` (hand-entered
/// fields) must be present.
#[derive(Debug, Deserialize)]
pub struct AddBookBody {
    pub book: Option<Book>,
    pub manual: Option<ManualBookBody>,
    /// Target list; the added-books bucket is always applied as well
    pub list: Option<String>,
}

/// Hand-entered book fields
#[derive(Debug, Deserialize)]
pub struct ManualBookBody {
    pub title: String,
    #[serde(default)]
    pub author: String,
    pub description: Option<String>,
}

/// Request body for moving a book
#[derive(Debug, Deserialize)]
pub struct MoveBookBody {
    pub list: String,
}

/// Request body for resolving display details
#[derive(Debug, Deserialize)]
pub struct ResolveDetailsBody {
    pub title: String,
    #[serde(default)]
    pub authors: Vec<String>,
    pub description: Option<String>,
}

/// Response for a successful add
#[derive(Debug, Serialize)]
pub struct AddBookResponse {
    pub doc_id: String,
}

/// Response listing saved books
#[derive(Debug, Serialize)]
pub struct BooksResponse {
    pub books: Vec<BookEntry>,
}

/// Response for a membership lookup
#[derive(Debug, Serialize)]
pub struct MembershipResponse {
    pub entry: Option<BookEntry>,
}

type ApiError = (StatusCode, Json<ListErrorResponse>);

fn bad_request(message: &str) -> ApiError {
    (
        StatusCode::BAD_REQUEST,
        Json(ListErrorResponse {
            error: message.to_string(),
        }),
    )
}

// ============================================================================
// Handlers
// ============================================================================

/// All of a user's saved books
pub async fn get_books(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<Json<BooksResponse>, ApiError> {
    let books = state
        .membership()
        .all_books(&user_id)
        .map_err(shelf_error)?;
    Ok(Json(BooksResponse { books }))
}

/// Save a catalog result or a hand-entered book
pub async fn add_book(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
    Json(body): Json<AddBookBody>,
) -> Result<(StatusCode, Json<AddBookResponse>), ApiError> {
    let list = body.list.as_deref();

    let doc_id = match (body.book, body.manual) {
        (Some(book), None) => state
            .membership()
            .add_book(&user_id, book, list)
            .map_err(shelf_error)?,
        (None, Some(manual)) => state
            .membership()
            .add_manual_book(
                &user_id,
                &manual.title,
                &manual.author,
                manual.description,
                list,
            )
            .map_err(shelf_error)?,
        _ => return Err(bad_request("exactly one of book or manual is required")),
    };

    Ok((StatusCode::CREATED, Json(AddBookResponse { doc_id })))
}

/// Remove a saved book entirely
pub async fn remove_book(
    State(state): State<Arc<AppState>>,
    Path((user_id, doc_id)): Path<(String, String)>,
) -> Result<StatusCode, ApiError> {
    state
        .membership()
        .remove_book(&user_id, &doc_id)
        .map_err(shelf_error)?;
    Ok(StatusCode::NO_CONTENT)
}

/// Move a saved book to another list
pub async fn move_book(
    State(state): State<Arc<AppState>>,
    Path((user_id, doc_id)): Path<(String, String)>,
    Json(body): Json<MoveBookBody>,
) -> Result<StatusCode, ApiError> {
    state
        .membership()
        .move_book(&user_id, &doc_id, &body.list)
        .map_err(shelf_error)?;
    Ok(StatusCode::NO_CONTENT)
}

/// Which lists, if any, a catalog book is already saved in
pub async fn get_membership(
    State(state): State<Arc<AppState>>,
    Path((user_id, book_id)): Path<(String, String)>,
) -> Result<Json<MembershipResponse>, ApiError> {
    let entry = state
        .membership()
        .membership(&user_id, &book_id)
        .map_err(shelf_error)?;
    Ok(Json(MembershipResponse { entry }))
}

/// Decide which description/authors to display for a title
pub async fn resolve_details(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
    Json(body): Json<ResolveDetailsBody>,
) -> Result<Json<BookDetails>, ApiError> {
    let details = state
        .membership()
        .resolve_details(
            &user_id,
            &body.title,
            &body.authors,
            body.description.as_deref(),
        )
        .map_err(shelf_error)?;
    Ok(Json(details))
}
