//! List management handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use shelfmark_core::{BookEntry, ShelfError, StoreError};

use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

/// Query parameters for listing lists
#[derive(Debug, Deserialize)]
pub struct GetListsParams {
    /// When true, exclude the implicit added-books bucket
    #[serde(default)]
    pub selectable: bool,
}

/// Request body for creating a list
#[derive(Debug, Deserialize)]
pub struct CreateListBody {
    pub name: String,
}

/// Request body for renaming a list
#[derive(Debug, Deserialize)]
pub struct RenameListBody {
    pub new_name: String,
}

/// Response for list queries
#[derive(Debug, Serialize)]
pub struct ListsResponse {
    pub lists: Vec<String>,
}

/// Response for a rename
#[derive(Debug, Serialize)]
pub struct RenameListResponse {
    pub renamed: u32,
}

/// Response for the books of one list
#[derive(Debug, Serialize)]
pub struct ListBooksResponse {
    pub books: Vec<BookEntry>,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ListErrorResponse {
    pub error: String,
}

pub(super) type ApiError = (StatusCode, Json<ListErrorResponse>);

pub(super) fn shelf_error(e: ShelfError) -> ApiError {
    let status = match &e {
        ShelfError::Validation(_) => StatusCode::BAD_REQUEST,
        ShelfError::DuplicateList(_) => StatusCode::CONFLICT,
        ShelfError::Store(StoreError::NotFound(_)) => StatusCode::NOT_FOUND,
        ShelfError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (
        status,
        Json(ListErrorResponse {
            error: e.to_string(),
        }),
    )
}

// ============================================================================
// Handlers
// ============================================================================

/// Get a user's lists
pub async fn get_lists(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
    Query(params): Query<GetListsParams>,
) -> Result<Json<ListsResponse>, ApiError> {
    let lists = if params.selectable {
        state.lists().selectable_lists(&user_id)
    } else {
        state.lists().categories(&user_id)
    }
    .map_err(shelf_error)?;

    Ok(Json(ListsResponse { lists }))
}

/// Create a new empty list
pub async fn create_list(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
    Json(body): Json<CreateListBody>,
) -> Result<StatusCode, ApiError> {
    state
        .lists()
        .create_list(&user_id, &body.name)
        .map_err(shelf_error)?;
    Ok(StatusCode::CREATED)
}

/// Rename a list across every entry that references it
pub async fn rename_list(
    State(state): State<Arc<AppState>>,
    Path((user_id, name)): Path<(String, String)>,
    Json(body): Json<RenameListBody>,
) -> Result<Json<RenameListResponse>, ApiError> {
    let renamed = state
        .lists()
        .rename_list(&user_id, &name, &body.new_name)
        .map_err(shelf_error)?;
    Ok(Json(RenameListResponse { renamed }))
}

/// Delete a list
pub async fn delete_list(
    State(state): State<Arc<AppState>>,
    Path((user_id, name)): Path<(String, String)>,
) -> Result<StatusCode, ApiError> {
    state
        .lists()
        .delete_list(&user_id, &name)
        .map_err(shelf_error)?;
    Ok(StatusCode::NO_CONTENT)
}

/// Get the books of one list
pub async fn get_list_books(
    State(state): State<Arc<AppState>>,
    Path((user_id, name)): Path<(String, String)>,
) -> Result<Json<ListBooksResponse>, ApiError> {
    let books = state
        .membership()
        .books_in_list(&user_id, &name)
        .map_err(shelf_error)?;
    Ok(Json(ListBooksResponse { books }))
}
