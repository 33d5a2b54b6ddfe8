//! External catalog search handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use shelfmark_core::{Book, BookCatalogError};

use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request body for a free-text search
#[derive(Debug, Deserialize)]
pub struct SearchBody {
    pub query: String,
}

/// Response for catalog searches
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub books: Vec<Book>,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct SearchErrorResponse {
    pub error: String,
}

type SearchError = (StatusCode, Json<SearchErrorResponse>);

fn catalog_error(e: BookCatalogError) -> SearchError {
    let status = match &e {
        BookCatalogError::NotConfigured(_) => StatusCode::SERVICE_UNAVAILABLE,
        BookCatalogError::RateLimitExceeded => StatusCode::TOO_MANY_REQUESTS,
        BookCatalogError::NotFound(_) => StatusCode::NOT_FOUND,
        _ => StatusCode::BAD_GATEWAY,
    };
    (
        status,
        Json(SearchErrorResponse {
            error: e.to_string(),
        }),
    )
}

fn no_catalog() -> SearchError {
    (
        StatusCode::SERVICE_UNAVAILABLE,
        Json(SearchErrorResponse {
            error: "No external catalog configured".to_string(),
        }),
    )
}

// ============================================================================
// Handlers
// ============================================================================

/// Free-text book search against the external catalog
pub async fn search(
    State(state): State<Arc<AppState>>,
    Json(body): Json<SearchBody>,
) -> Result<Json<SearchResponse>, SearchError> {
    let catalog = state.catalog().ok_or_else(no_catalog)?;

    let query = body.query.trim();
    if query.is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(SearchErrorResponse {
                error: "query cannot be empty".to_string(),
            }),
        ));
    }

    let books = catalog.search_books(query).await.map_err(catalog_error)?;
    Ok(Json(SearchResponse { books }))
}

/// Books by a specific author
pub async fn search_by_author(
    State(state): State<Arc<AppState>>,
    Path(author): Path<String>,
) -> Result<Json<SearchResponse>, SearchError> {
    let catalog = state.catalog().ok_or_else(no_catalog)?;

    let books = catalog
        .search_by_author(&author)
        .await
        .map_err(catalog_error)?;
    Ok(Json(SearchResponse { books }))
}

/// Current bestseller list
pub async fn bestsellers(
    State(state): State<Arc<AppState>>,
) -> Result<Json<SearchResponse>, SearchError> {
    let catalog = state.catalog().ok_or_else(no_catalog)?;

    let books = catalog.bestsellers().await.map_err(catalog_error)?;
    Ok(Json(SearchResponse { books }))
}
