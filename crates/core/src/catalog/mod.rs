//! External book catalog integration for Google Books and the NYT
//! bestseller list.
//!
//! This module provides clients for querying external catalogs to find
//! books to save into lists.

mod google_books;
mod nyt;

pub use google_books::{GoogleBooksClient, GoogleBooksConfig};
pub use nyt::{NytBooksClient, NytBooksConfig};

use async_trait::async_trait;
use thiserror::Error;

use crate::book::Book;

/// Errors that can occur when interacting with external catalogs.
#[derive(Debug, Error)]
pub enum BookCatalogError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Rate limit exceeded.
    #[error("Rate limit exceeded, please wait before retrying")]
    RateLimitExceeded,

    /// Resource not found (404).
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// API returned an error.
    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    /// Failed to parse response.
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Client not configured (missing API key, etc.).
    #[error("Client not configured: {0}")]
    NotConfigured(String),
}

/// Trait for external book catalog clients.
///
/// Implemented by both GoogleBooksClient and NytBooksClient, and by the
/// combined client that delegates to whichever backend serves each call.
#[async_trait]
pub trait BookCatalog: Send + Sync {
    /// Free-text search for books.
    async fn search_books(&self, query: &str) -> Result<Vec<Book>, BookCatalogError>;

    /// Search for books by a specific author.
    async fn search_by_author(&self, author: &str) -> Result<Vec<Book>, BookCatalogError>;

    /// Current hardcover-fiction bestsellers.
    async fn bestsellers(&self) -> Result<Vec<Book>, BookCatalogError>;
}

/// Combined catalog client that delegates to appropriate backends.
pub struct CombinedCatalogClient {
    google: Option<GoogleBooksClient>,
    nyt: Option<NytBooksClient>,
}

impl CombinedCatalogClient {
    /// Create a new combined client with optional backends.
    pub fn new(google: Option<GoogleBooksClient>, nyt: Option<NytBooksClient>) -> Self {
        Self { google, nyt }
    }

    /// Check if Google Books is available.
    pub fn has_google_books(&self) -> bool {
        self.google.is_some()
    }

    /// Check if the NYT books API is available.
    pub fn has_nyt(&self) -> bool {
        self.nyt.is_some()
    }
}

#[async_trait]
impl BookCatalog for CombinedCatalogClient {
    async fn search_books(&self, query: &str) -> Result<Vec<Book>, BookCatalogError> {
        match &self.google {
            Some(client) => client.search_books(query).await,
            None => Err(BookCatalogError::NotConfigured(
                "Google Books client not configured".to_string(),
            )),
        }
    }

    async fn search_by_author(&self, author: &str) -> Result<Vec<Book>, BookCatalogError> {
        match &self.google {
            Some(client) => client.search_by_author(author).await,
            None => Err(BookCatalogError::NotConfigured(
                "Google Books client not configured".to_string(),
            )),
        }
    }

    async fn bestsellers(&self) -> Result<Vec<Book>, BookCatalogError> {
        match &self.nyt {
            Some(client) => client.bestsellers().await,
            None => Err(BookCatalogError::NotConfigured(
                "NYT books client not configured".to_string(),
            )),
        }
    }
}
