//! Google Books API client.
//!
//! Uses the public volumes search endpoint. An API key is required;
//! quota is per-key and generous for interactive use.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::BookCatalogError;
use crate::book::{normalize_cover_url, Book};

/// Google Books API client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoogleBooksConfig {
    /// Google Books API key (required).
    /// Can use ${ENV_VAR} syntax to read from environment.
    pub api_key: String,
    /// Base URL (default: https://www.googleapis.com/books/v1).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

/// Google Books API client.
pub struct GoogleBooksClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl GoogleBooksClient {
    /// Create a new Google Books client.
    pub fn new(config: GoogleBooksConfig) -> Result<Self, BookCatalogError> {
        if config.api_key.is_empty() {
            return Err(BookCatalogError::NotConfigured(
                "Google Books API key is required".to_string(),
            ));
        }

        let client = Client::builder().timeout(Duration::from_secs(30)).build()?;

        let base_url = config
            .base_url
            .unwrap_or_else(|| "https://www.googleapis.com/books/v1".to_string());

        Ok(Self {
            client,
            base_url,
            api_key: config.api_key,
        })
    }

    /// Free-text volume search.
    pub async fn search_books(&self, query: &str) -> Result<Vec<Book>, BookCatalogError> {
        debug!("Google Books search: query='{}'", query);
        self.search_volumes(query).await
    }

    /// Search restricted to a specific author.
    pub async fn search_by_author(&self, author: &str) -> Result<Vec<Book>, BookCatalogError> {
        debug!("Google Books author search: author='{}'", author);
        self.search_volumes(&format!("inauthor:{}", author)).await
    }

    async fn search_volumes(&self, query: &str) -> Result<Vec<Book>, BookCatalogError> {
        let url = format!("{}/volumes", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[("q", query), ("key", self.api_key.as_str())])
            .send()
            .await?;

        let status = response.status();
        if status == 401 || status == 403 {
            return Err(BookCatalogError::NotConfigured(
                "Invalid Google Books API key".to_string(),
            ));
        }
        if status == 429 {
            return Err(BookCatalogError::RateLimitExceeded);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BookCatalogError::ApiError {
                status: status.as_u16(),
                message: body,
            });
        }

        let search_result: VolumesResponse = response.json().await.map_err(|e| {
            BookCatalogError::ParseError(format!("Failed to parse volumes response: {}", e))
        })?;

        let books = search_result
            .items
            .unwrap_or_default()
            .into_iter()
            .map(|v| v.into())
            .collect();

        Ok(books)
    }
}

// ============================================================================
// Google Books API Response Types (private)
// ============================================================================

#[derive(Debug, Deserialize)]
struct VolumesResponse {
    // Absent entirely when the query matches nothing.
    items: Option<Vec<VolumeResult>>,
}

#[derive(Debug, Deserialize)]
struct VolumeResult {
    id: String,
    #[serde(rename = "volumeInfo")]
    volume_info: VolumeInfo,
}

#[derive(Debug, Deserialize)]
struct VolumeInfo {
    title: String,
    #[serde(default)]
    authors: Vec<String>,
    description: Option<String>,
    #[serde(rename = "imageLinks")]
    image_links: Option<ImageLinks>,
}

#[derive(Debug, Deserialize)]
struct ImageLinks {
    thumbnail: Option<String>,
}

impl From<VolumeResult> for Book {
    fn from(v: VolumeResult) -> Self {
        let cover_url = v
            .volume_info
            .image_links
            .and_then(|l| l.thumbnail)
            .map(|url| normalize_cover_url(&url));
        Self {
            id: v.id,
            title: v.volume_info.title,
            authors: v.volume_info.authors,
            cover_url,
            description: v.volume_info.description,
        }
    }
}
