//! New York Times Books API client.
//!
//! Fetches the current hardcover-fiction bestseller list. The NYT API
//! enforces a low rate limit (around 5 requests per minute), so callers
//! should expect 429s under load.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::BookCatalogError;
use crate::book::{bestseller_id, normalize_cover_url, Book};

/// NYT Books API client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NytBooksConfig {
    /// NYT API key (required).
    /// Can use ${ENV_VAR} syntax to read from environment.
    pub api_key: String,
    /// Base URL (default: https://api.nytimes.com/svc/books/v3).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

/// NYT Books API client.
pub struct NytBooksClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl NytBooksClient {
    /// Create a new NYT books client.
    pub fn new(config: NytBooksConfig) -> Result<Self, BookCatalogError> {
        if config.api_key.is_empty() {
            return Err(BookCatalogError::NotConfigured(
                "NYT API key is required".to_string(),
            ));
        }

        let client = Client::builder().timeout(Duration::from_secs(30)).build()?;

        let base_url = config
            .base_url
            .unwrap_or_else(|| "https://api.nytimes.com/svc/books/v3".to_string());

        Ok(Self {
            client,
            base_url,
            api_key: config.api_key,
        })
    }

    /// Current hardcover-fiction bestsellers.
    ///
    /// Bestseller entries have no stable catalog id, so one is
    /// synthesized from the title.
    pub async fn bestsellers(&self) -> Result<Vec<Book>, BookCatalogError> {
        let url = format!("{}/lists/current/hardcover-fiction.json", self.base_url);

        debug!("NYT bestsellers fetch");

        let response = self
            .client
            .get(&url)
            .query(&[("api-key", &self.api_key)])
            .send()
            .await?;

        let status = response.status();
        if status == 401 || status == 403 {
            return Err(BookCatalogError::NotConfigured(
                "Invalid NYT API key".to_string(),
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

        let list: BestsellerResponse = response.json().await.map_err(|e| {
            BookCatalogError::ParseError(format!("Failed to parse bestsellers response: {}", e))
        })?;

        let books = list
            .results
            .books
            .into_iter()
            .map(|b| b.into())
            .collect();

        Ok(books)
    }
}

// ============================================================================
// NYT API Response Types (private)
// ============================================================================

#[derive(Debug, Deserialize)]
struct BestsellerResponse {
    results: BestsellerResults,
}

#[derive(Debug, Deserialize)]
struct BestsellerResults {
    #[serde(default)]
    books: Vec<BestsellerBook>,
}

#[derive(Debug, Deserialize)]
struct BestsellerBook {
    title: String,
    author: Option<String>,
    description: Option<String>,
    book_image: Option<String>,
}

impl From<BestsellerBook> for Book {
    fn from(b: BestsellerBook) -> Self {
        let authors = match b.author {
            Some(a) if !a.is_empty() => vec![a],
            _ => vec![],
        };
        Self {
            id: bestseller_id(&b.title),
            title: b.title,
            authors,
            cover_url: b.book_image.map(|url| normalize_cover_url(&url)),
            description: b.description.filter(|d| !d.is_empty()),
        }
    }
}
