//! Book value type and id conventions.
//!
//! A book's `id` encodes where it came from: a catalog-assigned volume id,
//! the literal `manual` for hand-entered books, or a synthesized
//! `nyt_<hash>` for bestseller entries that have no stable upstream id.

use serde::{Deserialize, Serialize};

/// Id of books entered by hand (no canonical remote source).
pub const MANUAL_BOOK_ID: &str = "manual";

/// Id prefix of placeholder entries that represent an empty list.
pub const PLACEHOLDER_PREFIX: &str = "template_";

/// Shown when neither the store nor the catalog has a description.
pub const NO_DESCRIPTION: &str = "Description not available";

/// A book from a catalog search, a bestseller feed, or manual entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    /// Source-dependent id; not guaranteed unique across sources.
    pub id: String,
    pub title: String,
    /// Ordered author list, may be empty.
    #[serde(default)]
    pub authors: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Book {
    /// Build a hand-entered book. An empty description gets the fixed
    /// not-available placeholder so later lookups have something to show.
    pub fn manual(title: &str, authors: Vec<String>, description: Option<String>) -> Self {
        let description = match description {
            Some(d) if !d.trim().is_empty() => Some(d),
            _ => Some(NO_DESCRIPTION.to_string()),
        };
        Self {
            id: MANUAL_BOOK_ID.to_string(),
            title: title.to_string(),
            authors,
            cover_url: None,
            description,
        }
    }

    /// Build the placeholder that backs an empty list.
    pub fn placeholder(list_name: &str) -> Self {
        Self {
            id: format!("{}{}", PLACEHOLDER_PREFIX, list_name.to_lowercase()),
            title: String::new(),
            authors: Vec::new(),
            cover_url: None,
            description: None,
        }
    }

    /// Placeholder entries must never surface as real books.
    pub fn is_placeholder(&self) -> bool {
        self.id.starts_with(PLACEHOLDER_PREFIX)
    }

    pub fn is_manual(&self) -> bool {
        self.id.starts_with(MANUAL_BOOK_ID)
    }

    pub fn primary_author(&self) -> Option<&str> {
        self.authors.first().map(String::as_str)
    }
}

/// Synthesize a stable id for a bestseller entry from its title.
pub fn bestseller_id(title: &str) -> String {
    format!("nyt_{:x}", md5::compute(title.as_bytes()))
}

/// Catalog thumbnails sometimes come back over plain http.
pub fn normalize_cover_url(url: &str) -> String {
    if let Some(rest) = url.strip_prefix("http:") {
        format!("https:{}", rest)
    } else {
        url.to_string()
    }
}
