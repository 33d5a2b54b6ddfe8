//! Testing utilities and mock implementations for E2E tests.
//!
//! This module provides a mock implementation of the external catalog
//! trait, allowing comprehensive E2E testing without real API keys.
//!
//! # Example
//!
//! ```rust,ignore
//! use shelfmark_core::testing::{fixtures, MockBookCatalog};
//!
//! let catalog = MockBookCatalog::new();
//!
//! // Configure mock responses
//! catalog.add_book(fixtures::book("vol1", "Dune", "Frank Herbert")).await;
//!
//! // Use in AppState...
//! ```

mod mock_catalog;

pub use mock_catalog::{MockBookCatalog, RecordedCatalogQuery};

/// Test fixtures and helper functions.
pub mod fixtures {
    use crate::book::{bestseller_id, Book};

    /// Create a test catalog book with reasonable defaults.
    pub fn book(id: &str, title: &str, author: &str) -> Book {
        Book {
            id: id.to_string(),
            title: title.to_string(),
            authors: vec![author.to_string()],
            cover_url: Some(format!(
                "https://covers.example.com/{}.jpg",
                title.to_lowercase().replace(' ', "-")
            )),
            description: Some(format!("A book about {}.", title.to_lowercase())),
        }
    }

    /// Create a test bestseller entry with a synthesized id.
    pub fn bestseller(title: &str, author: &str) -> Book {
        Book {
            id: bestseller_id(title),
            ..book("unused", title, author)
        }
    }
}
