//! Mock external book catalog for testing.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::book::Book;
use crate::catalog::{BookCatalog, BookCatalogError};

/// A recorded catalog query for test assertions.
#[derive(Debug, Clone)]
pub enum RecordedCatalogQuery {
    SearchBooks { query: String },
    SearchByAuthor { author: String },
    Bestsellers,
}

/// Mock implementation of the BookCatalog trait.
///
/// Provides controllable behavior for testing:
/// - Return configurable search results and bestsellers
/// - Track queries for assertions
/// - Simulate failures
#[derive(Debug)]
pub struct MockBookCatalog {
    /// Searchable books, matched by title or author substring.
    books: Arc<RwLock<Vec<Book>>>,
    /// Fixed bestseller list.
    bestsellers: Arc<RwLock<Vec<Book>>>,
    /// Recorded queries.
    queries: Arc<RwLock<Vec<RecordedCatalogQuery>>>,
    /// If set, the next operation will fail with this error.
    next_error: Arc<RwLock<Option<BookCatalogError>>>,
}

impl Default for MockBookCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl MockBookCatalog {
    /// Create a new empty mock catalog.
    pub fn new() -> Self {
        Self {
            books: Arc::new(RwLock::new(Vec::new())),
            bestsellers: Arc::new(RwLock::new(Vec::new())),
            queries: Arc::new(RwLock::new(Vec::new())),
            next_error: Arc::new(RwLock::new(None)),
        }
    }

    /// Add a searchable book.
    pub async fn add_book(&self, book: Book) {
        self.books.write().await.push(book);
    }

    /// Replace all searchable books.
    pub async fn set_books(&self, books: Vec<Book>) {
        *self.books.write().await = books;
    }

    /// Replace the bestseller list.
    pub async fn set_bestsellers(&self, books: Vec<Book>) {
        *self.bestsellers.write().await = books;
    }

    /// Get all recorded queries.
    pub async fn recorded_queries(&self) -> Vec<RecordedCatalogQuery> {
        self.queries.read().await.clone()
    }

    /// Get the number of queries performed.
    pub async fn query_count(&self) -> usize {
        self.queries.read().await.len()
    }

    /// Configure the next operation to fail with the given error.
    pub async fn set_next_error(&self, error: BookCatalogError) {
        *self.next_error.write().await = Some(error);
    }

    /// Take the next error if set.
    async fn take_error(&self) -> Option<BookCatalogError> {
        self.next_error.write().await.take()
    }

    /// Record a query.
    async fn record(&self, query: RecordedCatalogQuery) {
        self.queries.write().await.push(query);
    }
}

#[async_trait]
impl BookCatalog for MockBookCatalog {
    async fn search_books(&self, query: &str) -> Result<Vec<Book>, BookCatalogError> {
        if let Some(err) = self.take_error().await {
            return Err(err);
        }

        self.record(RecordedCatalogQuery::SearchBooks {
            query: query.to_string(),
        })
        .await;

        let books = self.books.read().await;
        let query_lower = query.to_lowercase();

        let results: Vec<Book> = books
            .iter()
            .filter(|b| {
                b.title.to_lowercase().contains(&query_lower)
                    || b.authors
                        .iter()
                        .any(|a| a.to_lowercase().contains(&query_lower))
            })
            .cloned()
            .collect();

        Ok(results)
    }

    async fn search_by_author(&self, author: &str) -> Result<Vec<Book>, BookCatalogError> {
        if let Some(err) = self.take_error().await {
            return Err(err);
        }

        self.record(RecordedCatalogQuery::SearchByAuthor {
            author: author.to_string(),
        })
        .await;

        let books = self.books.read().await;
        let author_lower = author.to_lowercase();

        let results: Vec<Book> = books
            .iter()
            .filter(|b| {
                b.authors
                    .iter()
                    .any(|a| a.to_lowercase().contains(&author_lower))
            })
            .cloned()
            .collect();

        Ok(results)
    }

    async fn bestsellers(&self) -> Result<Vec<Book>, BookCatalogError> {
        if let Some(err) = self.take_error().await {
            return Err(err);
        }

        self.record(RecordedCatalogQuery::Bestsellers).await;

        Ok(self.bestsellers.read().await.clone())
    }
}
