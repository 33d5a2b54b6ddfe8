//! Per-user book entry storage.
//!
//! Each document ties one book to its list membership. The trait is the
//! seam to the backing document store; the shipped implementation is
//! SQLite-backed.

mod sqlite;

pub use sqlite::SqliteBookStore;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::book::Book;

/// A stored list-membership record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookEntry {
    /// Store-assigned document id.
    pub doc_id: String,
    /// Denormalized book fields.
    pub book: Book,
    /// One or more list names joined by ", ".
    pub list_tags: String,
    /// When the entry was created.
    pub added_at: DateTime<Utc>,
}

/// A record to insert; the store assigns `doc_id` and `added_at`.
#[derive(Debug, Clone)]
pub struct NewBookEntry {
    pub book: Book,
    pub list_tags: String,
}

/// Fields an update may touch. `None` leaves the field unchanged.
#[derive(Debug, Clone, Default)]
pub struct EntryUpdate {
    pub list_tags: Option<String>,
    /// Only placeholder renames rewrite the embedded book id.
    pub book_id: Option<String>,
}

/// Errors for store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Store error: {0}")]
    Database(String),

    #[error("Entry not found: {0}")]
    NotFound(String),
}

/// Trait for per-user book entry storage.
pub trait BookStore: Send + Sync {
    /// Full collection fetch for one user.
    fn list_entries(&self, user_id: &str) -> Result<Vec<BookEntry>, StoreError>;

    /// First entry whose embedded title matches exactly.
    fn find_by_title(&self, user_id: &str, title: &str) -> Result<Option<BookEntry>, StoreError>;

    /// First entry whose embedded book id matches exactly.
    fn find_by_book_id(
        &self,
        user_id: &str,
        book_id: &str,
    ) -> Result<Option<BookEntry>, StoreError>;

    /// Insert a record and return its store-assigned id. There is no
    /// idempotency key; retried inserts produce duplicates.
    fn insert_entry(&self, user_id: &str, entry: NewBookEntry) -> Result<String, StoreError>;

    /// Update a specific record.
    fn update_entry(
        &self,
        user_id: &str,
        doc_id: &str,
        update: EntryUpdate,
    ) -> Result<(), StoreError>;

    /// Delete a specific record.
    fn delete_entry(&self, user_id: &str, doc_id: &str) -> Result<(), StoreError>;

    /// Apply several updates as one all-or-nothing commit. Callers only
    /// see overall success or failure.
    fn batch_update(
        &self,
        user_id: &str,
        updates: &[(String, EntryUpdate)],
    ) -> Result<(), StoreError>;
}
