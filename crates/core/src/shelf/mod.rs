//! List (category) management and book membership.
//!
//! Lists are not stored entities: the visible set of lists is derived from
//! the `list_tags` field of a user's entries. An empty list is backed by a
//! placeholder entry whose book id starts with `template_`.

mod lists;
mod membership;
pub mod tags;

pub use lists::ListManager;
pub use membership::{BookDetails, MembershipService};

use thiserror::Error;

use crate::store::StoreError;

/// Every explicit add also tags the book into this fixed bucket.
pub const ADDED_BOOKS_LIST: &str = "Добавленные книги";

/// Errors for list and membership operations.
#[derive(Debug, Error)]
pub enum ShelfError {
    /// Input rejected before any store call.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Create-list duplicate check (case-insensitive) hit an existing name.
    #[error("List \"{0}\" already exists")]
    DuplicateList(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}
