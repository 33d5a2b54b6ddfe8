//! Book membership: adding, moving, and removing books from lists, and
//! resolving which details to display for a given title.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info};

use super::tags;
use super::{ShelfError, ADDED_BOOKS_LIST};
use crate::book::{Book, NO_DESCRIPTION};
use crate::store::{BookEntry, BookStore, EntryUpdate, NewBookEntry};

/// Details to display for a book, after preferring locally edited copies.
#[derive(Debug, Clone, Serialize)]
pub struct BookDetails {
    pub description: String,
    pub authors: Vec<String>,
}

/// Adds, moves, and removes a book's list membership.
pub struct MembershipService {
    store: Arc<dyn BookStore>,
}

impl MembershipService {
    pub fn new(store: Arc<dyn BookStore>) -> Self {
        Self { store }
    }

    /// Add a book to a list. Every add also tags the entry into the fixed
    /// added-books bucket. There is no existence check: adding the same
    /// book to the same list twice produces two records.
    pub fn add_book(
        &self,
        user_id: &str,
        book: Book,
        list_name: Option<&str>,
    ) -> Result<String, ShelfError> {
        let mut list_tags: Vec<String> = Vec::new();
        if let Some(name) = list_name {
            let name = name.trim();
            if !name.is_empty() {
                list_tags.push(name.to_string());
            }
        }
        list_tags.push(ADDED_BOOKS_LIST.to_string());

        let doc_id = self.store.insert_entry(
            user_id,
            NewBookEntry {
                book,
                list_tags: tags::join_tags(&list_tags),
            },
        )?;

        debug!("Added book to lists {:?} for user {}", list_tags, user_id);
        Ok(doc_id)
    }

    /// Add a hand-entered book. A blank title is rejected before any
    /// store call.
    pub fn add_manual_book(
        &self,
        user_id: &str,
        title: &str,
        author: &str,
        description: Option<String>,
        list_name: Option<&str>,
    ) -> Result<String, ShelfError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(ShelfError::Validation("title cannot be empty".to_string()));
        }

        let authors = if author.trim().is_empty() {
            Vec::new()
        } else {
            vec![author.trim().to_string()]
        };

        self.add_book(user_id, Book::manual(title, authors, description), list_name)
    }

    /// Move a book to another list. The whole tag string is replaced with
    /// the destination name; concurrent moves are last-write-wins.
    pub fn move_book(
        &self,
        user_id: &str,
        doc_id: &str,
        new_list: &str,
    ) -> Result<(), ShelfError> {
        let new_list = new_list.trim();
        if new_list.is_empty() {
            return Err(ShelfError::Validation("list name cannot be empty".to_string()));
        }

        self.store.update_entry(
            user_id,
            doc_id,
            EntryUpdate {
                list_tags: Some(new_list.to_string()),
                book_id: None,
            },
        )?;

        info!("Moved entry {} to list '{}' for user {}", doc_id, new_list, user_id);
        Ok(())
    }

    /// Remove an entry entirely.
    pub fn remove_book(&self, user_id: &str, doc_id: &str) -> Result<(), ShelfError> {
        self.store.delete_entry(user_id, doc_id)?;
        info!("Removed entry {} for user {}", doc_id, user_id);
        Ok(())
    }

    /// All real (non-placeholder) entries for a user.
    pub fn all_books(&self, user_id: &str) -> Result<Vec<BookEntry>, ShelfError> {
        let entries = self.store.list_entries(user_id)?;
        Ok(entries.into_iter().filter(|e| !e.book.is_placeholder()).collect())
    }

    /// Entries belonging to a list, by comma-split membership.
    /// Placeholders are filtered out.
    pub fn books_in_list(&self, user_id: &str, list_name: &str) -> Result<Vec<BookEntry>, ShelfError> {
        let entries = self.store.list_entries(user_id)?;
        Ok(entries
            .into_iter()
            .filter(|e| !e.book.is_placeholder() && tags::contains_tag(&e.list_tags, list_name))
            .collect())
    }

    /// The entry that embeds a given book id, if any. Used to tell
    /// whether a catalog result is already saved and where.
    pub fn membership(&self, user_id: &str, book_id: &str) -> Result<Option<BookEntry>, ShelfError> {
        Ok(self.store.find_by_book_id(user_id, book_id)?)
    }

    /// Decide which description/authors to display for a title.
    ///
    /// A stored entry with a `manual` book id wins over whatever the
    /// catalog returned (manual entries have no canonical remote source).
    /// Otherwise the caller-supplied fallback is used, with a fixed
    /// placeholder when that too is absent.
    pub fn resolve_details(
        &self,
        user_id: &str,
        title: &str,
        fallback_authors: &[String],
        fallback_description: Option<&str>,
    ) -> Result<BookDetails, ShelfError> {
        let stored = self.store.find_by_title(user_id, title)?;

        if let Some(entry) = stored {
            if entry.book.is_manual() {
                let authors = if entry.book.authors.is_empty() {
                    fallback_authors.to_vec()
                } else {
                    entry.book.authors.clone()
                };
                return Ok(BookDetails {
                    description: entry
                        .book
                        .description
                        .unwrap_or_else(|| NO_DESCRIPTION.to_string()),
                    authors,
                });
            }
        }

        Ok(BookDetails {
            description: fallback_description
                .filter(|d| !d.is_empty())
                .unwrap_or(NO_DESCRIPTION)
                .to_string(),
            authors: fallback_authors.to_vec(),
        })
    }
}
