//! List (category) manager: derive, create, rename, delete.

use std::sync::Arc;

use tracing::{debug, info};

use super::tags;
use super::{ShelfError, ADDED_BOOKS_LIST};
use crate::book::Book;
use crate::store::{BookStore, EntryUpdate, NewBookEntry};

/// Manages the user-visible set of lists.
///
/// The set is derived from the comma-split `list_tags` of every entry;
/// create/rename/delete rewrite the entries that reference a name.
pub struct ListManager {
    store: Arc<dyn BookStore>,
}

impl ListManager {
    pub fn new(store: Arc<dyn BookStore>) -> Self {
        Self { store }
    }

    /// Distinct trimmed list names across all of the user's entries,
    /// in first-occurrence order.
    pub fn categories(&self, user_id: &str) -> Result<Vec<String>, ShelfError> {
        let entries = self.store.list_entries(user_id)?;
        let mut seen: Vec<String> = Vec::new();
        for entry in &entries {
            for tag in tags::split_tags(&entry.list_tags) {
                if !seen.contains(&tag) {
                    seen.push(tag);
                }
            }
        }
        Ok(seen)
    }

    /// Lists a book can be added to or moved into: all categories except
    /// the added-books bucket (compared case-insensitively).
    pub fn selectable_lists(&self, user_id: &str) -> Result<Vec<String>, ShelfError> {
        let bucket = ADDED_BOOKS_LIST.to_lowercase();
        Ok(self
            .categories(user_id)?
            .into_iter()
            .filter(|c| c.to_lowercase() != bucket)
            .collect())
    }

    /// Create an empty list backed by a placeholder entry.
    ///
    /// Rejects blank names and names that already exist when compared
    /// case-insensitively; nothing is written on rejection.
    pub fn create_list(&self, user_id: &str, name: &str) -> Result<(), ShelfError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ShelfError::Validation("list name cannot be empty".to_string()));
        }

        let existing = self.categories(user_id)?;
        let name_lower = name.to_lowercase();
        if existing.iter().any(|c| c.to_lowercase() == name_lower) {
            return Err(ShelfError::DuplicateList(name.to_string()));
        }

        self.store.insert_entry(
            user_id,
            NewBookEntry {
                book: Book::placeholder(name),
                list_tags: name.to_string(),
            },
        )?;

        info!("Created list '{}' for user {}", name, user_id);
        Ok(())
    }

    /// Rename a list across every entry that references it, as one batch.
    ///
    /// Placeholders get a fresh `template_` id and the new name as their
    /// whole tag string; real entries have just the old token replaced.
    /// Returns the number of rewritten entries.
    pub fn rename_list(
        &self,
        user_id: &str,
        old_name: &str,
        new_name: &str,
    ) -> Result<u32, ShelfError> {
        let new_name = new_name.trim();
        if new_name.is_empty() {
            return Err(ShelfError::Validation("list name cannot be empty".to_string()));
        }

        let entries = self.store.list_entries(user_id)?;
        let mut updates: Vec<(String, EntryUpdate)> = Vec::new();

        for entry in &entries {
            if !tags::contains_tag(&entry.list_tags, old_name) {
                continue;
            }

            if entry.book.is_placeholder() {
                updates.push((
                    entry.doc_id.clone(),
                    EntryUpdate {
                        list_tags: Some(new_name.to_string()),
                        book_id: Some(Book::placeholder(new_name).id),
                    },
                ));
            } else {
                updates.push((
                    entry.doc_id.clone(),
                    EntryUpdate {
                        list_tags: Some(tags::rename_tag(&entry.list_tags, old_name, new_name)),
                        book_id: None,
                    },
                ));
            }
        }

        if updates.is_empty() {
            debug!("No entries reference list '{}' for user {}", old_name, user_id);
            return Ok(0);
        }

        let count = updates.len() as u32;
        self.store.batch_update(user_id, &updates)?;
        info!(
            "Renamed list '{}' -> '{}' across {} entries for user {}",
            old_name, new_name, count, user_id
        );
        Ok(count)
    }

    /// Delete a list, operating uniformly over comma-split membership:
    /// entries whose only tag is `name` (placeholders included) are
    /// deleted; compound entries just lose the token.
    pub fn delete_list(&self, user_id: &str, name: &str) -> Result<(), ShelfError> {
        let entries = self.store.list_entries(user_id)?;

        for entry in &entries {
            if !tags::contains_tag(&entry.list_tags, name) {
                continue;
            }

            let remaining = tags::remove_tag(&entry.list_tags, name);
            if entry.book.is_placeholder() || remaining.is_empty() {
                self.store.delete_entry(user_id, &entry.doc_id)?;
            } else {
                self.store.update_entry(
                    user_id,
                    &entry.doc_id,
                    EntryUpdate {
                        list_tags: Some(remaining),
                        book_id: None,
                    },
                )?;
            }
        }

        info!("Deleted list '{}' for user {}", name, user_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::SqliteBookStore;

    fn create_manager() -> (ListManager, Arc<dyn BookStore>) {
        let store: Arc<dyn BookStore> = Arc::new(SqliteBookStore::in_memory().unwrap());
        (ListManager::new(Arc::clone(&store)), store)
    }

    fn insert(store: &Arc<dyn BookStore>, book_id: &str, title: &str, tags: &str) -> String {
        store
            .insert_entry(
                "user1",
                NewBookEntry {
                    book: Book {
                        id: book_id.to_string(),
                        title: title.to_string(),
                        authors: vec![],
                        cover_url: None,
                        description: None,
                    },
                    list_tags: tags.to_string(),
                },
            )
            .unwrap()
    }

    #[test]
    fn test_categories_distinct_and_trimmed() {
        let (manager, store) = create_manager();
        insert(&store, "vol1", "Dune", "A, B, A");

        let categories = manager.categories("user1").unwrap();
        assert_eq!(categories, vec!["A", "B"]);
    }

    #[test]
    fn test_categories_first_occurrence_order() {
        let (manager, store) = create_manager();
        insert(&store, "vol1", "Dune", "Sci-Fi, Favorites");
        insert(&store, "vol2", "Emma", "Classics, Sci-Fi");

        let categories = manager.categories("user1").unwrap();
        assert_eq!(categories, vec!["Sci-Fi", "Favorites", "Classics"]);
    }

    #[test]
    fn test_selectable_lists_exclude_added_books_bucket() {
        let (manager, store) = create_manager();
        insert(&store, "vol1", "Dune", "Reading, Добавленные книги");

        let lists = manager.selectable_lists("user1").unwrap();
        assert_eq!(lists, vec!["Reading"]);
    }

    #[test]
    fn test_create_list_writes_placeholder() {
        let (manager, store) = create_manager();
        manager.create_list("user1", "Reading").unwrap();

        let entries = store.list_entries("user1").unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].book.id, "template_reading");
        assert_eq!(entries[0].list_tags, "Reading");
        assert_eq!(manager.categories("user1").unwrap(), vec!["Reading"]);
    }

    #[test]
    fn test_create_list_rejects_case_insensitive_duplicate() {
        let (manager, store) = create_manager();
        manager.create_list("user1", "Reading").unwrap();

        let result = manager.create_list("user1", "reading");
        assert!(matches!(result, Err(ShelfError::DuplicateList(_))));
        // No new record may be written on rejection.
        assert_eq!(store.list_entries("user1").unwrap().len(), 1);
    }

    #[test]
    fn test_create_list_rejects_blank_name() {
        let (manager, _) = create_manager();
        let result = manager.create_list("user1", "   ");
        assert!(matches!(result, Err(ShelfError::Validation(_))));
    }

    #[test]
    fn test_create_list_trims_name() {
        let (manager, _) = create_manager();
        manager.create_list("user1", "  Reading  ").unwrap();
        assert_eq!(manager.categories("user1").unwrap(), vec!["Reading"]);
    }

    #[test]
    fn test_rename_preserves_other_tokens() {
        let (manager, store) = create_manager();
        let doc_id = insert(&store, "vol1", "Dune", "Reading, Добавленные книги");

        let count = manager
            .rename_list("user1", "Reading", "Currently Reading")
            .unwrap();
        assert_eq!(count, 1);

        let entries = store.list_entries("user1").unwrap();
        let entry = entries.iter().find(|e| e.doc_id == doc_id).unwrap();
        let tokens = tags::split_tags(&entry.list_tags);
        assert!(tokens.contains(&"Currently Reading".to_string()));
        assert!(tokens.contains(&ADDED_BOOKS_LIST.to_string()));
        assert!(!tokens.contains(&"Reading".to_string()));
    }

    #[test]
    fn test_rename_rewrites_placeholder_id() {
        let (manager, store) = create_manager();
        manager.create_list("user1", "Reading").unwrap();

        manager
            .rename_list("user1", "Reading", "Currently Reading")
            .unwrap();

        let entries = store.list_entries("user1").unwrap();
        assert_eq!(entries[0].book.id, "template_currently reading");
        assert_eq!(entries[0].list_tags, "Currently Reading");
    }

    #[test]
    fn test_rename_unknown_list_touches_nothing() {
        let (manager, store) = create_manager();
        insert(&store, "vol1", "Dune", "Sci-Fi");

        let count = manager.rename_list("user1", "Missing", "New").unwrap();
        assert_eq!(count, 0);
        assert_eq!(store.list_entries("user1").unwrap()[0].list_tags, "Sci-Fi");
    }

    #[test]
    fn test_rename_rejects_blank_new_name() {
        let (manager, _) = create_manager();
        let result = manager.rename_list("user1", "Reading", "  ");
        assert!(matches!(result, Err(ShelfError::Validation(_))));
    }

    #[test]
    fn test_delete_list_removes_single_tag_entries() {
        let (manager, store) = create_manager();
        insert(&store, "vol1", "Dune", "Reading");
        insert(&store, "vol2", "Emma", "Classics");

        manager.delete_list("user1", "Reading").unwrap();

        let entries = store.list_entries("user1").unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].book.title, "Emma");
    }

    #[test]
    fn test_delete_list_strips_tag_from_compound_entries() {
        let (manager, store) = create_manager();
        let doc_id = insert(&store, "vol1", "Dune", "Reading, Добавленные книги");

        manager.delete_list("user1", "Reading").unwrap();

        // The entry survives with the remaining token only.
        let entries = store.list_entries("user1").unwrap();
        let entry = entries.iter().find(|e| e.doc_id == doc_id).unwrap();
        assert_eq!(entry.list_tags, ADDED_BOOKS_LIST);
    }

    #[test]
    fn test_delete_list_removes_placeholder() {
        let (manager, store) = create_manager();
        manager.create_list("user1", "Reading").unwrap();

        manager.delete_list("user1", "Reading").unwrap();
        assert!(store.list_entries("user1").unwrap().is_empty());
        assert!(manager.categories("user1").unwrap().is_empty());
    }
}
