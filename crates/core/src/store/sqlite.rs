//! SQLite-backed book entry store.

use std::path::Path;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};
use uuid::Uuid;

use super::{BookEntry, BookStore, EntryUpdate, NewBookEntry, StoreError};
use crate::book::Book;

/// SQLite-backed implementation of [`BookStore`].
pub struct SqliteBookStore {
    conn: Mutex<Connection>,
}

impl SqliteBookStore {
    /// Open or create the database file and initialize tables.
    pub fn new(path: &Path) -> Result<Self, StoreError> {
        let conn = Connection::open(path).map_err(|e| StoreError::Database(e.to_string()))?;
        Self::initialize_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// In-memory store (useful for testing).
    pub fn in_memory() -> Result<Self, StoreError> {
        let conn =
            Connection::open_in_memory().map_err(|e| StoreError::Database(e.to_string()))?;
        Self::initialize_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn initialize_schema(conn: &Connection) -> Result<(), StoreError> {
        conn.execute_batch(
            r#"
            -- One row per list-membership record
            CREATE TABLE IF NOT EXISTS book_entries (
                doc_id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL,
                book_id TEXT NOT NULL,
                title TEXT NOT NULL,
                authors TEXT NOT NULL,
                cover_url TEXT,
                description TEXT,
                list_tags TEXT NOT NULL,
                added_at TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_book_entries_user ON book_entries(user_id);
            CREATE INDEX IF NOT EXISTS idx_book_entries_title ON book_entries(user_id, title);
            CREATE INDEX IF NOT EXISTS idx_book_entries_book ON book_entries(user_id, book_id);
            "#,
        )
        .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(())
    }

    fn row_to_entry(row: &rusqlite::Row) -> rusqlite::Result<BookEntry> {
        let authors_json: String = row.get(4)?;
        let authors: Vec<String> = serde_json::from_str(&authors_json).unwrap_or_default();

        let added_at_str: String = row.get(8)?;
        let added_at = DateTime::parse_from_rfc3339(&added_at_str)
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or_else(|_| Utc::now());

        Ok(BookEntry {
            doc_id: row.get(0)?,
            book: Book {
                id: row.get(2)?,
                title: row.get(3)?,
                authors,
                cover_url: row.get(5)?,
                description: row.get(6)?,
            },
            list_tags: row.get(7)?,
            added_at,
        })
    }

    fn query_entries(
        conn: &Connection,
        sql: &str,
        params: &[&dyn rusqlite::ToSql],
    ) -> Result<Vec<BookEntry>, StoreError> {
        let mut stmt = conn
            .prepare(sql)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        let rows = stmt
            .query_map(params, Self::row_to_entry)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        let mut entries = Vec::new();
        for row in rows {
            entries.push(row.map_err(|e| StoreError::Database(e.to_string()))?);
        }
        Ok(entries)
    }

    fn apply_update(
        conn: &Connection,
        user_id: &str,
        doc_id: &str,
        update: &EntryUpdate,
    ) -> Result<usize, StoreError> {
        let affected = match (&update.list_tags, &update.book_id) {
            (Some(tags), Some(book_id)) => conn
                .execute(
                    "UPDATE book_entries SET list_tags = ?, book_id = ?
                     WHERE user_id = ? AND doc_id = ?",
                    params![tags, book_id, user_id, doc_id],
                )
                .map_err(|e| StoreError::Database(e.to_string()))?,
            (Some(tags), None) => conn
                .execute(
                    "UPDATE book_entries SET list_tags = ? WHERE user_id = ? AND doc_id = ?",
                    params![tags, user_id, doc_id],
                )
                .map_err(|e| StoreError::Database(e.to_string()))?,
            (None, Some(book_id)) => conn
                .execute(
                    "UPDATE book_entries SET book_id = ? WHERE user_id = ? AND doc_id = ?",
                    params![book_id, user_id, doc_id],
                )
                .map_err(|e| StoreError::Database(e.to_string()))?,
            (None, None) => return Ok(1),
        };
        Ok(affected)
    }
}

const SELECT_COLUMNS: &str =
    "SELECT doc_id, user_id, book_id, title, authors, cover_url, description, list_tags, added_at
     FROM book_entries";

impl BookStore for SqliteBookStore {
    fn list_entries(&self, user_id: &str) -> Result<Vec<BookEntry>, StoreError> {
        let conn = self.conn.lock().unwrap();
        let sql = format!(
            "{} WHERE user_id = ? ORDER BY added_at, rowid",
            SELECT_COLUMNS
        );
        Self::query_entries(&conn, &sql, &[&user_id])
    }

    fn find_by_title(&self, user_id: &str, title: &str) -> Result<Option<BookEntry>, StoreError> {
        let conn = self.conn.lock().unwrap();
        let sql = format!(
            "{} WHERE user_id = ? AND title = ? ORDER BY added_at LIMIT 1",
            SELECT_COLUMNS
        );
        Ok(Self::query_entries(&conn, &sql, &[&user_id, &title])?.into_iter().next())
    }

    fn find_by_book_id(
        &self,
        user_id: &str,
        book_id: &str,
    ) -> Result<Option<BookEntry>, StoreError> {
        let conn = self.conn.lock().unwrap();
        let sql = format!(
            "{} WHERE user_id = ? AND book_id = ? ORDER BY added_at LIMIT 1",
            SELECT_COLUMNS
        );
        Ok(Self::query_entries(&conn, &sql, &[&user_id, &book_id])?.into_iter().next())
    }

    fn insert_entry(&self, user_id: &str, entry: NewBookEntry) -> Result<String, StoreError> {
        let conn = self.conn.lock().unwrap();
        let doc_id = Uuid::new_v4().to_string();
        let authors_json = serde_json::to_string(&entry.book.authors)
            .map_err(|e| StoreError::Database(e.to_string()))?;
        let now = Utc::now().to_rfc3339();

        conn.execute(
            "INSERT INTO book_entries
             (doc_id, user_id, book_id, title, authors, cover_url, description, list_tags, added_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
            params![
                &doc_id,
                user_id,
                &entry.book.id,
                &entry.book.title,
                &authors_json,
                &entry.book.cover_url,
                &entry.book.description,
                &entry.list_tags,
                &now,
            ],
        )
        .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(doc_id)
    }

    fn update_entry(
        &self,
        user_id: &str,
        doc_id: &str,
        update: EntryUpdate,
    ) -> Result<(), StoreError> {
        let conn = self.conn.lock().unwrap();
        let affected = Self::apply_update(&conn, user_id, doc_id, &update)?;
        if affected == 0 {
            return Err(StoreError::NotFound(doc_id.to_string()));
        }
        Ok(())
    }

    fn delete_entry(&self, user_id: &str, doc_id: &str) -> Result<(), StoreError> {
        let conn = self.conn.lock().unwrap();
        let affected = conn
            .execute(
                "DELETE FROM book_entries WHERE user_id = ? AND doc_id = ?",
                params![user_id, doc_id],
            )
            .map_err(|e| StoreError::Database(e.to_string()))?;

        if affected == 0 {
            return Err(StoreError::NotFound(doc_id.to_string()));
        }
        Ok(())
    }

    fn batch_update(
        &self,
        user_id: &str,
        updates: &[(String, EntryUpdate)],
    ) -> Result<(), StoreError> {
        let mut conn = self.conn.lock().unwrap();
        let tx = conn
            .transaction()
            .map_err(|e| StoreError::Database(e.to_string()))?;

        for (doc_id, update) in updates {
            let affected = Self::apply_update(&tx, user_id, doc_id, update)?;
            if affected == 0 {
                // Rolls back the whole batch on drop.
                return Err(StoreError::NotFound(doc_id.clone()));
            }
        }

        tx.commit().map_err(|e| StoreError::Database(e.to_string()))?;
        Ok(())
    }
}
