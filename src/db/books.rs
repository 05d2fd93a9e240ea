//! CRUD queries for the `books` table. Every function encapsulates one query
//! so the rest of the codebase can stay focused on workflow and UI state.
//! There is deliberately no update query: records are immutable once created
//! except for deletion.

use rusqlite::params;

use crate::db::CatalogStore;
use crate::error::CatalogError;
use crate::models::Book;

impl CatalogStore {
    /// Append a new record and return the assigned id. `AUTOINCREMENT` keeps
    /// ids monotonically increasing and never reused after deletion. No
    /// deduplication happens here; identical books may coexist with
    /// different ids.
    pub fn insert_book(
        &self,
        title: &str,
        author: &str,
        year: i64,
        file_path: Option<&str>,
    ) -> Result<i64, CatalogError> {
        self.conn.execute(
            "INSERT INTO books (title, author, year_book, file_path) VALUES (?1, ?2, ?3, ?4)",
            params![title, author, year, file_path],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    /// Retrieve every record in insertion order. The id doubles as the sort
    /// key, which keeps the listing stable across refreshes. An empty table
    /// yields an empty vec, never an error.
    pub fn list_books(&self) -> Result<Vec<Book>, CatalogError> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, title, author, year_book, file_path FROM books ORDER BY id")?;

        let books = stmt
            .query_map([], |row| {
                Ok(Book {
                    id: row.get(0)?,
                    title: row.get(1)?,
                    author: row.get(2)?,
                    year: row.get(3)?,
                    file_path: row.get(4)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(books)
    }

    /// Remove the record with the given id. Deleting an id that is not
    /// present is a no-op, not an error, so the caller never has to
    /// distinguish "already gone" from "just removed".
    pub fn delete_book(&self, id: i64) -> Result<(), CatalogError> {
        self.conn
            .execute("DELETE FROM books WHERE id = ?1", params![id])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::db::CatalogStore;

    fn store() -> CatalogStore {
        CatalogStore::open_in_memory().expect("in-memory store")
    }

    #[test]
    fn insert_returns_increasing_ids() {
        let store = store();
        let first = store
            .insert_book("Dune", "Frank Herbert", 1965, None)
            .unwrap();
        let second = store
            .insert_book("Solaris", "Stanislaw Lem", 1961, None)
            .unwrap();
        assert!(second > first);
    }

    #[test]
    fn list_returns_records_in_insertion_order() {
        let store = store();
        store.insert_book("A", "First", 2000, None).unwrap();
        store
            .insert_book("B", "Second", 2001, Some("/tmp/b.pdf"))
            .unwrap();

        let books = store.list_books().unwrap();
        assert_eq!(books.len(), 2);
        assert_eq!(books[0].title, "A");
        assert_eq!(books[0].file_path, None);
        assert_eq!(books[1].title, "B");
        assert_eq!(books[1].file_path.as_deref(), Some("/tmp/b.pdf"));
    }

    #[test]
    fn list_on_empty_table_is_empty_not_an_error() {
        let store = store();
        assert!(store.list_books().unwrap().is_empty());
    }

    #[test]
    fn identical_records_coexist_with_distinct_ids() {
        let store = store();
        let a = store.insert_book("Same", "Author", 1999, None).unwrap();
        let b = store.insert_book("Same", "Author", 1999, None).unwrap();
        assert_ne!(a, b);
        assert_eq!(store.list_books().unwrap().len(), 2);
    }

    #[test]
    fn delete_removes_only_the_requested_record() {
        let store = store();
        let keep = store.insert_book("Keep", "A", 1, None).unwrap();
        let removed = store.insert_book("Drop", "B", 2, None).unwrap();

        store.delete_book(removed).unwrap();

        let books = store.list_books().unwrap();
        assert_eq!(books.len(), 1);
        assert_eq!(books[0].id, keep);
    }

    #[test]
    fn deleting_a_missing_id_is_a_no_op() {
        let store = store();
        let id = store.insert_book("Once", "A", 1, None).unwrap();
        store.delete_book(id).unwrap();
        store.delete_book(id).unwrap();
        store.delete_book(9999).unwrap();
        assert!(store.list_books().unwrap().is_empty());
    }

    #[test]
    fn ids_are_not_reused_after_deletion() {
        let store = store();
        let first = store.insert_book("Gone", "A", 1, None).unwrap();
        store.delete_book(first).unwrap();
        let second = store.insert_book("New", "B", 2, None).unwrap();
        assert!(second > first);
    }

    #[test]
    fn schema_creation_is_idempotent_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bookstore.db");

        let id = {
            let store = CatalogStore::open(&path).unwrap();
            store.insert_book("Persisted", "A", 2020, None).unwrap()
        };

        let store = CatalogStore::open(&path).unwrap();
        let books = store.list_books().unwrap();
        assert_eq!(books.len(), 1);
        assert_eq!(books[0].id, id);
        store.close();
    }
}
