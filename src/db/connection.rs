//! Store construction and schema management. The connection lives inside an
//! explicit [`CatalogStore`] value rather than module-level state so several
//! instances (production, tests, doubles) can coexist without interference.

use std::fs;
use std::path::Path;

use rusqlite::Connection;

use crate::error::CatalogError;

/// SQLite file name created next to the running process when no explicit
/// path is given. Several code paths (startup, docs, manual inspection) rely
/// on the exact same string.
pub const DB_FILE_NAME: &str = "bookstore.db";

/// Handle to the single catalog database. One instance per process; every
/// operation is synchronous and runs to completion on the caller's thread.
pub struct CatalogStore {
    pub(crate) conn: Connection,
}

impl CatalogStore {
    /// Open or create the database at `path` and make sure the `books` table
    /// exists. Schema creation is idempotent, so calling this against an
    /// already-populated file is harmless.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .map_err(|err| CatalogError::StorageUnavailable(err.to_string()))?;
        }

        let conn = Connection::open(path)
            .map_err(|err| CatalogError::StorageUnavailable(err.to_string()))?;
        Self::with_connection(conn)
    }

    /// Same schema against an in-memory database. Used by tests and any
    /// caller that wants a throwaway catalog.
    pub fn open_in_memory() -> Result<Self, CatalogError> {
        let conn = Connection::open_in_memory()
            .map_err(|err| CatalogError::StorageUnavailable(err.to_string()))?;
        Self::with_connection(conn)
    }

    fn with_connection(conn: Connection) -> Result<Self, CatalogError> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS books (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT,
                author TEXT,
                year_book INTEGER,
                file_path TEXT
            )",
            [],
        )
        .map_err(|err| CatalogError::StorageUnavailable(err.to_string()))?;

        Ok(Self { conn })
    }

    /// Consume the store and close the underlying connection. Dropping the
    /// store closes it as well; this exists for callers that want the close
    /// to be an explicit step in their shutdown path.
    pub fn close(self) {
        let _ = self.conn.close();
    }
}
