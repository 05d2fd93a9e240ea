//! Error taxonomy shared by the persistence layer and the workflow. Each
//! variant maps to one recovery story: validation problems are shown to the
//! user and retried by hand, storage-open failures are fatal at startup, and
//! everything else surfaces as a footer notice without crashing the app.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    /// Bad or missing user input. The message is already user-facing.
    #[error("{0}")]
    Validation(String),

    /// The database file could not be opened or created. Fatal at startup
    /// because the application has no function without storage.
    #[error("could not open the catalog database: {0}")]
    StorageUnavailable(String),

    /// An insert or delete failed at the SQLite level. Surfaced once, never
    /// retried automatically.
    #[error("catalog database error: {0}")]
    StorageWrite(#[from] rusqlite::Error),

    /// The record has no attachment, or the stored path no longer exists on
    /// disk. The user re-uploads to recover.
    #[error("attachment file is missing")]
    AttachmentMissing,

    /// The host handler refused to open the file. Informational only.
    #[error("failed to open attachment: {0}")]
    OpenFailed(String),
}

impl CatalogError {
    /// Build a validation error from anything printable.
    pub fn validation(message: impl Into<String>) -> Self {
        CatalogError::Validation(message.into())
    }
}
