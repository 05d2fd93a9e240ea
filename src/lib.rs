//! Core library surface for the bookstore manager TUI application.
//!
//! The public modules exposed here provide an intentionally small API so the
//! `bin` target as well as potential external tooling can reuse the same
//! pieces: a SQLite-backed catalog store, the workflow that validates input
//! and drives it, and the Ratatui shell on top.

pub mod db;
pub mod error;
pub mod models;
pub mod ui;
pub mod workflow;

/// The persistence layer. `main.rs` opens the store once at startup and hands
/// it to the workflow for the process lifetime.
pub use db::{CatalogStore, DB_FILE_NAME};

/// The single domain type other layers manipulate.
pub use models::Book;

/// Error taxonomy shared by the store and the workflow.
pub use error::CatalogError;

/// The controller mediating between user actions and the store.
pub use workflow::{AttachmentOpener, SystemOpener, Workflow};

/// The interactive application entry point and state container.
pub use ui::{run_app, App};
