//! Persistence module split across logical submodules.

mod books;
mod connection;

pub use connection::{CatalogStore, DB_FILE_NAME};
