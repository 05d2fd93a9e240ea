//! Binary entry point that glues the SQLite-backed catalog to the TUI. The
//! bootstrapping pipeline is deliberately linear: open the database, wrap it
//! in the workflow, hydrate the initial listing, and drive the Ratatui event
//! loop until the user exits.

use anyhow::Context;
use bookstore_manager::{run_app, App, CatalogStore, Workflow, DB_FILE_NAME};

/// Initialize persistence, load the catalog, and launch the event loop.
///
/// A store that cannot be opened is the one fatal error in this application;
/// returning it from `main` prints the cause to the terminal instead of
/// crashing silently.
fn main() -> anyhow::Result<()> {
    let store = CatalogStore::open(DB_FILE_NAME).context("storage is unavailable")?;
    let workflow = Workflow::new(store);
    let books = workflow.refresh().context("failed to load the catalog")?;

    let mut app = App::new(workflow, books);
    run_app(&mut app)
}
