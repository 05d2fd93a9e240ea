//! Presentation shell: a single listing screen with modal dialogs for adding
//! a book, staging an attachment, and confirming deletes. Everything here is
//! glue; the workflow layer owns the behavior.

mod app;
mod forms;
mod helpers;
mod screens;
mod terminal;

pub use app::App;
pub use terminal::run_app;
