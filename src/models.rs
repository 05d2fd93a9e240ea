//! Domain models that mirror the SQLite schema and get passed throughout the
//! TUI. The intent is that these types stay light-weight data holders so other
//! layers can focus on presentation and persistence logic.

#[derive(Debug, Clone, PartialEq, Eq)]
/// In-memory representation of one catalog entry. The struct mirrors rows in
/// the `books` table one to one.
pub struct Book {
    /// Primary key from the SQLite store. Assigned on insert, never reused
    /// after deletion, and kept around because delete/open flows bubble the id
    /// back to the persistence layer.
    pub id: i64,
    /// Title displayed in the catalog listing.
    pub title: String,
    /// Author field, displayed next to the title.
    pub author: String,
    /// Publication year. Stored as an integer so ordering stays numeric; any
    /// integer is accepted, including negative ones.
    pub year: i64,
    /// Absolute path of the attached document, or `None` when the record was
    /// added without one. The file itself is never copied, so the path can go
    /// stale; existence is checked only when opening.
    pub file_path: Option<String>,
}

impl Book {
    /// Short label used by confirmation prompts and status notices.
    pub fn display_title(&self) -> String {
        format!("{} ({})", self.title, self.author)
    }

    /// Text shown in the File column of the listing.
    pub fn attachment_label(&self) -> &str {
        match self.file_path.as_deref() {
            Some(_) => "attached",
            None => "-",
        }
    }
}
