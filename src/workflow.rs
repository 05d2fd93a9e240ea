//! Workflow layer between user input and the catalog store. All field-level
//! validation lives here so the UI forms stay dumb and the store never has to
//! reject anything. The one piece of session state is the staged-file slot: a
//! path picked by the user that rides along with the next successful add.

use std::io;
use std::path::{Path, PathBuf};

use open::that as open_with_default_handler;

use crate::db::CatalogStore;
use crate::error::CatalogError;
use crate::models::Book;

/// Extensions accepted by [`Workflow::stage_file`]. Compared without the dot
/// and ASCII-case-insensitively, so `.PDF` behaves like `.pdf`.
const ALLOWED_EXTENSIONS: &[&str] = &["pdf", "docx"];

/// Seam for the host "open with the system default handler" collaborator.
/// Production uses [`SystemOpener`]; tests substitute a recording double to
/// observe that the handler gets invoked exactly once.
pub trait AttachmentOpener {
    fn open(&self, path: &Path) -> io::Result<()>;
}

/// Delegates to the `open` crate, which picks the platform-appropriate
/// launcher. Whatever handler runs afterwards is out of our hands.
pub struct SystemOpener;

impl AttachmentOpener for SystemOpener {
    fn open(&self, path: &Path) -> io::Result<()> {
        open_with_default_handler(path)
    }
}

/// Mediates every catalog mutation the shell can request. Owns the store for
/// the process lifetime plus the single staged-file slot.
pub struct Workflow {
    store: CatalogStore,
    staged: Option<PathBuf>,
    opener: Box<dyn AttachmentOpener>,
}

impl Workflow {
    /// Build a workflow around an already-opened store, wired to the real
    /// system opener.
    pub fn new(store: CatalogStore) -> Self {
        Self::with_opener(store, Box::new(SystemOpener))
    }

    /// Like [`Workflow::new`] but with a caller-supplied opener. Exists so
    /// tests can watch attachment opens without launching anything.
    pub fn with_opener(store: CatalogStore, opener: Box<dyn AttachmentOpener>) -> Self {
        Self {
            store,
            staged: None,
            opener,
        }
    }

    /// The path waiting to be attached to the next added book, if any. The
    /// shell shows this in the footer so the user knows a file is pending.
    pub fn staged_file(&self) -> Option<&Path> {
        self.staged.as_deref()
    }

    /// Stage a document for the next add. Only `.pdf` and `.docx` files are
    /// accepted; on rejection the previously staged path (if any) stays
    /// untouched. On success the new path replaces the old one, which was
    /// never persisted and needs no cleanup.
    pub fn stage_file(&mut self, path: impl Into<PathBuf>) -> Result<(), CatalogError> {
        let path = path.into();
        let allowed = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| {
                ALLOWED_EXTENSIONS
                    .iter()
                    .any(|candidate| ext.eq_ignore_ascii_case(candidate))
            })
            .unwrap_or(false);

        if !allowed {
            return Err(CatalogError::validation(
                "Only PDF or DOCX files can be attached.",
            ));
        }

        self.staged = Some(path);
        Ok(())
    }

    /// Validate the three text fields, insert the record together with the
    /// staged path, and return the new id. The staged slot is cleared only
    /// when the record actually lands: a rejected add keeps it so the user
    /// does not have to pick the file again.
    pub fn add_book(
        &mut self,
        title: &str,
        author: &str,
        year_text: &str,
    ) -> Result<i64, CatalogError> {
        let title = title.trim();
        let author = author.trim();
        let year_text = year_text.trim();

        if title.is_empty() || author.is_empty() || year_text.is_empty() {
            return Err(CatalogError::validation("All fields must be filled in."));
        }
        let year: i64 = year_text
            .parse()
            .map_err(|_| CatalogError::validation("Year must be a number."))?;

        let staged = self.staged.as_ref().map(|p| p.to_string_lossy().into_owned());
        let id = self
            .store
            .insert_book(title, author, year, staged.as_deref())?;
        self.staged = None;
        Ok(id)
    }

    /// Reload the full listing after any mutation.
    pub fn refresh(&self) -> Result<Vec<Book>, CatalogError> {
        self.store.list_books()
    }

    /// Delete the book the shell currently has selected. `None` means no row
    /// is selected, which is a user error rather than a storage one.
    pub fn delete_selected(&self, id: Option<i64>) -> Result<(), CatalogError> {
        let id = id.ok_or_else(|| CatalogError::validation("Select a book to delete."))?;
        self.store.delete_book(id)
    }

    /// Open a record's attachment with the host's default handler. The path
    /// is passed in explicitly by the shell (taken from the selected row)
    /// rather than captured anywhere. A missing or stale path is recoverable;
    /// a handler failure is reported but never fatal.
    pub fn open_attachment(&self, path: Option<&str>) -> Result<(), CatalogError> {
        let path = path.ok_or(CatalogError::AttachmentMissing)?;
        let path = Path::new(path);
        if !path.exists() {
            return Err(CatalogError::AttachmentMissing);
        }

        self.opener
            .open(path)
            .map_err(|err| CatalogError::OpenFailed(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::io;
    use std::path::{Path, PathBuf};
    use std::rc::Rc;

    use super::{AttachmentOpener, Workflow};
    use crate::db::CatalogStore;
    use crate::error::CatalogError;

    /// Records every open request instead of launching anything.
    struct RecordingOpener {
        opened: Rc<RefCell<Vec<PathBuf>>>,
        fail_with: Option<&'static str>,
    }

    impl AttachmentOpener for RecordingOpener {
        fn open(&self, path: &Path) -> io::Result<()> {
            self.opened.borrow_mut().push(path.to_path_buf());
            match self.fail_with {
                Some(message) => Err(io::Error::other(message)),
                None => Ok(()),
            }
        }
    }

    fn workflow() -> Workflow {
        Workflow::new(CatalogStore::open_in_memory().expect("in-memory store"))
    }

    fn workflow_with_recorder(
        fail_with: Option<&'static str>,
    ) -> (Workflow, Rc<RefCell<Vec<PathBuf>>>) {
        let opened = Rc::new(RefCell::new(Vec::new()));
        let opener = RecordingOpener {
            opened: Rc::clone(&opened),
            fail_with,
        };
        let store = CatalogStore::open_in_memory().expect("in-memory store");
        (Workflow::with_opener(store, Box::new(opener)), opened)
    }

    #[test]
    fn add_book_appears_in_refresh_with_larger_id() {
        let mut wf = workflow();
        let first = wf.add_book("Dune", "Frank Herbert", "1965").unwrap();
        let second = wf.add_book("Solaris", "Stanislaw Lem", "1961").unwrap();
        assert!(second > first);

        let books = wf.refresh().unwrap();
        assert_eq!(books.len(), 2);
        assert_eq!(books[1].id, second);
        assert_eq!(books[1].title, "Solaris");
        assert_eq!(books[1].author, "Stanislaw Lem");
        assert_eq!(books[1].year, 1961);
        assert_eq!(books[1].file_path, None);
    }

    #[test]
    fn add_book_rejects_bad_input_and_leaves_store_unchanged() {
        let mut wf = workflow();
        let before = wf.refresh().unwrap();

        for (title, author, year) in [
            ("", "Author", "2020"),
            ("Title", "", "2020"),
            ("Title", "Author", "abc"),
            ("   ", "Author", "2020"),
            ("Title", "Author", ""),
        ] {
            let err = wf.add_book(title, author, year).unwrap_err();
            assert!(matches!(err, CatalogError::Validation(_)), "{title:?}/{author:?}/{year:?}");
        }

        assert_eq!(wf.refresh().unwrap(), before);
    }

    #[test]
    fn negative_and_far_future_years_are_accepted() {
        let mut wf = workflow();
        wf.add_book("Epic of Gilgamesh", "Unknown", "-1800").unwrap();
        wf.add_book("Far Future", "Someone", "30000").unwrap();
        let books = wf.refresh().unwrap();
        assert_eq!(books[0].year, -1800);
        assert_eq!(books[1].year, 30000);
    }

    #[test]
    fn delete_selected_removes_exactly_that_record() {
        let mut wf = workflow();
        let keep = wf.add_book("Keep", "A", "1").unwrap();
        let gone = wf.add_book("Gone", "B", "2").unwrap();

        wf.delete_selected(Some(gone)).unwrap();
        let books = wf.refresh().unwrap();
        assert_eq!(books.len(), 1);
        assert_eq!(books[0].id, keep);

        // Second delete of the same id is a no-op, not an error.
        wf.delete_selected(Some(gone)).unwrap();
        assert_eq!(wf.refresh().unwrap().len(), 1);
    }

    #[test]
    fn delete_with_nothing_selected_is_a_validation_error() {
        let wf = workflow();
        let err = wf.delete_selected(None).unwrap_err();
        assert!(matches!(err, CatalogError::Validation(_)));
    }

    #[test]
    fn stage_file_enforces_the_extension_allow_list() {
        let mut wf = workflow();

        let err = wf.stage_file("/path/to/book.exe").unwrap_err();
        assert!(matches!(err, CatalogError::Validation(_)));
        assert!(wf.staged_file().is_none());

        wf.stage_file("/path/to/book.pdf").unwrap();
        assert_eq!(wf.staged_file(), Some(Path::new("/path/to/book.pdf")));

        // A rejected re-stage keeps the earlier path.
        let err = wf.stage_file("/path/to/other.txt").unwrap_err();
        assert!(matches!(err, CatalogError::Validation(_)));
        assert_eq!(wf.staged_file(), Some(Path::new("/path/to/book.pdf")));

        // A successful re-stage replaces it.
        wf.stage_file("/path/to/notes.DOCX").unwrap();
        assert_eq!(wf.staged_file(), Some(Path::new("/path/to/notes.DOCX")));
    }

    #[test]
    fn staged_path_is_attached_once_and_slot_cleared() {
        let mut wf = workflow();
        wf.stage_file("/path/to/book.pdf").unwrap();

        let id = wf.add_book("Dune", "Frank Herbert", "1965").unwrap();
        assert!(wf.staged_file().is_none());

        let books = wf.refresh().unwrap();
        let added = books.iter().find(|b| b.id == id).unwrap();
        assert_eq!(added.file_path.as_deref(), Some("/path/to/book.pdf"));

        // The next add gets no attachment.
        let id = wf.add_book("Solaris", "Stanislaw Lem", "1961").unwrap();
        let books = wf.refresh().unwrap();
        let added = books.iter().find(|b| b.id == id).unwrap();
        assert_eq!(added.file_path, None);
    }

    #[test]
    fn staged_path_survives_a_rejected_add() {
        let mut wf = workflow();
        wf.stage_file("/path/to/book.pdf").unwrap();

        wf.add_book("", "Author", "2020").unwrap_err();
        assert_eq!(wf.staged_file(), Some(Path::new("/path/to/book.pdf")));

        let id = wf.add_book("Title", "Author", "2020").unwrap();
        let books = wf.refresh().unwrap();
        let added = books.iter().find(|b| b.id == id).unwrap();
        assert_eq!(added.file_path.as_deref(), Some("/path/to/book.pdf"));
    }

    #[test]
    fn open_attachment_requires_an_existing_path() {
        let (wf, opened) = workflow_with_recorder(None);

        let err = wf.open_attachment(None).unwrap_err();
        assert!(matches!(err, CatalogError::AttachmentMissing));

        let err = wf.open_attachment(Some("/nonexistent/book.pdf")).unwrap_err();
        assert!(matches!(err, CatalogError::AttachmentMissing));

        assert!(opened.borrow().is_empty());
    }

    #[test]
    fn open_attachment_invokes_the_host_opener_exactly_once() {
        let (wf, opened) = workflow_with_recorder(None);

        let file = tempfile::NamedTempFile::with_suffix(".pdf").unwrap();
        let path = file.path().to_string_lossy().into_owned();

        wf.open_attachment(Some(&path)).unwrap();
        assert_eq!(opened.borrow().len(), 1);
        assert_eq!(opened.borrow()[0], file.path());
    }

    #[test]
    fn opener_failure_surfaces_as_open_failed() {
        let (wf, opened) = workflow_with_recorder(Some("no handler registered"));

        let file = tempfile::NamedTempFile::with_suffix(".pdf").unwrap();
        let path = file.path().to_string_lossy().into_owned();

        let err = wf.open_attachment(Some(&path)).unwrap_err();
        match err {
            CatalogError::OpenFailed(message) => {
                assert!(message.contains("no handler registered"))
            }
            other => panic!("expected OpenFailed, got {other:?}"),
        }
        assert_eq!(opened.borrow().len(), 1);
    }
}
