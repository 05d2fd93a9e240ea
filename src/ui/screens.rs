//! Rendering state for the catalog listing. The listing is the only screen in
//! this application, so the struct mostly tracks which row is selected and
//! knows how to turn records into table rows.

use ratatui::layout::Constraint;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Cell, Row};

use crate::models::Book;

/// Wrapper around the loaded book list plus the table selection.
pub(crate) struct BookListScreen {
    pub(crate) books: Vec<Book>,
    pub(crate) selected: usize,
}

impl BookListScreen {
    pub(crate) fn new(books: Vec<Book>) -> Self {
        let mut screen = Self { books, selected: 0 };
        screen.ensure_in_bounds();
        screen
    }

    /// Swap in a freshly loaded list, keeping the selection close to where it
    /// was so deletes do not bounce the cursor to the top.
    pub(crate) fn replace(&mut self, books: Vec<Book>) {
        self.books = books;
        self.ensure_in_bounds();
    }

    pub(crate) fn ensure_in_bounds(&mut self) {
        if self.books.is_empty() {
            self.selected = 0;
        } else if self.selected >= self.books.len() {
            self.selected = self.books.len() - 1;
        }
    }

    pub(crate) fn move_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub(crate) fn move_down(&mut self) {
        if !self.books.is_empty() {
            self.selected = (self.selected + 1).min(self.books.len() - 1);
        }
    }

    /// The record under the cursor, if the list is non-empty.
    pub(crate) fn selected_book(&self) -> Option<&Book> {
        self.books.get(self.selected)
    }

    /// Column header row.
    pub(crate) fn header() -> Row<'static> {
        Row::new(["ID", "Title", "Author", "Year", "File"])
            .style(Style::default().add_modifier(Modifier::BOLD))
    }

    /// Column widths: id and year stay narrow, title and author share the
    /// remaining space.
    pub(crate) fn widths() -> [Constraint; 5] {
        [
            Constraint::Length(6),
            Constraint::Percentage(40),
            Constraint::Percentage(30),
            Constraint::Length(6),
            Constraint::Length(10),
        ]
    }

    /// One table row per record, one cell per field. The selected row gets a
    /// reversed style so it reads as a cursor even without color support.
    pub(crate) fn rows(&self) -> Vec<Row<'static>> {
        self.books
            .iter()
            .enumerate()
            .map(|(idx, book)| {
                let row = Row::new(vec![
                    Cell::from(book.id.to_string()),
                    Cell::from(book.title.clone()),
                    Cell::from(book.author.clone()),
                    Cell::from(book.year.to_string()),
                    Cell::from(book.attachment_label().to_string()),
                ]);
                if idx == self.selected {
                    row.style(
                        Style::default()
                            .fg(Color::Black)
                            .bg(Color::Gray)
                            .add_modifier(Modifier::BOLD),
                    )
                } else {
                    row
                }
            })
            .collect()
    }
}
