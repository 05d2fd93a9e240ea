//! Input forms shown as modal dialogs. The forms only collect raw text;
//! validation belongs to the workflow so there is a single place that decides
//! what a valid book or attachment looks like. Rejection messages from the
//! workflow land in the form's `error` field and render inside the modal.

use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

/// Raw text for the "add book" dialog.
#[derive(Default, Clone)]
pub(crate) struct BookForm {
    pub(crate) title: String,
    pub(crate) author: String,
    pub(crate) year: String,
    pub(crate) active: BookField,
    pub(crate) error: Option<String>,
}

/// Fields available within the book form.
#[derive(Copy, Clone, PartialEq, Eq, Default)]
pub(crate) enum BookField {
    #[default]
    Title,
    Author,
    Year,
}

impl BookForm {
    /// Advance focus to the next field, wrapping around.
    pub(crate) fn next_field(&mut self) {
        self.active = match self.active {
            BookField::Title => BookField::Author,
            BookField::Author => BookField::Year,
            BookField::Year => BookField::Title,
        };
    }

    /// Append a character to the active field. The year field only accepts
    /// digits plus a leading minus so most typos never reach the workflow.
    pub(crate) fn push_char(&mut self, ch: char) {
        match self.active {
            BookField::Title => {
                if !ch.is_control() {
                    self.title.push(ch);
                }
            }
            BookField::Author => {
                if !ch.is_control() {
                    self.author.push(ch);
                }
            }
            BookField::Year => {
                if ch.is_ascii_digit() || (ch == '-' && self.year.is_empty()) {
                    self.year.push(ch);
                }
            }
        }
    }

    /// Remove the last character from the active field.
    pub(crate) fn backspace(&mut self) {
        match self.active {
            BookField::Title => {
                self.title.pop();
            }
            BookField::Author => {
                self.author.pop();
            }
            BookField::Year => {
                self.year.pop();
            }
        }
    }

    /// Render a single labelled line for the modal.
    pub(crate) fn build_line(&self, field_name: &str, field: BookField) -> Line<'static> {
        let (value, is_active) = match field {
            BookField::Title => (&self.title, self.active == BookField::Title),
            BookField::Author => (&self.author, self.active == BookField::Author),
            BookField::Year => (&self.year, self.active == BookField::Year),
        };
        form_line(field_name, value, is_active)
    }
}

/// Raw text for the "stage attachment" dialog: a single path field.
#[derive(Default, Clone)]
pub(crate) struct FileForm {
    pub(crate) path: String,
    pub(crate) error: Option<String>,
}

impl FileForm {
    pub(crate) fn push_char(&mut self, ch: char) {
        if !ch.is_control() {
            self.path.push(ch);
        }
    }

    pub(crate) fn backspace(&mut self) {
        self.path.pop();
    }

    pub(crate) fn build_line(&self) -> Line<'static> {
        form_line("Path", &self.path, true)
    }
}

/// Shared rendering for one `Label: value` line. Active fields highlight in
/// yellow, empty ones show a dimmed placeholder.
fn form_line(field_name: &str, value: &str, is_active: bool) -> Line<'static> {
    let display = if value.is_empty() {
        "<required>".to_string()
    } else {
        value.to_string()
    };

    let style = if is_active {
        Style::default().fg(Color::Yellow)
    } else if value.is_empty() {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default()
    };

    Line::from(vec![
        Span::raw(format!("{field_name}: ")),
        Span::styled(display, style),
    ])
}
