use std::mem;

use anyhow::Result;
use crossterm::event::KeyCode;
use ratatui::layout::{Alignment, Constraint, Direction, Layout};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Table, Wrap};
use ratatui::Frame;

use crate::error::CatalogError;
use crate::models::Book;
use crate::workflow::Workflow;

use super::forms::{BookField, BookForm, FileForm};
use super::helpers::{centered_rect, short_file_name};
use super::screens::BookListScreen;

/// Footer space reserved for status messages and key hints.
const FOOTER_HEIGHT: u16 = 4;

/// Fine-grained input modes. Keeping this explicit makes it easy to reason
/// about which rendering path runs and what each key should do.
enum Mode {
    Normal,
    AddingBook(BookForm),
    StagingFile(FileForm),
    ConfirmDelete { id: i64, label: String },
}

/// Holds the footer message text plus its severity.
struct StatusMessage {
    text: String,
    kind: StatusKind,
}

/// Severity levels shown in the footer.
enum StatusKind {
    Info,
    Error,
}

impl StatusKind {
    fn style(&self) -> Style {
        match self {
            StatusKind::Info => Style::default().fg(Color::Green),
            StatusKind::Error => Style::default().fg(Color::Red),
        }
    }
}

/// Central application state shared across the TUI. The workflow does the
/// actual work; this struct routes keys to it and renders the outcome.
pub struct App {
    workflow: Workflow,
    screen: BookListScreen,
    mode: Mode,
    status: Option<StatusMessage>,
}

impl App {
    pub fn new(workflow: Workflow, books: Vec<Book>) -> Self {
        Self {
            workflow,
            screen: BookListScreen::new(books),
            mode: Mode::Normal,
            status: None,
        }
    }

    /// Process one key press. Returns `true` when the user asked to quit.
    pub fn handle_key(&mut self, code: KeyCode) -> Result<bool> {
        let mut exit = false;
        let mode = mem::replace(&mut self.mode, Mode::Normal);

        self.mode = match mode {
            Mode::Normal => self.handle_normal_key(code, &mut exit)?,
            Mode::AddingBook(form) => self.handle_add_book(code, form)?,
            Mode::StagingFile(form) => self.handle_stage_file(code, form),
            Mode::ConfirmDelete { id, label } => self.handle_confirm_delete(code, id, label)?,
        };

        Ok(exit)
    }

    fn handle_normal_key(&mut self, code: KeyCode, exit: &mut bool) -> Result<Mode> {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => {
                *exit = true;
            }
            KeyCode::Up | KeyCode::Char('k') => self.screen.move_up(),
            KeyCode::Down | KeyCode::Char('j') => self.screen.move_down(),
            KeyCode::Char('a') => return Ok(Mode::AddingBook(BookForm::default())),
            KeyCode::Char('u') => return Ok(Mode::StagingFile(FileForm::default())),
            KeyCode::Char('r') => self.reload()?,
            KeyCode::Char('d') => match self.screen.selected_book() {
                Some(book) => {
                    return Ok(Mode::ConfirmDelete {
                        id: book.id,
                        label: book.display_title(),
                    })
                }
                None => {
                    // Route through the workflow so the message matches the
                    // one the validation layer uses everywhere else.
                    if let Err(err) = self.workflow.delete_selected(None) {
                        self.report(&err);
                    }
                }
            },
            KeyCode::Char('o') | KeyCode::Enter => {
                // The path travels as an explicit argument taken from the
                // selected row; the workflow never peeks at UI state.
                let path = self
                    .screen
                    .selected_book()
                    .and_then(|book| book.file_path.clone());
                match self.workflow.open_attachment(path.as_deref()) {
                    Ok(()) => self.set_status("Opening attachment...", StatusKind::Info),
                    Err(err) => self.report(&err),
                }
            }
            _ => {}
        }
        Ok(Mode::Normal)
    }

    fn handle_add_book(&mut self, code: KeyCode, mut form: BookForm) -> Result<Mode> {
        match code {
            KeyCode::Esc => {
                // Cancelling discards the text but not the staged file; only
                // a completed add consumes that.
                return Ok(Mode::Normal);
            }
            KeyCode::Tab | KeyCode::Down => form.next_field(),
            KeyCode::Backspace => form.backspace(),
            KeyCode::Enter => {
                match self.workflow.add_book(&form.title, &form.author, &form.year) {
                    Ok(id) => {
                        self.reload()?;
                        self.set_status(format!("Book added (id {id})."), StatusKind::Info);
                        return Ok(Mode::Normal);
                    }
                    Err(CatalogError::Validation(message)) => {
                        form.error = Some(message);
                    }
                    Err(err) => {
                        self.report(&err);
                        return Ok(Mode::Normal);
                    }
                }
            }
            KeyCode::Char(ch) => form.push_char(ch),
            _ => {}
        }
        Ok(Mode::AddingBook(form))
    }

    fn handle_stage_file(&mut self, code: KeyCode, mut form: FileForm) -> Mode {
        match code {
            KeyCode::Esc => return Mode::Normal,
            KeyCode::Backspace => form.backspace(),
            KeyCode::Enter => match self.workflow.stage_file(form.path.trim()) {
                Ok(()) => {
                    self.set_status(
                        format!("File staged: {}", short_file_name(form.path.trim())),
                        StatusKind::Info,
                    );
                    return Mode::Normal;
                }
                Err(err) => {
                    form.error = Some(err.to_string());
                }
            },
            KeyCode::Char(ch) => form.push_char(ch),
            _ => {}
        }
        Mode::StagingFile(form)
    }

    fn handle_confirm_delete(&mut self, code: KeyCode, id: i64, label: String) -> Result<Mode> {
        match code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                match self.workflow.delete_selected(Some(id)) {
                    Ok(()) => {
                        self.reload()?;
                        self.set_status(format!("Deleted {label}."), StatusKind::Info);
                    }
                    Err(err) => self.report(&err),
                }
                Ok(Mode::Normal)
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => Ok(Mode::Normal),
            _ => Ok(Mode::ConfirmDelete { id, label }),
        }
    }

    /// Repopulate the listing from the store after any mutation.
    fn reload(&mut self) -> Result<()> {
        match self.workflow.refresh() {
            Ok(books) => self.screen.replace(books),
            Err(err) => self.report(&err),
        }
        Ok(())
    }

    fn report(&mut self, err: &CatalogError) {
        self.set_status(err.to_string(), StatusKind::Error);
    }

    fn set_status(&mut self, text: impl Into<String>, kind: StatusKind) {
        self.status = Some(StatusMessage {
            text: text.into(),
            kind,
        });
    }

    pub fn draw(&mut self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(FOOTER_HEIGHT)])
            .split(frame.area());

        let table = Table::new(self.screen.rows(), BookListScreen::widths())
            .header(BookListScreen::header())
            .block(Block::default().borders(Borders::ALL).title(" Bookstore "));
        frame.render_widget(table, chunks[0]);

        frame.render_widget(self.footer(), chunks[1]);

        match &self.mode {
            Mode::Normal => {}
            Mode::AddingBook(form) => self.draw_add_book(frame, form),
            Mode::StagingFile(form) => self.draw_stage_file(frame, form),
            Mode::ConfirmDelete { label, .. } => self.draw_confirm_delete(frame, label),
        }
    }

    fn footer(&self) -> Paragraph<'_> {
        let staged = match self.workflow.staged_file() {
            Some(path) => format!("Staged file: {}", path.display()),
            None => "Staged file: none".to_string(),
        };

        let status_line = match &self.status {
            Some(message) => Line::from(Span::styled(message.text.clone(), message.kind.style())),
            None => Line::from(""),
        };

        Paragraph::new(vec![
            status_line,
            Line::from(staged),
            Line::from(Span::styled(
                "a: add  u: stage file  o: open  d: delete  r: refresh  q: quit",
                Style::default().fg(Color::DarkGray),
            )),
        ])
        .block(Block::default().borders(Borders::TOP))
    }

    fn draw_add_book(&self, frame: &mut Frame, form: &BookForm) {
        let area = centered_rect(60, 40, frame.area());
        frame.render_widget(Clear, area);

        let mut lines = vec![
            form.build_line("Title", BookField::Title),
            form.build_line("Author", BookField::Author),
            form.build_line("Year", BookField::Year),
            Line::from(""),
        ];
        if let Some(error) = &form.error {
            lines.push(Line::from(Span::styled(
                error.clone(),
                Style::default().fg(Color::Red),
            )));
        }
        lines.push(Line::from(Span::styled(
            "Tab: next field  Enter: save  Esc: cancel",
            Style::default().fg(Color::DarkGray),
        )));

        let dialog = Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(Block::default().borders(Borders::ALL).title(" Add Book "));
        frame.render_widget(dialog, area);
    }

    fn draw_stage_file(&self, frame: &mut Frame, form: &FileForm) {
        let area = centered_rect(70, 30, frame.area());
        frame.render_widget(Clear, area);

        let mut lines = vec![form.build_line(), Line::from("")];
        if let Some(error) = &form.error {
            lines.push(Line::from(Span::styled(
                error.clone(),
                Style::default().fg(Color::Red),
            )));
        }
        lines.push(Line::from(Span::styled(
            "Enter: stage  Esc: cancel (PDF or DOCX only)",
            Style::default().fg(Color::DarkGray),
        )));

        let dialog = Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(Block::default().borders(Borders::ALL).title(" Stage File "));
        frame.render_widget(dialog, area);
    }

    fn draw_confirm_delete(&self, frame: &mut Frame, label: &str) {
        let area = centered_rect(50, 25, frame.area());
        frame.render_widget(Clear, area);

        let dialog = Paragraph::new(vec![
            Line::from(format!("Delete {label}?")),
            Line::from(""),
            Line::from(Span::styled(
                "y: delete  n: keep",
                Style::default().fg(Color::DarkGray),
            )),
        ])
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title(" Confirm "));
        frame.render_widget(dialog, area);
    }
}
