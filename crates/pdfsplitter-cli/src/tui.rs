//! Interactive page selector (`browse` subcommand, `tui` feature).
//!
//! One row per page with a checkbox. The selection, range input, split and
//! extract actions all go through [`AppState`]; outputs are written to the
//! current directory.

use std::fs;
use std::io;
use std::path::Path;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use pdfsplitter::{AppState, Artifact, format_file_size};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};
use ratatui::{Frame, Terminal};

use crate::cli::PrefSetting;
use crate::preferences::{Preferences, PreferencesStore};
use crate::prefs_cmd::toggle;
use crate::shared::load_state;

const TICK_RATE: Duration = Duration::from_millis(200);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StatusKind {
    Info,
    Success,
    Error,
}

#[derive(Debug, PartialEq, Eq)]
enum Mode {
    Normal,
    RangeInput(String),
}

struct Browser {
    state: AppState,
    list: ListState,
    mode: Mode,
    status: Option<(StatusKind, String)>,
    prefs: Preferences,
    store: Option<PreferencesStore>,
    clipboard: Option<arboard::Clipboard>,
    last_text: Option<String>,
    should_quit: bool,
}

pub fn run(file: &Path) -> Result<(), i32> {
    let state = load_state(file, false)?;
    let store = PreferencesStore::from_env();
    let prefs = store.as_ref().map(PreferencesStore::load).unwrap_or_default();
    let mut browser = Browser::new(state, prefs, store);

    browser.run_terminal().map_err(|e| {
        eprintln!("Error: {e}");
        1
    })
}

impl Browser {
    fn new(state: AppState, prefs: Preferences, store: Option<PreferencesStore>) -> Self {
        let mut list = ListState::default();
        if state.page_count() > 0 {
            list.select(Some(0));
        }
        Self {
            state,
            list,
            mode: Mode::Normal,
            status: None,
            prefs,
            store,
            clipboard: None,
            last_text: None,
            should_quit: false,
        }
    }

    fn run_terminal(&mut self) -> io::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        if let Err(err) = execute!(stdout, EnterAlternateScreen) {
            disable_raw_mode().ok();
            return Err(err);
        }

        let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        terminal.hide_cursor().ok();

        let result = self.event_loop(&mut terminal);

        disable_raw_mode().ok();
        let _ = execute!(terminal.backend_mut(), LeaveAlternateScreen);
        let _ = terminal.show_cursor();

        result
    }

    fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> io::Result<()> {
        while !self.should_quit {
            terminal.draw(|frame| self.render(frame))?;
            if event::poll(TICK_RATE)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key);
                    }
                }
            }
        }
        Ok(())
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if let Mode::RangeInput(input) = &mut self.mode {
            match key.code {
                KeyCode::Esc => self.mode = Mode::Normal,
                KeyCode::Enter => {
                    let input = std::mem::take(input);
                    self.mode = Mode::Normal;
                    self.apply_range(&input);
                }
                KeyCode::Backspace => {
                    input.pop();
                }
                KeyCode::Char(ch) => input.push(ch),
                _ => {}
            }
            return;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Down | KeyCode::Char('j') => self.move_cursor(1),
            KeyCode::Up | KeyCode::Char('k') => self.move_cursor(-1),
            KeyCode::Char(' ') => {
                if let Some(page) = self.current_page() {
                    self.state.toggle_page(page);
                }
            }
            KeyCode::Char('a') => self.state.select_all(),
            KeyCode::Char('n') => self.state.deselect_all(),
            KeyCode::Char('r') => self.mode = Mode::RangeInput(String::new()),
            KeyCode::Char('s') => self.split(),
            KeyCode::Char('t') => self.extract(),
            KeyCode::Char('y') => self.copy_text(),
            KeyCode::Char('c') => self.toggle_pref(PrefSetting::HighContrast),
            KeyCode::Char('L') => self.toggle_pref(PrefSetting::LargeText),
            _ => {}
        }
    }

    fn current_page(&self) -> Option<u32> {
        self.list
            .selected()
            .and_then(|index| u32::try_from(index + 1).ok())
    }

    fn move_cursor(&mut self, delta: i64) {
        let count = i64::from(self.state.page_count());
        if count == 0 {
            return;
        }
        let current = self.list.selected().map_or(0, |i| i as i64);
        let next = (current + delta).clamp(0, count - 1);
        self.list.select(Some(next as usize));
    }

    fn apply_range(&mut self, input: &str) {
        match self.state.apply_range(input) {
            Ok(count) => self.set_status(StatusKind::Info, format!("{count} page(s) selected")),
            Err(err) => self.set_status(StatusKind::Error, err.to_string()),
        }
    }

    fn split(&mut self) {
        self.set_status(StatusKind::Info, "Splitting PDF...".to_string());
        match self.state.split_selected(None) {
            Ok(artifact) => self.save(&artifact, "PDF split successfully!"),
            Err(err) => self.set_status(StatusKind::Error, format!("Error splitting PDF: {err}")),
        }
    }

    fn extract(&mut self) {
        self.set_status(StatusKind::Info, "Extracting text...".to_string());
        match self.state.extract_selected(None) {
            Ok(artifact) => {
                self.last_text = artifact.as_text().map(str::to_string);
                self.save(&artifact, "Text extracted successfully!");
            }
            Err(err) => {
                self.set_status(StatusKind::Error, format!("Error extracting text: {err}"))
            }
        }
    }

    fn copy_text(&mut self) {
        if self.last_text.is_none() {
            match self.state.extract_selected(None) {
                Ok(artifact) => self.last_text = artifact.as_text().map(str::to_string),
                Err(err) => {
                    self.set_status(StatusKind::Error, format!("Error extracting text: {err}"));
                    return;
                }
            }
        }
        let Some(text) = self.last_text.clone() else {
            return;
        };
        if self.clipboard.is_none() {
            self.clipboard = arboard::Clipboard::new().ok();
        }
        let copied = self
            .clipboard
            .as_mut()
            .is_some_and(|clipboard| clipboard.set_text(text).is_ok());
        if copied {
            self.set_status(StatusKind::Success, "Text copied to clipboard".to_string());
        } else {
            self.clipboard = None;
            self.set_status(StatusKind::Error, "Clipboard unavailable".to_string());
        }
    }

    fn save(&mut self, artifact: &Artifact, message: &str) {
        match fs::write(&artifact.filename, &artifact.bytes) {
            Ok(()) => self.set_status(
                StatusKind::Success,
                format!(
                    "{message} {} ({})",
                    artifact.filename,
                    format_file_size(artifact.len() as u64)
                ),
            ),
            Err(err) => self.set_status(
                StatusKind::Error,
                format!("Cannot write {}: {err}", artifact.filename),
            ),
        }
    }

    fn toggle_pref(&mut self, setting: PrefSetting) {
        toggle(&mut self.prefs, setting);
        if let Some(store) = &self.store {
            if let Err(err) = store.save(&self.prefs) {
                tracing::warn!(error = %err, "cannot save preferences");
            }
        }
    }

    fn set_status(&mut self, kind: StatusKind, message: String) {
        self.status = Some((kind, message));
    }

    fn base_style(&self) -> Style {
        if self.prefs.high_contrast {
            Style::default().fg(Color::White).bg(Color::Black)
        } else {
            Style::default()
        }
    }

    fn accent(&self) -> Color {
        if self.prefs.high_contrast {
            Color::Yellow
        } else {
            Color::Cyan
        }
    }

    fn render(&mut self, frame: &mut Frame<'_>) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(3),
                Constraint::Length(3),
                Constraint::Length(1),
            ])
            .split(frame.size());
        let base = self.base_style();

        let title = match self.state.document() {
            Some(doc) => format!(
                "{}  {} pages  {}  {} selected",
                doc.name(),
                doc.page_count(),
                format_file_size(doc.size()),
                self.state.selection().len()
            ),
            None => "No PDF loaded.".to_string(),
        };
        frame.render_widget(
            Paragraph::new(title)
                .style(base)
                .block(Block::default().borders(Borders::ALL).title("pdfsplitter")),
            chunks[0],
        );

        let items: Vec<ListItem> = (1..=self.state.page_count())
            .map(|page| {
                let mark = if self.state.selection().contains(page) { "[x]" } else { "[ ]" };
                let line = Line::raw(format!("{mark} Page {page}"));
                if self.prefs.large_text {
                    ListItem::new(vec![line, Line::raw("")])
                } else {
                    ListItem::new(line)
                }
            })
            .collect();
        let list = List::new(items)
            .style(base)
            .block(Block::default().borders(Borders::ALL).title("Pages"))
            .highlight_style(
                Style::default()
                    .fg(self.accent())
                    .add_modifier(Modifier::BOLD | Modifier::REVERSED),
            );
        frame.render_stateful_widget(list, chunks[1], &mut self.list);

        let (bottom, style) = match (&self.mode, &self.status) {
            (Mode::RangeInput(input), _) => (
                format!("Range (e.g. 1-3,5): {input}_"),
                base.fg(self.accent()),
            ),
            (Mode::Normal, Some((kind, message))) => {
                let color = match kind {
                    StatusKind::Info => self.accent(),
                    StatusKind::Success => Color::Green,
                    StatusKind::Error => Color::Red,
                };
                (message.clone(), base.fg(color))
            }
            (Mode::Normal, None) => (String::new(), base),
        };
        frame.render_widget(
            Paragraph::new(bottom)
                .style(style)
                .block(Block::default().borders(Borders::ALL)),
            chunks[2],
        );

        frame.render_widget(
            Paragraph::new(
                "space toggle  a all  n none  r range  s split  t text  y copy  c contrast  L large  q quit",
            )
            .style(base.add_modifier(Modifier::DIM)),
            chunks[3],
        );
    }
}
