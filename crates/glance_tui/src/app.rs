//! TUI application state and event handling.
//!
//! [`AppModel`] owns the table state plus the bits of UI state around it
//! (input mode, search text, selected row) and maps key presses to table
//! actions. [`TuiApp`] adds the terminal and the fetch plumbing.

use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use glance_core::prelude::*;
use ratatui::prelude::*;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};

use crate::screens;

/// Keyboard input mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Navigation and table commands
    #[default]
    Normal,
    /// Typing into the search bar
    Search,
}

/// Side effect requested by a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Start a fetch from the record source
    Fetch,
}

/// Presentation model: table state plus UI state
#[derive(Debug, Clone, Default)]
pub struct AppModel {
    table: TableState,
    mode: InputMode,
    search_input: String,
    selected: usize,
    source_label: String,
    should_quit: bool,
}

impl AppModel {
    /// Create a model for the given source label
    pub fn new(source_label: impl Into<String>) -> Self {
        Self {
            source_label: source_label.into(),
            ..Self::default()
        }
    }

    /// Current table state
    pub fn table(&self) -> &TableState {
        &self.table
    }

    /// Current input mode
    pub fn mode(&self) -> InputMode {
        self.mode
    }

    /// Text in the search bar
    pub fn search_input(&self) -> &str {
        &self.search_input
    }

    /// Selected row index
    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Label of the record source
    pub fn source_label(&self) -> &str {
        &self.source_label
    }

    /// Whether the user asked to quit
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Feed an action through the table reducer
    pub fn dispatch(&mut self, action: TableAction) {
        let table = std::mem::take(&mut self.table);
        self.table = table.reduce(action);
        self.selected = self
            .selected
            .min(self.table.records().len().saturating_sub(1));
    }

    /// Register a new fetch and return its id
    pub fn begin_fetch(&mut self) -> RequestId {
        let request = self.table.next_request_id();
        self.dispatch(TableAction::FetchStarted(request));
        request
    }

    /// Handle keyboard input
    ///
    /// Ctrl+C quits from either mode; raw mode delivers it as a key press.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Effect> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return None;
        }

        let key = key.code;
        match self.mode {
            InputMode::Normal => self.handle_normal_key(key),
            InputMode::Search => {
                self.handle_search_key(key);
                None
            }
        }
    }

    fn handle_normal_key(&mut self, key: KeyCode) -> Option<Effect> {
        match key {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('/') => self.mode = InputMode::Search,
            KeyCode::Char('r') => return Some(Effect::Fetch),
            KeyCode::Char('c') => self.dispatch(TableAction::DismissNotice),
            KeyCode::Char(c @ '1'..='3') => {
                let index = c as usize - '1' as usize;
                let column = Column::SORTABLE[index];
                let descriptor = SortDescriptor::toggle(self.table.sort(), column);
                tracing::debug!("Sorting by {}", descriptor);
                self.dispatch(TableAction::Sort(descriptor));
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = self.selected.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.selected < self.table.records().len().saturating_sub(1) {
                    self.selected += 1;
                }
            }
            _ => {}
        }
        None
    }

    fn handle_search_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc => self.mode = InputMode::Normal,
            KeyCode::Enter => {
                self.mode = InputMode::Normal;
                self.dispatch(TableAction::Search(self.search_input.clone()));
            }
            KeyCode::Backspace => {
                self.search_input.pop();
            }
            KeyCode::Char(c) => self.search_input.push(c),
            _ => {}
        }
    }
}

/// Completed fetch delivered back to the event loop
type FetchMessage = (RequestId, std::result::Result<Vec<IncomeStatement>, FetchError>);

/// TUI application
pub struct TuiApp {
    /// Presentation model
    model: AppModel,
    /// Record source used for the initial load and every reset
    source: Arc<dyn RecordSource>,
    /// Fetch results sender (cloned into each fetch task)
    fetch_tx: UnboundedSender<FetchMessage>,
    /// Fetch results receiver
    fetch_rx: UnboundedReceiver<FetchMessage>,
    /// Terminal
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TuiApp {
    /// Create a new TUI application
    pub fn new(source: Arc<dyn RecordSource>) -> Result<Self> {
        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        let (fetch_tx, fetch_rx) = unbounded_channel();

        Ok(Self {
            model: AppModel::new(source.describe()),
            source,
            fetch_tx,
            fetch_rx,
            terminal,
        })
    }

    /// Run the TUI event loop
    pub async fn run(&mut self) -> Result<()> {
        self.spawn_fetch();

        loop {
            while let Ok((request, result)) = self.fetch_rx.try_recv() {
                self.model
                    .dispatch(TableAction::FetchCompleted { request, result });
            }

            let model = &self.model;
            self.terminal.draw(|frame| screens::draw(frame, model))?;

            // Handle events with timeout so fetch results are picked up
            if event::poll(Duration::from_millis(100))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        if let Some(Effect::Fetch) = self.model.handle_key(key) {
                            self.spawn_fetch();
                        }
                    }
                }
            }

            if self.model.should_quit() {
                break;
            }

            tokio::task::yield_now().await;
        }

        Ok(())
    }

    /// Start a background fetch; the result arrives through the channel
    fn spawn_fetch(&mut self) {
        let request = self.model.begin_fetch();
        tracing::info!("Starting fetch {} from {}", request, self.model.source_label());

        let source = Arc::clone(&self.source);
        let tx = self.fetch_tx.clone();
        tokio::spawn(async move {
            let result = source.fetch().await;
            // Receiver only disappears on shutdown
            let _ = tx.send((request, result));
        });
    }
}

impl Drop for TuiApp {
    fn drop(&mut self) {
        // Restore terminal
        let _ = disable_raw_mode();
        let _ = execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        );
        let _ = self.terminal.show_cursor();
    }
}
