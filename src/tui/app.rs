//! Main TUI application.

use std::io;
use std::time::Duration;

use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing::{debug, info};

use crate::config::GridConfig;
use crate::loader::DeferredLoad;

use super::event::{Event, EventHandler};
use super::input::{KeyAction, handle_key};
use super::render::render;
use super::state::{AppState, log_events};

/// Main TUI application.
pub struct App {
    state: AppState,
    config: GridConfig,
    should_quit: bool,
}

impl App {
    pub fn new(state: AppState, config: GridConfig) -> Self {
        Self {
            state,
            config,
            should_quit: false,
        }
    }

    /// Runs the TUI application.
    pub fn run(mut self) -> io::Result<()> {
        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let events = EventHandler::new(self.config.tick_rate);
        let mut loader = self.start_loading(&events);

        let result = self.event_loop(&mut terminal, &events);

        // A load still pending must not fire into a torn-down UI.
        if let Some(mut loader) = loader.take() {
            loader.cancel();
        }

        // Restore terminal
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    /// Schedules the `Loading -> Ready` transition of the models grid.
    fn start_loading(&self, events: &EventHandler) -> Option<DeferredLoad> {
        if !self.state.models.is_loading() {
            return None;
        }
        let delay: Duration = self.config.load_delay;
        debug!("Model load scheduled in {:?}", delay);
        let tx = events.sender();
        Some(DeferredLoad::spawn(delay, move || {
            let _ = tx.send(Event::Loaded);
        }))
    }

    fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
        events: &EventHandler,
    ) -> io::Result<()> {
        loop {
            terminal.draw(|frame| render(frame, &mut self.state))?;

            match events.next() {
                Ok(Event::Tick) => {
                    self.state.ticks = self.state.ticks.wrapping_add(1);
                }
                Ok(Event::Key(key)) => {
                    if handle_key(&mut self.state, key) == KeyAction::Quit {
                        self.should_quit = true;
                    }
                }
                // Layout is recomputed on every draw.
                Ok(Event::Resize(_)) => {}
                Ok(Event::Loaded) => {
                    self.state.finish_loading();
                    info!("Models ready");
                }
                Err(_) => {
                    self.should_quit = true;
                }
            }

            let drained = self.state.drain_events();
            log_events(&drained);

            if self.should_quit {
                return Ok(());
            }
        }
    }
}
