//! Terminal driver: raw mode, the event loop and drawing.

use crate::app::App;
use crate::channel::RemoteChannel;
use crate::host::{Clipboard, FileSaver};
use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture, Event};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::backend::{Backend, CrosstermBackend};
use ratatui::Terminal;
use std::io::{self, Stdout};
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::debug;

/// Longest wait for input before polling the channel and snackbar deadlines.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Errors that can occur during TUI operations
#[derive(Debug, Error)]
pub enum TuiError {
    /// IO error during terminal operations
    #[error("Terminal IO error: {0}")]
    Io(#[from] io::Error),
}

/// The viewer bound to a terminal.
///
/// Generic over backend to support testing with TestBackend
pub struct TuiApp<B, C, K, F>
where
    B: Backend,
{
    terminal: Terminal<B>,
    app: App<C, K, F>,
}

impl<C, K, F> TuiApp<CrosstermBackend<Stdout>, C, K, F>
where
    C: RemoteChannel,
    K: Clipboard,
    F: FileSaver,
{
    /// Take over stdout: raw mode, alternate screen and mouse capture.
    pub fn new(app: App<C, K, F>) -> Result<Self, TuiError> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(EnterAlternateScreen)?;
        stdout.execute(EnableMouseCapture)?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        Ok(Self::with_terminal(terminal, app))
    }

    /// Run until the user quits, then give the terminal back.
    pub fn run(mut self) -> Result<App<C, K, F>, TuiError> {
        let result = self.event_loop();
        restore_terminal()?;
        result.map(|()| self.app)
    }

    fn event_loop(&mut self) -> Result<(), TuiError> {
        self.app.push_filter();
        self.draw()?;

        while !self.app.should_quit() {
            let timeout = self
                .app
                .next_deadline(Instant::now())
                .map_or(POLL_INTERVAL, |deadline| deadline.min(POLL_INTERVAL));

            if event::poll(timeout)? {
                self.handle_event(event::read()?);
            }
            self.app.poll_remote();
            self.app.tick(Instant::now());
            self.draw()?;
        }
        debug!("event loop finished");
        Ok(())
    }
}

impl<B, C, K, F> TuiApp<B, C, K, F>
where
    B: Backend,
    C: RemoteChannel,
    K: Clipboard,
    F: FileSaver,
{
    /// Wrap an existing terminal. Used with `TestBackend` in tests.
    pub fn with_terminal(terminal: Terminal<B>, app: App<C, K, F>) -> Self {
        Self { terminal, app }
    }

    /// The wrapped app.
    pub fn app(&self) -> &App<C, K, F> {
        &self.app
    }

    /// The wrapped app, mutably.
    pub fn app_mut(&mut self) -> &mut App<C, K, F> {
        &mut self.app
    }

    /// The wrapped terminal.
    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }

    /// Feed one terminal event to the app. Returns `true` when the user quit.
    pub fn handle_event(&mut self, event: Event) -> bool {
        match event {
            Event::Key(key) => self.app.handle_key(key),
            Event::Mouse(mouse) => {
                self.app.handle_mouse(mouse);
                false
            }
            // Resize needs no handling: the next draw uses the new size.
            _ => false,
        }
    }

    /// Render one frame.
    pub fn draw(&mut self) -> Result<(), TuiError> {
        let app = &mut self.app;
        self.terminal.draw(|frame| app.render(frame))?;
        Ok(())
    }
}

/// Disables raw mode, mouse capture, and leaves alternate screen
fn restore_terminal() -> Result<(), TuiError> {
    disable_raw_mode()?;
    io::stdout().execute(DisableMouseCapture)?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}
