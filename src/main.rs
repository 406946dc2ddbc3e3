// Copyright (C) 2026  Caprica Software Limited
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! # Stopwatch TUI.
//!
//! A terminal stopwatch with split and lap timing.
//!
//! It uses an event-driven architecture where:
//!
//! * The **Main Thread** owns the stopwatch, manages the terminal lifecycle
//!   and renders the UI.
//! * An **Input Thread** forwards key presses as application events.
//! * A **Ticker Thread**, only alive while the stopwatch runs, asks the main
//!   thread to refresh the displayed times.
//!
//! ## Architecture
//!
//! The application follows a strict setup-run-teardown pattern to ensure the
//! terminal state is preserved even in the event of a crash. Communication
//! between threads is handled via `std::sync::mpsc` channels.

mod config;
mod events;
mod logging;
mod model;
mod render;
mod stopwatch;
mod theme;
mod util;

use anyhow::{Context, Result};
use crossterm::{
    event::{self},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::{
    io::{self},
    sync::mpsc::{self, Receiver, Sender},
    thread,
};
use tracing::{info, warn};

use crate::{
    config::AppConfig,
    events::{AppEvent, process_events},
    stopwatch::{StopwatchController, StopwatchDisplay, SystemClock},
    theme::Theme,
};

/// Application state.
struct App {
    pub config: AppConfig,

    pub theme: Theme,

    pub event_tx: Sender<AppEvent>,
    pub event_rx: Receiver<AppEvent>,

    pub stopwatch: StopwatchController,

    /// The stopwatch values as last published, kept up to date from
    /// [`AppEvent::Stopwatch`] signals.
    pub display: StopwatchDisplay,

    pub status: Option<String>,

    /// Whether runtime changes are written back to the configuration file.
    /// Off when the file failed to load and defaults are in use.
    pub persist_config: bool,
}

impl App {
    /// Create a new instance of application state.
    pub fn new(config: AppConfig, persist_config: bool) -> Result<Self> {
        let (event_tx, event_rx) = mpsc::channel();

        let stopwatch = StopwatchController::new(
            SystemClock,
            config.display_mode(),
            config.tick_interval(),
            event_tx.clone(),
        )?;

        Ok(Self {
            config,
            theme: Theme::default(),
            event_tx,
            event_rx,
            stopwatch,
            display: StopwatchDisplay::default(),
            status: None,
            persist_config,
        })
    }
}

/// The entry point of the application.
///
/// Loads the configuration, installs logging, manages the terminal lifecycle,
/// and returns an error if any part of the execution fails.
fn main() -> Result<()> {
    let loaded = config::load_config();
    let config = match &loaded {
        Ok(config) => config.clone(),
        Err(_) => AppConfig::default(),
    };

    let log_path = logging::init_logging(&config)?;
    info!(log = %log_path.display(), "splitwatch starting");

    let persist_config = match loaded {
        Ok(_) => true,
        Err(e) => {
            warn!(
                "using default configuration, changes will not be saved: {}",
                events::error_chain(e)
            );
            false
        }
    };

    let mut app = App::new(config, persist_config).context("Failed to initialise application")?;

    let mut terminal = setup_terminal(&app)?;
    let res = run(&mut terminal, &mut app);
    restore_terminal(&mut terminal);

    info!("splitwatch exiting");

    res.context("Application error occurred")
}

/// Prepares the terminal for the TUI application.
///
/// This function performs the following side effects:
/// * Sets the terminal background color based on the provided theme.
/// * Enables raw mode to capture all keyboard input.
/// * Switches the terminal to the alternate screen buffer.
///
/// # Errors
///
/// Returns an error if raw mode cannot be enabled or if the alternate screen
/// cannot be entered.
fn setup_terminal(app: &App) -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    let mut stdout = io::stdout();

    // Set the background of the entire terminal window, without this we'd get
    // a thin black outline
    if let Some(hex) = Theme::to_hex(app.theme.background_colour) {
        util::term::set_terminal_bg(&mut stdout, &hex)
            .context("Failed to set terminal background")?;
    }

    enable_raw_mode().context("Failed to enable raw mode")?;
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).context("Failed to create terminal")?;

    Ok(terminal)
}

/// Restores the terminal to its original state.
///
/// This reverses the changes made by [`setup_terminal`]. It is best-effort
/// and does not return a result, as it runs during cleanup.
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) {
    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    util::term::reset_terminal_bg(terminal.backend_mut()).ok();
    terminal.show_cursor().ok();
}

/// Starts the input thread and enters the main event loop.
///
/// There is no global tick: the screen is only redrawn in response to events,
/// and the stopwatch produces its own ticks while it runs.
///
/// # Errors
///
/// Returns an error if the event processing loop encounters an unrecoverable
/// application error.
fn run(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    // Spawn a thread to translate raw key events to application events.
    let tx_keys = app.event_tx.clone();
    thread::Builder::new()
        .name("input".to_string())
        .spawn(move || {
            loop {
                match event::read() {
                    Ok(event::Event::Key(key)) => {
                        if tx_keys.send(AppEvent::Key(key)).is_err() {
                            break;
                        }
                    }
                    Ok(_) => {}
                    Err(e) => {
                        let _ = tx_keys.send(AppEvent::Error(format!("Input error: {e}")));
                        break;
                    }
                }
            }
        })
        .context("Failed to spawn input thread")?;

    // Application event loop, process events until the user quits
    process_events(terminal, app)
}
