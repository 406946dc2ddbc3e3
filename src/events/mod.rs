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

//! Application events and the main event loop.
//!
//! Everything that changes application state arrives as an [`AppEvent`] on a
//! single channel and is handled on the main thread:
//!
//! * Key presses, forwarded by the input thread.
//! * Stopwatch ticks, sent by the active ticker while the stopwatch runs.
//! * Published stopwatch values, sent by the controller after each action or
//!   tick.
//!
//! Handling everything on one thread means the stopwatch state is never
//! mutated concurrently.

mod handlers;
mod key_handlers;

use handlers::*;
pub(crate) use handlers::error_chain;
use key_handlers::process_key_event;

use std::io::Stdout;

use anyhow::Result;
use crossterm::event::KeyEvent;
use ratatui::{Terminal, prelude::CrosstermBackend};

use crate::{App, render::draw, stopwatch::StopwatchSignal};

#[derive(Debug)]
pub(crate) enum AppEvent {
    Key(KeyEvent),

    PrimaryAction,
    SecondaryAction,
    ToggleDisplayMode,

    StopwatchTick(u64),
    Stopwatch(StopwatchSignal),

    ExitApplication,

    Error(String),
}

/// Runs the main application loop, handling events and rendering the UI in the
/// terminal.
///
/// This function loops until a 'quit' event is received or the event channel
/// is closed.
pub(crate) fn process_events(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
) -> Result<()> {
    terminal.draw(|f| draw(f, app))?;

    while let Ok(event) = app.event_rx.recv() {
        if matches!(event, AppEvent::ExitApplication) {
            break;
        }

        let redraw = handle_event(app, event)?;

        if redraw {
            terminal.draw(|f| draw(f, app))?;
        }
    }
    Ok(())
}

/// Applies a single event to the application state, returning whether the
/// screen needs redrawing.
pub(crate) fn handle_event(app: &mut App, event: AppEvent) -> Result<bool> {
    match event {
        AppEvent::Key(key) => process_key_event(app, key)?,
        AppEvent::PrimaryAction => handle_primary_action(app)?,
        AppEvent::SecondaryAction => handle_secondary_action(app)?,
        AppEvent::ToggleDisplayMode => handle_toggle_display_mode(app)?,
        // A tick only produces signals; the redraw happens when they arrive.
        AppEvent::StopwatchTick(id) => {
            handle_stopwatch_tick(app, id)?;
            return Ok(false);
        }
        AppEvent::Stopwatch(signal) => handle_stopwatch_signal(app, signal),
        AppEvent::Error(message) => handle_error(app, message),
        AppEvent::ExitApplication => {}
    }

    Ok(true)
}
