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

//! Keyboard bindings.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::{App, events::AppEvent};

/// Maps keyboard input to application events.
///
/// * **Space** / **s**: start or stop.
/// * **Enter** / **l** / **r**: lap or reset.
/// * **d**: toggle the time display format.
/// * **q** / **Esc** / **Ctrl-C**: quit.
///
/// # Errors
///
/// Returns an error if the event channel has been closed.
pub(super) fn process_key_event(app: &mut App, key: KeyEvent) -> Result<()> {
    if let Some(event) = key_action(key) {
        app.event_tx.send(event)?;
    }

    Ok(())
}

fn key_action(key: KeyEvent) -> Option<AppEvent> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    match (key.code, key.modifiers) {
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => Some(AppEvent::ExitApplication),
        (KeyCode::Char('q'), _) | (KeyCode::Esc, _) => Some(AppEvent::ExitApplication),

        (KeyCode::Char(' '), _) | (KeyCode::Char('s'), _) => Some(AppEvent::PrimaryAction),
        (KeyCode::Enter, _) | (KeyCode::Char('l'), _) | (KeyCode::Char('r'), _) => {
            Some(AppEvent::SecondaryAction)
        }

        (KeyCode::Char('d'), _) => Some(AppEvent::ToggleDisplayMode),

        _ => None,
    }
}
