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

use anyhow::{Context, Result};
use tracing::{error, info};

use crate::{App, config, events::AppEvent, stopwatch::StopwatchSignal};

pub(super) fn handle_primary_action(app: &mut App) -> Result<()> {
    app.status = None;
    app.stopwatch
        .on_primary()
        .context("Failed to handle start/stop")?;

    Ok(())
}

pub(super) fn handle_secondary_action(app: &mut App) -> Result<()> {
    app.status = None;
    app.stopwatch
        .on_secondary()
        .context("Failed to handle lap/reset")?;

    Ok(())
}

pub(super) fn handle_stopwatch_tick(app: &mut App, id: u64) -> Result<()> {
    app.stopwatch
        .on_tick(id)
        .context("Failed to refresh stopwatch")?;

    Ok(())
}

pub(super) fn handle_stopwatch_signal(app: &mut App, signal: StopwatchSignal) {
    app.display.apply(signal);
}

/// Switches between clock and seconds display and remembers the choice.
///
/// The choice is only saved if the configuration file loaded cleanly, so a
/// file the user still has to fix is never replaced with defaults. Failing to
/// save is reported on the status line but does not undo the switch.
pub(super) fn handle_toggle_display_mode(app: &mut App) -> Result<()> {
    let mode = app.stopwatch.display_mode().toggled();
    app.stopwatch
        .set_display_mode(mode)
        .context("Failed to change display mode")?;
    info!(?mode, "display mode changed");

    app.config.set_display_mode(mode);
    if app.persist_config {
        if let Err(e) = config::save_config(&app.config) {
            app.event_tx.send(AppEvent::Error(error_chain(e)))?;
        }
    }

    Ok(())
}

/// Formats an error with all of its sources, e.g. `outer: inner`.
pub(crate) fn error_chain<E>(e: E) -> String
where
    E: std::error::Error + Send + Sync + 'static,
{
    format!("{:#}", anyhow::Error::from(e))
}

pub(super) fn handle_error(app: &mut App, message: String) {
    error!(%message, "application error");
    app.status = Some(message);
}

#[cfg(test)]
mod tests {
    use std::io;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::stopwatch::StopwatchError;

    #[test]
    fn error_chain_includes_sources() {
        let e = StopwatchError::TickerSpawn(io::Error::other("no threads left"));
        assert_eq!(
            error_chain(e),
            "failed to spawn stopwatch ticker thread: no threads left"
        );
    }
}
