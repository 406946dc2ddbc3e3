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

//! Periodic tick source for a running stopwatch.
//!
//! A [`Ticker`] owns a worker thread that posts [`AppEvent::StopwatchTick`]
//! onto the application event channel at a fixed interval. The worker sleeps
//! on a cancellation channel rather than a plain sleep, so dropping the handle
//! wakes it immediately and it exits without sending another tick.
//!
//! Each ticker carries an id. A tick may already be queued on the event
//! channel when its ticker is dropped, so consumers compare the id against the
//! ticker they currently hold and discard anything else.

use std::{
    sync::mpsc::{self, Receiver, RecvTimeoutError, Sender},
    thread,
    time::Duration,
};

use tracing::debug;

use crate::{events::AppEvent, stopwatch::StopwatchError};

/// Handle to a running tick worker. Dropping it cancels the worker.
#[derive(Debug)]
pub(crate) struct Ticker {
    id: u64,
    // Never sent on; the worker exits when this is dropped.
    _cancel_tx: Sender<()>,
}

impl Ticker {
    /// Spawns a worker sending `AppEvent::StopwatchTick(id)` every `interval`.
    ///
    /// # Errors
    ///
    /// Returns [`StopwatchError::TickerSpawn`] if the operating system refuses
    /// to create the worker thread.
    pub(crate) fn spawn(
        id: u64,
        interval: Duration,
        event_tx: Sender<AppEvent>,
    ) -> Result<Self, StopwatchError> {
        let (cancel_tx, cancel_rx) = mpsc::channel();

        thread::Builder::new()
            .name(format!("stopwatch-ticker-{id}"))
            .spawn(move || ticker_worker(id, interval, cancel_rx, event_tx))
            .map_err(StopwatchError::TickerSpawn)?;

        debug!(id, ?interval, "ticker started");

        Ok(Self {
            id,
            _cancel_tx: cancel_tx,
        })
    }

    pub(crate) fn id(&self) -> u64 {
        self.id
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        debug!(id = self.id, "ticker cancelled");
    }
}

fn ticker_worker(id: u64, interval: Duration, cancel_rx: Receiver<()>, event_tx: Sender<AppEvent>) {
    loop {
        match cancel_rx.recv_timeout(interval) {
            Err(RecvTimeoutError::Timeout) => {
                if event_tx.send(AppEvent::StopwatchTick(id)).is_err() {
                    break;
                }
            }
            Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
        }
    }
}
