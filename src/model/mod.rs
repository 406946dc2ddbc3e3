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

//! Domain models and core data structures.
//!
//! A stopwatch session is recorded purely as the wall-clock instants of the
//! user's actions. Every displayed value (split time, lap time, lap count) is
//! derived from these recorded instants and the current time.

use chrono::{DateTime, Utc};

const DEFAULT_NAME: &str = "Name";

/// The recorded events of a single stopwatch session.
///
/// The sequences are only ever appended to with the current time, so each is
/// ordered by wall clock. The number of stops is never greater than the number
/// of starts, and there is at most one more start than there are stops.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct StopwatchState {
    pub(crate) start_times: Vec<DateTime<Utc>>,
    pub(crate) stop_times: Vec<DateTime<Utc>>,
    pub(crate) lap_times: Vec<DateTime<Utc>>,
    pub(crate) name: String,
}

impl Default for StopwatchState {
    fn default() -> Self {
        Self {
            start_times: Vec::new(),
            stop_times: Vec::new(),
            lap_times: Vec::new(),
            name: DEFAULT_NAME.to_string(),
        }
    }
}

/// Whether the stopwatch is accumulating time, derived from the recorded
/// events.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum RunningState {
    Empty,
    Running,
    Stopped,
}

impl StopwatchState {
    pub(crate) fn running_state(&self) -> RunningState {
        if self.start_times.is_empty() {
            RunningState::Empty
        } else if self.start_times.len() == self.stop_times.len() {
            RunningState::Stopped
        } else {
            RunningState::Running
        }
    }

    /// Clears all recorded events. The session name is kept.
    pub(crate) fn clear(&mut self) {
        self.start_times.clear();
        self.stop_times.clear();
        self.lap_times.clear();
    }

    #[cfg(test)]
    pub(crate) fn is_cleared(&self) -> bool {
        self.start_times.is_empty() && self.stop_times.is_empty() && self.lap_times.is_empty()
    }

    pub(crate) fn lap_count(&self) -> usize {
        self.lap_times.len()
    }
}
