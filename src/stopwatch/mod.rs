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

//! The stopwatch state machine.
//!
//! [`StopwatchController`] owns the recorded [`StopwatchState`] and exposes
//! the two user actions. The meaning of each action depends on whether the
//! stopwatch is running:
//!
//! | State           | Primary | Secondary |
//! |-----------------|---------|-----------|
//! | Empty / Stopped | START   | RESET     |
//! | Running         | STOP    | LAP       |
//!
//! The controller never renders anything. After every action, and on every
//! tick while running, it recomputes the displayed values and publishes those
//! that changed as [`StopwatchSignal`]s on the application event channel.

pub(crate) mod ticker;
pub(crate) mod timing;

use std::{fmt, sync::mpsc::Sender, time::Duration};

use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::{debug, info, trace};

use crate::{
    events::AppEvent,
    model::{RunningState, StopwatchState},
    stopwatch::ticker::Ticker,
    util::format::{DisplayMode, format_duration},
};

/// Source of wall-clock time for the stopwatch.
pub(crate) trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// The system real-time clock.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[derive(Debug, Error)]
pub(crate) enum StopwatchError {
    #[error("stopwatch listener has disconnected")]
    Disconnected,

    #[error("failed to spawn stopwatch ticker thread")]
    TickerSpawn(#[source] std::io::Error),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ButtonLabel {
    Start,
    Stop,
    Lap,
    Reset,
}

impl ButtonLabel {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            ButtonLabel::Start => "START",
            ButtonLabel::Stop => "STOP",
            ButtonLabel::Lap => "LAP",
            ButtonLabel::Reset => "RESET",
        }
    }
}

impl fmt::Display for ButtonLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Primary and secondary button labels for a running state.
pub(crate) fn button_labels(state: RunningState) -> (ButtonLabel, ButtonLabel) {
    match state {
        RunningState::Empty | RunningState::Stopped => (ButtonLabel::Start, ButtonLabel::Reset),
        RunningState::Running => (ButtonLabel::Stop, ButtonLabel::Lap),
    }
}

/// A single published value change.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum StopwatchSignal {
    SplitTime(String),
    LapTime(String),
    LapNumber(String),
    PrimaryLabel(ButtonLabel),
    SecondaryLabel(ButtonLabel),
}

/// The full set of displayed values.
///
/// The controller keeps the last published copy to work out which signals to
/// send; the view keeps its own copy and folds incoming signals into it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct StopwatchDisplay {
    pub(crate) split_time: String,
    pub(crate) lap_time: String,
    pub(crate) lap_number: String,
    pub(crate) primary_label: ButtonLabel,
    pub(crate) secondary_label: ButtonLabel,
}

impl Default for StopwatchDisplay {
    fn default() -> Self {
        let zero = format_duration(0.0, DisplayMode::default());
        let (primary_label, secondary_label) = button_labels(RunningState::Empty);
        Self {
            split_time: zero.clone(),
            lap_time: zero,
            lap_number: "0".to_string(),
            primary_label,
            secondary_label,
        }
    }
}

impl StopwatchDisplay {
    pub(crate) fn apply(&mut self, signal: StopwatchSignal) {
        match signal {
            StopwatchSignal::SplitTime(s) => self.split_time = s,
            StopwatchSignal::LapTime(s) => self.lap_time = s,
            StopwatchSignal::LapNumber(s) => self.lap_number = s,
            StopwatchSignal::PrimaryLabel(label) => self.primary_label = label,
            StopwatchSignal::SecondaryLabel(label) => self.secondary_label = label,
        }
    }

    // Signals needed to turn `previous` into `self`, everything if there is
    // no previous.
    fn changes_since(&self, previous: Option<&StopwatchDisplay>) -> Vec<StopwatchSignal> {
        let mut signals = Vec::new();

        if previous.is_none_or(|p| p.split_time != self.split_time) {
            signals.push(StopwatchSignal::SplitTime(self.split_time.clone()));
        }
        if previous.is_none_or(|p| p.lap_time != self.lap_time) {
            signals.push(StopwatchSignal::LapTime(self.lap_time.clone()));
        }
        if previous.is_none_or(|p| p.lap_number != self.lap_number) {
            signals.push(StopwatchSignal::LapNumber(self.lap_number.clone()));
        }
        if previous.is_none_or(|p| p.primary_label != self.primary_label) {
            signals.push(StopwatchSignal::PrimaryLabel(self.primary_label));
        }
        if previous.is_none_or(|p| p.secondary_label != self.secondary_label) {
            signals.push(StopwatchSignal::SecondaryLabel(self.secondary_label));
        }

        signals
    }
}

/// Owns one stopwatch session and drives its ticking.
pub(crate) struct StopwatchController<C: Clock = SystemClock> {
    state: StopwatchState,
    clock: C,
    display_mode: DisplayMode,
    tick_interval: Duration,
    event_tx: Sender<AppEvent>,
    ticker: Option<Ticker>,
    next_ticker_id: u64,
    published: Option<StopwatchDisplay>,
}

impl<C: Clock> StopwatchController<C> {
    /// Creates an empty stopwatch and publishes its initial values.
    ///
    /// # Arguments
    ///
    /// * `clock` - Source of the current time.
    /// * `display_mode` - How split and lap times are formatted.
    /// * `tick_interval` - Refresh period while running.
    /// * `event_tx` - Channel on which signals and ticks are published.
    pub(crate) fn new(
        clock: C,
        display_mode: DisplayMode,
        tick_interval: Duration,
        event_tx: Sender<AppEvent>,
    ) -> Result<Self, StopwatchError> {
        let mut controller = Self {
            state: StopwatchState::default(),
            clock,
            display_mode,
            tick_interval,
            event_tx,
            ticker: None,
            next_ticker_id: 0,
            published: None,
        };

        let now = controller.clock.now();
        controller.publish(now)?;

        Ok(controller)
    }

    pub(crate) fn running_state(&self) -> RunningState {
        self.state.running_state()
    }

    pub(crate) fn name(&self) -> &str {
        &self.state.name
    }

    pub(crate) fn display_mode(&self) -> DisplayMode {
        self.display_mode
    }

    /// Id of the ticker whose ticks are currently accepted.
    pub(crate) fn active_ticker_id(&self) -> Option<u64> {
        self.ticker.as_ref().map(Ticker::id)
    }

    /// START when empty or stopped, STOP when running.
    pub(crate) fn on_primary(&mut self) -> Result<(), StopwatchError> {
        let now = self.clock.now();

        match self.state.running_state() {
            RunningState::Empty | RunningState::Stopped => {
                self.state.start_times.push(now);
                info!(resumed = self.state.start_times.len() > 1, "stopwatch started");
            }
            RunningState::Running => {
                self.state.stop_times.push(now);
                info!(
                    split = timing::split_time(&self.state, now),
                    "stopwatch stopped"
                );
            }
        }

        self.after_action(now)
    }

    /// RESET when empty or stopped, LAP when running.
    pub(crate) fn on_secondary(&mut self) -> Result<(), StopwatchError> {
        let now = self.clock.now();

        match self.state.running_state() {
            RunningState::Empty | RunningState::Stopped => {
                self.state.clear();
                info!("stopwatch reset");
            }
            RunningState::Running => {
                self.state.lap_times.push(now);
                debug!(lap = self.state.lap_count(), "lap recorded");
            }
        }

        self.after_action(now)
    }

    /// Refreshes the displayed values for a tick from ticker `id`.
    ///
    /// Ticks from a cancelled ticker are ignored.
    pub(crate) fn on_tick(&mut self, id: u64) -> Result<(), StopwatchError> {
        if self.active_ticker_id() != Some(id) {
            trace!(id, "ignoring stale tick");
            return Ok(());
        }

        let now = self.clock.now();
        self.publish(now)
    }

    /// Switches the time format and republishes immediately.
    pub(crate) fn set_display_mode(&mut self, mode: DisplayMode) -> Result<(), StopwatchError> {
        self.display_mode = mode;
        let now = self.clock.now();
        self.publish(now)
    }

    /// The values that would be displayed at `now`.
    pub(crate) fn snapshot(&self, now: DateTime<Utc>) -> StopwatchDisplay {
        let (primary_label, secondary_label) = button_labels(self.state.running_state());

        StopwatchDisplay {
            split_time: format_duration(timing::split_time(&self.state, now), self.display_mode),
            lap_time: format_duration(timing::lap_time(&self.state, now), self.display_mode),
            lap_number: self.state.lap_count().to_string(),
            primary_label,
            secondary_label,
        }
    }

    fn after_action(&mut self, now: DateTime<Utc>) -> Result<(), StopwatchError> {
        match self.state.running_state() {
            RunningState::Running => {
                if self.ticker.is_none() {
                    self.start_ticking()?;
                }
            }
            RunningState::Empty | RunningState::Stopped => self.ticker = None,
        }

        self.publish(now)
    }

    fn start_ticking(&mut self) -> Result<(), StopwatchError> {
        self.ticker = None;

        self.next_ticker_id += 1;
        let ticker = Ticker::spawn(self.next_ticker_id, self.tick_interval, self.event_tx.clone())?;
        self.ticker = Some(ticker);

        Ok(())
    }

    fn publish(&mut self, now: DateTime<Utc>) -> Result<(), StopwatchError> {
        let next = self.snapshot(now);

        for signal in next.changes_since(self.published.as_ref()) {
            self.event_tx
                .send(AppEvent::Stopwatch(signal))
                .map_err(|_| StopwatchError::Disconnected)?;
        }

        self.published = Some(next);
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn state(&self) -> &StopwatchState {
        &self.state
    }
}

#[cfg(test)]
mod tests {
    use std::{
        cell::Cell,
        rc::Rc,
        sync::mpsc::{self, Receiver},
    };

    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    use super::*;

    /// A clock that only moves when told to.
    #[derive(Clone)]
    struct ManualClock(Rc<Cell<DateTime<Utc>>>);

    impl ManualClock {
        fn new() -> Self {
            Self(Rc::new(Cell::new(Utc.timestamp_opt(1_700_000_000, 0).unwrap())))
        }

        fn advance_millis(&self, millis: i64) {
            self.0.set(self.0.get() + chrono::Duration::milliseconds(millis));
        }

        fn advance(&self, secs: i64) {
            self.advance_millis(secs * 1000);
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> DateTime<Utc> {
            self.0.get()
        }
    }

    // Long enough that no real tick arrives during a test.
    const TEST_INTERVAL: Duration = Duration::from_secs(3600);

    fn fixture() -> (StopwatchController<ManualClock>, ManualClock, Receiver<AppEvent>) {
        let clock = ManualClock::new();
        let (event_tx, event_rx) = mpsc::channel();
        let controller =
            StopwatchController::new(clock.clone(), DisplayMode::Clock, TEST_INTERVAL, event_tx)
                .unwrap();
        (controller, clock, event_rx)
    }

    fn drain(event_rx: &Receiver<AppEvent>) -> Vec<StopwatchSignal> {
        event_rx
            .try_iter()
            .filter_map(|event| match event {
                AppEvent::Stopwatch(signal) => Some(signal),
                _ => None,
            })
            .collect()
    }

    fn tick(controller: &mut StopwatchController<ManualClock>) {
        let id = controller.active_ticker_id().expect("ticker should be running");
        controller.on_tick(id).unwrap();
    }

    fn display(controller: &StopwatchController<ManualClock>, clock: &ManualClock) -> StopwatchDisplay {
        controller.snapshot(clock.now())
    }

    fn assert_sequence_invariant(state: &StopwatchState) {
        assert!(state.stop_times.len() <= state.start_times.len());
        assert!(state.start_times.len() <= state.stop_times.len() + 1);
    }

    #[test]
    fn publishes_initial_values() {
        let (_controller, _clock, event_rx) = fixture();

        assert_eq!(
            drain(&event_rx),
            vec![
                StopwatchSignal::SplitTime("00:00.00".to_string()),
                StopwatchSignal::LapTime("00:00.00".to_string()),
                StopwatchSignal::LapNumber("0".to_string()),
                StopwatchSignal::PrimaryLabel(ButtonLabel::Start),
                StopwatchSignal::SecondaryLabel(ButtonLabel::Reset),
            ]
        );
    }

    #[test]
    fn labels_follow_running_state() {
        let (mut controller, clock, event_rx) = fixture();
        drain(&event_rx);

        controller.on_primary().unwrap();
        assert_eq!(
            drain(&event_rx),
            vec![
                StopwatchSignal::PrimaryLabel(ButtonLabel::Stop),
                StopwatchSignal::SecondaryLabel(ButtonLabel::Lap),
            ]
        );

        clock.advance(1);
        controller.on_primary().unwrap();
        let signals = drain(&event_rx);
        assert!(signals.contains(&StopwatchSignal::PrimaryLabel(ButtonLabel::Start)));
        assert!(signals.contains(&StopwatchSignal::SecondaryLabel(ButtonLabel::Reset)));
    }

    #[test]
    fn button_label_text() {
        let labels: Vec<String> = [ButtonLabel::Start, ButtonLabel::Stop, ButtonLabel::Lap, ButtonLabel::Reset]
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(labels, vec!["START", "STOP", "LAP", "RESET"]);
    }

    #[test]
    fn only_changed_values_are_published() {
        let (mut controller, _clock, event_rx) = fixture();
        controller.on_primary().unwrap();
        drain(&event_rx);

        tick(&mut controller);

        assert_eq!(drain(&event_rx), vec![]);
    }

    #[test]
    fn scenario_split_without_laps() {
        let (mut controller, clock, event_rx) = fixture();

        controller.on_primary().unwrap();
        clock.advance(5);
        tick(&mut controller);

        let mut view = StopwatchDisplay::default();
        for signal in drain(&event_rx) {
            view.apply(signal);
        }

        assert_eq!(view.split_time, "00:05.00");
        assert_eq!(view.lap_time, view.split_time);
        assert_eq!(view.lap_number, "0");
        assert_eq!(view.primary_label, ButtonLabel::Stop);
    }

    #[test]
    fn scenario_lap_while_running() {
        let (mut controller, clock, _event_rx) = fixture();

        controller.on_primary().unwrap();
        clock.advance(3);
        controller.on_secondary().unwrap();
        clock.advance(2);
        tick(&mut controller);

        let view = display(&controller, &clock);
        assert_eq!(view.lap_time, "00:02.00");
        assert_eq!(view.split_time, "00:05.00");
        assert_eq!(view.lap_number, "1");
    }

    #[test]
    fn scenario_pause_excluded_from_split() {
        let (mut controller, clock, _event_rx) = fixture();

        controller.on_primary().unwrap();
        clock.advance(5);
        controller.on_primary().unwrap();
        clock.advance(5);
        controller.on_primary().unwrap();
        clock.advance(2);
        tick(&mut controller);

        assert_eq!(display(&controller, &clock).split_time, "00:07.00");
    }

    #[test]
    fn scenario_lap_restarts_at_resume() {
        let (mut controller, clock, _event_rx) = fixture();

        controller.on_primary().unwrap();
        clock.advance(3);
        controller.on_secondary().unwrap();
        clock.advance(2);
        controller.on_primary().unwrap();
        clock.advance(5);
        controller.on_primary().unwrap();
        clock.advance(2);
        tick(&mut controller);

        let view = display(&controller, &clock);
        assert_eq!(view.lap_time, "00:02.00");
        assert_eq!(view.split_time, "00:07.00");
        assert_eq!(view.lap_number, "1");
    }

    #[test]
    fn split_is_monotonic_while_running_and_frozen_while_stopped() {
        let (mut controller, clock, _event_rx) = fixture();
        controller.on_primary().unwrap();

        let mut last = 0.0;
        for _ in 0..20 {
            clock.advance_millis(80);
            let split = timing::split_time(controller.state(), clock.now());
            assert!(split >= last);
            last = split;
        }

        controller.on_primary().unwrap();
        let stopped = display(&controller, &clock);
        clock.advance(30);
        assert_eq!(display(&controller, &clock), stopped);
    }

    #[test]
    fn split_sums_run_segments() {
        let (mut controller, clock, _event_rx) = fixture();

        for segment in [4, 7, 1] {
            controller.on_primary().unwrap();
            clock.advance(segment);
            controller.on_primary().unwrap();
            clock.advance(100);
        }

        assert_eq!(timing::split_time(controller.state(), clock.now()), 12.0);
    }

    #[test]
    fn reset_is_idempotent() {
        let (mut controller, clock, _event_rx) = fixture();

        controller.on_primary().unwrap();
        for _ in 0..4 {
            clock.advance(1);
            controller.on_secondary().unwrap();
        }
        controller.on_primary().unwrap();

        controller.on_secondary().unwrap();
        assert!(controller.state().is_cleared());
        assert_eq!(controller.running_state(), RunningState::Empty);

        controller.on_secondary().unwrap();
        assert!(controller.state().is_cleared());
        assert_eq!(display(&controller, &clock), StopwatchDisplay::default());
    }

    #[test]
    fn sequence_invariant_holds_for_every_action_order() {
        const LENGTH: u32 = 8;

        for pattern in 0..(1u32 << LENGTH) {
            let (mut controller, clock, _event_rx) = fixture();

            for step in 0..LENGTH {
                clock.advance_millis(250);
                if pattern & (1 << step) == 0 {
                    controller.on_primary().unwrap();
                } else {
                    controller.on_secondary().unwrap();
                }

                assert_sequence_invariant(controller.state());
                assert_eq!(
                    controller.active_ticker_id().is_some(),
                    controller.running_state() == RunningState::Running
                );
            }
        }
    }

    #[test]
    fn ticking_follows_running_state() {
        let (mut controller, clock, _event_rx) = fixture();
        assert_eq!(controller.active_ticker_id(), None);

        controller.on_primary().unwrap();
        let first = controller.active_ticker_id();
        assert!(first.is_some());

        clock.advance(1);
        controller.on_secondary().unwrap();
        assert_eq!(controller.active_ticker_id(), first);

        controller.on_primary().unwrap();
        assert_eq!(controller.active_ticker_id(), None);

        controller.on_primary().unwrap();
        let second = controller.active_ticker_id();
        assert!(second.is_some());
        assert_ne!(second, first);
    }

    #[test]
    fn stale_ticks_are_ignored() {
        let (mut controller, clock, event_rx) = fixture();

        controller.on_primary().unwrap();
        let stale = controller.active_ticker_id().unwrap();
        controller.on_primary().unwrap();
        controller.on_primary().unwrap();
        drain(&event_rx);

        clock.advance(5);
        controller.on_tick(stale).unwrap();
        assert_eq!(drain(&event_rx), vec![]);

        tick(&mut controller);
        assert!(!drain(&event_rx).is_empty());
    }

    #[test]
    fn split_shows_exact_hundredths() {
        for (millis, clock_form, seconds_form) in [
            (290, "00:00.29", "0.29"),
            (570, "00:00.57", "0.57"),
            (1_150, "00:01.15", "1.15"),
            (65_570, "01:05.57", "65.57"),
        ] {
            let (mut controller, clock, _event_rx) = fixture();
            controller.on_primary().unwrap();
            clock.advance_millis(millis);
            controller.on_primary().unwrap();

            assert_eq!(display(&controller, &clock).split_time, clock_form);

            controller.set_display_mode(DisplayMode::Seconds).unwrap();
            assert_eq!(display(&controller, &clock).split_time, seconds_form);
        }
    }

    #[test]
    fn display_mode_change_republishes() {
        let (mut controller, clock, event_rx) = fixture();
        controller.on_primary().unwrap();
        clock.advance_millis(65_500);
        controller.on_primary().unwrap();
        drain(&event_rx);

        controller.set_display_mode(DisplayMode::Seconds).unwrap();

        assert_eq!(controller.display_mode(), DisplayMode::Seconds);
        assert_eq!(
            drain(&event_rx),
            vec![
                StopwatchSignal::SplitTime("65.50".to_string()),
                StopwatchSignal::LapTime("65.50".to_string()),
            ]
        );
    }

    #[test]
    fn disconnected_listener_is_reported() {
        let (mut controller, _clock, event_rx) = fixture();
        drop(event_rx);

        assert!(matches!(
            controller.on_primary(),
            Err(StopwatchError::Disconnected)
        ));
    }

    #[test]
    fn session_name_survives_reset() {
        let (mut controller, _clock, _event_rx) = fixture();
        controller.on_secondary().unwrap();
        assert_eq!(controller.name(), "Name");
    }
}
