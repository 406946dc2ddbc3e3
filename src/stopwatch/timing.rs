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

//! Split and lap time arithmetic.
//!
//! Both values are pure functions of the recorded session and the time at
//! which they are sampled. Durations are in seconds and never negative, even
//! if the wall clock stepped backwards between two recorded events.

use chrono::{DateTime, Utc};

use crate::model::{RunningState, StopwatchState};

/// Seconds from `earlier` to `later`, clamped at zero.
pub(crate) fn elapsed(earlier: DateTime<Utc>, later: DateTime<Utc>) -> f64 {
    let micros = (later - earlier).num_microseconds().unwrap_or(0);
    (micros as f64 / 1_000_000.0).max(0.0)
}

/// Total running time since the last reset, excluding paused intervals.
///
/// Every completed start/stop pair contributes its length; if the stopwatch
/// is running the time since the most recent start is added on top.
pub(crate) fn split_time(state: &StopwatchState, now: DateTime<Utc>) -> f64 {
    let Some(&last_start) = state.start_times.last() else {
        return 0.0;
    };

    let completed: f64 = state
        .start_times
        .iter()
        .zip(&state.stop_times)
        .map(|(&start, &stop)| elapsed(start, stop))
        .sum();

    match state.running_state() {
        RunningState::Running => completed + elapsed(last_start, now),
        _ => completed,
    }
}

/// Running time of the current lap.
///
/// With no laps recorded this is the split time. Otherwise it counts from the
/// most recent lap marker, or from the most recent resume if that came after
/// the marker. While stopped the value is frozen at the stop instant.
///
/// A resume recorded at exactly the same instant as the lap marker counts
/// from the marker.
pub(crate) fn lap_time(state: &StopwatchState, now: DateTime<Utc>) -> f64 {
    let Some(&last_lap) = state.lap_times.last() else {
        return split_time(state, now);
    };
    let Some(&last_start) = state.start_times.last() else {
        return 0.0;
    };

    let now = match (state.running_state(), state.stop_times.last()) {
        (RunningState::Stopped, Some(&stopped_at)) => stopped_at,
        _ => now,
    };

    if last_start > last_lap {
        elapsed(last_start, now)
    } else {
        elapsed(last_lap, now)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};

    use super::*;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
    }

    fn state(starts: &[i64], stops: &[i64], laps: &[i64]) -> StopwatchState {
        StopwatchState {
            start_times: starts.iter().map(|&s| at(s)).collect(),
            stop_times: stops.iter().map(|&s| at(s)).collect(),
            lap_times: laps.iter().map(|&s| at(s)).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn empty_session_is_zero() {
        let s = state(&[], &[], &[]);
        assert_eq!(split_time(&s, at(100)), 0.0);
        assert_eq!(lap_time(&s, at(100)), 0.0);
    }

    #[test]
    fn running_without_stops() {
        let s = state(&[0], &[], &[]);
        assert_eq!(split_time(&s, at(5)), 5.0);
        assert_eq!(lap_time(&s, at(5)), 5.0);
    }

    #[test]
    fn sub_second_precision() {
        let s = state(&[0], &[], &[]);
        let now = at(1) + Duration::milliseconds(250);
        assert_eq!(split_time(&s, now), 1.25);
    }

    #[test]
    fn split_accumulates_across_pauses() {
        let s = state(&[0, 10], &[5], &[]);
        assert_eq!(split_time(&s, at(12)), 7.0);

        let s = state(&[0, 10, 20], &[5, 15], &[]);
        assert_eq!(split_time(&s, at(21)), 11.0);
    }

    #[test]
    fn split_frozen_while_stopped() {
        let s = state(&[0, 10], &[5, 12], &[]);
        assert_eq!(split_time(&s, at(12)), 7.0);
        assert_eq!(split_time(&s, at(1000)), 7.0);
    }

    #[test]
    fn lap_counts_from_last_marker() {
        let s = state(&[0], &[], &[3]);
        assert_eq!(lap_time(&s, at(5)), 2.0);
        assert_eq!(split_time(&s, at(5)), 5.0);
    }

    #[test]
    fn lap_restarts_at_resume() {
        let s = state(&[0, 10], &[5], &[3]);
        assert_eq!(lap_time(&s, at(12)), 2.0);
    }

    #[test]
    fn lap_frozen_at_stop() {
        let s = state(&[0], &[5], &[3]);
        assert_eq!(lap_time(&s, at(50)), 2.0);

        // Resumed after the lap and stopped again: counts from the resume
        // up to the latest stop.
        let s = state(&[0, 10], &[5, 14], &[3]);
        assert_eq!(lap_time(&s, at(50)), 4.0);
    }

    #[test]
    fn lap_and_resume_at_same_instant_counts_from_lap() {
        let s = state(&[0, 10], &[10], &[10]);
        assert_eq!(lap_time(&s, at(15)), 5.0);
    }

    #[test]
    fn backwards_clock_clamps_to_zero() {
        let s = state(&[10], &[], &[]);
        assert_eq!(split_time(&s, at(4)), 0.0);

        let s = state(&[10, 20], &[5], &[]);
        assert_eq!(split_time(&s, at(22)), 2.0);

        let s = state(&[0], &[], &[8]);
        assert_eq!(lap_time(&s, at(6)), 0.0);
    }
}
