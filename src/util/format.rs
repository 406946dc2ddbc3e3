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

//! Conversion of elapsed durations into display strings.

/// Largest duration shown in clock form, 1000 hours.
const MAX_CLOCK_SECONDS: f64 = 3_600_000.0;
const CLOCK_OVERFLOW: &str = "999:59:59";

const MAX_COMPACT_SECONDS: f64 = 999_999.0;
const COMPACT_OVERFLOW: &str = "999999.99";

/// How a duration is rendered.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) enum DisplayMode {
    /// `HH:MM:SS`, or `MM:SS.cc` while under an hour.
    #[default]
    Clock,
    /// Whole seconds with hundredths, e.g. `65.50`.
    Seconds,
}

impl DisplayMode {
    pub(crate) fn toggled(self) -> Self {
        match self {
            DisplayMode::Clock => DisplayMode::Seconds,
            DisplayMode::Seconds => DisplayMode::Clock,
        }
    }
}

/// Formats a duration in seconds for display.
///
/// Negative (or non-finite) input is shown as zero. Durations too large to
/// fit the chosen form are shown as a fixed overflow string.
///
/// Hundredths are only shown while the duration is under an hour; once whole
/// hours are present the clock form is plain `HH:MM:SS`.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(format_duration(65.5, DisplayMode::Clock), "01:05.50");
/// assert_eq!(format_duration(3661.25, DisplayMode::Clock), "01:01:01");
/// assert_eq!(format_duration(65.5, DisplayMode::Seconds), "65.50");
/// ```
pub(crate) fn format_duration(seconds: f64, mode: DisplayMode) -> String {
    let seconds = if seconds.is_finite() { seconds.max(0.0) } else { 0.0 };

    match mode {
        DisplayMode::Clock => format_clock(seconds),
        DisplayMode::Seconds => format_compact(seconds),
    }
}

fn format_clock(seconds: f64) -> String {
    if seconds > MAX_CLOCK_SECONDS {
        return CLOCK_OVERFLOW.to_string();
    }

    let (total, hundredths) = split_seconds(seconds);
    let hours = total / 3600;
    let mins = (total % 3600) / 60;
    let secs = total % 60;

    if hours > 0 {
        format!("{:02}:{:02}:{:02}", hours, mins, secs)
    } else {
        format!("{:02}:{:02}.{:02}", mins, secs, hundredths)
    }
}

fn format_compact(seconds: f64) -> String {
    if seconds > MAX_COMPACT_SECONDS {
        return COMPACT_OVERFLOW.to_string();
    }

    let (total, hundredths) = split_seconds(seconds);
    format!("{}.{:02}", total, hundredths)
}

// Whole seconds and truncated hundredths. Durations are measured in whole
// microseconds, so rounding back to microseconds first recovers the exact
// value before truncating.
fn split_seconds(seconds: f64) -> (u64, u64) {
    let micros = (seconds * 1_000_000.0).round() as u64;
    (micros / 1_000_000, (micros % 1_000_000) / 10_000)
}
