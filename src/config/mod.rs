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

//! Application configuration.
//!
//! This module manages the application configuration file.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::util::format::DisplayMode;

const CONFIG_NAME: &str = "splitwatch";

pub(crate) const DEFAULT_TICK_INTERVAL_MS: u64 = 80;
pub(crate) const MIN_TICK_INTERVAL_MS: u64 = 10;
pub(crate) const MAX_TICK_INTERVAL_MS: u64 = 100;

pub(crate) const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("failed to load configuration")]
    Load(#[source] confy::ConfyError),

    #[error("failed to store configuration")]
    Store(#[source] confy::ConfyError),

    #[error("tick interval of {interval_ms}ms is outside {min_ms}..={max_ms}ms")]
    TickInterval {
        interval_ms: u64,
        min_ms: u64,
        max_ms: u64,
    },
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub(crate) struct AppConfig {
    pub(crate) version: u32,
    pub(crate) tick_interval_ms: u64,
    pub(crate) display_in_seconds: bool,
    pub(crate) log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: 1,
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            display_in_seconds: false,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl AppConfig {
    pub(crate) fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub(crate) fn display_mode(&self) -> DisplayMode {
        if self.display_in_seconds {
            DisplayMode::Seconds
        } else {
            DisplayMode::Clock
        }
    }

    pub(crate) fn set_display_mode(&mut self, mode: DisplayMode) {
        self.display_in_seconds = matches!(mode, DisplayMode::Seconds);
    }

    /// Checks values that the rest of the application relies on.
    pub(crate) fn validate(self) -> Result<Self, ConfigError> {
        if !(MIN_TICK_INTERVAL_MS..=MAX_TICK_INTERVAL_MS).contains(&self.tick_interval_ms) {
            return Err(ConfigError::TickInterval {
                interval_ms: self.tick_interval_ms,
                min_ms: MIN_TICK_INTERVAL_MS,
                max_ms: MAX_TICK_INTERVAL_MS,
            });
        }

        Ok(self)
    }
}

/// Loads the configuration file, creating it with defaults if missing.
pub(crate) fn load_config() -> Result<AppConfig, ConfigError> {
    let cfg: AppConfig = confy::load(CONFIG_NAME, None).map_err(ConfigError::Load)?;
    cfg.validate()
}

pub(crate) fn save_config(cfg: &AppConfig) -> Result<(), ConfigError> {
    confy::store(CONFIG_NAME, None, cfg).map_err(ConfigError::Store)
}
