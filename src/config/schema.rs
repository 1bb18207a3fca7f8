//! Configuration schema for graviton-history
//!
//! Configuration is stored at `~/.config/graviton/config.toml`

use crate::history::HistoryOptions;
use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General settings
    pub general: GeneralConfig,

    /// History cache settings
    pub history: HistoryConfig,
}

/// General application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log format: "text" or "json"
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_format: "text".to_string(),
        }
    }
}

/// History cache configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Maximum number of remembered resolutions
    pub max_size: usize,

    /// Hours after which a cached resolution is re-resolved
    pub refresh_interval_hours: u32,

    /// Directory holding the history file (defaults to the OS cache dir)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_dir: Option<PathBuf>,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            max_size: crate::history::DEFAULT_MAX_SIZE,
            refresh_interval_hours: 24,
            cache_dir: None,
        }
    }
}

impl Config {
    /// Check values that parse fine but make no sense.
    ///
    /// Returns the reason for the first problem found.
    pub fn validate(&self) -> Result<(), String> {
        if self.history.max_size == 0 {
            return Err("history.max_size must be at least 1".to_string());
        }
        if self.history.refresh_interval_hours == 0 {
            return Err("history.refresh_interval_hours must be at least 1".to_string());
        }
        match self.general.log_format.as_str() {
            "text" | "json" => Ok(()),
            other => Err(format!(
                "general.log_format must be \"text\" or \"json\", got \"{}\"",
                other
            )),
        }
    }

    /// Store options derived from this configuration
    pub fn history_options(&self) -> HistoryOptions {
        HistoryOptions::default()
            .with_max_size(self.history.max_size)
            .with_refresh_interval(Duration::hours(i64::from(
                self.history.refresh_interval_hours,
            )))
    }
}
