//! Configuration loading for Tally.
//!
//! Configuration follows a precedence chain:
//! 1. Environment variables (highest priority)
//! 2. User config (`~/.tally/config.toml`)
//! 3. Defaults (lowest priority)
//!
//! All configuration is optional. The system runs with sensible defaults
//! when no config exists.

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Recover, Result, TallyError};

/// Main configuration struct for Tally.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Starter content seeded on first run.
    pub defaults: DefaultsConfig,
    /// History view configuration.
    pub history: HistoryConfig,
    /// Reminder configuration.
    pub reminder: ReminderConfig,
}

/// Starter content seeded on first run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DefaultsConfig {
    /// Habit names created when no habit list has ever been persisted.
    pub starter_habits: Vec<String>,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            starter_habits: vec![
                "Drink water".to_string(),
                "Workout".to_string(),
                "Read".to_string(),
                "Sleep early".to_string(),
            ],
        }
    }
}

/// History view configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct HistoryConfig {
    /// Default trailing range (in days) for the history view.
    pub default_range_days: u32,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            default_range_days: 14,
        }
    }
}

/// Reminder configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ReminderConfig {
    /// Default reminder time ("HH:MM") used when none has been saved.
    pub default_time: String,
}

impl Default for ReminderConfig {
    fn default() -> Self {
        Self {
            default_time: "20:00".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from the default location.
    ///
    /// Reads `<tally home>/config.toml` if present; a missing file yields
    /// defaults, a malformed file is discarded with a warning (never fatal).
    pub fn load() -> Self {
        match tally_home() {
            Some(home) => Self::load_from(&home.join("config.toml")),
            None => Self::default(),
        }
    }

    /// Load configuration from a specific path.
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        read_config_file(path).recover_default("loading config")
    }
}

fn read_config_file(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path).map_err(|e| TallyError::storage(path, e))?;
    toml::from_str(&content).map_err(|e| TallyError::config(e.to_string()))
}

/// Resolve the Tally home directory.
///
/// Checks the `TALLY_HOME` environment variable first, then falls back to
/// `~/.tally`. Returns `None` only when no home directory can be determined.
pub fn tally_home() -> Option<PathBuf> {
    if let Ok(home) = env::var("TALLY_HOME") {
        if home.is_empty() {
            tracing::warn!("TALLY_HOME is empty, using default");
        } else {
            return Some(PathBuf::from(home));
        }
    }

    dirs::home_dir().map(|home| home.join(".tally"))
}

/// Directory holding the persisted preference keys.
pub fn prefs_dir() -> Option<PathBuf> {
    tally_home().map(|home| home.join("prefs"))
}
