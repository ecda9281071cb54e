//! Unified error types for Tally.
//!
//! No error here is fatal to the process: corrupt persisted data degrades
//! to "reset that key to its default state", unknown habit references are
//! no-ops at the call site, and collaborator failures (reminders, export)
//! surface as transient messages. The `Recover` trait captures the
//! log-and-substitute-default pattern used on load paths.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// The main error type for Tally operations.
#[derive(Error, Debug)]
pub enum TallyError {
    /// I/O errors from preference file operations.
    #[error("storage error at {path}: {source}")]
    Storage {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// JSON parsing/serialization errors for persisted keys.
    #[error("serialization error: {message}")]
    Serde { message: String },

    /// Configuration loading errors.
    #[error("config error: {message}")]
    Config { message: String },

    /// A habit with the same name (case-insensitive) already exists.
    #[error("habit already exists: {name}")]
    DuplicateHabit { name: String },

    /// A habit name that is empty after trimming.
    #[error("habit name cannot be empty")]
    EmptyHabitName,

    /// A date argument that is not a valid `YYYY-MM-DD` key.
    #[error("invalid date: {input}")]
    InvalidDate { input: String },

    /// Reminder scheduling collaborator failures.
    #[error("reminder error: {message}")]
    Reminder { message: String },

    /// Report export collaborator failures.
    #[error("export error: {message}")]
    Export { message: String },
}

/// A specialized Result type for Tally operations.
pub type Result<T> = std::result::Result<T, TallyError>;

impl TallyError {
    /// Create a storage error from an I/O error.
    pub fn storage(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Storage {
            path: path.into(),
            source,
        }
    }

    /// Create a serialization error.
    pub fn serde(message: impl Into<String>) -> Self {
        Self::Serde {
            message: message.into(),
        }
    }

    /// Create a config error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a duplicate-habit error.
    pub fn duplicate_habit(name: impl Into<String>) -> Self {
        Self::DuplicateHabit { name: name.into() }
    }

    /// Create an invalid-date error.
    pub fn invalid_date(input: impl Into<String>) -> Self {
        Self::InvalidDate {
            input: input.into(),
        }
    }

    /// Create a reminder error.
    pub fn reminder(message: impl Into<String>) -> Self {
        Self::Reminder {
            message: message.into(),
        }
    }

    /// Create an export error.
    pub fn export(message: impl Into<String>) -> Self {
        Self::Export {
            message: message.into(),
        }
    }
}

impl From<io::Error> for TallyError {
    fn from(err: io::Error) -> Self {
        Self::Storage {
            path: PathBuf::new(),
            source: err,
        }
    }
}

impl From<serde_json::Error> for TallyError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde {
            message: err.to_string(),
        }
    }
}

/// Trait for degrade-to-default error handling.
///
/// Load paths use this to honor the recovery contract for persisted state:
/// a malformed key is logged and replaced with that store's default, and
/// the rest of the application keeps working.
pub trait Recover<T> {
    /// Handle an error by logging a warning and returning the default value.
    fn recover_default(self, context: &str) -> T
    where
        T: Default;

    /// Handle an error by logging a warning and returning the provided fallback.
    fn recover_with(self, context: &str, fallback: T) -> T;
}

impl<T> Recover<T> for Result<T> {
    fn recover_default(self, context: &str) -> T
    where
        T: Default,
    {
        match self {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!("{}: {} (recovering with default)", context, err);
                T::default()
            }
        }
    }

    fn recover_with(self, context: &str, fallback: T) -> T {
        match self {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!("{}: {} (recovering with fallback)", context, err);
                fallback
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_error_display() {
        let err = TallyError::storage(
            "/tmp/prefs/habits_list_v1.json",
            io::Error::new(io::ErrorKind::NotFound, "file not found"),
        );
        assert!(err.to_string().contains("storage error"));
        assert!(err.to_string().contains("habits_list_v1"));
    }

    #[test]
    fn test_serde_error_display() {
        let err = TallyError::serde("invalid JSON");
        assert_eq!(err.to_string(), "serialization error: invalid JSON");
    }

    #[test]
    fn test_config_error_display() {
        let err = TallyError::config("invalid TOML");
        assert_eq!(err.to_string(), "config error: invalid TOML");
    }

    #[test]
    fn test_duplicate_habit_display() {
        let err = TallyError::duplicate_habit("Read");
        assert_eq!(err.to_string(), "habit already exists: Read");
    }

    #[test]
    fn test_invalid_date_display() {
        let err = TallyError::invalid_date("2024-13-99");
        assert_eq!(err.to_string(), "invalid date: 2024-13-99");
    }

    #[test]
    fn test_from_io_error() {
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "access denied");
        let err: TallyError = io_err.into();
        assert!(matches!(err, TallyError::Storage { .. }));
    }

    #[test]
    fn test_from_serde_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid").unwrap_err();
        let err: TallyError = json_err.into();
        assert!(matches!(err, TallyError::Serde { .. }));
    }

    #[test]
    fn test_recover_default() {
        let result: Result<Vec<String>> = Err(TallyError::serde("bad data"));
        let value = result.recover_default("loading habits");
        assert!(value.is_empty());
    }

    #[test]
    fn test_recover_with() {
        let result: Result<u32> = Err(TallyError::serde("bad data"));
        let value = result.recover_with("loading best streak", 3);
        assert_eq!(value, 3);
    }

    #[test]
    fn test_recover_success_passthrough() {
        let result: Result<u32> = Ok(7);
        assert_eq!(result.recover_default("context"), 7);
    }
}
