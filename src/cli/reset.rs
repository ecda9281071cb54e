//! Reset command: clear today's checkmarks for every habit.

use serde::Serialize;

use crate::config::Config;
use crate::core::dates::date_key;
use crate::core::HabitEngine;
use crate::storage::PrefStore;

/// Options for the reset command.
#[derive(Debug, Clone, Default)]
pub struct ResetOptions {
    /// Output as JSON.
    pub json: bool,
    /// Suppress output.
    pub quiet: bool,
}

/// Output format for the reset command.
#[derive(Debug, Clone, Serialize)]
pub struct ResetOutput {
    /// Whether the reset was applied.
    pub success: bool,
    /// Today's date key.
    pub date_key: String,
    /// How many habits had today's mark cleared.
    pub cleared: usize,
    /// Error message if the reset failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ResetOutput {
    /// Create a successful output.
    pub fn success(date_key: impl Into<String>, cleared: usize) -> Self {
        Self {
            success: true,
            date_key: date_key.into(),
            cleared,
            error: None,
        }
    }

    /// Create a failed output.
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            date_key: String::new(),
            cleared: 0,
            error: Some(error.into()),
        }
    }
}

/// The reset command implementation.
pub struct ResetCommand<S: PrefStore + Clone> {
    store: S,
    config: Config,
}

impl<S: PrefStore + Clone> ResetCommand<S> {
    /// Create a new reset command.
    pub fn new(store: S, config: Config) -> Self {
        Self { store, config }
    }

    /// Run the reset command.
    pub fn run(&self, _options: &ResetOptions) -> ResetOutput {
        let mut engine = match HabitEngine::load(
            self.store.clone(),
            &self.config.defaults.starter_habits,
        ) {
            Ok(engine) => engine,
            Err(e) => return ResetOutput::failure(e.to_string()),
        };

        let cleared = engine.done_today();
        let key = date_key(engine.today());

        match engine.reset_today() {
            Ok(()) => ResetOutput::success(key, cleared),
            Err(e) => ResetOutput::failure(e.to_string()),
        }
    }

    /// Format output based on options.
    pub fn format_output(&self, output: &ResetOutput, options: &ResetOptions) -> String {
        if options.quiet {
            return String::new();
        }

        if options.json {
            serde_json::to_string_pretty(output).unwrap_or_else(|_| "{}".to_string())
        } else if output.success {
            format!(
                "Cleared {} checkmark(s) for {}.\n",
                output.cleared, output.date_key
            )
        } else {
            format!(
                "Reset failed: {}\n",
                output.error.as_deref().unwrap_or("unknown error")
            )
        }
    }
}
