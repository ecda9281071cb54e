//! Done command: mark or unmark a habit done on a date.

use serde::Serialize;

use crate::cli::resolve_habit_id;
use crate::config::Config;
use crate::core::dates::{date_key, parse_date_key};
use crate::core::HabitEngine;
use crate::storage::PrefStore;

/// Options for the done command.
#[derive(Debug, Clone, Default)]
pub struct DoneOptions {
    /// Output as JSON.
    pub json: bool,
    /// Suppress output.
    pub quiet: bool,
    /// Unmark instead of mark.
    pub undo: bool,
    /// Target date key (`YYYY-MM-DD`); defaults to today.
    pub date: Option<String>,
}

/// Output format for the done command.
#[derive(Debug, Clone, Serialize)]
pub struct DoneOutput {
    /// Whether the toggle was applied.
    pub success: bool,
    /// Name of the habit.
    pub name: String,
    /// The date key the toggle applied to.
    pub date_key: String,
    /// Whether the habit is now marked done on that date.
    pub done: bool,
    /// Current streak after the toggle.
    pub streak: u32,
    /// Best streak after the toggle.
    pub best_streak: u32,
    /// Error message if the toggle failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DoneOutput {
    /// Create a successful output.
    pub fn success(
        name: impl Into<String>,
        date_key: impl Into<String>,
        done: bool,
        streak: u32,
        best_streak: u32,
    ) -> Self {
        Self {
            success: true,
            name: name.into(),
            date_key: date_key.into(),
            done,
            streak,
            best_streak,
            error: None,
        }
    }

    /// Create a failed output.
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            name: String::new(),
            date_key: String::new(),
            done: false,
            streak: 0,
            best_streak: 0,
            error: Some(error.into()),
        }
    }
}

/// The done command implementation.
pub struct DoneCommand<S: PrefStore + Clone> {
    store: S,
    config: Config,
}

impl<S: PrefStore + Clone> DoneCommand<S> {
    /// Create a new done command.
    pub fn new(store: S, config: Config) -> Self {
        Self { store, config }
    }

    /// Run the done command for a habit name or id.
    pub fn run(&self, target: &str, options: &DoneOptions) -> DoneOutput {
        let date = match &options.date {
            Some(text) => match parse_date_key(text) {
                Ok(date) => Some(date),
                Err(e) => return DoneOutput::failure(e.to_string()),
            },
            None => None,
        };

        let mut engine = match HabitEngine::load(
            self.store.clone(),
            &self.config.defaults.starter_habits,
        ) {
            Ok(engine) => engine,
            Err(e) => return DoneOutput::failure(e.to_string()),
        };

        let Some(id) = resolve_habit_id(&engine, target) else {
            return DoneOutput::failure(format!("no habit matches '{}'", target));
        };

        let done = !options.undo;
        if let Err(e) = engine.set_done(&id, date, done) {
            return DoneOutput::failure(e.to_string());
        }

        let key = date_key(date.unwrap_or_else(|| engine.today()));
        match engine.habit(&id) {
            Some(habit) => {
                DoneOutput::success(habit.name.clone(), key, done, habit.streak, habit.best_streak)
            }
            None => DoneOutput::failure(format!("no habit matches '{}'", target)),
        }
    }

    /// Format output based on options.
    pub fn format_output(&self, output: &DoneOutput, options: &DoneOptions) -> String {
        if options.quiet {
            return String::new();
        }

        if options.json {
            serde_json::to_string_pretty(output).unwrap_or_else(|_| "{}".to_string())
        } else if output.success {
            let verb = if output.done { "Marked" } else { "Cleared" };
            format!(
                "{} '{}' for {} (streak {}, best {}).\n",
                verb, output.name, output.date_key, output.streak, output.best_streak
            )
        } else {
            format!(
                "Toggle failed: {}\n",
                output.error.as_deref().unwrap_or("unknown error")
            )
        }
    }
}
