//! Day command: per-habit breakdown for one date.

use serde::Serialize;

use crate::config::Config;
use crate::core::dates::parse_date_key;
use crate::core::HabitEngine;
use crate::projections::{day_detail, DayDetail};
use crate::storage::PrefStore;

/// Options for the day command.
#[derive(Debug, Clone, Default)]
pub struct DayOptions {
    /// Output as JSON.
    pub json: bool,
    /// Suppress output.
    pub quiet: bool,
}

/// Output format for the day command.
#[derive(Debug, Clone, Serialize)]
pub struct DayOutput {
    /// Whether the lookup succeeded.
    pub success: bool,
    /// The day's breakdown.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<DayDetail>,
    /// Error message if the lookup failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DayOutput {
    /// Create a successful output.
    pub fn success(detail: DayDetail) -> Self {
        Self {
            success: true,
            detail: Some(detail),
            error: None,
        }
    }

    /// Create a failed output.
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            detail: None,
            error: Some(error.into()),
        }
    }
}

/// The day command implementation.
pub struct DayCommand<S: PrefStore + Clone> {
    store: S,
    config: Config,
}

impl<S: PrefStore + Clone> DayCommand<S> {
    /// Create a new day command.
    pub fn new(store: S, config: Config) -> Self {
        Self { store, config }
    }

    /// Run the day command for a `YYYY-MM-DD` date key.
    pub fn run(&self, date: &str, _options: &DayOptions) -> DayOutput {
        let date = match parse_date_key(date) {
            Ok(date) => date,
            Err(e) => return DayOutput::failure(e.to_string()),
        };

        let engine = match HabitEngine::load(
            self.store.clone(),
            &self.config.defaults.starter_habits,
        ) {
            Ok(engine) => engine,
            Err(e) => return DayOutput::failure(e.to_string()),
        };

        DayOutput::success(day_detail(engine.habits(), engine.history(), date))
    }

    /// Format output based on options.
    pub fn format_output(&self, output: &DayOutput, options: &DayOptions) -> String {
        if options.quiet {
            return String::new();
        }

        if options.json {
            serde_json::to_string_pretty(output).unwrap_or_else(|_| "{}".to_string())
        } else if let Some(detail) = &output.detail {
            let mut text = format!("{}\n{}\n", detail.title, detail.summary_text());
            for row in &detail.habits {
                let mark = if row.done { "x" } else { " " };
                text.push_str(&format!("[{}] {}\n", mark, row.name));
            }
            text
        } else {
            format!(
                "Day lookup failed: {}\n",
                output.error.as_deref().unwrap_or("unknown error")
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::add::{AddCommand, AddOptions};
    use crate::cli::done::{DoneCommand, DoneOptions};
    use crate::cli::test_support::setup;
    use std::sync::Arc;

    #[test]
    fn test_day_breakdown() {
        let (store, config) = setup();
        let add = AddCommand::new(Arc::clone(&store), config.clone());
        add.run("Read", &AddOptions::default());
        add.run("Workout", &AddOptions::default());
        DoneCommand::new(Arc::clone(&store), config.clone()).run(
            "Read",
            &DoneOptions {
                date: Some("2026-01-05".to_string()),
                ..Default::default()
            },
        );

        let cmd = DayCommand::new(store, config);
        let output = cmd.run("2026-01-05", &DayOptions::default());

        assert!(output.success);
        let detail = output.detail.as_ref().unwrap();
        assert_eq!(detail.title, "Monday, Jan 5");
        assert_eq!(detail.completed, 1);
        assert_eq!(detail.total, 2);

        let formatted = cmd.format_output(&output, &DayOptions::default());
        assert!(formatted.contains("1 of 2 completed"));
        assert!(formatted.contains("[x] Read"));
        assert!(formatted.contains("[ ] Workout"));
    }

    #[test]
    fn test_day_invalid_date() {
        let (store, config) = setup();
        let cmd = DayCommand::new(store, config);

        let output = cmd.run("not-a-date", &DayOptions::default());
        assert!(!output.success);
        assert!(output.error.unwrap().contains("invalid date"));
    }
}
