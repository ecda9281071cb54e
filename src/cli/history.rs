//! History command: per-day completion summaries over a range.

use chrono::Days;
use serde::Serialize;

use crate::config::Config;
use crate::core::dates::parse_date_key;
use crate::core::HabitEngine;
use crate::projections::{day_summaries, DaySummary};
use crate::storage::PrefStore;

/// Options for the history command.
#[derive(Debug, Clone, Default)]
pub struct HistoryOptions {
    /// Output as JSON.
    pub json: bool,
    /// Suppress output.
    pub quiet: bool,
    /// Trailing range preset in days, ending today.
    pub last: Option<u32>,
    /// Range start (`YYYY-MM-DD`).
    pub from: Option<String>,
    /// Range end (`YYYY-MM-DD`).
    pub to: Option<String>,
    /// Skip days with zero completions.
    pub active_only: bool,
}

/// Output format for the history command.
#[derive(Debug, Clone, Serialize)]
pub struct HistoryOutput {
    /// Whether the listing succeeded.
    pub success: bool,
    /// One summary per day, most recent first.
    pub days: Vec<DaySummary>,
    /// Error message if the listing failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl HistoryOutput {
    /// Create a successful output.
    pub fn success(days: Vec<DaySummary>) -> Self {
        Self {
            success: true,
            days,
            error: None,
        }
    }

    /// Create a failed output.
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            days: Vec::new(),
            error: Some(error.into()),
        }
    }
}

/// The history command implementation.
pub struct HistoryCommand<S: PrefStore + Clone> {
    store: S,
    config: Config,
}

impl<S: PrefStore + Clone> HistoryCommand<S> {
    /// Create a new history command.
    pub fn new(store: S, config: Config) -> Self {
        Self { store, config }
    }

    /// Run the history command.
    ///
    /// `--last N` takes a trailing window ending today; otherwise `--from`
    /// and `--to` bound the range, each defaulting to the configured
    /// trailing range when absent.
    pub fn run(&self, options: &HistoryOptions) -> HistoryOutput {
        let engine = match HabitEngine::load(
            self.store.clone(),
            &self.config.defaults.starter_habits,
        ) {
            Ok(engine) => engine,
            Err(e) => return HistoryOutput::failure(e.to_string()),
        };
        let today = engine.today();

        let default_span = self.config.history.default_range_days.max(1) as u64 - 1;
        let (start, end) = if let Some(last) = options.last {
            let span = last.max(1) as u64 - 1;
            (today - Days::new(span), today)
        } else {
            let end = match &options.to {
                Some(text) => match parse_date_key(text) {
                    Ok(date) => date,
                    Err(e) => return HistoryOutput::failure(e.to_string()),
                },
                None => today,
            };
            let start = match &options.from {
                Some(text) => match parse_date_key(text) {
                    Ok(date) => date,
                    Err(e) => return HistoryOutput::failure(e.to_string()),
                },
                None => end - Days::new(default_span),
            };
            (start, end)
        };

        HistoryOutput::success(day_summaries(
            engine.habits(),
            engine.history(),
            start,
            end,
            options.active_only,
        ))
    }

    /// Format output based on options.
    pub fn format_output(&self, output: &HistoryOutput, options: &HistoryOptions) -> String {
        if options.quiet {
            return String::new();
        }

        if options.json {
            serde_json::to_string_pretty(output).unwrap_or_else(|_| "{}".to_string())
        } else if output.success {
            if output.days.is_empty() {
                return "No days to show.\n".to_string();
            }
            let mut text = String::new();
            for day in &output.days {
                text.push_str(&format!(
                    "{}  {}/{} ({})\n",
                    day.display_date,
                    day.completed,
                    day.total,
                    day.percent_text()
                ));
            }
            text
        } else {
            format!(
                "History failed: {}\n",
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

    fn seed(store: &Arc<crate::storage::MemoryPrefStore>, config: &Config) {
        AddCommand::new(Arc::clone(store), config.clone()).run("Read", &AddOptions::default());
        let done = DoneCommand::new(Arc::clone(store), config.clone());
        done.run("Read", &DoneOptions::default());
    }

    #[test]
    fn test_history_default_range() {
        let (store, config) = setup();
        seed(&store, &config);

        let cmd = HistoryCommand::new(store, config);
        let output = cmd.run(&HistoryOptions::default());

        assert!(output.success);
        // Configured default range is 14 days
        assert_eq!(output.days.len(), 14);
        assert_eq!(output.days[0].completed, 1);
        assert_eq!(output.days[1].completed, 0);
    }

    #[test]
    fn test_history_last_preset() {
        let (store, config) = setup();
        seed(&store, &config);

        let cmd = HistoryCommand::new(store, config);
        let output = cmd.run(&HistoryOptions {
            last: Some(7),
            ..Default::default()
        });

        assert_eq!(output.days.len(), 7);
    }

    #[test]
    fn test_history_explicit_range() {
        let (store, config) = setup();
        seed(&store, &config);

        let cmd = HistoryCommand::new(store, config);
        let output = cmd.run(&HistoryOptions {
            from: Some("2026-01-05".to_string()),
            to: Some("2026-01-07".to_string()),
            ..Default::default()
        });

        assert!(output.success);
        assert_eq!(output.days.len(), 3);
        assert_eq!(output.days[0].date_key, "2026-01-07");
    }

    #[test]
    fn test_history_active_only() {
        let (store, config) = setup();
        seed(&store, &config);

        let cmd = HistoryCommand::new(store, config);
        let output = cmd.run(&HistoryOptions {
            active_only: true,
            ..Default::default()
        });

        assert_eq!(output.days.len(), 1);
        assert_eq!(output.days[0].completed, 1);
    }

    #[test]
    fn test_history_bad_date() {
        let (store, config) = setup();
        let cmd = HistoryCommand::new(store, config);

        let output = cmd.run(&HistoryOptions {
            from: Some("garbage".to_string()),
            ..Default::default()
        });
        assert!(!output.success);
    }

    #[test]
    fn test_format_output_human() {
        let (store, config) = setup();
        seed(&store, &config);

        let cmd = HistoryCommand::new(store, config);
        let output = cmd.run(&HistoryOptions {
            last: Some(2),
            ..Default::default()
        });

        let formatted = cmd.format_output(&output, &HistoryOptions::default());
        assert!(formatted.contains("1/1 (100%)"));
        assert!(formatted.contains("0/1 (0%)"));
    }
}
