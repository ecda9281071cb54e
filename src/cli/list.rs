//! List command: today's habits with progress.

use serde::Serialize;

use crate::config::Config;
use crate::core::dates::{date_key, display_long};
use crate::core::HabitEngine;
use crate::projections::percent_text;
use crate::storage::PrefStore;

/// Options for the list command.
#[derive(Debug, Clone, Default)]
pub struct ListOptions {
    /// Output as JSON.
    pub json: bool,
    /// Suppress output.
    pub quiet: bool,
}

/// One habit row of the today view.
#[derive(Debug, Clone, Serialize)]
pub struct ListRow {
    /// Habit id.
    pub id: String,
    /// Habit display name.
    pub name: String,
    /// Whether the habit is done today.
    pub done: bool,
    /// Current streak in days.
    pub streak: u32,
    /// Best streak on record.
    pub best_streak: u32,
}

/// Output format for the list command.
#[derive(Debug, Clone, Serialize)]
pub struct ListOutput {
    /// Whether the listing succeeded.
    pub success: bool,
    /// Today's date key.
    pub date_key: String,
    /// Today's long display form.
    pub display_date: String,
    /// One row per habit, in registry order.
    pub habits: Vec<ListRow>,
    /// Habits done today.
    pub completed: usize,
    /// Registry size.
    pub total: usize,
    /// Error message if the listing failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ListOutput {
    /// Create a failed output.
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            date_key: String::new(),
            display_date: String::new(),
            habits: Vec::new(),
            completed: 0,
            total: 0,
            error: Some(error.into()),
        }
    }
}

/// The list command implementation.
pub struct ListCommand<S: PrefStore + Clone> {
    store: S,
    config: Config,
}

impl<S: PrefStore + Clone> ListCommand<S> {
    /// Create a new list command.
    pub fn new(store: S, config: Config) -> Self {
        Self { store, config }
    }

    /// Run the list command.
    pub fn run(&self, _options: &ListOptions) -> ListOutput {
        let engine = match HabitEngine::load(
            self.store.clone(),
            &self.config.defaults.starter_habits,
        ) {
            Ok(engine) => engine,
            Err(e) => return ListOutput::failure(e.to_string()),
        };

        let habits: Vec<ListRow> = engine
            .habits()
            .iter()
            .map(|h| ListRow {
                id: h.id.clone(),
                name: h.name.clone(),
                done: h.done_today,
                streak: h.streak,
                best_streak: h.best_streak,
            })
            .collect();

        ListOutput {
            success: true,
            date_key: date_key(engine.today()),
            display_date: display_long(engine.today()),
            completed: engine.done_today(),
            total: habits.len(),
            habits,
            error: None,
        }
    }

    /// Format output based on options.
    pub fn format_output(&self, output: &ListOutput, options: &ListOptions) -> String {
        if options.quiet {
            return String::new();
        }

        if options.json {
            serde_json::to_string_pretty(output).unwrap_or_else(|_| "{}".to_string())
        } else if output.success {
            self.format_human_readable(output)
        } else {
            format!(
                "List failed: {}\n",
                output.error.as_deref().unwrap_or("unknown error")
            )
        }
    }

    fn format_human_readable(&self, output: &ListOutput) -> String {
        let mut text = format!(
            "{} — {}/{} done ({})\n",
            output.display_date,
            output.completed,
            output.total,
            percent_text(output.completed, output.total)
        );

        if output.habits.is_empty() {
            text.push_str("No habits yet. Add one with 'tally add <name>'.\n");
            return text;
        }

        for row in &output.habits {
            let mark = if row.done { "x" } else { " " };
            text.push_str(&format!(
                "[{}] {} (streak {}, best {})\n",
                mark, row.name, row.streak, row.best_streak
            ));
        }
        text
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
    fn test_list_empty() {
        let (store, config) = setup();
        let cmd = ListCommand::new(store, config);

        let output = cmd.run(&ListOptions::default());
        assert!(output.success);
        assert!(output.habits.is_empty());
        assert_eq!(output.total, 0);

        let formatted = cmd.format_output(&output, &ListOptions::default());
        assert!(formatted.contains("0/0 done (0%)"));
        assert!(formatted.contains("No habits yet"));
    }

    #[test]
    fn test_list_with_progress() {
        let (store, config) = setup();
        let add = AddCommand::new(Arc::clone(&store), config.clone());
        add.run("Read", &AddOptions::default());
        add.run("Workout", &AddOptions::default());
        DoneCommand::new(Arc::clone(&store), config.clone())
            .run("Read", &DoneOptions::default());

        let cmd = ListCommand::new(store, config);
        let output = cmd.run(&ListOptions::default());

        assert!(output.success);
        assert_eq!(output.total, 2);
        assert_eq!(output.completed, 1);
        assert_eq!(output.habits[0].name, "Read");
        assert!(output.habits[0].done);
        assert_eq!(output.habits[0].streak, 1);
        assert!(!output.habits[1].done);

        let formatted = cmd.format_output(&output, &ListOptions::default());
        assert!(formatted.contains("1/2 done (50%)"));
        assert!(formatted.contains("[x] Read (streak 1, best 1)"));
        assert!(formatted.contains("[ ] Workout (streak 0, best 0)"));
    }

    #[test]
    fn test_list_seeds_starter_habits() {
        let (store, _) = setup();
        // Default config carries the starter set
        let cmd = ListCommand::new(store, Config::default());

        let output = cmd.run(&ListOptions::default());
        assert_eq!(output.total, 4);
        assert_eq!(output.habits[0].name, "Drink water");
    }
}
