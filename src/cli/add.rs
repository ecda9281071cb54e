//! Add command: create a habit.

use serde::Serialize;

use crate::config::Config;
use crate::core::HabitEngine;
use crate::storage::PrefStore;

/// Options for the add command.
#[derive(Debug, Clone, Default)]
pub struct AddOptions {
    /// Output as JSON.
    pub json: bool,
    /// Suppress output.
    pub quiet: bool,
}

/// Output format for the add command.
#[derive(Debug, Clone, Serialize)]
pub struct AddOutput {
    /// Whether the habit was created.
    pub success: bool,
    /// Id of the new habit.
    pub id: String,
    /// Trimmed name of the new habit.
    pub name: String,
    /// Error message if the add failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AddOutput {
    /// Create a successful output.
    pub fn success(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            success: true,
            id: id.into(),
            name: name.into(),
            error: None,
        }
    }

    /// Create a failed output.
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            id: String::new(),
            name: String::new(),
            error: Some(error.into()),
        }
    }
}

/// The add command implementation.
pub struct AddCommand<S: PrefStore + Clone> {
    store: S,
    config: Config,
}

impl<S: PrefStore + Clone> AddCommand<S> {
    /// Create a new add command.
    pub fn new(store: S, config: Config) -> Self {
        Self { store, config }
    }

    /// Run the add command for a habit name.
    pub fn run(&self, name: &str, _options: &AddOptions) -> AddOutput {
        let mut engine = match HabitEngine::load(
            self.store.clone(),
            &self.config.defaults.starter_habits,
        ) {
            Ok(engine) => engine,
            Err(e) => return AddOutput::failure(e.to_string()),
        };

        match engine.add_habit(name) {
            Ok(id) => AddOutput::success(id, name.trim()),
            Err(e) => AddOutput::failure(e.to_string()),
        }
    }

    /// Format output based on options.
    pub fn format_output(&self, output: &AddOutput, options: &AddOptions) -> String {
        if options.quiet {
            return String::new();
        }

        if options.json {
            serde_json::to_string_pretty(output).unwrap_or_else(|_| "{}".to_string())
        } else if output.success {
            format!("Added habit '{}'.\n", output.name)
        } else {
            format!(
                "Add failed: {}\n",
                output.error.as_deref().unwrap_or("unknown error")
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::test_support::setup;
    use std::sync::Arc;

    #[test]
    fn test_add_basic() {
        let (store, config) = setup();
        let cmd = AddCommand::new(Arc::clone(&store), config.clone());
        let options = AddOptions::default();

        let output = cmd.run("Meditate", &options);

        assert!(output.success);
        assert_eq!(output.name, "Meditate");
        assert!(!output.id.is_empty());

        // The habit is visible to a fresh engine
        let engine =
            crate::core::HabitEngine::load(store, &config.defaults.starter_habits).unwrap();
        assert!(engine.habit_by_name("Meditate").is_some());
    }

    #[test]
    fn test_add_trims_name() {
        let (store, config) = setup();
        let cmd = AddCommand::new(store, config);

        let output = cmd.run("  Meditate  ", &AddOptions::default());
        assert!(output.success);
        assert_eq!(output.name, "Meditate");
    }

    #[test]
    fn test_add_duplicate_rejected() {
        let (store, config) = setup();
        let cmd = AddCommand::new(store, config);
        let options = AddOptions::default();

        assert!(cmd.run("Meditate", &options).success);
        let output = cmd.run("meditate", &options);

        assert!(!output.success);
        assert!(output.error.unwrap().contains("already exists"));
    }

    #[test]
    fn test_add_empty_rejected() {
        let (store, config) = setup();
        let cmd = AddCommand::new(store, config);

        let output = cmd.run("   ", &AddOptions::default());
        assert!(!output.success);
    }

    #[test]
    fn test_format_output_human() {
        let (store, config) = setup();
        let cmd = AddCommand::new(store, config);

        let output = AddOutput::success("id-1", "Meditate");
        let formatted = cmd.format_output(&output, &AddOptions::default());
        assert_eq!(formatted, "Added habit 'Meditate'.\n");
    }

    #[test]
    fn test_format_output_json_and_quiet() {
        let (store, config) = setup();
        let cmd = AddCommand::new(store, config);
        let output = AddOutput::success("id-1", "Meditate");

        let json = cmd.format_output(
            &output,
            &AddOptions {
                json: true,
                ..Default::default()
            },
        );
        assert!(json.contains("\"success\": true"));

        let quiet = cmd.format_output(
            &output,
            &AddOptions {
                quiet: true,
                ..Default::default()
            },
        );
        assert!(quiet.is_empty());
    }
}
