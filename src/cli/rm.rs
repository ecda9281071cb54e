//! Rm command: delete a habit and its tracking state.

use serde::Serialize;

use crate::cli::resolve_habit_id;
use crate::config::Config;
use crate::core::HabitEngine;
use crate::storage::PrefStore;

/// Options for the rm command.
#[derive(Debug, Clone, Default)]
pub struct RmOptions {
    /// Output as JSON.
    pub json: bool,
    /// Suppress output.
    pub quiet: bool,
}

/// Output format for the rm command.
#[derive(Debug, Clone, Serialize)]
pub struct RmOutput {
    /// Whether a habit was removed.
    pub success: bool,
    /// Name of the removed habit.
    pub name: String,
    /// Error message if the removal failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RmOutput {
    /// Create a successful output.
    pub fn success(name: impl Into<String>) -> Self {
        Self {
            success: true,
            name: name.into(),
            error: None,
        }
    }

    /// Create a failed output.
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            name: String::new(),
            error: Some(error.into()),
        }
    }
}

/// The rm command implementation.
pub struct RmCommand<S: PrefStore + Clone> {
    store: S,
    config: Config,
}

impl<S: PrefStore + Clone> RmCommand<S> {
    /// Create a new rm command.
    pub fn new(store: S, config: Config) -> Self {
        Self { store, config }
    }

    /// Run the rm command for a habit name or id.
    pub fn run(&self, target: &str, _options: &RmOptions) -> RmOutput {
        let mut engine = match HabitEngine::load(
            self.store.clone(),
            &self.config.defaults.starter_habits,
        ) {
            Ok(engine) => engine,
            Err(e) => return RmOutput::failure(e.to_string()),
        };

        let Some(id) = resolve_habit_id(&engine, target) else {
            return RmOutput::failure(format!("no habit matches '{}'", target));
        };
        let name = engine
            .habit(&id)
            .map(|h| h.name.clone())
            .unwrap_or_default();

        match engine.remove_habit(&id) {
            Ok(_) => RmOutput::success(name),
            Err(e) => RmOutput::failure(e.to_string()),
        }
    }

    /// Format output based on options.
    pub fn format_output(&self, output: &RmOutput, options: &RmOptions) -> String {
        if options.quiet {
            return String::new();
        }

        if options.json {
            serde_json::to_string_pretty(output).unwrap_or_else(|_| "{}".to_string())
        } else if output.success {
            format!("Removed habit '{}'.\n", output.name)
        } else {
            format!(
                "Remove failed: {}\n",
                output.error.as_deref().unwrap_or("unknown error")
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::add::{AddCommand, AddOptions};
    use crate::cli::test_support::setup;
    use std::sync::Arc;

    #[test]
    fn test_rm_by_name() {
        let (store, config) = setup();
        AddCommand::new(Arc::clone(&store), config.clone())
            .run("Meditate", &AddOptions::default());

        let cmd = RmCommand::new(Arc::clone(&store), config.clone());
        let output = cmd.run("meditate", &RmOptions::default());

        assert!(output.success);
        assert_eq!(output.name, "Meditate");

        let engine =
            crate::core::HabitEngine::load(store, &config.defaults.starter_habits).unwrap();
        assert!(engine.habits().is_empty());
    }

    #[test]
    fn test_rm_by_id() {
        let (store, config) = setup();
        let added = AddCommand::new(Arc::clone(&store), config.clone())
            .run("Meditate", &AddOptions::default());

        let cmd = RmCommand::new(store, config);
        let output = cmd.run(&added.id, &RmOptions::default());

        assert!(output.success);
        assert_eq!(output.name, "Meditate");
    }

    #[test]
    fn test_rm_unknown_fails() {
        let (store, config) = setup();
        let cmd = RmCommand::new(store, config);

        let output = cmd.run("Nothing", &RmOptions::default());
        assert!(!output.success);
        assert!(output.error.unwrap().contains("no habit matches"));
    }

    #[test]
    fn test_format_output_human() {
        let (store, config) = setup();
        let cmd = RmCommand::new(store, config);

        let formatted = cmd.format_output(&RmOutput::success("Read"), &RmOptions::default());
        assert_eq!(formatted, "Removed habit 'Read'.\n");
    }
}
