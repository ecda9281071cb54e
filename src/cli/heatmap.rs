//! Heatmap command: the trailing 90-day completion window.

use serde::Serialize;

use crate::config::Config;
use crate::core::HabitEngine;
use crate::projections::{trailing_window, HeatDay, HeatLevel};
use crate::storage::PrefStore;

/// Options for the heatmap command.
#[derive(Debug, Clone, Default)]
pub struct HeatmapOptions {
    /// Output as JSON.
    pub json: bool,
    /// Suppress output.
    pub quiet: bool,
}

/// Output format for the heatmap command.
#[derive(Debug, Clone, Serialize)]
pub struct HeatmapOutput {
    /// Whether the window was built.
    pub success: bool,
    /// The 90 days, ascending, ending today.
    pub days: Vec<HeatDay>,
    /// Error message if the window failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl HeatmapOutput {
    /// Create a successful output.
    pub fn success(days: Vec<HeatDay>) -> Self {
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

/// The heatmap command implementation.
pub struct HeatmapCommand<S: PrefStore + Clone> {
    store: S,
    config: Config,
}

impl<S: PrefStore + Clone> HeatmapCommand<S> {
    /// Create a new heatmap command.
    pub fn new(store: S, config: Config) -> Self {
        Self { store, config }
    }

    /// Run the heatmap command.
    pub fn run(&self, _options: &HeatmapOptions) -> HeatmapOutput {
        let engine = match HabitEngine::load(
            self.store.clone(),
            &self.config.defaults.starter_habits,
        ) {
            Ok(engine) => engine,
            Err(e) => return HeatmapOutput::failure(e.to_string()),
        };

        HeatmapOutput::success(trailing_window(
            engine.habits(),
            engine.history(),
            engine.today(),
        ))
    }

    /// Format output based on options.
    pub fn format_output(&self, output: &HeatmapOutput, options: &HeatmapOptions) -> String {
        if options.quiet {
            return String::new();
        }

        if options.json {
            serde_json::to_string_pretty(output).unwrap_or_else(|_| "{}".to_string())
        } else if output.success {
            self.format_human_readable(output)
        } else {
            format!(
                "Heatmap failed: {}\n",
                output.error.as_deref().unwrap_or("unknown error")
            )
        }
    }

    fn format_human_readable(&self, output: &HeatmapOutput) -> String {
        let (Some(first), Some(last)) = (output.days.first(), output.days.last()) else {
            return String::new();
        };

        let mut text = format!("Last 90 days ({} to {})\n", first.date_key, last.date_key);
        for row in output.days.chunks(30) {
            for day in row {
                text.push(day.level.glyph());
            }
            text.push('\n');
        }
        text.push_str(&format!(
            "{} none  {} low  {} medium  {} good  {} full\n",
            HeatLevel::None.glyph(),
            HeatLevel::Low.glyph(),
            HeatLevel::Medium.glyph(),
            HeatLevel::Good.glyph(),
            HeatLevel::Full.glyph()
        ));
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
    fn test_heatmap_window() {
        let (store, config) = setup();
        AddCommand::new(Arc::clone(&store), config.clone())
            .run("Read", &AddOptions::default());
        DoneCommand::new(Arc::clone(&store), config.clone())
            .run("Read", &DoneOptions::default());

        let cmd = HeatmapCommand::new(store, config);
        let output = cmd.run(&HeatmapOptions::default());

        assert!(output.success);
        assert_eq!(output.days.len(), 90);
        let last = output.days.last().unwrap();
        assert_eq!(last.completed, 1);
        assert_eq!(last.level, HeatLevel::Full);
    }

    #[test]
    fn test_format_human_has_three_rows_and_legend() {
        let (store, config) = setup();
        let cmd = HeatmapCommand::new(store, config);

        let output = cmd.run(&HeatmapOptions::default());
        let formatted = cmd.format_output(&output, &HeatmapOptions::default());

        assert!(formatted.starts_with("Last 90 days ("));
        // Header + 3 glyph rows + legend
        assert_eq!(formatted.lines().count(), 5);
        assert!(formatted.contains("none"));
        assert!(formatted.contains("full"));
    }
}
