//! Export command: write the weekly report through a share sink.

use std::path::PathBuf;

use serde::Serialize;

use crate::config::Config;
use crate::core::HabitEngine;
use crate::projections::weekly_insights;
use crate::report::{report_file_name, weekly_report_lines, FileShareSink, ShareSink};
use crate::storage::PrefStore;

/// Options for the export command.
#[derive(Debug, Clone, Default)]
pub struct ExportOptions {
    /// Output as JSON.
    pub json: bool,
    /// Suppress output.
    pub quiet: bool,
    /// Destination directory; defaults to the current directory.
    pub out: Option<PathBuf>,
}

/// Output format for the export command.
#[derive(Debug, Clone, Serialize)]
pub struct ExportOutput {
    /// Whether the report was written.
    pub success: bool,
    /// Where the report landed.
    pub path: PathBuf,
    /// Error message if the export failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ExportOutput {
    /// Create a successful output.
    pub fn success(path: PathBuf) -> Self {
        Self {
            success: true,
            path,
            error: None,
        }
    }

    /// Create a failed output.
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            path: PathBuf::new(),
            error: Some(error.into()),
        }
    }
}

/// The export command implementation.
pub struct ExportCommand<S: PrefStore + Clone> {
    store: S,
    config: Config,
}

impl<S: PrefStore + Clone> ExportCommand<S> {
    /// Create a new export command.
    pub fn new(store: S, config: Config) -> Self {
        Self { store, config }
    }

    /// Run the export command.
    pub fn run(&self, options: &ExportOptions) -> ExportOutput {
        let engine = match HabitEngine::load(
            self.store.clone(),
            &self.config.defaults.starter_habits,
        ) {
            Ok(engine) => engine,
            Err(e) => return ExportOutput::failure(e.to_string()),
        };

        let insights = weekly_insights(engine.habits(), engine.history(), engine.today());
        let mut body = weekly_report_lines(&insights).join("\n");
        body.push('\n');

        let dir = options.out.clone().unwrap_or_else(|| PathBuf::from("."));
        let sink = FileShareSink::new(dir);
        match sink.share(&report_file_name(insights.end), body.as_bytes()) {
            Ok(path) => ExportOutput::success(path),
            Err(e) => ExportOutput::failure(e.to_string()),
        }
    }

    /// Format output based on options.
    pub fn format_output(&self, output: &ExportOutput, options: &ExportOptions) -> String {
        if options.quiet {
            return String::new();
        }

        if options.json {
            serde_json::to_string_pretty(output).unwrap_or_else(|_| "{}".to_string())
        } else if output.success {
            format!("Weekly report written to {}.\n", output.path.display())
        } else {
            format!(
                "Export failed: {}\n",
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
    use crate::report::REPORT_TITLE;
    use std::sync::Arc;
    use tempfile::TempDir;

    #[test]
    fn test_export_writes_report() {
        let (store, config) = setup();
        AddCommand::new(Arc::clone(&store), config.clone())
            .run("Read", &AddOptions::default());
        DoneCommand::new(Arc::clone(&store), config.clone())
            .run("Read", &DoneOptions::default());

        let dir = TempDir::new().unwrap();
        let cmd = ExportCommand::new(store, config);
        let output = cmd.run(&ExportOptions {
            out: Some(dir.path().to_path_buf()),
            ..Default::default()
        });

        assert!(output.success);
        let body = std::fs::read_to_string(&output.path).unwrap();
        assert!(body.starts_with(REPORT_TITLE));
        assert!(body.contains("Completion: 14% (1/7)"));
        assert!(body.contains("Top habit: Read — 1/7 days"));
        assert!(body.ends_with("Keep going 🔥\n"));

        let name = output.path.file_name().unwrap().to_string_lossy();
        assert!(name.starts_with("Tally_WeeklyReport_"));
        assert!(name.ends_with(".txt"));
    }

    #[test]
    fn test_export_unwritable_destination() {
        let (store, config) = setup();
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "x").unwrap();

        let cmd = ExportCommand::new(store, config);
        let output = cmd.run(&ExportOptions {
            out: Some(blocker),
            ..Default::default()
        });

        assert!(!output.success);
        assert!(output.error.unwrap().contains("export error"));
    }

    #[test]
    fn test_format_output_human() {
        let (store, config) = setup();
        let cmd = ExportCommand::new(store, config);

        let formatted = cmd.format_output(
            &ExportOutput::success(PathBuf::from("/tmp/report.txt")),
            &ExportOptions::default(),
        );
        assert_eq!(formatted, "Weekly report written to /tmp/report.txt.\n");
    }
}
