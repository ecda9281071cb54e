//! Calendar command: the 42-cell month grid.

use chrono::Datelike;
use serde::Serialize;

use crate::config::Config;
use crate::core::dates::month_title;
use crate::core::HabitEngine;
use crate::projections::{month_grid, CalendarCell};
use crate::storage::PrefStore;

/// Options for the calendar command.
#[derive(Debug, Clone, Default)]
pub struct CalendarOptions {
    /// Output as JSON.
    pub json: bool,
    /// Suppress output.
    pub quiet: bool,
    /// Target month (`YYYY-MM`); defaults to the current month.
    pub month: Option<String>,
}

/// Output format for the calendar command.
#[derive(Debug, Clone, Serialize)]
pub struct CalendarOutput {
    /// Whether the grid was built.
    pub success: bool,
    /// Month header, e.g. "August 2026".
    pub title: String,
    /// The 42 grid cells, Monday-first.
    pub cells: Vec<CalendarCell>,
    /// Error message if the grid failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CalendarOutput {
    /// Create a successful output.
    pub fn success(title: impl Into<String>, cells: Vec<CalendarCell>) -> Self {
        Self {
            success: true,
            title: title.into(),
            cells,
            error: None,
        }
    }

    /// Create a failed output.
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            title: String::new(),
            cells: Vec::new(),
            error: Some(error.into()),
        }
    }
}

/// The calendar command implementation.
pub struct CalendarCommand<S: PrefStore + Clone> {
    store: S,
    config: Config,
}

impl<S: PrefStore + Clone> CalendarCommand<S> {
    /// Create a new calendar command.
    pub fn new(store: S, config: Config) -> Self {
        Self { store, config }
    }

    /// Run the calendar command.
    pub fn run(&self, options: &CalendarOptions) -> CalendarOutput {
        let engine = match HabitEngine::load(
            self.store.clone(),
            &self.config.defaults.starter_habits,
        ) {
            Ok(engine) => engine,
            Err(e) => return CalendarOutput::failure(e.to_string()),
        };

        let (year, month) = match &options.month {
            Some(text) => match parse_month(text) {
                Some(pair) => pair,
                None => return CalendarOutput::failure(format!("invalid month: {}", text)),
            },
            None => (engine.today().year(), engine.today().month()),
        };

        let cells = match month_grid(engine.habits(), engine.history(), year, month) {
            Ok(cells) => cells,
            Err(e) => return CalendarOutput::failure(e.to_string()),
        };
        let title = month_title(year, month).unwrap_or_default();

        CalendarOutput::success(title, cells)
    }

    /// Format output based on options.
    pub fn format_output(&self, output: &CalendarOutput, options: &CalendarOptions) -> String {
        if options.quiet {
            return String::new();
        }

        if options.json {
            serde_json::to_string_pretty(output).unwrap_or_else(|_| "{}".to_string())
        } else if output.success {
            self.format_human_readable(output)
        } else {
            format!(
                "Calendar failed: {}\n",
                output.error.as_deref().unwrap_or("unknown error")
            )
        }
    }

    /// Render the grid as six Monday-first rows.
    ///
    /// `*` marks a fully completed day, `+` a partial one.
    fn format_human_readable(&self, output: &CalendarOutput) -> String {
        let mut text = format!("{}\n Mo  Tu  We  Th  Fr  Sa  Su\n", output.title);

        for week in output.cells.chunks(7) {
            for cell in week {
                if !cell.in_month {
                    text.push_str("  · ");
                    continue;
                }
                let mark = if cell.total > 0 && cell.completed == cell.total {
                    '*'
                } else if cell.completed > 0 {
                    '+'
                } else {
                    ' '
                };
                text.push_str(&format!("{:>3}{}", cell.day_of_month, mark));
            }
            text.push('\n');
        }
        text
    }
}

/// Parse a `YYYY-MM` month reference.
fn parse_month(text: &str) -> Option<(i32, u32)> {
    let (year, month) = text.split_once('-')?;
    let year: i32 = year.parse().ok()?;
    let month: u32 = month.parse().ok()?;
    if (1..=12).contains(&month) {
        Some((year, month))
    } else {
        None
    }
}
