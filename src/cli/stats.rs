//! Stats command: progress, achievements, and weekly insights.

use serde::Serialize;

use crate::config::Config;
use crate::core::{Achievement, HabitEngine};
use crate::projections::{best_habit_text, percent_text, ratio_percent_text, weekly_insights, WeeklyInsights};
use crate::storage::PrefStore;

/// Options for the stats command.
#[derive(Debug, Clone, Default)]
pub struct StatsOptions {
    /// Output as JSON.
    pub json: bool,
    /// Suppress output.
    pub quiet: bool,
}

/// Output format for the stats command.
#[derive(Debug, Clone, Serialize)]
pub struct StatsOutput {
    /// Whether the stats were built.
    pub success: bool,
    /// Habits done today.
    pub today_completed: usize,
    /// Registry size.
    pub today_total: usize,
    /// Completions in the trailing 7-day window.
    pub week_done: usize,
    /// Registry size × 7.
    pub week_possible: usize,
    /// Best-habit line, e.g. "Read (Best: 9)".
    pub best_habit: String,
    /// The full achievement catalog with unlock flags.
    pub achievements: Vec<Achievement>,
    /// Weekly insights snapshot.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insights: Option<WeeklyInsights>,
    /// Error message if the stats failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl StatsOutput {
    /// Create a failed output.
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            today_completed: 0,
            today_total: 0,
            week_done: 0,
            week_possible: 0,
            best_habit: String::new(),
            achievements: Vec::new(),
            insights: None,
            error: Some(error.into()),
        }
    }
}

/// The stats command implementation.
pub struct StatsCommand<S: PrefStore + Clone> {
    store: S,
    config: Config,
}

impl<S: PrefStore + Clone> StatsCommand<S> {
    /// Create a new stats command.
    pub fn new(store: S, config: Config) -> Self {
        Self { store, config }
    }

    /// Run the stats command.
    pub fn run(&self, _options: &StatsOptions) -> StatsOutput {
        let engine = match HabitEngine::load(
            self.store.clone(),
            &self.config.defaults.starter_habits,
        ) {
            Ok(engine) => engine,
            Err(e) => return StatsOutput::failure(e.to_string()),
        };

        let insights = weekly_insights(engine.habits(), engine.history(), engine.today());

        StatsOutput {
            success: true,
            today_completed: engine.done_today(),
            today_total: engine.habits().len(),
            week_done: insights.week_done,
            week_possible: insights.week_possible,
            best_habit: best_habit_text(engine.habits()),
            achievements: engine.achievement_rows(),
            insights: Some(insights),
            error: None,
        }
    }

    /// Format output based on options.
    pub fn format_output(&self, output: &StatsOutput, options: &StatsOptions) -> String {
        if options.quiet {
            return String::new();
        }

        if options.json {
            serde_json::to_string_pretty(output).unwrap_or_else(|_| "{}".to_string())
        } else if output.success {
            self.format_human_readable(output)
        } else {
            format!(
                "Stats failed: {}\n",
                output.error.as_deref().unwrap_or("unknown error")
            )
        }
    }

    fn format_human_readable(&self, output: &StatsOutput) -> String {
        let mut text = format!(
            "Today: {}/{} ({})\nWeek: {}/{} ({})\nBest habit: {}\n",
            output.today_completed,
            output.today_total,
            percent_text(output.today_completed, output.today_total),
            output.week_done,
            output.week_possible,
            percent_text(output.week_done, output.week_possible),
            output.best_habit
        );

        text.push_str("\nAchievements:\n");
        for row in &output.achievements {
            let state = if row.unlocked { "unlocked" } else { "locked" };
            text.push_str(&format!(
                "  {} {} — {} [{}]\n",
                row.icon, row.title, row.description, state
            ));
        }

        if let Some(insights) = &output.insights {
            text.push_str(&format!("\n{}\n", insights.title()));
            text.push_str(&format!("  Best day: {}\n", insights.best_day_text()));
            text.push_str(&format!("  Worst day: {}\n", insights.worst_day_text()));
            text.push_str(&format!("  Top habit: {}\n", insights.top_habit_text()));
            text.push_str(&format!(
                "  Streak leader: {}\n",
                insights.streak_leader_text()
            ));
            text.push_str(&format!(
                "  Week ratio: {}\n",
                ratio_percent_text(insights.week_ratio)
            ));
        }
        text
    }
}
