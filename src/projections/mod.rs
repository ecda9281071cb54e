//! Read-only projections over the registry and history log.
//!
//! Every projection is a pure function of (registry, history, date
//! parameters): no mutation of the log, same inputs give the same output.
//! Each one re-derives its counts from the history log directly.

pub mod calendar;
pub mod heatmap;
pub mod history;
pub mod insights;

pub use calendar::{month_grid, CalendarCell, GRID_CELLS};
pub use heatmap::{trailing_window, HeatDay, HeatLevel, HEATMAP_DAYS};
pub use history::{day_detail, day_summaries, DayDetail, DaySummary, HabitDayRow};
pub use insights::{best_habit_text, percent_text, ratio_percent_text, weekly_insights, WeeklyInsights};

use crate::core::Habit;
use crate::core::HistoryLog;

/// Count how many registry habits were done on a date key.
pub(crate) fn completed_on(habits: &[Habit], history: &HistoryLog, date_key: &str) -> usize {
    habits
        .iter()
        .filter(|h| history.contains(&h.id, date_key))
        .count()
}
