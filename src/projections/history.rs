//! History-range and single-day projections.

use chrono::{Days, NaiveDate};
use serde::Serialize;

use crate::core::dates::{date_key, display_long, display_short};
use crate::core::{Habit, HistoryLog};
use crate::projections::completed_on;

/// One day of the history view.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DaySummary {
    /// The `YYYY-MM-DD` key for this day.
    pub date_key: String,
    /// Short display form, e.g. "Mon, Jan 5".
    pub display_date: String,
    /// Habits completed on this day.
    pub completed: usize,
    /// Registry size at projection time.
    pub total: usize,
}

impl DaySummary {
    /// Completion percentage text; "0%" when the registry is empty.
    pub fn percent_text(&self) -> String {
        super::percent_text(self.completed, self.total)
    }
}

/// Build per-day summaries over an inclusive date range.
///
/// The range is normalized (either argument order works) and emitted in
/// descending date order, most recent first. With `only_active`, days with
/// zero completions are skipped.
pub fn day_summaries(
    habits: &[Habit],
    history: &HistoryLog,
    start: NaiveDate,
    end: NaiveDate,
    only_active: bool,
) -> Vec<DaySummary> {
    let (start, end) = if end < start { (end, start) } else { (start, end) };
    let span = (end - start).num_days() as u64;
    let total = habits.len();

    let mut days = Vec::new();
    for i in 0..=span {
        let date = end - Days::new(i);
        let key = date_key(date);
        let completed = completed_on(habits, history, &key);

        if only_active && completed == 0 {
            continue;
        }

        days.push(DaySummary {
            date_key: key,
            display_date: display_short(date),
            completed,
            total,
        });
    }
    days
}

/// One habit's done flag within a day detail.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct HabitDayRow {
    /// Habit display name.
    pub name: String,
    /// Whether the habit was done on the day.
    pub done: bool,
}

/// Per-habit breakdown for a single day.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DayDetail {
    /// The `YYYY-MM-DD` key for the day.
    pub date_key: String,
    /// Long display form, e.g. "Monday, Jan 5".
    pub title: String,
    /// One row per registry habit, in registry order.
    pub habits: Vec<HabitDayRow>,
    /// Habits completed on the day.
    pub completed: usize,
    /// Registry size at projection time.
    pub total: usize,
}

impl DayDetail {
    /// Summary line, e.g. "2 of 4 completed".
    pub fn summary_text(&self) -> String {
        format!("{} of {} completed", self.completed, self.total)
    }
}

/// Build the per-habit breakdown for one day.
pub fn day_detail(habits: &[Habit], history: &HistoryLog, date: NaiveDate) -> DayDetail {
    let key = date_key(date);
    let rows: Vec<HabitDayRow> = habits
        .iter()
        .map(|h| HabitDayRow {
            name: h.name.clone(),
            done: history.contains(&h.id, &key),
        })
        .collect();
    let completed = rows.iter().filter(|r| r.done).count();

    DayDetail {
        date_key: key,
        title: display_long(date),
        habits: rows,
        completed,
        total: habits.len(),
    }
}
