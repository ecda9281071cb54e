//! Trailing 90-day heatmap projection.

use chrono::{Days, NaiveDate};
use serde::Serialize;

use crate::core::dates::date_key;
use crate::core::{Habit, HistoryLog};
use crate::projections::completed_on;

/// Length of the heatmap window in days.
pub const HEATMAP_DAYS: u64 = 90;

/// Intensity band for a heatmap day.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum HeatLevel {
    /// No completions, or nothing to complete.
    None,
    /// Ratio above zero.
    Low,
    /// Ratio at least 0.3.
    Medium,
    /// Ratio at least 0.6.
    Good,
    /// Every habit completed.
    Full,
}

impl HeatLevel {
    /// Band a day's counts. An empty registry always bands to `None`.
    pub fn for_counts(completed: usize, total: usize) -> Self {
        if total == 0 {
            return Self::None;
        }
        let ratio = completed as f64 / total as f64;
        if ratio >= 1.0 {
            Self::Full
        } else if ratio >= 0.6 {
            Self::Good
        } else if ratio >= 0.3 {
            Self::Medium
        } else if ratio > 0.0 {
            Self::Low
        } else {
            Self::None
        }
    }

    /// Single-character glyph for terminal rendering.
    pub fn glyph(&self) -> char {
        match self {
            Self::None => '·',
            Self::Low => '░',
            Self::Medium => '▒',
            Self::Good => '▓',
            Self::Full => '█',
        }
    }
}

/// One day of the heatmap.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct HeatDay {
    /// The `YYYY-MM-DD` key for this day.
    pub date_key: String,
    /// Habits completed on this day.
    pub completed: usize,
    /// Registry size at projection time.
    pub total: usize,
    /// Intensity band.
    pub level: HeatLevel,
}

/// Build the 90-day window ending at `today` inclusive, ascending.
pub fn trailing_window(habits: &[Habit], history: &HistoryLog, today: NaiveDate) -> Vec<HeatDay> {
    let start = today - Days::new(HEATMAP_DAYS - 1);
    let total = habits.len();

    (0..HEATMAP_DAYS)
        .map(|i| {
            let key = date_key(start + Days::new(i));
            let completed = completed_on(habits, history, &key);
            HeatDay {
                date_key: key,
                completed,
                total,
                level: HeatLevel::for_counts(completed, total),
            }
        })
        .collect()
}
