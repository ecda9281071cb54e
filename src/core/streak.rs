//! Streak computation for Tally.
//!
//! A streak is the count of consecutive trailing days, ending today, on
//! which a habit was marked done. One missed day resets the count for all
//! days before it; the earlier history is preserved for statistics but no
//! longer counts toward the streak.

use std::collections::BTreeSet;

use chrono::{Days, NaiveDate};

use crate::core::dates::date_key;

/// Compute the current streak for a date set.
///
/// Walks backward one calendar day at a time starting at `today` and counts
/// consecutive days present in `dates`, stopping at the first missing day.
/// A missing `today` yields 0. No look-ahead, no gap tolerance.
pub fn compute_streak(dates: &BTreeSet<String>, today: NaiveDate) -> u32 {
    let mut streak = 0;
    let mut day = today;

    while dates.contains(&date_key(day)) {
        streak += 1;
        match day.checked_sub_days(Days::new(1)) {
            Some(prev) => day = prev,
            None => break,
        }
    }

    streak
}
