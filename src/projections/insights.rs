//! Weekly insights over the trailing 7-day window.
//!
//! Best/worst day are seeded with sentinel ratios (below any real ratio
//! for best, above for worst) and compared strictly in forward date order,
//! so ties keep the first day found. Habit tie-breaks prefer the higher
//! best streak, then the earlier registry position.

use chrono::{Days, NaiveDate};
use serde::Serialize;

use crate::core::dates::{date_key, display_short};
use crate::core::{Habit, HistoryLog};
use crate::projections::completed_on;

/// One day's score within the insights window.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DayScore {
    /// The `YYYY-MM-DD` key for the day.
    pub date_key: String,
    /// Short display form, e.g. "Mon, Jan 5".
    pub display_date: String,
    /// Habits completed on the day.
    pub completed: usize,
    /// Registry size at projection time.
    pub total: usize,
    /// completed / total; 0 when the registry is empty.
    pub ratio: f64,
}

/// The habit with the most completions in the window.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TopHabit {
    /// Habit display name.
    pub name: String,
    /// Days completed within the 7-day window.
    pub count: u32,
}

/// The habit with the longest current streak.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct StreakLeader {
    /// Habit display name.
    pub name: String,
    /// Current streak in days.
    pub streak: u32,
    /// Best streak on record.
    pub best_streak: u32,
}

/// Aggregates over the trailing 7-day window ending today.
///
/// The habit-level fields are `None` exactly when the registry is empty;
/// the corresponding texts render as "-".
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct WeeklyInsights {
    /// First day of the window.
    pub start: NaiveDate,
    /// Last day of the window (today).
    pub end: NaiveDate,
    /// Completions across all habits in the window.
    pub week_done: usize,
    /// Registry size × 7.
    pub week_possible: usize,
    /// week_done / week_possible; 0 when the registry is empty.
    pub week_ratio: f64,
    /// Highest-ratio day, first-found on ties.
    pub best_day: Option<DayScore>,
    /// Lowest-ratio day, first-found on ties.
    pub worst_day: Option<DayScore>,
    /// Most-completed habit in the window.
    pub top_habit: Option<TopHabit>,
    /// Longest current streak.
    pub streak_leader: Option<StreakLeader>,
}

impl WeeklyInsights {
    /// Header line, e.g. "Weekly insights (Aug 22 - Aug 28)".
    pub fn title(&self) -> String {
        format!(
            "Weekly insights ({} - {})",
            self.start.format("%b %-d"),
            self.end.format("%b %-d")
        )
    }

    /// Best-day line, e.g. "Fri, Aug 28 — 75% (3/4)"; "-" with no habits.
    pub fn best_day_text(&self) -> String {
        day_score_text(self.best_day.as_ref())
    }

    /// Worst-day line; "-" with no habits.
    pub fn worst_day_text(&self) -> String {
        day_score_text(self.worst_day.as_ref())
    }

    /// Top-habit line, e.g. "Read — 5/7 days"; "-" with no habits.
    pub fn top_habit_text(&self) -> String {
        match &self.top_habit {
            Some(top) => format!("{} — {}/7 days", top.name, top.count),
            None => "-".to_string(),
        }
    }

    /// Streak-leader line, e.g. "Read — Current 4, Best 9"; "-" with no habits.
    pub fn streak_leader_text(&self) -> String {
        match &self.streak_leader {
            Some(leader) => format!(
                "{} — Current {}, Best {}",
                leader.name, leader.streak, leader.best_streak
            ),
            None => "-".to_string(),
        }
    }
}

fn day_score_text(score: Option<&DayScore>) -> String {
    match score {
        Some(day) => format!(
            "{} — {}% ({}/{})",
            day.display_date,
            round_percent(day.ratio),
            day.completed,
            day.total
        ),
        None => "-".to_string(),
    }
}

fn round_percent(ratio: f64) -> i64 {
    (ratio * 100.0).round() as i64
}

/// Build the weekly insights for the window ending at `today`.
pub fn weekly_insights(habits: &[Habit], history: &HistoryLog, today: NaiveDate) -> WeeklyInsights {
    let start = today - Days::new(6);
    let total = habits.len();
    let week_possible = total * 7;

    let mut week_done = 0usize;
    // Sentinels sit outside [0, 1] so the first real day always wins
    let mut best_ratio = -1.0f64;
    let mut worst_ratio = 2.0f64;
    let mut best_day = None;
    let mut worst_day = None;

    for i in 0..7u64 {
        let date = start + Days::new(i);
        let key = date_key(date);
        let completed = completed_on(habits, history, &key);
        week_done += completed;

        let ratio = if total == 0 {
            0.0
        } else {
            completed as f64 / total as f64
        };

        let score = DayScore {
            date_key: key,
            display_date: display_short(date),
            completed,
            total,
            ratio,
        };

        if ratio > best_ratio {
            best_ratio = ratio;
            best_day = Some(score.clone());
        }
        if ratio < worst_ratio {
            worst_ratio = ratio;
            worst_day = Some(score);
        }
    }

    let week_ratio = if week_possible == 0 {
        0.0
    } else {
        week_done as f64 / week_possible as f64
    };

    let (best_day, worst_day, top_habit, streak_leader) = if total == 0 {
        (None, None, None, None)
    } else {
        let mut top: Option<(&Habit, u32)> = None;
        for habit in habits {
            let mut count = 0u32;
            for i in 0..7u64 {
                if history.contains(&habit.id, &date_key(start + Days::new(i))) {
                    count += 1;
                }
            }
            let better = match top {
                None => true,
                Some((held, held_count)) => {
                    count > held_count
                        || (count == held_count && habit.best_streak > held.best_streak)
                }
            };
            if better {
                top = Some((habit, count));
            }
        }

        let mut leader: Option<&Habit> = None;
        for habit in habits {
            let better = match leader {
                None => true,
                Some(held) => {
                    habit.streak > held.streak
                        || (habit.streak == held.streak && habit.best_streak > held.best_streak)
                }
            };
            if better {
                leader = Some(habit);
            }
        }

        (
            best_day,
            worst_day,
            top.map(|(habit, count)| TopHabit {
                name: habit.name.clone(),
                count,
            }),
            leader.map(|habit| StreakLeader {
                name: habit.name.clone(),
                streak: habit.streak,
                best_streak: habit.best_streak,
            }),
        )
    };

    WeeklyInsights {
        start,
        end: today,
        week_done,
        week_possible,
        week_ratio,
        best_day,
        worst_day,
        top_habit,
        streak_leader,
    }
}

/// Completion percentage text from counts; "0%" when total is 0.
pub fn percent_text(completed: usize, total: usize) -> String {
    if total == 0 {
        "0%".to_string()
    } else {
        format!(
            "{}%",
            round_percent(completed as f64 / total as f64)
        )
    }
}

/// Completion percentage text from a ratio.
pub fn ratio_percent_text(ratio: f64) -> String {
    format!("{}%", round_percent(ratio))
}

/// Best-habit line by best streak (ties by current streak, then registry
/// order), e.g. "Read (Best: 9)"; "-" with no habits.
pub fn best_habit_text(habits: &[Habit]) -> String {
    let mut best: Option<&Habit> = None;
    for habit in habits {
        let better = match best {
            None => true,
            Some(held) => {
                habit.best_streak > held.best_streak
                    || (habit.best_streak == held.best_streak && habit.streak > held.streak)
            }
        };
        if better {
            best = Some(habit);
        }
    }

    match best {
        Some(habit) => format!("{} (Best: {})", habit.name, habit.best_streak),
        None => "-".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projections::fixtures::two_habits;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn today() -> NaiveDate {
        date(2026, 8, 28)
    }

    #[test]
    fn test_empty_registry_is_all_dashes() {
        let insights = weekly_insights(&[], &HistoryLog::new(), today());

        assert_eq!(insights.week_done, 0);
        assert_eq!(insights.week_possible, 0);
        assert_eq!(insights.week_ratio, 0.0);
        assert!(insights.best_day.is_none());
        assert!(insights.worst_day.is_none());
        assert_eq!(insights.best_day_text(), "-");
        assert_eq!(insights.worst_day_text(), "-");
        assert_eq!(insights.top_habit_text(), "-");
        assert_eq!(insights.streak_leader_text(), "-");
    }

    #[test]
    fn test_window_boundaries() {
        let insights = weekly_insights(&[], &HistoryLog::new(), today());
        assert_eq!(insights.start, date(2026, 8, 22));
        assert_eq!(insights.end, today());
        assert_eq!(insights.title(), "Weekly insights (Aug 22 - Aug 28)");
    }

    #[test]
    fn test_best_and_worst_day() {
        let habits = two_habits();
        let mut history = HistoryLog::new();
        // Aug 25: both done; Aug 26: one done; rest: none
        history.record("h1", "2026-08-25");
        history.record("h2", "2026-08-25");
        history.record("h1", "2026-08-26");

        let insights = weekly_insights(&habits, &history, today());

        let best = insights.best_day.as_ref().unwrap();
        assert_eq!(best.date_key, "2026-08-25");
        assert_eq!(best.ratio, 1.0);

        // All-zero days tie; the first day of the window wins
        let worst = insights.worst_day.as_ref().unwrap();
        assert_eq!(worst.date_key, "2026-08-22");
        assert_eq!(worst.completed, 0);
    }

    #[test]
    fn test_tied_days_keep_first_in_forward_order() {
        let habits = two_habits();
        let mut history = HistoryLog::new();
        // Two perfect days; the earlier one is reported
        for key in ["2026-08-24", "2026-08-27"] {
            history.record("h1", key);
            history.record("h2", key);
        }

        let insights = weekly_insights(&habits, &history, today());
        assert_eq!(insights.best_day.unwrap().date_key, "2026-08-24");
    }

    #[test]
    fn test_week_totals() {
        let habits = two_habits();
        let mut history = HistoryLog::new();
        history.record("h1", "2026-08-25");
        history.record("h2", "2026-08-25");
        history.record("h1", "2026-08-26");
        // Outside the window
        history.record("h1", "2026-08-21");

        let insights = weekly_insights(&habits, &history, today());
        assert_eq!(insights.week_done, 3);
        assert_eq!(insights.week_possible, 14);
        assert!((insights.week_ratio - 3.0 / 14.0).abs() < 1e-9);
    }

    #[test]
    fn test_top_habit_by_count() {
        let habits = two_habits();
        let mut history = HistoryLog::new();
        history.record("h1", "2026-08-25");
        history.record("h2", "2026-08-25");
        history.record("h2", "2026-08-26");

        let insights = weekly_insights(&habits, &history, today());
        let top = insights.top_habit.unwrap();
        assert_eq!(top.name, "Workout");
        assert_eq!(top.count, 2);
    }

    #[test]
    fn test_top_habit_tie_breaks_on_best_streak() {
        let mut habits = two_habits();
        habits[1].best_streak = 5;
        let mut history = HistoryLog::new();
        history.record("h1", "2026-08-25");
        history.record("h2", "2026-08-26");

        let insights = weekly_insights(&habits, &history, today());
        assert_eq!(insights.top_habit.unwrap().name, "Workout");
    }

    #[test]
    fn test_streak_leader() {
        let mut habits = two_habits();
        habits[0].streak = 2;
        habits[0].best_streak = 4;
        habits[1].streak = 3;
        habits[1].best_streak = 3;

        let insights = weekly_insights(&habits, &HistoryLog::new(), today());
        let leader = insights.streak_leader.unwrap();
        assert_eq!(leader.name, "Workout");
        assert_eq!(leader.streak, 3);
        assert_eq!(leader.best_streak, 3);
    }

    #[test]
    fn test_streak_leader_tie_keeps_registry_order() {
        let mut habits = two_habits();
        habits[0].streak = 3;
        habits[0].best_streak = 3;
        habits[1].streak = 3;
        habits[1].best_streak = 3;

        let insights = weekly_insights(&habits, &HistoryLog::new(), today());
        assert_eq!(insights.streak_leader.unwrap().name, "Read");
    }

    #[test]
    fn test_text_renderings() {
        let habits = two_habits();
        let mut history = HistoryLog::new();
        history.record("h1", "2026-08-25");
        history.record("h2", "2026-08-25");

        let insights = weekly_insights(&habits, &history, today());
        // 2026-08-25 is a Tuesday
        assert_eq!(insights.best_day_text(), "Tue, Aug 25 — 100% (2/2)");
        assert_eq!(insights.top_habit_text(), "Read — 1/7 days");
    }

    #[test]
    fn test_percent_text() {
        assert_eq!(percent_text(0, 0), "0%");
        assert_eq!(percent_text(1, 2), "50%");
        assert_eq!(percent_text(2, 3), "67%");
        assert_eq!(ratio_percent_text(0.705), "71%");
    }

    #[test]
    fn test_best_habit_text() {
        assert_eq!(best_habit_text(&[]), "-");

        let mut habits = two_habits();
        habits[0].best_streak = 4;
        habits[1].best_streak = 9;
        assert_eq!(best_habit_text(&habits), "Workout (Best: 9)");

        // Tie on best streak: higher current streak wins
        habits[0].best_streak = 9;
        habits[0].streak = 5;
        habits[1].streak = 2;
        assert_eq!(best_habit_text(&habits), "Read (Best: 9)");
    }
}
