//! Core engine for Tally.
//!
//! This module owns the source-of-truth state (habit registry, history log,
//! best-streak record, achievement unlock set) and the pure functions
//! derived from it (streaks, achievement evaluation). Read-model
//! projections live in `crate::projections`.

pub mod achievements;
pub mod dates;
pub mod engine;
pub mod habit;
pub mod history;
pub mod streak;

pub use achievements::{evaluate, Achievement, AchievementContext, AchievementKey};
pub use dates::{date_key, parse_date_key, today};
pub use engine::HabitEngine;
pub use habit::Habit;
pub use history::HistoryLog;
pub use streak::compute_streak;
