//! Tally - a local daily habit tracker
//!
//! Tally keeps a habit registry and a per-habit completion history in a
//! simple key-value preferences store, derives streaks, achievements, and
//! weekly insights from that history, and exposes the whole thing through
//! a CLI. State loading is fail-open: corrupt persisted keys reset to
//! their defaults instead of blocking the user.

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod projections;
pub mod reminder;
pub mod report;
pub mod storage;

pub use config::Config;
pub use core::{Achievement, AchievementKey, Habit, HabitEngine, HistoryLog};
pub use error::{Recover, Result, TallyError};
pub use projections::{
    day_detail, day_summaries, month_grid, trailing_window, weekly_insights, CalendarCell,
    DayDetail, DaySummary, HeatDay, HeatLevel, WeeklyInsights,
};
pub use reminder::{LogScheduler, ReminderScheduler, ReminderSettings};
pub use report::{weekly_report_lines, FileShareSink, ShareSink};
pub use storage::{FilePrefStore, MemoryPrefStore, PrefStore};

// CLI commands
pub use cli::{
    AddCommand, CalendarCommand, DayCommand, DoneCommand, ExportCommand, HeatmapCommand,
    HistoryCommand, ListCommand, RemindCommand, ResetCommand, RmCommand, StatsCommand,
};
