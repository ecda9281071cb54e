//! CLI commands for Tally.
//!
//! One module per surface:
//! - **Tracking commands**: add, rm, done, reset (registry mutations)
//! - **View commands**: list, history, day, calendar, heatmap, stats
//! - **Collaborator commands**: export (weekly report), remind (settings)
//!
//! Every command follows the same shape: an `Options` struct, a
//! serializable `Output` with `success`/`failure` constructors, `run`, and
//! `format_output` honoring `--json` and `--quiet`.

pub mod add;
pub mod calendar;
pub mod day;
pub mod done;
pub mod export;
pub mod heatmap;
pub mod history;
pub mod list;
pub mod remind;
pub mod reset;
pub mod rm;
pub mod stats;

pub use add::AddCommand;
pub use calendar::CalendarCommand;
pub use day::DayCommand;
pub use done::DoneCommand;
pub use export::ExportCommand;
pub use heatmap::HeatmapCommand;
pub use history::HistoryCommand;
pub use list::ListCommand;
pub use remind::{RemindAction, RemindCommand};
pub use reset::ResetCommand;
pub use rm::RmCommand;
pub use stats::StatsCommand;

use crate::core::HabitEngine;
use crate::storage::PrefStore;

/// Resolve a user-supplied habit reference to an id.
///
/// Exact id match wins; otherwise the case-insensitive name lookup applies.
pub(crate) fn resolve_habit_id<S: PrefStore>(
    engine: &HabitEngine<S>,
    target: &str,
) -> Option<String> {
    if let Some(habit) = engine.habit(target) {
        return Some(habit.id.clone());
    }
    engine.habit_by_name(target).map(|h| h.id.clone())
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use crate::config::Config;
    use crate::storage::MemoryPrefStore;

    /// Empty in-memory store plus a config with no starter habits, so
    /// command tests start from a clean registry.
    pub fn setup() -> (Arc<MemoryPrefStore>, Config) {
        let store = Arc::new(MemoryPrefStore::new());
        let mut config = Config::default();
        config.defaults.starter_habits.clear();
        (store, config)
    }
}
