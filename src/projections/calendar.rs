//! Monthly calendar grid projection.

use chrono::{Datelike, Days, NaiveDate};
use serde::Serialize;

use crate::core::dates::date_key;
use crate::core::{Habit, HistoryLog};
use crate::error::{Result, TallyError};
use crate::projections::completed_on;

/// Number of cells in a month grid: six full Monday-first weeks.
pub const GRID_CELLS: usize = 42;

/// One cell of the month grid.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CalendarCell {
    /// The `YYYY-MM-DD` key for this cell.
    pub date_key: String,
    /// Day of month (1-31).
    pub day_of_month: u32,
    /// Whether the cell falls inside the target month.
    pub in_month: bool,
    /// Habits completed on this day.
    pub completed: usize,
    /// Registry size at projection time.
    pub total: usize,
}

/// Build the 42-cell grid for a month.
///
/// The first cell is the Monday on or before the 1st; cells outside the
/// target month are included with `in_month` false. An invalid month is
/// rejected.
pub fn month_grid(
    habits: &[Habit],
    history: &HistoryLog,
    year: i32,
    month: u32,
) -> Result<Vec<CalendarCell>> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| TallyError::invalid_date(format!("{:04}-{:02}", year, month)))?;

    let offset = first.weekday().num_days_from_monday() as u64;
    let start = first - Days::new(offset);
    let total = habits.len();

    let mut cells = Vec::with_capacity(GRID_CELLS);
    for i in 0..GRID_CELLS as u64 {
        let date = start + Days::new(i);
        let key = date_key(date);

        cells.push(CalendarCell {
            completed: completed_on(habits, history, &key),
            date_key: key,
            day_of_month: date.day(),
            in_month: date.month() == month && date.year() == year,
            total,
        });
    }

    Ok(cells)
}
