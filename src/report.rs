//! Weekly report builder and the share sink seam.
//!
//! The report is a plain-text rendering of the weekly insights. Sharing is
//! a collaborator concern behind `ShareSink`: the builder hands over a
//! filename and an in-memory byte buffer, and the sink decides where the
//! bytes land.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::error::{Result, TallyError};
use crate::projections::WeeklyInsights;

/// Title line of the weekly report.
pub const REPORT_TITLE: &str = "Tally — Weekly Report";

/// Build the weekly report lines from the insights snapshot.
pub fn weekly_report_lines(insights: &WeeklyInsights) -> Vec<String> {
    let pct = if insights.week_possible == 0 {
        0
    } else {
        (insights.week_done as f64 * 100.0 / insights.week_possible as f64).round() as i64
    };

    vec![
        REPORT_TITLE.to_string(),
        format!(
            "{} - {}",
            insights.start.format("%b %-d, %Y"),
            insights.end.format("%b %-d, %Y")
        ),
        String::new(),
        format!(
            "Completion: {}% ({}/{})",
            pct, insights.week_done, insights.week_possible
        ),
        format!("Best day: {}", insights.best_day_text()),
        format!("Worst day: {}", insights.worst_day_text()),
        format!("Top habit: {}", insights.top_habit_text()),
        format!("Streak leader: {}", insights.streak_leader_text()),
        String::new(),
        "Keep going 🔥".to_string(),
    ]
}

/// File name for the report ending on a date, e.g.
/// "Tally_WeeklyReport_20260828.txt".
pub fn report_file_name(end: NaiveDate) -> String {
    format!("Tally_WeeklyReport_{}.txt", end.format("%Y%m%d"))
}

/// Destination for a rendered report.
pub trait ShareSink {
    /// Deliver the report bytes under the given file name and return where
    /// they landed.
    fn share(&self, file_name: &str, bytes: &[u8]) -> Result<PathBuf>;
}

/// A sink that writes the report into a directory.
#[derive(Debug, Clone)]
pub struct FileShareSink {
    dir: PathBuf,
}

impl FileShareSink {
    /// Create a sink writing into `dir`. The directory is created on demand.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The destination directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl ShareSink for FileShareSink {
    fn share(&self, file_name: &str, bytes: &[u8]) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir)
            .map_err(|e| TallyError::export(format!("{}: {}", self.dir.display(), e)))?;

        let path = self.dir.join(file_name);
        fs::write(&path, bytes)
            .map_err(|e| TallyError::export(format!("{}: {}", path.display(), e)))?;
        Ok(path)
    }
}
