//! Reminder settings and the scheduler collaborator seam.
//!
//! The engine persists the reminder toggle and time; actual notification
//! delivery belongs to an external collaborator behind the
//! `ReminderScheduler` trait. Scheduler failures are caught at the call
//! site and surfaced as a transient status message; core state is never
//! affected.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Time format for the persisted reminder time.
pub const TIME_FORMAT: &str = "%H:%M";

/// Daily reminder settings.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ReminderSettings {
    /// Whether the daily reminder is enabled.
    pub enabled: bool,
    /// Local wall-clock time the reminder fires.
    pub time: NaiveTime,
}

impl ReminderSettings {
    /// Build settings from persisted values.
    ///
    /// An absent or unparseable stored time falls back to `default_time`;
    /// an unparseable default falls back to 20:00.
    pub fn resolve(enabled: bool, stored_time: &str, default_time: &str) -> Self {
        let fallback = parse_time(default_time)
            .unwrap_or_else(|| NaiveTime::from_hms_opt(20, 0, 0).expect("valid literal time"));
        let time = parse_time(stored_time).unwrap_or(fallback);
        Self { enabled, time }
    }

    /// The persisted "HH:MM" form of the reminder time.
    pub fn time_text(&self) -> String {
        self.time.format(TIME_FORMAT).to_string()
    }
}

/// Parse an "HH:MM" time string.
pub fn parse_time(text: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(text.trim(), TIME_FORMAT).ok()
}

/// Notification scheduler collaborator.
///
/// Implementations schedule one repeating daily notification; scheduling
/// again replaces the previous one.
pub trait ReminderScheduler {
    /// Schedule the daily reminder.
    fn schedule_daily(&self, time: NaiveTime, title: &str, body: &str) -> Result<()>;

    /// Cancel any scheduled reminder.
    fn cancel(&self) -> Result<()>;
}

/// A scheduler that only logs.
///
/// Platform notification delivery is outside this crate; this keeps the
/// seam exercised without one.
#[derive(Debug, Default, Clone)]
pub struct LogScheduler;

impl ReminderScheduler for LogScheduler {
    fn schedule_daily(&self, time: NaiveTime, title: &str, body: &str) -> Result<()> {
        tracing::info!(
            time = %time.format(TIME_FORMAT),
            title,
            body,
            "daily reminder scheduled"
        );
        Ok(())
    }

    fn cancel(&self) -> Result<()> {
        tracing::info!("daily reminder canceled");
        Ok(())
    }
}

/// Notification body for today's remaining habit count.
pub fn reminder_body(total: usize, done: usize) -> String {
    let left = total.saturating_sub(done);
    if left == 0 {
        "Perfect day! Keep it going 💯".to_string()
    } else {
        format!("You have {} habits left today — keep the streak alive 🔥", left)
    }
}

/// Preview line shown on the reminder settings surface.
pub fn preview_text(settings: &ReminderSettings, total: usize, done: usize) -> String {
    if !settings.enabled {
        return "Reminder is disabled.".to_string();
    }
    format!("At {}: {}", settings.time_text(), reminder_body(total, done))
}
