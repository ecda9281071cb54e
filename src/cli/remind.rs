//! Remind command: daily reminder settings.

use serde::Serialize;

use crate::config::Config;
use crate::core::HabitEngine;
use crate::reminder::{
    parse_time, preview_text, reminder_body, LogScheduler, ReminderScheduler, ReminderSettings,
};
use crate::storage::PrefStore;

/// Notification title.
const REMINDER_TITLE: &str = "Tally";

/// Action for the remind command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemindAction {
    /// Show the current settings.
    Show,
    /// Enable the daily reminder.
    On,
    /// Disable the daily reminder.
    Off,
}

/// Options for the remind command.
#[derive(Debug, Clone, Default)]
pub struct RemindOptions {
    /// Output as JSON.
    pub json: bool,
    /// Suppress output.
    pub quiet: bool,
    /// Reminder time (`HH:MM`); keeps the stored time when absent.
    pub time: Option<String>,
}

/// Output format for the remind command.
#[derive(Debug, Clone, Serialize)]
pub struct RemindOutput {
    /// Whether the action was applied.
    pub success: bool,
    /// Whether the reminder is enabled.
    pub enabled: bool,
    /// The reminder time as `HH:MM`.
    pub time: String,
    /// Preview of the scheduled notification.
    pub preview: String,
    /// Error message if the action failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RemindOutput {
    /// Create a successful output.
    pub fn success(settings: &ReminderSettings, preview: impl Into<String>) -> Self {
        Self {
            success: true,
            enabled: settings.enabled,
            time: settings.time_text(),
            preview: preview.into(),
            error: None,
        }
    }

    /// Create a failed output.
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            enabled: false,
            time: String::new(),
            preview: String::new(),
            error: Some(error.into()),
        }
    }
}

/// The remind command implementation.
pub struct RemindCommand<S: PrefStore + Clone, R: ReminderScheduler = LogScheduler> {
    store: S,
    config: Config,
    scheduler: R,
}

impl<S: PrefStore + Clone> RemindCommand<S> {
    /// Create a remind command with the logging scheduler.
    pub fn new(store: S, config: Config) -> Self {
        Self::with_scheduler(store, config, LogScheduler)
    }
}

impl<S: PrefStore + Clone, R: ReminderScheduler> RemindCommand<S, R> {
    /// Create a remind command with an explicit scheduler.
    pub fn with_scheduler(store: S, config: Config, scheduler: R) -> Self {
        Self {
            store,
            config,
            scheduler,
        }
    }

    /// Run the remind command.
    ///
    /// Settings are persisted before the scheduler runs, so a scheduler
    /// failure never loses the saved state.
    pub fn run(&self, action: RemindAction, options: &RemindOptions) -> RemindOutput {
        let engine = match HabitEngine::load(
            self.store.clone(),
            &self.config.defaults.starter_habits,
        ) {
            Ok(engine) => engine,
            Err(e) => return RemindOutput::failure(e.to_string()),
        };

        let mut settings = engine.reminder_settings(&self.config.reminder.default_time);
        let total = engine.habits().len();
        let done = engine.done_today();

        match action {
            RemindAction::Show => {
                RemindOutput::success(&settings, preview_text(&settings, total, done))
            }
            RemindAction::On => {
                if let Some(text) = &options.time {
                    match parse_time(text) {
                        Some(time) => settings.time = time,
                        None => {
                            return RemindOutput::failure(format!("invalid time: {}", text))
                        }
                    }
                }
                settings.enabled = true;

                if let Err(e) = engine.save_reminder_settings(&settings) {
                    return RemindOutput::failure(e.to_string());
                }
                if let Err(e) = self.scheduler.schedule_daily(
                    settings.time,
                    REMINDER_TITLE,
                    &reminder_body(total, done),
                ) {
                    return RemindOutput::failure(format!("scheduling failed: {}", e));
                }

                RemindOutput::success(&settings, preview_text(&settings, total, done))
            }
            RemindAction::Off => {
                settings.enabled = false;

                if let Err(e) = engine.save_reminder_settings(&settings) {
                    return RemindOutput::failure(e.to_string());
                }
                if let Err(e) = self.scheduler.cancel() {
                    return RemindOutput::failure(format!("canceling failed: {}", e));
                }

                RemindOutput::success(&settings, preview_text(&settings, total, done))
            }
        }
    }

    /// Format output based on options.
    pub fn format_output(&self, output: &RemindOutput, options: &RemindOptions) -> String {
        if options.quiet {
            return String::new();
        }

        if options.json {
            serde_json::to_string_pretty(output).unwrap_or_else(|_| "{}".to_string())
        } else if output.success {
            let state = if output.enabled {
                format!("on at {}", output.time)
            } else {
                "off".to_string()
            };
            format!("Reminder is {}.\n{}\n", state, output.preview)
        } else {
            format!(
                "Remind failed: {}\n",
                output.error.as_deref().unwrap_or("unknown error")
            )
        }
    }
}
