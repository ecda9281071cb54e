//! Habit model for Tally.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single tracked habit.
///
/// Only `id` and `name` are persisted. The done-today flag and the streak
/// fields are live per-session state, recomputed from the history log at
/// load time and after every mutation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Habit {
    /// Opaque unique identifier, assigned at creation, immutable.
    pub id: String,
    /// Display name, unique case-insensitively within the registry.
    pub name: String,
    /// Whether the habit is marked done for today. Derived, not persisted.
    #[serde(skip)]
    pub done_today: bool,
    /// Current streak in days, ending today. Derived, not persisted.
    #[serde(skip)]
    pub streak: u32,
    /// Best streak ever observed. Cached from the best-streak record.
    #[serde(skip)]
    pub best_streak: u32,
}

impl Habit {
    /// Create a new habit with a fresh id and zeroed derived state.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            done_today: false,
            streak: 0,
            best_streak: 0,
        }
    }
}
