//! History log for Tally.
//!
//! The history log is the source of truth for every derived statistic:
//! a mapping from habit id to the set of date keys on which that habit was
//! marked done. Date sets are logically unordered; `BTreeSet` keeps the
//! persisted arrays in ascending lexicographic (= chronological) order.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::error::Result;

/// Per-habit completion history.
///
/// Invariant: every habit id in the registry has a (possibly empty) entry
/// here, materialized explicitly via [`HistoryLog::ensure`] at habit-add
/// and load time. Query paths never mutate the log.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HistoryLog {
    entries: HashMap<String, BTreeSet<String>>,
}

impl HistoryLog {
    /// Create an empty history log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Materialize an empty entry for a habit if none exists.
    pub fn ensure(&mut self, habit_id: &str) {
        self.entries.entry(habit_id.to_string()).or_default();
    }

    /// Idempotently add a date key to a habit's set.
    pub fn record(&mut self, habit_id: &str, date_key: &str) {
        self.entries
            .entry(habit_id.to_string())
            .or_default()
            .insert(date_key.to_string());
    }

    /// Idempotently remove a date key from a habit's set.
    pub fn clear(&mut self, habit_id: &str, date_key: &str) {
        if let Some(set) = self.entries.get_mut(habit_id) {
            set.remove(date_key);
        }
    }

    /// Whether a habit was marked done on a date.
    pub fn contains(&self, habit_id: &str, date_key: &str) -> bool {
        self.entries
            .get(habit_id)
            .map(|set| set.contains(date_key))
            .unwrap_or(false)
    }

    /// The date set for a habit, if an entry exists.
    pub fn dates(&self, habit_id: &str) -> Option<&BTreeSet<String>> {
        self.entries.get(habit_id)
    }

    /// Remove a habit's entire entry (habit deletion cascade).
    pub fn remove_habit(&mut self, habit_id: &str) {
        self.entries.remove(habit_id);
    }

    /// Whether any habit has any completion recorded.
    pub fn any_completion(&self) -> bool {
        self.entries.values().any(|set| !set.is_empty())
    }

    /// Number of habit entries (including empty ones).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the log holds no entries at all.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Serialize to the persisted shape: habit id → ascending date-key array.
    ///
    /// `BTreeMap` keys and `BTreeSet` iteration give a stable, sorted
    /// document; the order is cosmetic only.
    pub fn to_json(&self) -> Result<String> {
        let shape: BTreeMap<&str, Vec<&str>> = self
            .entries
            .iter()
            .map(|(id, set)| (id.as_str(), set.iter().map(String::as_str).collect()))
            .collect();
        Ok(serde_json::to_string(&shape)?)
    }

    /// Deserialize from the persisted shape.
    ///
    /// Duplicate dates within an array collapse into the set.
    pub fn from_json(json: &str) -> Result<Self> {
        let shape: HashMap<String, Vec<String>> = serde_json::from_str(json)?;
        let entries = shape
            .into_iter()
            .map(|(id, dates)| (id, dates.into_iter().collect()))
            .collect();
        Ok(Self { entries })
    }
}
