//! The habit engine: registry, history, best streaks, and unlocks.
//!
//! `HabitEngine` is the single owner of all mutable state. Every mutating
//! operation runs to completion in the same order: mutate state, persist
//! the touched keys, recompute derived fields, re-evaluate achievements.
//! Persistence is per-key with no cross-key rollback, so consistency is
//! eventual rather than atomic; the engine assumes one active session per
//! persisted store.
//!
//! Load is fail-open: a malformed persisted key is discarded and that
//! store reinitializes to its default state. Nothing on the load path is
//! fatal.

use std::collections::{BTreeSet, HashMap, HashSet};

use chrono::{Days, NaiveDate};

use crate::core::achievements::{evaluate, Achievement, AchievementContext, AchievementKey};
use crate::core::dates::{self, date_key};
use crate::core::habit::Habit;
use crate::core::history::HistoryLog;
use crate::core::streak::compute_streak;
use crate::error::{Recover, Result, TallyError};
use crate::reminder::ReminderSettings;
use crate::storage::PrefStore;

/// Persisted key for the habit registry.
pub const HABITS_KEY: &str = "habits_list_v1";
/// Persisted key for the history log.
pub const HISTORY_KEY: &str = "habit_history_v1";
/// Persisted key for the best-streak record.
pub const BEST_STREAKS_KEY: &str = "best_streaks_v1";
/// Persisted key for the achievement unlock set.
pub const ACHIEVEMENTS_KEY: &str = "achievements_v1";
/// Prefix of the legacy per-day done-set keys, read once for migration.
pub const LEGACY_DONE_PREFIX: &str = "done_";
/// Persisted key for the reminder enabled flag.
pub const REMINDER_ENABLED_KEY: &str = "reminder_enabled_v1";
/// Persisted key for the reminder time.
pub const REMINDER_TIME_KEY: &str = "reminder_time_v1";

/// Owner of the habit registry and all persisted tracking state.
pub struct HabitEngine<S: PrefStore> {
    store: S,
    today: NaiveDate,
    habits: Vec<Habit>,
    history: HistoryLog,
    best_streaks: HashMap<String, u32>,
    unlocked: BTreeSet<String>,
}

impl<S: PrefStore> HabitEngine<S> {
    /// Load the engine state for today's date.
    ///
    /// `starter_habits` is seeded only when no habit list has ever been
    /// persisted.
    pub fn load(store: S, starter_habits: &[String]) -> Result<Self> {
        Self::load_at(store, dates::today(), starter_habits)
    }

    /// Load the engine state pinned to an explicit date.
    pub fn load_at(store: S, today: NaiveDate, starter_habits: &[String]) -> Result<Self> {
        let mut engine = Self {
            store,
            today,
            habits: Vec::new(),
            history: HistoryLog::new(),
            best_streaks: HashMap::new(),
            unlocked: BTreeSet::new(),
        };

        engine.load_habits(starter_habits)?;
        engine.load_history()?;
        engine.load_best_streaks()?;
        engine.load_unlocked();

        engine.apply_today_done_from_history_or_legacy()?;
        engine.recompute_all()?;
        engine.evaluate_achievements()?;

        Ok(engine)
    }

    // ---- accessors ----

    /// The habit registry, in creation order.
    pub fn habits(&self) -> &[Habit] {
        &self.habits
    }

    /// The history log.
    pub fn history(&self) -> &HistoryLog {
        &self.history
    }

    /// The date this session is pinned to.
    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// Number of habits done today.
    pub fn done_today(&self) -> usize {
        self.habits.iter().filter(|h| h.done_today).count()
    }

    /// Look up a habit by id.
    pub fn habit(&self, id: &str) -> Option<&Habit> {
        self.habits.iter().find(|h| h.id == id)
    }

    /// Look up a habit by case-insensitive name.
    pub fn habit_by_name(&self, name: &str) -> Option<&Habit> {
        self.habits
            .iter()
            .find(|h| h.name.eq_ignore_ascii_case(name))
    }

    /// Best streak on record for a habit.
    pub fn best_streak(&self, id: &str) -> u32 {
        self.best_streaks.get(id).copied().unwrap_or(0)
    }

    /// The full achievement catalog with unlock flags, in catalog order.
    pub fn achievement_rows(&self) -> Vec<Achievement> {
        crate::core::achievements::ALL_ACHIEVEMENTS
            .iter()
            .map(|&key| Achievement::row(key, self.unlocked.contains(key.wire_name())))
            .collect()
    }

    /// Wire names of every achievement ever unlocked.
    pub fn unlocked(&self) -> &BTreeSet<String> {
        &self.unlocked
    }

    // ---- mutations ----

    /// Add a habit.
    ///
    /// The name is trimmed; empty names and case-insensitive duplicates are
    /// rejected with no state change. Returns the new habit's id.
    pub fn add_habit(&mut self, name: &str) -> Result<String> {
        let name = name.trim();
        if name.is_empty() {
            return Err(TallyError::EmptyHabitName);
        }
        if self.habit_by_name(name).is_some() {
            return Err(TallyError::duplicate_habit(name));
        }

        let habit = Habit::new(name);
        let id = habit.id.clone();

        self.history.ensure(&id);
        self.best_streaks.entry(id.clone()).or_insert(0);
        self.habits.push(habit);

        self.save_habits()?;
        self.save_history()?;
        self.save_best_streaks()?;
        self.evaluate_achievements()?;

        Ok(id)
    }

    /// Delete a habit, cascading to its history entry and best-streak
    /// record. An unknown id is a silent no-op; returns whether a habit
    /// was removed.
    pub fn remove_habit(&mut self, id: &str) -> Result<bool> {
        let Some(pos) = self.habits.iter().position(|h| h.id == id) else {
            tracing::debug!(habit_id = %id, "remove for unknown habit ignored");
            return Ok(false);
        };

        self.habits.remove(pos);
        self.history.remove_habit(id);
        self.best_streaks.remove(id);

        self.save_habits()?;
        self.save_history()?;
        self.save_best_streaks()?;
        self.evaluate_achievements()?;

        Ok(true)
    }

    /// Mark or unmark a habit done on a date (defaults to today).
    ///
    /// Idempotent on the history set. An unknown id is a silent no-op;
    /// returns whether a habit was found.
    pub fn set_done(&mut self, id: &str, date: Option<NaiveDate>, done: bool) -> Result<bool> {
        if self.habit(id).is_none() {
            tracing::debug!(habit_id = %id, "toggle for unknown habit ignored");
            return Ok(false);
        }

        let date = date.unwrap_or(self.today);
        let key = date_key(date);
        if done {
            self.history.record(id, &key);
        } else {
            self.history.clear(id, &key);
        }

        self.save_history()?;
        self.refresh_habit(id);
        self.save_best_streaks()?;
        self.evaluate_achievements()?;

        Ok(true)
    }

    /// Clear today's checkmark for every habit.
    pub fn reset_today(&mut self) -> Result<()> {
        let today_key = date_key(self.today);
        let ids: Vec<String> = self.habits.iter().map(|h| h.id.clone()).collect();

        for id in &ids {
            self.history.clear(id, &today_key);
            self.refresh_habit(id);
        }

        self.save_history()?;
        self.save_best_streaks()?;
        self.evaluate_achievements()?;

        Ok(())
    }

    /// Re-evaluate achievement conditions and persist any new unlocks.
    ///
    /// The unlock set is append-only: keys already present stay unlocked
    /// even if their condition no longer holds. Returns the newly
    /// unlocked keys.
    pub fn evaluate_achievements(&mut self) -> Result<Vec<AchievementKey>> {
        let ctx = AchievementContext {
            habit_count: self.habits.len(),
            done_today: self.done_today(),
            any_completion_ever: self.history.any_completion(),
            max_best_streak: self
                .habits
                .iter()
                .map(|h| h.best_streak)
                .max()
                .unwrap_or(0),
            week_ratio: self.week_ratio(),
        };

        let newly: Vec<AchievementKey> = evaluate(&ctx)
            .into_iter()
            .filter(|key| !self.unlocked.contains(key.wire_name()))
            .collect();

        if !newly.is_empty() {
            for key in &newly {
                self.unlocked.insert(key.wire_name().to_string());
            }
            self.save_unlocked()?;
        }

        Ok(newly)
    }

    // ---- reminder settings ----

    /// Load reminder settings, falling back to `default_time` when the
    /// stored time is absent or unparseable.
    pub fn reminder_settings(&self, default_time: &str) -> ReminderSettings {
        let enabled = self
            .store
            .get(REMINDER_ENABLED_KEY)
            .recover_default("loading reminder flag")
            .map(|v| v.trim() == "true")
            .unwrap_or(false);

        let time = self
            .store
            .get(REMINDER_TIME_KEY)
            .recover_default("loading reminder time")
            .unwrap_or_default();

        ReminderSettings::resolve(enabled, &time, default_time)
    }

    /// Persist reminder settings.
    pub fn save_reminder_settings(&self, settings: &ReminderSettings) -> Result<()> {
        self.store.set(
            REMINDER_ENABLED_KEY,
            if settings.enabled { "true" } else { "false" },
        )?;
        self.store.set(REMINDER_TIME_KEY, &settings.time_text())?;
        Ok(())
    }

    // ---- load ----

    fn load_habits(&mut self, starter_habits: &[String]) -> Result<()> {
        let raw = self.store.get(HABITS_KEY)?;

        let Some(json) = raw.filter(|s| !s.trim().is_empty()) else {
            // First run: seed the starter habits
            self.habits = starter_habits.iter().map(Habit::new).collect();
            return self.save_habits();
        };

        match serde_json::from_str::<Vec<Habit>>(&json) {
            Ok(list) => {
                self.habits = list;
                Ok(())
            }
            Err(err) => {
                tracing::warn!("discarding corrupt {}: {}", HABITS_KEY, err);
                self.store.remove(HABITS_KEY)?;
                self.habits = starter_habits.iter().map(Habit::new).collect();
                self.save_habits()
            }
        }
    }

    fn load_history(&mut self) -> Result<()> {
        let raw = self.store.get(HISTORY_KEY)?;

        self.history = match raw.filter(|s| !s.trim().is_empty()) {
            None => HistoryLog::new(),
            Some(json) => match HistoryLog::from_json(&json) {
                Ok(log) => log,
                Err(err) => {
                    tracing::warn!("discarding corrupt {}: {}", HISTORY_KEY, err);
                    self.store.remove(HISTORY_KEY)?;
                    HistoryLog::new()
                }
            },
        };

        for habit in &self.habits {
            self.history.ensure(&habit.id);
        }
        self.save_history()
    }

    fn load_best_streaks(&mut self) -> Result<()> {
        let raw = self.store.get(BEST_STREAKS_KEY)?;

        self.best_streaks = match raw.filter(|s| !s.trim().is_empty()) {
            None => HashMap::new(),
            Some(json) => match serde_json::from_str::<HashMap<String, u32>>(&json) {
                Ok(map) => map,
                Err(err) => {
                    tracing::warn!("discarding corrupt {}: {}", BEST_STREAKS_KEY, err);
                    self.store.remove(BEST_STREAKS_KEY)?;
                    HashMap::new()
                }
            },
        };

        for habit in &self.habits {
            self.best_streaks.entry(habit.id.clone()).or_insert(0);
        }
        self.save_best_streaks()
    }

    fn load_unlocked(&mut self) {
        let raw = self
            .store
            .get(ACHIEVEMENTS_KEY)
            .recover_default("loading achievements");

        self.unlocked = match raw.filter(|s| !s.trim().is_empty()) {
            None => BTreeSet::new(),
            Some(json) => match serde_json::from_str::<Vec<String>>(&json) {
                Ok(list) => list.into_iter().collect(),
                Err(err) => {
                    tracing::warn!("discarding corrupt {}: {}", ACHIEVEMENTS_KEY, err);
                    let _ = self.store.remove(ACHIEVEMENTS_KEY);
                    BTreeSet::new()
                }
            },
        };
    }

    /// Derive done-today flags, consulting the legacy per-day key once.
    ///
    /// When the history log carries any completion the legacy key is never
    /// read. Otherwise today's legacy done set (if present) is imported
    /// into the history log and superseded from then on.
    fn apply_today_done_from_history_or_legacy(&mut self) -> Result<()> {
        let today_key = date_key(self.today);

        if self.history.any_completion() {
            for habit in &mut self.habits {
                habit.done_today = self.history.contains(&habit.id, &today_key);
            }
            return Ok(());
        }

        let legacy_key = format!("{}{}", LEGACY_DONE_PREFIX, today_key);
        let Some(json) = self
            .store
            .get(&legacy_key)?
            .filter(|s| !s.trim().is_empty())
        else {
            return Ok(());
        };

        match serde_json::from_str::<HashSet<String>>(&json) {
            Ok(done_ids) => {
                for habit in &mut self.habits {
                    habit.done_today = done_ids.contains(&habit.id);
                    if habit.done_today {
                        self.history.record(&habit.id, &today_key);
                    }
                }
                self.save_history()
            }
            Err(err) => {
                tracing::warn!("discarding corrupt {}: {}", legacy_key, err);
                self.store.remove(&legacy_key)
            }
        }
    }

    fn recompute_all(&mut self) -> Result<()> {
        let ids: Vec<String> = self.habits.iter().map(|h| h.id.clone()).collect();
        for id in &ids {
            self.refresh_habit(id);
        }
        self.save_best_streaks()
    }

    /// Recompute one habit's streak, done-today flag, and best streak.
    ///
    /// The best streak is floored at its stored value: it only ever moves
    /// up, even when the current streak drops.
    fn refresh_habit(&mut self, id: &str) {
        let today_key = date_key(self.today);
        let streak = self
            .history
            .dates(id)
            .map(|dates| compute_streak(dates, self.today))
            .unwrap_or(0);
        let done_today = self.history.contains(id, &today_key);

        let best = self.best_streaks.entry(id.to_string()).or_insert(0);
        if streak > *best {
            *best = streak;
        }
        let best = *best;

        if let Some(habit) = self.habits.iter_mut().find(|h| h.id == id) {
            habit.streak = streak;
            habit.done_today = done_today;
            habit.best_streak = best;
        }
    }

    /// Trailing-7-day completion ratio: completed / (habit count × 7).
    /// Defined as 0 when the registry is empty.
    pub fn week_ratio(&self) -> f64 {
        let possible = self.habits.len() * 7;
        if possible == 0 {
            return 0.0;
        }

        let start = self.today - Days::new(6);
        let mut completed = 0usize;
        let mut day = start;
        while day <= self.today {
            let key = date_key(day);
            completed += self
                .habits
                .iter()
                .filter(|h| self.history.contains(&h.id, &key))
                .count();
            day = day + Days::new(1);
        }

        completed as f64 / possible as f64
    }

    // ---- save ----

    fn save_habits(&self) -> Result<()> {
        // Transient fields are skipped by the Habit serde attributes
        let json = serde_json::to_string(&self.habits)?;
        self.store.set(HABITS_KEY, &json)
    }

    fn save_history(&self) -> Result<()> {
        self.store.set(HISTORY_KEY, &self.history.to_json()?)
    }

    fn save_best_streaks(&self) -> Result<()> {
        let shape: std::collections::BTreeMap<&str, u32> = self
            .best_streaks
            .iter()
            .map(|(id, best)| (id.as_str(), *best))
            .collect();
        let json = serde_json::to_string(&shape)?;
        self.store.set(BEST_STREAKS_KEY, &json)
    }

    fn save_unlocked(&self) -> Result<()> {
        let list: Vec<&str> = self.unlocked.iter().map(String::as_str).collect();
        let json = serde_json::to_string(&list)?;
        self.store.set(ACHIEVEMENTS_KEY, &json)
    }
}
