//! Achievement evaluation for Tally.
//!
//! Stateless predicate evaluation over an aggregate snapshot, each mapped
//! to a fixed achievement key. Unlocking is monotonic: the engine adds
//! newly satisfied keys to the persisted unlock set and never removes one,
//! even if the condition later becomes false.

use serde::{Deserialize, Serialize};

/// Keys for the fixed achievement catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AchievementKey {
    /// Any habit has at least one completion date ever.
    FirstCheckmark,
    /// Today has at least one habit and all habits are done today.
    PerfectDay,
    /// Max best streak across habits is at least 7.
    Streak7,
    /// Max best streak across habits is at least 30.
    Streak30,
    /// Habit count is at least 10.
    Habit10,
    /// Trailing-7-day completion ratio is at least 0.70.
    Week70,
}

/// All achievement keys in catalog order.
pub const ALL_ACHIEVEMENTS: [AchievementKey; 6] = [
    AchievementKey::FirstCheckmark,
    AchievementKey::PerfectDay,
    AchievementKey::Streak7,
    AchievementKey::Streak30,
    AchievementKey::Habit10,
    AchievementKey::Week70,
];

impl AchievementKey {
    /// The persisted wire name for this key.
    pub fn wire_name(&self) -> &'static str {
        match self {
            Self::FirstCheckmark => "FirstCheckmark",
            Self::PerfectDay => "PerfectDay",
            Self::Streak7 => "Streak7",
            Self::Streak30 => "Streak30",
            Self::Habit10 => "Habit10",
            Self::Week70 => "Week70",
        }
    }

    /// Parse a persisted wire name. Unknown names yield `None`.
    pub fn from_wire_name(name: &str) -> Option<Self> {
        match name {
            "FirstCheckmark" => Some(Self::FirstCheckmark),
            "PerfectDay" => Some(Self::PerfectDay),
            "Streak7" => Some(Self::Streak7),
            "Streak30" => Some(Self::Streak30),
            "Habit10" => Some(Self::Habit10),
            "Week70" => Some(Self::Week70),
            _ => None,
        }
    }

    /// Display title.
    pub fn title(&self) -> &'static str {
        match self {
            Self::FirstCheckmark => "First checkmark",
            Self::PerfectDay => "Perfect day",
            Self::Streak7 => "7-day streak",
            Self::Streak30 => "30-day streak",
            Self::Habit10 => "Habit builder",
            Self::Week70 => "Consistent week",
        }
    }

    /// Display description.
    pub fn description(&self) -> &'static str {
        match self {
            Self::FirstCheckmark => "Complete any habit at least once.",
            Self::PerfectDay => "Complete all habits in a single day.",
            Self::Streak7 => "Reach a 7-day streak on any habit.",
            Self::Streak30 => "Reach a 30-day streak on any habit.",
            Self::Habit10 => "Create 10 habits.",
            Self::Week70 => "Hit 70%+ completion in the last 7 days.",
        }
    }

    /// Display icon.
    pub fn icon(&self) -> &'static str {
        match self {
            Self::FirstCheckmark => "✅",
            Self::PerfectDay => "💯",
            Self::Streak7 => "🔥",
            Self::Streak30 => "🏆",
            Self::Habit10 => "🧱",
            Self::Week70 => "📈",
        }
    }
}

/// Aggregate state snapshot the predicates run against.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AchievementContext {
    /// Number of habits in the registry.
    pub habit_count: usize,
    /// Number of habits done today.
    pub done_today: usize,
    /// Whether any habit has any completion date ever.
    pub any_completion_ever: bool,
    /// Maximum best streak across all habits.
    pub max_best_streak: u32,
    /// Trailing-7-day completion ratio: completed / (habit_count × 7).
    /// Defined as 0 when the registry is empty.
    pub week_ratio: f64,
}

/// Evaluate which achievement conditions the snapshot satisfies.
///
/// Pure: returns every satisfied key regardless of prior unlocks. The
/// caller merges the result into the monotonic unlock set.
pub fn evaluate(ctx: &AchievementContext) -> Vec<AchievementKey> {
    let mut satisfied = Vec::new();

    if ctx.any_completion_ever {
        satisfied.push(AchievementKey::FirstCheckmark);
    }
    if ctx.habit_count > 0 && ctx.done_today == ctx.habit_count {
        satisfied.push(AchievementKey::PerfectDay);
    }
    if ctx.max_best_streak >= 7 {
        satisfied.push(AchievementKey::Streak7);
    }
    if ctx.max_best_streak >= 30 {
        satisfied.push(AchievementKey::Streak30);
    }
    if ctx.habit_count >= 10 {
        satisfied.push(AchievementKey::Habit10);
    }
    if ctx.week_ratio >= 0.70 {
        satisfied.push(AchievementKey::Week70);
    }

    satisfied
}

/// A catalog row for display: a key plus its unlocked state.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Achievement {
    /// Wire name of the achievement.
    pub key: String,
    /// Display title.
    pub title: String,
    /// Display description.
    pub description: String,
    /// Display icon.
    pub icon: String,
    /// Whether the achievement has ever been unlocked.
    pub unlocked: bool,
}

impl Achievement {
    /// Build a catalog row for a key.
    pub fn row(key: AchievementKey, unlocked: bool) -> Self {
        Self {
            key: key.wire_name().to_string(),
            title: key.title().to_string(),
            description: key.description().to_string(),
            icon: key.icon().to_string(),
            unlocked,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_name_round_trip() {
        for key in ALL_ACHIEVEMENTS {
            assert_eq!(AchievementKey::from_wire_name(key.wire_name()), Some(key));
        }
        assert_eq!(AchievementKey::from_wire_name("Unknown"), None);
    }

    #[test]
    fn test_empty_context_satisfies_nothing() {
        // week_ratio 0, no habits, no completions
        assert!(evaluate(&AchievementContext::default()).is_empty());
    }

    #[test]
    fn test_first_checkmark() {
        let ctx = AchievementContext {
            habit_count: 1,
            any_completion_ever: true,
            ..Default::default()
        };
        assert!(evaluate(&ctx).contains(&AchievementKey::FirstCheckmark));
    }

    #[test]
    fn test_perfect_day_requires_habits() {
        // Zero habits: done == count but no PerfectDay
        let ctx = AchievementContext::default();
        assert!(!evaluate(&ctx).contains(&AchievementKey::PerfectDay));

        let ctx = AchievementContext {
            habit_count: 3,
            done_today: 3,
            any_completion_ever: true,
            ..Default::default()
        };
        assert!(evaluate(&ctx).contains(&AchievementKey::PerfectDay));

        let ctx = AchievementContext {
            habit_count: 3,
            done_today: 2,
            any_completion_ever: true,
            ..Default::default()
        };
        assert!(!evaluate(&ctx).contains(&AchievementKey::PerfectDay));
    }

    #[test]
    fn test_streak_thresholds() {
        let ctx = AchievementContext {
            habit_count: 1,
            max_best_streak: 7,
            ..Default::default()
        };
        let satisfied = evaluate(&ctx);
        assert!(satisfied.contains(&AchievementKey::Streak7));
        assert!(!satisfied.contains(&AchievementKey::Streak30));

        let ctx = AchievementContext {
            habit_count: 1,
            max_best_streak: 30,
            ..Default::default()
        };
        let satisfied = evaluate(&ctx);
        assert!(satisfied.contains(&AchievementKey::Streak7));
        assert!(satisfied.contains(&AchievementKey::Streak30));
    }

    #[test]
    fn test_habit10_threshold() {
        let ctx = AchievementContext {
            habit_count: 9,
            ..Default::default()
        };
        assert!(!evaluate(&ctx).contains(&AchievementKey::Habit10));

        let ctx = AchievementContext {
            habit_count: 10,
            ..Default::default()
        };
        assert!(evaluate(&ctx).contains(&AchievementKey::Habit10));
    }

    #[test]
    fn test_week70_threshold() {
        let ctx = AchievementContext {
            habit_count: 2,
            week_ratio: 0.69,
            ..Default::default()
        };
        assert!(!evaluate(&ctx).contains(&AchievementKey::Week70));

        let ctx = AchievementContext {
            habit_count: 2,
            week_ratio: 0.70,
            ..Default::default()
        };
        assert!(evaluate(&ctx).contains(&AchievementKey::Week70));
    }

    #[test]
    fn test_catalog_row() {
        let row = Achievement::row(AchievementKey::Streak7, true);
        assert_eq!(row.key, "Streak7");
        assert_eq!(row.title, "7-day streak");
        assert!(row.unlocked);
    }

    #[test]
    fn test_catalog_metadata_is_distinct() {
        let titles: std::collections::HashSet<_> =
            ALL_ACHIEVEMENTS.iter().map(|k| k.title()).collect();
        assert_eq!(titles.len(), ALL_ACHIEVEMENTS.len());
    }
}
