//! Achievement conditions and the built-in catalog.

use serde::{Deserialize, Serialize};

/// Broad family of an achievement, used for display grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AchievementKind {
    OneTime,
    Daily,
    Streak,
    Cumulative,
    Conditional,
    TimeBased,
}

/// Unlock rule of an achievement.
///
/// Serialized with an internal `type` tag, thresholds as sibling fields:
/// `{"type":"streak_days","days":3}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AchievementCondition {
    /// At least one day with a recorded drink.
    FirstRecord,
    /// Today's count reached the adjusted goal.
    DailyGoalComplete,
    /// The current streak reached `days`.
    StreakDays { days: u32 },
    /// The lifetime cup count reached `cups`.
    TotalCups { cups: u32 },
    /// Today's count reached `cups`.
    DailyCups { cups: u32 },
    /// The goal was reached on a day with a non zero weather adjustment.
    WeatherAdjustedGoal,
    /// A drink was recorded before 8 AM.
    MorningDrink,
}

/// Hour before which a drink counts as a morning drink.
pub const MORNING_DRINK_HOUR: u32 = 8;

/// Everything a condition needs to be evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EvaluationContext {
    pub total_cups: u32,
    pub streak_days: u32,
    pub today_count: u32,
    pub adjusted_goal: u32,
    pub weather_adjustment: i32,
    pub has_drink_today: bool,
    /// Local hour of the evaluation, `0..24`.
    pub hour: u32,
    /// Number of days with at least one recorded drink.
    pub recorded_days: u32,
}

impl AchievementCondition {
    /// Returns whether the condition holds.
    pub fn is_met(&self, context: &EvaluationContext) -> bool {
        match *self {
            AchievementCondition::FirstRecord => context.recorded_days >= 1,
            AchievementCondition::DailyGoalComplete => {
                context.today_count >= context.adjusted_goal
            }
            AchievementCondition::StreakDays { days } => context.streak_days >= days,
            AchievementCondition::TotalCups { cups } => context.total_cups >= cups,
            AchievementCondition::DailyCups { cups } => context.today_count >= cups,
            AchievementCondition::WeatherAdjustedGoal => {
                context.weather_adjustment != 0 && context.today_count >= context.adjusted_goal
            }
            AchievementCondition::MorningDrink => {
                context.hour < MORNING_DRINK_HOUR && context.has_drink_today
            }
        }
    }

    /// Numeric threshold of the condition, 1 for boolean conditions.
    pub fn target(&self) -> u32 {
        match *self {
            AchievementCondition::StreakDays { days } => days,
            AchievementCondition::TotalCups { cups } | AchievementCondition::DailyCups { cups } => {
                cups
            }
            _ => 1,
        }
    }
}

/// Static description of a catalog entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AchievementDefinition {
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub kind: AchievementKind,
    pub condition: AchievementCondition,
}

/// Returns the built-in catalog, in evaluation order.
pub fn catalog() -> Vec<AchievementDefinition> {
    vec![
        AchievementDefinition {
            name: "First Sip",
            description: "Record your first drink",
            icon: "🥛",
            kind: AchievementKind::OneTime,
            condition: AchievementCondition::FirstRecord,
        },
        AchievementDefinition {
            name: "Goal Getter",
            description: "Reach your daily goal",
            icon: "🎯",
            kind: AchievementKind::Daily,
            condition: AchievementCondition::DailyGoalComplete,
        },
        AchievementDefinition {
            name: "On a Roll",
            description: "Drink water 3 days in a row",
            icon: "📅",
            kind: AchievementKind::Streak,
            condition: AchievementCondition::StreakDays { days: 3 },
        },
        AchievementDefinition {
            name: "Cup Collector",
            description: "Drink 50 cups in total",
            icon: "👑",
            kind: AchievementKind::Cumulative,
            condition: AchievementCondition::TotalCups { cups: 50 },
        },
        AchievementDefinition {
            name: "Weather Wise",
            description: "Reach a weather adjusted goal",
            icon: "🌤️",
            kind: AchievementKind::Conditional,
            condition: AchievementCondition::WeatherAdjustedGoal,
        },
        AchievementDefinition {
            name: "Steady Star",
            description: "Drink water 7 days in a row",
            icon: "⭐",
            kind: AchievementKind::Streak,
            condition: AchievementCondition::StreakDays { days: 7 },
        },
        AchievementDefinition {
            name: "Hydration Champion",
            description: "Drink 12 cups in a single day",
            icon: "🏆",
            kind: AchievementKind::Daily,
            condition: AchievementCondition::DailyCups { cups: 12 },
        },
        AchievementDefinition {
            name: "Early Bird",
            description: "Record a drink before 8 AM",
            icon: "🌅",
            kind: AchievementKind::TimeBased,
            condition: AchievementCondition::MorningDrink,
        },
    ]
}
