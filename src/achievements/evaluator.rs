//! Pure evaluation of achievements against accumulated statistics.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use log::debug;

use crate::{
    achievements::{AchievementCondition, EvaluationContext},
    records::round_to_one_decimal,
    store::{Achievement, DailyRecord},
};

/// Lifetime statistics used by achievements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UserStats {
    pub total_cups: u32,
    pub streak_days: u32,
    pub today_count: u32,
    pub has_drink_today: bool,
    pub total_records: u32,
    /// Days with at least one drink.
    pub recorded_days: u32,
}

/// Progress of a single achievement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AchievementProgress {
    pub current: u32,
    pub target: u32,
    /// Percentage, capped at 100 and rounded to one decimal.
    pub percent: f64,
    pub unlocked: bool,
}

/// Returns the achievements that are still locked and whose condition now holds.
///
/// The result keeps the order of `achievements`.
pub fn evaluate<'a>(
    achievements: &'a [Achievement],
    context: &EvaluationContext,
) -> Vec<&'a Achievement> {
    let qualifying: Vec<&Achievement> = achievements
        .iter()
        .filter(|a| !a.is_unlocked())
        .filter(|a| a.condition.is_met(context))
        .collect();

    debug!(
        "{} achievements qualify with context {:?}",
        qualifying.len(),
        context
    );

    qualifying
}

/// Counts consecutive days ending at `today` that have at least one drink.
///
/// Dates are deduplicated and walked backward from `today`; the walk stops at
/// the first missing day. Without a drink today the streak is zero.
pub fn calculate_streak_days(records: &[DailyRecord], today: NaiveDate) -> u32 {
    let drink_days: BTreeSet<NaiveDate> = records
        .iter()
        .filter(|r| r.cups_drunk > 0)
        .map(|r| r.date)
        .collect();

    let mut streak = 0;
    let mut expected = today;
    for date in drink_days.iter().rev().skip_while(|d| **d > today) {
        if *date != expected {
            break;
        }
        streak += 1;
        match expected.pred_opt() {
            Some(previous) => expected = previous,
            None => break,
        }
    }

    streak
}

/// Aggregates the lifetime statistics of `records`.
pub fn calculate_user_stats(records: &[DailyRecord], today: NaiveDate) -> UserStats {
    let today_count = records
        .iter()
        .find(|r| r.date == today)
        .map(|r| r.cups_drunk)
        .unwrap_or(0);

    UserStats {
        total_cups: records.iter().map(|r| r.cups_drunk).sum(),
        streak_days: calculate_streak_days(records, today),
        today_count,
        has_drink_today: today_count > 0,
        total_records: records.len() as u32,
        recorded_days: records.iter().filter(|r| r.cups_drunk > 0).count() as u32,
    }
}

/// Computes how far an achievement is from being unlocked.
pub fn progress(achievement: &Achievement, stats: &UserStats) -> AchievementProgress {
    let unlocked = achievement.is_unlocked();
    let current = match achievement.condition {
        AchievementCondition::TotalCups { .. } => stats.total_cups,
        AchievementCondition::StreakDays { .. } => stats.streak_days,
        AchievementCondition::DailyCups { .. } => stats.today_count,
        _ => u32::from(unlocked),
    };
    let target = achievement.condition.target().max(1);

    AchievementProgress {
        current,
        target,
        percent: round_to_one_decimal((current as f64 / target as f64 * 100.0).min(100.0)),
        unlocked,
    }
}
