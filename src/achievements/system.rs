//! Persistent achievement tracking.

use std::sync::Arc;

use chrono::{DateTime, Local, Timelike};
use log::{info, warn};

use crate::{
    achievements::{
        AchievementProgress, EvaluationContext, UserStats, calculate_user_stats, catalog,
        evaluate, progress,
    },
    error::Result,
    store::{Achievement, DailyRecord, Store},
};

/// Seeds the catalog and unlocks achievements as the user drinks.
pub struct AchievementSystem<S: Store> {
    store: Arc<S>,
}

impl<S: Store> AchievementSystem<S> {
    pub fn new(store: Arc<S>) -> Self {
        AchievementSystem { store }
    }

    /// Inserts the catalog entries that are not stored yet.
    ///
    /// Entries are matched by name so unlock timestamps survive restarts.
    pub async fn init(&self) -> Result<()> {
        let mut added = 0;
        for definition in catalog() {
            if self
                .store
                .get_achievement_by_name(definition.name)
                .await?
                .is_none()
            {
                self.store.add_achievement(&definition).await?;
                added += 1;
            }
        }

        if added > 0 {
            info!("seeded {} achievements", added);
        }
        Ok(())
    }

    /// Evaluates every locked achievement and unlocks those that qualify.
    ///
    /// # Arguments
    ///
    /// * `today` - Today's record, whose goal and adjustment are used
    /// * `now` - Evaluation time, stored as the unlock timestamp
    ///
    /// # Returns
    ///
    /// The achievements unlocked by this call, in catalog order.
    pub async fn check_and_unlock(
        &self,
        today: &DailyRecord,
        now: DateTime<Local>,
    ) -> Result<Vec<Achievement>> {
        let records = self.store.get_all_records().await?;
        let stats = calculate_user_stats(&records, today.date);
        let today_stats = today.stats();

        let context = EvaluationContext {
            total_cups: stats.total_cups,
            streak_days: stats.streak_days,
            today_count: today.cups_drunk,
            adjusted_goal: today_stats.adjusted_goal,
            weather_adjustment: today.weather_adjustment,
            has_drink_today: today.cups_drunk > 0,
            hour: now.hour(),
            recorded_days: stats.recorded_days,
        };

        let achievements = self.store.get_achievements().await?;
        let mut unlocked = Vec::new();
        for achievement in evaluate(&achievements, &context) {
            if self.store.unlock_achievement(achievement.id, now).await? {
                info!("achievement unlocked: {}", achievement.name);
                unlocked.push(Achievement {
                    unlocked_at: Some(now),
                    ..achievement.clone()
                });
            } else {
                warn!("achievement {} was already unlocked", achievement.name);
            }
        }

        Ok(unlocked)
    }

    /// Computes the lifetime statistics as of `today`.
    pub async fn user_stats(&self, today: chrono::NaiveDate) -> Result<UserStats> {
        let records = self.store.get_all_records().await?;
        Ok(calculate_user_stats(&records, today))
    }

    pub async fn unlocked(&self) -> Result<Vec<Achievement>> {
        Ok(self
            .store
            .get_achievements()
            .await?
            .into_iter()
            .filter(Achievement::is_unlocked)
            .collect())
    }

    /// Returns every achievement with its progress as of `today`.
    pub async fn progress_report(
        &self,
        today: chrono::NaiveDate,
    ) -> Result<Vec<(Achievement, AchievementProgress)>> {
        let stats = self.user_stats(today).await?;
        Ok(self
            .store
            .get_achievements()
            .await?
            .into_iter()
            .map(|a| {
                let p = progress(&a, &stats);
                (a, p)
            })
            .collect())
    }
}
