//! Today's hydration record.
//!
//! [`WaterRecorder`] owns the record of the current day and applies every
//! user mutation to it: validate, write through the store, then swap the
//! in-memory copy. A rejected or failed write leaves the in-memory record as it
//! was.

use std::sync::Arc;

use chrono::NaiveDate;
use log::{debug, info, warn};
use tokio::sync::broadcast;

use crate::{
    error::{Result, ValidationError},
    events::{AppEvent, publish},
    records::HydrationStats,
    store::{DailyRecord, SettingKey, SettingValue, Store, get_or_create_record},
    validation::{validate_adjustment, validate_cups, validate_goal},
};

/// Snapshot of today's progress.
#[derive(Debug, Clone, PartialEq)]
pub struct RecorderState {
    pub record: DailyRecord,
    pub stats: HydrationStats,
}

/// Records drinks for the current day.
pub struct WaterRecorder<S: Store> {
    store: Arc<S>,
    today: DailyRecord,
    events: broadcast::Sender<AppEvent>,
}

impl<S: Store> WaterRecorder<S> {
    /// Loads (or creates) the record of `today` using the stored daily goal.
    pub async fn new(
        store: Arc<S>,
        events: broadcast::Sender<AppEvent>,
        today: NaiveDate,
    ) -> Result<Self> {
        let today = Self::load_day(&store, today).await?;
        info!("loaded today's record {}", today);

        Ok(WaterRecorder {
            store,
            today,
            events,
        })
    }

    async fn load_day(store: &Arc<S>, date: NaiveDate) -> Result<DailyRecord> {
        let settings = store.get_settings().await?;
        get_or_create_record(store.as_ref(), date, settings.daily_goal).await
    }

    /// Switches to the record of `today` when the calendar day changed.
    pub async fn ensure_today(&mut self, today: NaiveDate) -> Result<()> {
        if self.today.date == today {
            return Ok(());
        }

        info!("day changed from {} to {}", self.today.date, today);
        self.today = Self::load_day(&self.store, today).await?;
        Ok(())
    }

    /// Returns today's record and statistics.
    pub fn state(&self) -> RecorderState {
        RecorderState {
            record: self.today.clone(),
            stats: self.today.stats(),
        }
    }

    /// Adds one cup to today's count.
    pub async fn record_drink(&mut self) -> Result<HydrationStats> {
        let cups = validate_cups(self.today.cups_drunk as i64 + 1)?;
        self.save_cups(cups).await
    }

    /// Removes the last recorded cup.
    pub async fn undo_drink(&mut self) -> Result<HydrationStats> {
        if self.today.cups_drunk == 0 {
            return Err(ValidationError::NothingToUndo.into());
        }
        self.save_cups(self.today.cups_drunk - 1).await
    }

    /// Overwrites today's count.
    pub async fn set_drink_count(&mut self, cups: i64) -> Result<HydrationStats> {
        let cups = validate_cups(cups)?;
        self.save_cups(cups).await
    }

    /// Clears today's count.
    pub async fn reset_today(&mut self) -> Result<HydrationStats> {
        self.save_cups(0).await
    }

    /// Changes the base daily goal.
    ///
    /// The new goal is applied to today's record, then stored as the
    /// `daily_goal` setting. When the setting cannot be stored the record is
    /// put back, so both stay on the previous goal.
    pub async fn update_daily_goal(&mut self, goal: i64) -> Result<HydrationStats> {
        let goal = validate_goal(goal)?;
        let previous = self.today.clone();

        let stats = self
            .save(DailyRecord {
                goal,
                ..self.today.clone()
            })
            .await?;

        if let Err(e) = self
            .store
            .update_setting(SettingKey::DailyGoal, SettingValue::Int(goal as i64))
            .await
        {
            if let Err(restore_error) = self.save(previous).await {
                warn!("failed to restore today's goal: {}", restore_error);
            }
            return Err(e);
        }

        info!("daily goal updated to {}", goal);
        publish(&self.events, AppEvent::DailyGoalUpdated { daily_goal: goal });
        Ok(stats)
    }

    /// Changes today's weather adjustment.
    pub async fn update_weather_adjustment(&mut self, adjustment: i64) -> Result<HydrationStats> {
        let adjustment = validate_adjustment(adjustment)?;

        let stats = self
            .save(DailyRecord {
                weather_adjustment: adjustment,
                ..self.today.clone()
            })
            .await?;

        info!("weather adjustment updated to {}", adjustment);
        Ok(stats)
    }

    async fn save_cups(&mut self, cups: u32) -> Result<HydrationStats> {
        let stats = self
            .save(DailyRecord {
                cups_drunk: cups,
                ..self.today.clone()
            })
            .await?;

        debug!("cups for {} set to {}", self.today.date, cups);
        publish(&self.events, AppEvent::DrinkRecorded { cups_drunk: cups });
        Ok(stats)
    }

    async fn save(&mut self, record: DailyRecord) -> Result<HydrationStats> {
        let saved = self.store.update_record(&record).await?;
        self.today = saved;
        Ok(self.today.stats())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{HydrationError, StoreError};
    use crate::events;
    use crate::store::{JsonStore, MockStore, Settings};
    use chrono::Local;
    use tempfile::TempDir;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 7, day).unwrap()
    }

    async fn create_recorder(dir: &TempDir) -> (WaterRecorder<JsonStore>, Arc<JsonStore>) {
        let path = dir.path().join("store.json").to_str().unwrap().to_string();
        let store = Arc::new(JsonStore::open(path).await.unwrap());
        let recorder = WaterRecorder::new(Arc::clone(&store), events::channel(), date(10))
            .await
            .unwrap();
        (recorder, store)
    }

    #[tokio::test]
    async fn test_new_creates_today_with_stored_goal() {
        let dir = TempDir::new().unwrap();
        let (recorder, store) = create_recorder(&dir).await;

        let state = recorder.state();
        assert_eq!(state.record.date, date(10));
        assert_eq!(state.record.goal, 8);
        assert_eq!(state.record.cups_drunk, 0);
        assert!(store.get_record_by_date(date(10)).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_drinking_to_the_goal() {
        let dir = TempDir::new().unwrap();
        let (mut recorder, store) = create_recorder(&dir).await;

        let stats = recorder.record_drink().await.unwrap();
        assert_eq!(stats.completion_rate, 12.5);
        assert_eq!(stats.remaining_cups, 7);

        for _ in 0..7 {
            recorder.record_drink().await.unwrap();
        }
        let state = recorder.state();
        assert_eq!(state.record.cups_drunk, 8);
        assert_eq!(state.stats.completion_rate, 100.0);
        assert_eq!(state.stats.remaining_cups, 0);

        let stored = store.get_record_by_date(date(10)).await.unwrap().unwrap();
        assert_eq!(stored.cups_drunk, 8);
    }

    #[tokio::test]
    async fn test_record_drink_publishes_event() {
        let dir = TempDir::new().unwrap();
        let (mut recorder, _store) = create_recorder(&dir).await;
        let mut receiver = recorder.events.subscribe();

        recorder.record_drink().await.unwrap();

        assert_eq!(
            receiver.recv().await.unwrap(),
            AppEvent::DrinkRecorded { cups_drunk: 1 }
        );
    }

    #[tokio::test]
    async fn test_undo_at_zero_is_rejected() {
        let dir = TempDir::new().unwrap();
        let (mut recorder, _store) = create_recorder(&dir).await;

        let result = recorder.undo_drink().await;
        assert!(matches!(
            result,
            Err(HydrationError::Validation(ValidationError::NothingToUndo))
        ));

        recorder.record_drink().await.unwrap();
        recorder.undo_drink().await.unwrap();
        assert_eq!(recorder.state().record.cups_drunk, 0);
    }

    #[tokio::test]
    async fn test_set_drink_count_validates() {
        let dir = TempDir::new().unwrap();
        let (mut recorder, _store) = create_recorder(&dir).await;

        assert!(recorder.set_drink_count(-1).await.is_err());
        assert!(recorder.set_drink_count(51).await.is_err());
        recorder.set_drink_count(6).await.unwrap();
        assert_eq!(recorder.state().record.cups_drunk, 6);

        recorder.reset_today().await.unwrap();
        assert_eq!(recorder.state().record.cups_drunk, 0);
    }

    #[tokio::test]
    async fn test_weather_adjustment_changes_stats() {
        let dir = TempDir::new().unwrap();
        let (mut recorder, _store) = create_recorder(&dir).await;

        recorder.update_weather_adjustment(2).await.unwrap();
        let stats = recorder.set_drink_count(8).await.unwrap();

        assert_eq!(stats.adjusted_goal, 10);
        assert_eq!(stats.completion_rate, 80.0);
        assert_eq!(stats.remaining_cups, 2);
        assert!(recorder.update_weather_adjustment(6).await.is_err());
        assert_eq!(recorder.state().record.weather_adjustment, 2);
    }

    #[tokio::test]
    async fn test_update_daily_goal_persists_setting() {
        let dir = TempDir::new().unwrap();
        let (mut recorder, store) = create_recorder(&dir).await;
        let mut receiver = recorder.events.subscribe();

        recorder.update_daily_goal(10).await.unwrap();

        assert_eq!(recorder.state().record.goal, 10);
        assert_eq!(store.get_settings().await.unwrap().daily_goal, 10);
        assert_eq!(
            receiver.recv().await.unwrap(),
            AppEvent::DailyGoalUpdated { daily_goal: 10 }
        );
        assert!(recorder.update_daily_goal(0).await.is_err());
        assert!(recorder.update_daily_goal(21).await.is_err());
    }

    #[tokio::test]
    async fn test_ensure_today_rolls_over() {
        let dir = TempDir::new().unwrap();
        let (mut recorder, _store) = create_recorder(&dir).await;
        recorder.record_drink().await.unwrap();

        recorder.ensure_today(date(11)).await.unwrap();

        let state = recorder.state();
        assert_eq!(state.record.date, date(11));
        assert_eq!(state.record.cups_drunk, 0);
    }

    #[tokio::test]
    async fn test_store_failure_keeps_last_known_good_state() {
        let mut store = MockStore::new();
        store
            .expect_get_settings()
            .returning(|| Ok(Settings::default()));
        store.expect_get_record_by_date().returning(|date| {
            Ok(Some(DailyRecord {
                id: 1,
                date,
                cups_drunk: 3,
                goal: 8,
                weather_adjustment: 0,
                created_at: Local::now(),
                updated_at: Local::now(),
            }))
        });
        store.expect_update_record().times(1).returning(|_| {
            Err(StoreError::Corrupted {
                path: "store.json".to_string(),
                reason: "disk full".to_string(),
            }
            .into())
        });

        let mut recorder = WaterRecorder::new(Arc::new(store), events::channel(), date(10))
            .await
            .unwrap();

        let result = recorder.record_drink().await;

        assert!(matches!(result, Err(HydrationError::Store(_))));
        assert_eq!(recorder.state().record.cups_drunk, 3);
    }

    fn record_with_goal(date: NaiveDate, goal: u32) -> DailyRecord {
        DailyRecord {
            id: 1,
            date,
            cups_drunk: 3,
            goal,
            weather_adjustment: 0,
            created_at: Local::now(),
            updated_at: Local::now(),
        }
    }

    fn store_with_record() -> MockStore {
        let mut store = MockStore::new();
        store
            .expect_get_settings()
            .returning(|| Ok(Settings::default()));
        store
            .expect_get_record_by_date()
            .returning(|date| Ok(Some(record_with_goal(date, 8))));
        store
    }

    #[tokio::test]
    async fn test_update_daily_goal_keeps_setting_when_record_fails() {
        let mut store = store_with_record();
        store.expect_update_record().times(1).returning(|_| {
            Err(StoreError::Corrupted {
                path: "store.json".to_string(),
                reason: "disk full".to_string(),
            }
            .into())
        });
        store.expect_update_setting().never();

        let mut recorder = WaterRecorder::new(Arc::new(store), events::channel(), date(10))
            .await
            .unwrap();
        let mut receiver = recorder.events.subscribe();

        let result = recorder.update_daily_goal(10).await;

        assert!(matches!(result, Err(HydrationError::Store(_))));
        assert_eq!(recorder.state().record.goal, 8);
        assert!(receiver.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_update_daily_goal_restores_record_when_setting_fails() {
        let mut store = store_with_record();
        store
            .expect_update_record()
            .times(2)
            .returning(|record| Ok(record.clone()));
        store.expect_update_setting().times(1).returning(|_, _| {
            Err(StoreError::Corrupted {
                path: "store.json".to_string(),
                reason: "disk full".to_string(),
            }
            .into())
        });

        let mut recorder = WaterRecorder::new(Arc::new(store), events::channel(), date(10))
            .await
            .unwrap();
        let mut receiver = recorder.events.subscribe();

        let result = recorder.update_daily_goal(10).await;

        assert!(matches!(result, Err(HydrationError::Store(_))));
        assert_eq!(recorder.state().record.goal, 8);
        assert!(receiver.try_recv().is_err());
    }
}
