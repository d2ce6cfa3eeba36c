//! Persistence of records, achievements and settings.
//!
//! The [`Store`] trait is the seam between the hydration services and the
//! storage backend. [`JsonStore`] keeps everything in a single JSON document
//! on disk; tests use the generated `MockStore`.
//!
//! # Modules
//!
//! - `json_store` - File backed implementation of [`Store`]
//! - `models` - Persisted entities and the typed settings view

use chrono::{DateTime, Local, NaiveDate};
use log::debug;
use mockall::automock;

use crate::{achievements::AchievementDefinition, error::Result};

mod json_store;
mod models;

pub use crate::store::json_store::JsonStore;
pub use crate::store::models::{
    Achievement, DailyRecord, Setting, SettingKey, SettingValue, Settings,
};

/// Asynchronous storage of hydration data.
///
/// Writes are read-modify-write with last writer wins. Any I/O failure is
/// reported as [`crate::error::StoreError`]; updates of missing entities are
/// reported as [`crate::error::HydrationError::NotFound`].
#[automock]
pub trait Store {
    /// Creates the record of `date` with the given goal and no cups.
    async fn add_record(&self, date: NaiveDate, goal: u32) -> Result<DailyRecord>;
    /// Fetches a record by id.
    async fn get_record(&self, id: u64) -> Result<DailyRecord>;
    /// Fetches the record of a date, if any.
    async fn get_record_by_date(&self, date: NaiveDate) -> Result<Option<DailyRecord>>;
    /// Fetches the records between `start` and `end` included, oldest first.
    async fn get_records_in_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<DailyRecord>>;
    /// Fetches every record, oldest first.
    async fn get_all_records(&self) -> Result<Vec<DailyRecord>>;
    /// Replaces a record and returns the stored version.
    async fn update_record(&self, record: &DailyRecord) -> Result<DailyRecord>;
    /// Deletes a record by id.
    async fn delete_record(&self, id: u64) -> Result<()>;

    /// Inserts an achievement. An achievement with the same name is returned unchanged.
    async fn add_achievement(&self, definition: &AchievementDefinition) -> Result<Achievement>;
    /// Fetches every achievement, in insertion order.
    async fn get_achievements(&self) -> Result<Vec<Achievement>>;
    /// Fetches an achievement by its unique name.
    async fn get_achievement_by_name(&self, name: &str) -> Result<Option<Achievement>>;
    /// Sets the unlock timestamp of an achievement.
    ///
    /// Returns `false` without writing when the achievement is already unlocked.
    async fn unlock_achievement(&self, id: u64, unlocked_at: DateTime<Local>) -> Result<bool>;

    /// Fetches the current settings.
    async fn get_settings(&self) -> Result<Settings>;
    /// Validates and stores a single setting.
    async fn update_setting(&self, key: SettingKey, value: SettingValue) -> Result<()>;
    /// Clears the settings and reseeds the defaults.
    async fn reset_to_default_settings(&self) -> Result<Settings>;
}

/// Returns the record of `date`, creating it with `default_goal` when absent.
pub async fn get_or_create_record<S: Store>(
    store: &S,
    date: NaiveDate,
    default_goal: u32,
) -> Result<DailyRecord> {
    if let Some(record) = store.get_record_by_date(date).await? {
        return Ok(record);
    }

    debug!("no record for {}, creating one with goal {}", date, default_goal);
    store.add_record(date, default_goal).await
}
