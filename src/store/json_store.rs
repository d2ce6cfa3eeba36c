//! File backed store.
//!
//! The whole store is a single JSON document loaded at start and rewritten
//! after every mutation. A mutation is applied to a copy of the in-memory
//! document first; the copy replaces the live document only once it has been
//! written to disk, so a failed write leaves the last known good state in place.

use chrono::{DateTime, Local, NaiveDate};
use log::{debug, error, info, warn};
use serde::{Deserialize, Serialize};
use tokio::{fs, sync::Mutex};

use crate::{
    achievements::AchievementDefinition,
    error::{HydrationError, Result, StoreError},
    store::{Achievement, DailyRecord, Setting, SettingKey, SettingValue, Settings, Store},
    validation::{validate_record, validate_setting},
};

/// Serialized layout of the store file.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoreData {
    next_record_id: u64,
    next_achievement_id: u64,
    records: Vec<DailyRecord>,
    achievements: Vec<Achievement>,
    settings: Vec<Setting>,
}

impl Default for StoreData {
    fn default() -> Self {
        StoreData {
            next_record_id: 1,
            next_achievement_id: 1,
            records: Vec::new(),
            achievements: Vec::new(),
            settings: Settings::default().to_entries(),
        }
    }
}

/// [`Store`] implementation persisting a JSON document.
///
/// # Examples
///
/// ```no_run
/// use waterbuddy::store::{JsonStore, Store};
///
/// # async fn example() -> waterbuddy::error::Result<()> {
/// let store = JsonStore::open("waterbuddy.json".to_string()).await?;
/// let settings = store.get_settings().await?;
/// println!("reminding every {} minutes", settings.reminder_interval);
/// # Ok(())
/// # }
/// ```
pub struct JsonStore {
    /// Path to the JSON file.
    path: String,
    /// Live document.
    data: Mutex<StoreData>,
}

impl JsonStore {
    /// Opens the store at `path`.
    ///
    /// A missing file starts an empty store seeded with the default settings.
    /// An unreadable or corrupted file is an error: the user data is never
    /// silently discarded.
    pub async fn open(path: String) -> Result<Self> {
        let data = match fs::read_to_string(&path).await {
            Ok(serialized) => match serde_json::from_str::<StoreData>(&serialized) {
                Ok(data) => {
                    info!(
                        "loaded store {} with {} records and {} achievements",
                        path,
                        data.records.len(),
                        data.achievements.len()
                    );
                    data
                }
                Err(e) => {
                    error!("failed to deserialize store {}: {}", path, e);
                    return Err(StoreError::Corrupted {
                        path,
                        reason: e.to_string(),
                    }
                    .into());
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!("no store found at {}, starting with an empty store", path);
                StoreData::default()
            }
            Err(e) => return Err(StoreError::Read { path, source: e }.into()),
        };

        Ok(JsonStore {
            path,
            data: Mutex::new(data),
        })
    }

    /// Applies `mutation` to a copy of the document, persists it and swaps it in.
    async fn mutate<T>(&self, mutation: impl FnOnce(&mut StoreData) -> Result<T>) -> Result<T> {
        let mut data = self.data.lock().await;
        let mut next = data.clone();
        let value = mutation(&mut next)?;
        self.persist(&next).await?;
        *data = next;
        Ok(value)
    }

    async fn persist(&self, data: &StoreData) -> Result<()> {
        let serialized = serde_json::to_string_pretty(data).map_err(StoreError::from)?;

        if let Err(e) = fs::write(&self.path, serialized).await {
            error!("failed to persist store {}: {}", self.path, e);
            return Err(StoreError::Write {
                path: self.path.clone(),
                source: e,
            }
            .into());
        }

        debug!("persisted store {}", self.path);
        Ok(())
    }
}

fn record_not_found(id: u64) -> HydrationError {
    HydrationError::NotFound {
        entity: "record",
        key: id.to_string(),
    }
}

impl Store for JsonStore {
    async fn add_record(&self, date: NaiveDate, goal: u32) -> Result<DailyRecord> {
        let record = self
            .mutate(|data| {
                if let Some(existing) = data.records.iter().find(|r| r.date == date) {
                    return Ok(existing.clone());
                }

                let now = Local::now();
                let record = DailyRecord {
                    id: data.next_record_id,
                    date,
                    cups_drunk: 0,
                    goal,
                    weather_adjustment: 0,
                    created_at: now,
                    updated_at: now,
                };
                validate_record(&record)?;

                data.next_record_id += 1;
                data.records.push(record.clone());
                data.records.sort_by_key(|r| r.date);
                Ok(record)
            })
            .await?;

        info!("created record {}", record);
        Ok(record)
    }

    async fn get_record(&self, id: u64) -> Result<DailyRecord> {
        self.data
            .lock()
            .await
            .records
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or_else(|| record_not_found(id))
    }

    async fn get_record_by_date(&self, date: NaiveDate) -> Result<Option<DailyRecord>> {
        Ok(self
            .data
            .lock()
            .await
            .records
            .iter()
            .find(|r| r.date == date)
            .cloned())
    }

    async fn get_records_in_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<DailyRecord>> {
        Ok(self
            .data
            .lock()
            .await
            .records
            .iter()
            .filter(|r| r.date >= start && r.date <= end)
            .cloned()
            .collect())
    }

    async fn get_all_records(&self) -> Result<Vec<DailyRecord>> {
        Ok(self.data.lock().await.records.clone())
    }

    async fn update_record(&self, record: &DailyRecord) -> Result<DailyRecord> {
        validate_record(record)?;

        let updated = self
            .mutate(|data| {
                let stored = data
                    .records
                    .iter_mut()
                    .find(|r| r.id == record.id)
                    .ok_or_else(|| record_not_found(record.id))?;

                *stored = DailyRecord {
                    created_at: stored.created_at,
                    updated_at: Local::now(),
                    ..record.clone()
                };
                Ok(stored.clone())
            })
            .await?;

        debug!("updated record {}", updated);
        Ok(updated)
    }

    async fn delete_record(&self, id: u64) -> Result<()> {
        self.mutate(|data| {
            let before = data.records.len();
            data.records.retain(|r| r.id != id);
            if data.records.len() == before {
                return Err(record_not_found(id));
            }
            Ok(())
        })
        .await?;

        info!("deleted record {}", id);
        Ok(())
    }

    async fn add_achievement(&self, definition: &AchievementDefinition) -> Result<Achievement> {
        self.mutate(|data| {
            if let Some(existing) = data
                .achievements
                .iter()
                .find(|a| a.name == definition.name)
            {
                return Ok(existing.clone());
            }

            let achievement = Achievement::from_definition(data.next_achievement_id, definition);
            data.next_achievement_id += 1;
            data.achievements.push(achievement.clone());
            debug!("added achievement {}", achievement.name);
            Ok(achievement)
        })
        .await
    }

    async fn get_achievements(&self) -> Result<Vec<Achievement>> {
        Ok(self.data.lock().await.achievements.clone())
    }

    async fn get_achievement_by_name(&self, name: &str) -> Result<Option<Achievement>> {
        Ok(self
            .data
            .lock()
            .await
            .achievements
            .iter()
            .find(|a| a.name == name)
            .cloned())
    }

    async fn unlock_achievement(&self, id: u64, unlocked_at: DateTime<Local>) -> Result<bool> {
        {
            let data = self.data.lock().await;
            let achievement = data
                .achievements
                .iter()
                .find(|a| a.id == id)
                .ok_or_else(|| HydrationError::NotFound {
                    entity: "achievement",
                    key: id.to_string(),
                })?;
            if achievement.is_unlocked() {
                debug!("achievement {} already unlocked", achievement.name);
                return Ok(false);
            }
        }

        self.mutate(|data| {
            let achievement = data
                .achievements
                .iter_mut()
                .find(|a| a.id == id)
                .ok_or_else(|| HydrationError::NotFound {
                    entity: "achievement",
                    key: id.to_string(),
                })?;
            if achievement.is_unlocked() {
                return Ok(false);
            }
            achievement.unlocked_at = Some(unlocked_at);
            info!("unlocked achievement {}", achievement.name);
            Ok(true)
        })
        .await
    }

    async fn get_settings(&self) -> Result<Settings> {
        Ok(Settings::from_entries(&self.data.lock().await.settings))
    }

    async fn update_setting(&self, key: SettingKey, value: SettingValue) -> Result<()> {
        validate_setting(key, &value)?;

        self.mutate(|data| {
            match data.settings.iter_mut().find(|s| s.key == key) {
                Some(setting) => setting.value = value,
                None => data.settings.push(Setting { key, value }),
            }
            Ok(())
        })
        .await?;

        info!("updated setting {} to {:?}", key, value);
        Ok(())
    }

    async fn reset_to_default_settings(&self) -> Result<Settings> {
        self.mutate(|data| {
            data.settings = Settings::default().to_entries();
            Ok(())
        })
        .await?;

        info!("reset settings to defaults");
        Ok(Settings::default())
    }
}
