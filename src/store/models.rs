//! Persisted entities.

use std::fmt;

use chrono::{DateTime, Local, NaiveDate};
use log::warn;
use serde::{Deserialize, Serialize};

use crate::{
    achievements::{AchievementCondition, AchievementDefinition, AchievementKind},
    records::{HydrationStats, compute_stats},
    validation::validate_setting,
};

/// Hydration record of a single calendar day.
///
/// There is at most one record per date. It is created lazily the first time
/// the day is accessed and is never deleted in normal operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyRecord {
    pub id: u64,
    pub date: NaiveDate,
    pub cups_drunk: u32,
    /// Base goal in cups, within `1..=20`.
    pub goal: u32,
    /// Weather adjustment in cups, within `-5..=5`.
    pub weather_adjustment: i32,
    pub created_at: DateTime<Local>,
    pub updated_at: DateTime<Local>,
}

impl DailyRecord {
    /// Derives the completion statistics of the day.
    pub fn stats(&self) -> HydrationStats {
        compute_stats(self.cups_drunk, self.goal, self.weather_adjustment)
    }
}

impl fmt::Display for DailyRecord {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "date={}, cups={}, goal={}, adjustment={}",
            self.date, self.cups_drunk, self.goal, self.weather_adjustment
        )
    }
}

/// An achievement of the catalog together with its unlock state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Achievement {
    pub id: u64,
    /// Unique name, used to match catalog entries across restarts.
    pub name: String,
    pub description: String,
    pub icon: String,
    pub kind: AchievementKind,
    pub condition: AchievementCondition,
    /// Set exactly once, when the condition first holds.
    pub unlocked_at: Option<DateTime<Local>>,
}

impl Achievement {
    pub fn from_definition(id: u64, definition: &AchievementDefinition) -> Self {
        Achievement {
            id,
            name: definition.name.to_owned(),
            description: definition.description.to_owned(),
            icon: definition.icon.to_owned(),
            kind: definition.kind,
            condition: definition.condition,
            unlocked_at: None,
        }
    }

    pub fn is_unlocked(&self) -> bool {
        self.unlocked_at.is_some()
    }
}

/// Keys of the persisted settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SettingKey {
    ReminderInterval,
    DailyGoal,
    WeatherEnabled,
    NotificationsEnabled,
    SoundEnabled,
}

impl SettingKey {
    pub const ALL: [SettingKey; 5] = [
        SettingKey::ReminderInterval,
        SettingKey::DailyGoal,
        SettingKey::WeatherEnabled,
        SettingKey::NotificationsEnabled,
        SettingKey::SoundEnabled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SettingKey::ReminderInterval => "reminder_interval",
            SettingKey::DailyGoal => "daily_goal",
            SettingKey::WeatherEnabled => "weather_enabled",
            SettingKey::NotificationsEnabled => "notifications_enabled",
            SettingKey::SoundEnabled => "sound_enabled",
        }
    }
}

impl fmt::Display for SettingKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Value of a setting. Stored untagged so the JSON file stays readable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SettingValue {
    Bool(bool),
    Int(i64),
}

/// A persisted key/value pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Setting {
    pub key: SettingKey,
    pub value: SettingValue,
}

/// Typed view over the persisted settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    /// Minutes between two reminders, within `15..=240`.
    pub reminder_interval: u32,
    /// Base daily goal in cups, within `1..=20`.
    pub daily_goal: u32,
    pub weather_enabled: bool,
    pub notifications_enabled: bool,
    pub sound_enabled: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            reminder_interval: 60,
            daily_goal: 8,
            weather_enabled: true,
            notifications_enabled: true,
            sound_enabled: true,
        }
    }
}

impl Settings {
    /// Builds the typed settings from stored pairs.
    ///
    /// Missing, mistyped or out of range entries fall back to their default
    /// value.
    pub fn from_entries(entries: &[Setting]) -> Self {
        let mut settings = Settings::default();
        for entry in entries {
            if let Err(e) = validate_setting(entry.key, &entry.value) {
                warn!("ignoring stored setting {}: {}", entry.key.as_str(), e);
                continue;
            }
            match (entry.key, entry.value) {
                (SettingKey::ReminderInterval, SettingValue::Int(v)) => {
                    if let Ok(v) = u32::try_from(v) {
                        settings.reminder_interval = v;
                    }
                }
                (SettingKey::DailyGoal, SettingValue::Int(v)) => {
                    if let Ok(v) = u32::try_from(v) {
                        settings.daily_goal = v;
                    }
                }
                (SettingKey::WeatherEnabled, SettingValue::Bool(v)) => settings.weather_enabled = v,
                (SettingKey::NotificationsEnabled, SettingValue::Bool(v)) => {
                    settings.notifications_enabled = v
                }
                (SettingKey::SoundEnabled, SettingValue::Bool(v)) => settings.sound_enabled = v,
                _ => {}
            }
        }
        settings
    }

    /// Returns the settings as storable pairs, in [`SettingKey::ALL`] order.
    pub fn to_entries(&self) -> Vec<Setting> {
        SettingKey::ALL
            .iter()
            .map(|key| Setting {
                key: *key,
                value: self.get(*key),
            })
            .collect()
    }

    pub fn get(&self, key: SettingKey) -> SettingValue {
        match key {
            SettingKey::ReminderInterval => SettingValue::Int(self.reminder_interval as i64),
            SettingKey::DailyGoal => SettingValue::Int(self.daily_goal as i64),
            SettingKey::WeatherEnabled => SettingValue::Bool(self.weather_enabled),
            SettingKey::NotificationsEnabled => SettingValue::Bool(self.notifications_enabled),
            SettingKey::SoundEnabled => SettingValue::Bool(self.sound_enabled),
        }
    }
}
