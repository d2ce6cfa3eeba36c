//! Input validation rules.
//!
//! Every mutation of a record or a setting goes through one of these checks
//! before any state is touched. Validators take wide integers so that user
//! input such as `-3` or `500` can be reported as-is in the error.

use std::ops::RangeInclusive;

use log::warn;

use crate::{
    error::ValidationError,
    store::{DailyRecord, SettingKey, SettingValue},
};

/// Allowed reminder interval, in minutes.
pub const INTERVAL_RANGE: RangeInclusive<i64> = 15..=240;
/// Allowed snooze duration, in minutes.
pub const SNOOZE_RANGE: RangeInclusive<i64> = 1..=240;
/// Allowed base daily goal, in cups.
pub const GOAL_RANGE: RangeInclusive<i64> = 1..=20;
/// Allowed weather adjustment, in cups.
pub const ADJUSTMENT_RANGE: RangeInclusive<i64> = -5..=5;
/// Allowed cup count for a single day.
pub const CUPS_RANGE: RangeInclusive<i64> = 0..=50;

pub fn validate_interval(minutes: i64) -> Result<u32, ValidationError> {
    check(INTERVAL_RANGE, minutes, ValidationError::IntervalOutOfRange).map(|v| v as u32)
}

pub fn validate_snooze(minutes: i64) -> Result<u32, ValidationError> {
    check(SNOOZE_RANGE, minutes, ValidationError::SnoozeOutOfRange).map(|v| v as u32)
}

pub fn validate_goal(goal: i64) -> Result<u32, ValidationError> {
    check(GOAL_RANGE, goal, ValidationError::GoalOutOfRange).map(|v| v as u32)
}

pub fn validate_adjustment(adjustment: i64) -> Result<i32, ValidationError> {
    check(ADJUSTMENT_RANGE, adjustment, ValidationError::AdjustmentOutOfRange).map(|v| v as i32)
}

pub fn validate_cups(cups: i64) -> Result<u32, ValidationError> {
    check(CUPS_RANGE, cups, ValidationError::CupsOutOfRange).map(|v| v as u32)
}

/// Validates every numeric field of a daily record.
pub fn validate_record(record: &DailyRecord) -> Result<(), ValidationError> {
    validate_cups(record.cups_drunk as i64)?;
    validate_goal(record.goal as i64)?;
    validate_adjustment(record.weather_adjustment as i64)?;
    Ok(())
}

/// Validates a setting value against the rules of its key.
///
/// Numeric settings must be integers within their range, toggles must be
/// booleans.
pub fn validate_setting(key: SettingKey, value: &SettingValue) -> Result<(), ValidationError> {
    let invalid = |reason: &str| ValidationError::InvalidSetting {
        key: key.as_str().to_owned(),
        reason: reason.to_owned(),
    };

    match (key, value) {
        (SettingKey::ReminderInterval, SettingValue::Int(minutes)) => {
            validate_interval(*minutes).map(|_| ())
        }
        (SettingKey::DailyGoal, SettingValue::Int(goal)) => validate_goal(*goal).map(|_| ()),
        (SettingKey::ReminderInterval | SettingKey::DailyGoal, SettingValue::Bool(_)) => {
            Err(invalid("expected an integer"))
        }
        (
            SettingKey::WeatherEnabled
            | SettingKey::NotificationsEnabled
            | SettingKey::SoundEnabled,
            SettingValue::Bool(_),
        ) => Ok(()),
        (_, SettingValue::Int(_)) => Err(invalid("expected a boolean")),
    }
}

fn check(
    range: RangeInclusive<i64>,
    value: i64,
    error: fn(i64) -> ValidationError,
) -> Result<i64, ValidationError> {
    if range.contains(&value) {
        Ok(value)
    } else {
        let error = error(value);
        warn!("rejected input: {}", error);
        Err(error)
    }
}
