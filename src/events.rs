//! In-app event surface.
//!
//! Services publish [`AppEvent`]s on a [`tokio::sync::broadcast`] channel. The
//! console subscribes to it to print reminders as they happen. Publishing never
//! blocks: a send without any live receiver is simply dropped.

use chrono::{DateTime, Local};
use log::debug;
use tokio::sync::broadcast;

/// Capacity of the event channel. Slow receivers skip the oldest events.
pub const EVENT_CHANNEL_CAPACITY: usize = 32;

/// Events published by the hydration services.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// A reminder fired.
    ReminderTriggered {
        timestamp: DateTime<Local>,
        message: String,
    },
    /// Today's cup count changed.
    DrinkRecorded { cups_drunk: u32 },
    /// The base daily goal changed.
    DailyGoalUpdated { daily_goal: u32 },
}

/// Creates the application event channel.
pub fn channel() -> broadcast::Sender<AppEvent> {
    let (sender, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
    sender
}

/// Publishes an event without waiting for consumers.
pub fn publish(sender: &broadcast::Sender<AppEvent>, event: AppEvent) {
    if sender.send(event).is_err() {
        debug!("no subscriber for app event, dropping it");
    }
}
