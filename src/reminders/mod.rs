//! Reminder scheduling and delivery.
//!
//! # Modules
//!
//! - `notifier` - Notification surface and its terminal implementation
//! - `scheduler` - Single timer reminder scheduler driven by the stored settings

mod notifier;
mod scheduler;

#[cfg(test)]
pub use crate::reminders::notifier::MockNotifier;
pub use crate::reminders::notifier::{Notification, Notifier, Permission, TerminalNotifier};
pub use crate::reminders::scheduler::{ReminderScheduler, SchedulerState, SchedulerStatus};
