//! Notification surface.
//!
//! A [`Notifier`] shows reminders outside of the console output and plays the
//! reminder sound. When notifications are not permitted the scheduler only
//! publishes the in-app event.

use std::io::{IsTerminal, Write};

use log::{debug, info};
use mockall::automock;

use crate::error::{HydrationError, Result};

/// Whether notifications may be shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    Granted,
    Denied,
    /// Not decided yet, the permission should be requested.
    Default,
}

/// Action offered with a notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationAction {
    /// One of `drink`, `skip` or `snooze`.
    pub id: &'static str,
    pub title: &'static str,
}

/// A notification to display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub body: String,
    pub actions: Vec<NotificationAction>,
}

impl Notification {
    /// Builds a reminder notification with the drink, skip and snooze actions.
    pub fn reminder(body: &str) -> Self {
        Notification {
            title: "WaterBuddy".to_string(),
            body: body.to_string(),
            actions: vec![
                NotificationAction {
                    id: "drink",
                    title: "I drank a glass",
                },
                NotificationAction {
                    id: "skip",
                    title: "Skip",
                },
                NotificationAction {
                    id: "snooze",
                    title: "Remind me later",
                },
            ],
        }
    }
}

/// Displays notifications and plays sounds.
#[automock]
pub trait Notifier {
    /// Returns the current permission without prompting.
    fn permission(&self) -> Permission;
    /// Asks for the permission to show notifications.
    fn request_permission(&self) -> Permission;
    fn show(&self, notification: &Notification);
    /// Plays the reminder sound, failing when the host has no audio output.
    fn play_sound(&self) -> Result<()>;
}

/// Notifier writing to the standard error of the terminal.
///
/// Notifications are permitted only when the standard output is a terminal, so
/// piping the console output does not interleave notifications with it.
#[derive(Default)]
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn permission(&self) -> Permission {
        if std::io::stdout().is_terminal() {
            Permission::Granted
        } else {
            Permission::Default
        }
    }

    fn request_permission(&self) -> Permission {
        let permission = if std::io::stdout().is_terminal() {
            Permission::Granted
        } else {
            Permission::Denied
        };
        info!("notification permission: {:?}", permission);
        permission
    }

    fn show(&self, notification: &Notification) {
        let actions: Vec<String> = notification
            .actions
            .iter()
            .map(|a| format!("[{}] {}", a.id, a.title))
            .collect();
        eprintln!(
            "\n🔔 {}: {}\n   {}",
            notification.title,
            notification.body,
            actions.join("  ")
        );
        debug!("notification shown: {}", notification.body);
    }

    fn play_sound(&self) -> Result<()> {
        let mut stderr = std::io::stderr();
        // terminal bell
        stderr
            .write_all(b"\x07")
            .and_then(|_| stderr.flush())
            .map_err(|e| HydrationError::CapabilityUnavailable(format!("terminal bell ({})", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reminder_notification_actions() {
        let notification = Notification::reminder("Time to drink");

        let ids: Vec<&str> = notification.actions.iter().map(|a| a.id).collect();
        assert_eq!(ids, vec!["drink", "skip", "snooze"]);
        assert_eq!(notification.body, "Time to drink");
    }

    #[test]
    fn test_terminal_permission_is_never_denied_without_request() {
        assert_ne!(TerminalNotifier.permission(), Permission::Denied);
    }
}
