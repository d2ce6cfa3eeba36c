//! Reminder command handlers.
//!
//! Forwards interval changes, snoozes, skips, toggles and reloads to the
//! [`ReminderScheduler`](crate::reminders::ReminderScheduler).
//!
//! # Validation
//!
//! - **Interval**: Must be between 15 and 240 minutes
//! - **Snooze**: Must be between 1 and 240 minutes, the configured duration
//!   when omitted

use log::debug;

use crate::{
    commands::{
        CommandContext, CommandResult,
        command::Command,
        markdown_response::{
            format_error, format_interval, format_reloaded, format_skipped, format_snoozed,
            format_toggle,
        },
    },
    reminders::Notifier,
    store::Store,
    weather::WeatherRequester,
};

/// Applies a reminder command.
///
/// # Returns
///
/// - `Some(CommandResult)`: The outcome, or the error that prevented the change
/// - `None`: If the command does not concern reminders
pub async fn handle_reminders<S, N, R>(
    context: &mut CommandContext<'_, S, N, R>,
    command: &Command,
) -> Option<CommandResult>
where
    S: Store,
    N: Notifier + Send + Sync + 'static,
    R: WeatherRequester,
{
    debug!("handling reminder command: {:?}", command);

    let scheduler = &mut context.scheduler;
    let response = match command {
        Command::Interval(minutes) => match scheduler.update_interval(*minutes).await {
            Ok(()) => format_interval(*minutes),
            Err(e) => format_error(&e),
        },
        Command::Snooze(minutes) => {
            let minutes = minutes.unwrap_or(context.snooze_minutes as i64);
            match scheduler.snooze(minutes).await {
                Ok(()) => format_snoozed(minutes, scheduler.status().await.is_running),
                Err(e) => format_error(&e),
            }
        }
        Command::Skip => {
            scheduler.skip();
            format_skipped()
        }
        Command::Notifications(enabled) => {
            match scheduler.toggle_notifications(*enabled).await {
                Ok(()) => format_toggle("🔔 Notifications", *enabled),
                Err(e) => format_error(&e),
            }
        }
        Command::Sound(enabled) => match scheduler.toggle_sound(*enabled).await {
            Ok(()) => format_toggle("🔊 Sound", *enabled),
            Err(e) => format_error(&e),
        },
        Command::Reload => {
            scheduler.reload_settings().await;
            format_reloaded(&scheduler.status().await)
        }
        _ => return None,
    };

    Some(CommandResult::from(response))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        commands::actions::fixtures::TestServices,
        reminders::SchedulerState,
        store::{SettingKey, SettingValue},
    };

    #[tokio::test]
    async fn test_interval_is_persisted_and_restarts() {
        let mut services = TestServices::new().await;

        let result = handle_reminders(&mut services.context(), &Command::Interval(30))
            .await
            .unwrap();

        assert_eq!(result.response, "⏰ Reminders every **30** minutes.");
        assert_eq!(
            services.store.get_settings().await.unwrap().reminder_interval,
            30
        );
        let status = services.scheduler.status().await;
        assert_eq!(status.state, SchedulerState::Scheduled);
        assert_eq!(status.settings.reminder_interval, 30);
    }

    #[tokio::test]
    async fn test_invalid_interval_is_rejected() {
        let mut services = TestServices::new().await;

        let result = handle_reminders(&mut services.context(), &Command::Interval(5))
            .await
            .unwrap();

        assert!(result.response.contains("between 15 and 240"));
        assert_eq!(
            services.store.get_settings().await.unwrap().reminder_interval,
            60
        );
    }

    #[tokio::test]
    async fn test_snooze_uses_configured_duration() {
        let mut services = TestServices::new().await;
        services.scheduler.start().await;

        let result = handle_reminders(&mut services.context(), &Command::Snooze(None))
            .await
            .unwrap();

        assert_eq!(result.response, "😴 Next reminder in **10** minutes.");
    }

    #[tokio::test]
    async fn test_snooze_with_notifications_disabled() {
        let mut services = TestServices::new().await;
        services
            .store
            .update_setting(SettingKey::NotificationsEnabled, SettingValue::Bool(false))
            .await
            .unwrap();
        services.scheduler.reload_settings().await;

        let result = handle_reminders(&mut services.context(), &Command::Snooze(Some(5)))
            .await
            .unwrap();

        assert!(result.response.contains("nothing to snooze"));
    }

    #[tokio::test]
    async fn test_toggles() {
        let mut services = TestServices::new().await;
        services.scheduler.start().await;

        let result = handle_reminders(&mut services.context(), &Command::Notifications(false))
            .await
            .unwrap();
        assert_eq!(result.response, "🔔 Notifications off.");
        assert_eq!(
            services.scheduler.status().await.state,
            SchedulerState::Stopped
        );

        let result = handle_reminders(&mut services.context(), &Command::Sound(false))
            .await
            .unwrap();
        assert_eq!(result.response, "🔊 Sound off.");
        assert!(!services.store.get_settings().await.unwrap().sound_enabled);
    }

    #[tokio::test]
    async fn test_skip_and_reload() {
        let mut services = TestServices::new().await;

        let skipped = handle_reminders(&mut services.context(), &Command::Skip)
            .await
            .unwrap();
        let reloaded = handle_reminders(&mut services.context(), &Command::Reload)
            .await
            .unwrap();

        assert_eq!(skipped.response, "👌 Reminder skipped.");
        assert_eq!(reloaded.response, "🔄 Settings reloaded.");
        assert!(services.scheduler.status().await.is_running);
    }
}
