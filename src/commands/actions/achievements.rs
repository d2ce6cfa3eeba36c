//! Achievements command handler and unlocking after progress changes.

use log::{debug, warn};

use crate::{
    commands::{
        CommandContext, CommandResult,
        markdown_response::{format_achievements, format_error},
    },
    reminders::Notifier,
    store::{Achievement, Store},
    weather::WeatherRequester,
};

/// Lists every achievement with the progress towards it.
pub async fn handle_achievements<S, N, R>(context: &CommandContext<'_, S, N, R>) -> CommandResult
where
    S: Store,
    N: Notifier + Send + Sync + 'static,
    R: WeatherRequester,
{
    debug!("handling achievements command");

    match context.achievements.progress_report(context.today()).await {
        Ok(report) => CommandResult::from(format_achievements(&report)),
        Err(e) => CommandResult::from(format_error(&e)),
    }
}

/// Unlocks the achievements met by today's record.
///
/// A failure is logged and yields no achievement: the change that triggered
/// the check is already saved.
pub(crate) async fn unlock_achievements<S, N, R>(
    context: &CommandContext<'_, S, N, R>,
) -> Vec<Achievement>
where
    S: Store,
    N: Notifier + Send + Sync + 'static,
    R: WeatherRequester,
{
    let today = context.recorder.state().record;
    match context
        .achievements
        .check_and_unlock(&today, context.now)
        .await
    {
        Ok(unlocked) => unlocked,
        Err(e) => {
            warn!("failed to check achievements: {}", e);
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::actions::fixtures::TestServices;

    #[tokio::test]
    async fn test_handle_achievements_lists_catalog() {
        let mut services = TestServices::new().await;

        let result = handle_achievements(&services.context()).await;

        assert!(result.response.starts_with("Achievements (0/8):"));
        assert!(result.response.contains("First Sip"));
    }

    #[tokio::test]
    async fn test_unlock_achievements_after_first_drink() {
        let mut services = TestServices::new().await;
        services.recorder.record_drink().await.unwrap();

        let context = services.context();
        let unlocked = unlock_achievements(&context).await;
        let again = unlock_achievements(&context).await;

        assert_eq!(unlocked.len(), 1);
        assert_eq!(unlocked[0].name, "First Sip");
        assert!(again.is_empty());
    }
}
