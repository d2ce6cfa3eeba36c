//! Report command handler.
//!
//! Builds the report of the seven days ending today and renders it as Markdown.
//! This is a read-only command.

use log::debug;

use crate::{
    commands::{CommandContext, CommandResult, markdown_response::format_error},
    reminders::Notifier,
    report::{generate_weekly_report, render_markdown},
    store::Store,
    weather::WeatherRequester,
};

/// Renders the weekly report ending today.
pub async fn handle_report<S, N, R>(context: &CommandContext<'_, S, N, R>) -> CommandResult
where
    S: Store,
    N: Notifier + Send + Sync + 'static,
    R: WeatherRequester,
{
    debug!("handling report command");

    match generate_weekly_report(context.store, context.today()).await {
        Ok(report) => CommandResult::from(render_markdown(&report)),
        Err(e) => CommandResult::from(format_error(&e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::actions::fixtures::TestServices;

    #[tokio::test]
    async fn test_handle_report() {
        let mut services = TestServices::new().await;
        services.recorder.set_drink_count(8).await.unwrap();

        let result = handle_report(&services.context()).await;

        assert!(
            result
                .response
                .starts_with("# Weekly report 2024-06-25 to 2024-07-01")
        );
        assert!(result.response.contains("- **Total**: 8 cups"));
        assert!(result.response.contains("- **Goal reached**: 1/7 days"));
    }
}
