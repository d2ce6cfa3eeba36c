//! Hydration command handlers.
//!
//! Applies the changes of today's record: drinks, count corrections, the daily
//! goal and the goal adjustment. Every successful change is followed by an
//! achievement check, and the newly unlocked achievements are appended to the
//! response.
//!
//! # Errors
//!
//! Out of range values and storage failures are reported in the response.
//! Today's record is left unchanged in both cases.

use log::debug;

use crate::{
    commands::{
        CommandContext, CommandResult,
        actions::achievements::unlock_achievements,
        command::Command,
        markdown_response::{format_error, format_progress, format_status, format_unlocked},
    },
    reminders::Notifier,
    store::Store,
    weather::WeatherRequester,
};

/// Shows today's progress along with the reminder status.
pub async fn handle_status<S, N, R>(context: &CommandContext<'_, S, N, R>) -> CommandResult
where
    S: Store,
    N: Notifier + Send + Sync + 'static,
    R: WeatherRequester,
{
    debug!("handling status command");

    let status = context.scheduler.status().await;
    CommandResult::from(format_status(&context.recorder.state(), &status))
}

/// Applies a change to today's record.
///
/// # Returns
///
/// - `Some(CommandResult)`: The new progress, or the error that prevented the change
/// - `None`: If the command does not change today's record
pub async fn handle_hydration<S, N, R>(
    context: &mut CommandContext<'_, S, N, R>,
    command: &Command,
) -> Option<CommandResult>
where
    S: Store,
    N: Notifier + Send + Sync + 'static,
    R: WeatherRequester,
{
    debug!("handling hydration command: {:?}", command);

    let recorder = &mut context.recorder;
    let outcome = match command {
        Command::Drink => recorder.record_drink().await,
        Command::Undo => recorder.undo_drink().await,
        Command::Set(cups) => recorder.set_drink_count(*cups).await,
        Command::Reset => recorder.reset_today().await,
        Command::Goal(goal) => recorder.update_daily_goal(*goal).await,
        Command::Adjust(adjustment) => recorder.update_weather_adjustment(*adjustment).await,
        _ => return None,
    };

    if let Err(e) = outcome {
        debug!("hydration command failed: {}", e);
        return Some(CommandResult::from(format_error(&e)));
    }

    let unlocked = unlock_achievements(context).await;
    let mut response = format_progress(&context.recorder.state());
    if !unlocked.is_empty() {
        response.push('\n');
        response.push_str(&format_unlocked(&unlocked));
    }

    Some(CommandResult { response, unlocked })
}
