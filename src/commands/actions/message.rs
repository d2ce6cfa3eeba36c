//! Message command handler.
//!
//! Generates a hydration message on demand, from the latest context snapshot
//! with the time of day of the command.

use chrono::Timelike;
use log::debug;

use crate::{
    commands::{CommandContext, CommandResult},
    messages::{TimeSegment, generate},
    reminders::Notifier,
    store::Store,
    weather::WeatherRequester,
};

pub async fn handle_message<S, N, R>(context: &CommandContext<'_, S, N, R>) -> CommandResult
where
    S: Store,
    N: Notifier + Send + Sync + 'static,
    R: WeatherRequester,
{
    debug!("handling message command");

    let mut message_context = context.message_context.lock().await.clone();
    message_context.time_segment = TimeSegment::from_hour(context.now.hour());

    CommandResult::from(format!("💬 {}", generate(&message_context)))
}
