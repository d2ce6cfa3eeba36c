//! Command action handlers.
//!
//! Individual handler functions for each console command. Each handler receives
//! a [`CommandContext`](crate::commands::CommandContext), calls the service the
//! command concerns, and returns a [`CommandResult`](crate::commands::CommandResult).
//!
//! # Handler Pattern
//!
//! Handlers follow a consistent pattern:
//! 1. Receive the context borrowing the services
//! 2. Apply the command, services validate their inputs
//! 3. Return a Markdown response, with the service error formatted in it on failure
//!
//! Handlers taking the command return `None` when given a command they do not
//! handle.
//!
//! # Available Handlers
//!
//! - [`handle_help`] - Display help information
//! - [`handle_status`] - Today's progress and reminder status
//! - [`handle_hydration`] - Cup count, goal and adjustment changes
//! - [`handle_reminders`] - Interval, snooze, skip, toggles and reload
//! - [`handle_weather`] - Weather recommendation
//! - [`handle_achievements`] - Achievements with progress
//! - [`handle_report`] - Weekly report
//! - [`handle_message`] - Generated hydration message

mod achievements;
mod help;
mod hydration;
mod message;
mod reminders;
mod report;
mod weather;

pub use crate::commands::actions::{
    achievements::handle_achievements,
    help::handle_help,
    hydration::{handle_hydration, handle_status},
    message::handle_message,
    reminders::handle_reminders,
    report::handle_report,
    weather::handle_weather,
};
