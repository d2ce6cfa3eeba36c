//! Console command parsing and response formatting.
//!
//! This module provides the complete command processing pipeline of waterbuddy,
//! letting the user record drinks, tune reminders and browse their progress
//! from the terminal.
//!
//! # Overview
//!
//! The commands module handles the entire lifecycle of a console command:
//! 1. **Parsing** - Converting a console line into a structured [`Command`]
//! 2. **Execution** - Routing the command to the service it concerns
//! 3. **Response** - Formatting the outcome as Markdown for the terminal
//!
//! # Architecture
//!
//! ```text
//! Console line
//!      │
//!      ▼
//! ┌─────────────┐
//! │  Commander  │  ← Entry point: parse() + execute()
//! └─────────────┘
//!      │
//!      ├── parse() ────────────────────┐
//!      │                               ▼
//!                          ┌──────────────────┐
//!                          │  Command         │
//!                          └──────────────────┘
//!      │
//!      └── execute() ─────────────────┐
//!                                     ▼
//!                          ┌─────────────────────┐
//!                          │ Action Handlers     │
//!                          │  - hydration        │
//!                          │  - reminders        │
//!                          │  - weather          │
//!                          │  - achievements     │
//!                          │  - report, message  │
//!                          └─────────────────────┘
//!                                     │
//!                                     ▼
//!                          ┌────────────────────┐
//!                          │  CommandResult     │
//!                          │  - response (MD)   │
//!                          │  - unlocked        │
//!                          └────────────────────┘
//! ```
//!
//! # Command Structure
//!
//! All commands follow the format `!water <subcommand> [args...]`. The console
//! adds the `!water` prefix to lines typed without it.
//!
//! ## Available Commands
//!
//! | Command | Arguments | Description |
//! |---------|-----------|-------------|
//! | `help` | None | Display help information |
//! | `status` | None | Today's progress and reminder status |
//! | `drink` / `undo` | None | Add or remove one cup |
//! | `set` | `<cups>` | Overwrite today's count (0-50) |
//! | `reset` | None | Clear today's count |
//! | `goal` | `<cups>` | Change the daily goal (1-20) |
//! | `adjust` | `up|down <cups>` or `off` | Set today's goal adjustment (-5 to 5) |
//! | `weather` | None | Apply the weather recommendation |
//! | `interval` | `<minutes>` | Change the reminder interval (15-240) |
//! | `snooze` | `[minutes]` | Delay the next reminder (1-240) |
//! | `skip` | None | Dismiss the current reminder |
//! | `notifications` / `sound` | `on|off` | Toggle reminders or their sound |
//! | `reload` | None | Reload settings and restart reminders |
//! | `achievements` | None | Achievements with progress |
//! | `report` | None | Weekly report |
//! | `message` | None | A hydration message right now |
//!
//! # Error Handling
//!
//! The module distinguishes between two error categories:
//!
//! - **Silent Errors** ([`CommandParseError::NotForBot`]): lines that are not
//!   `!water` commands. These should not generate responses.
//!
//! - **User Errors** ([`CommandParseError::InvalidCommand`]): invalid syntax or
//!   arguments, with a helpful message for the user.
//!
//! Errors raised by the services while executing a command, validation and
//! storage failures alike, are formatted into the response and never stop the
//! console.
//!
//! # Module Organization
//!
//! - `commander` - Main orchestrator for parsing and executing commands
//! - `command` - Command enum definitions and parsing logic
//! - `actions` - Individual command handler implementations
//! - `markdown_response` - Response formatting utilities

use chrono::{DateTime, Local, NaiveDate};
use tokio::sync::Mutex;

mod actions;
mod command;
mod commander;
mod markdown_response;

pub use crate::commands::command::COMMAND_NAME;
pub use crate::commands::commander::Commander;
pub use crate::commands::markdown_response::{format_error, format_progress, format_reminder};
use crate::{
    achievements::AchievementSystem,
    messages::MessageContext,
    records::WaterRecorder,
    reminders::{Notifier, ReminderScheduler},
    store::{Achievement, Store},
    weather::{WeatherRequester, WeatherService},
};

/// Runtime context for command execution.
///
/// This structure borrows every service a command may act on. It is built by
/// the console for each line and dropped once the command returned.
///
/// # Fields
///
/// * `store` - Backing store, read by the report
/// * `recorder` - Today's record
/// * `achievements` - Achievement unlocking and progress
/// * `scheduler` - Reminder timer
/// * `weather` - Weather service
/// * `message_context` - Latest message generation snapshot
/// * `snooze_minutes` - Snooze duration used when none is given
/// * `now` - Time at which the command was typed
pub struct CommandContext<'a, S, N, R>
where
    S: Store,
    N: Notifier + Send + Sync + 'static,
    R: WeatherRequester,
{
    pub store: &'a S,
    pub recorder: &'a mut WaterRecorder<S>,
    pub achievements: &'a AchievementSystem<S>,
    pub scheduler: &'a mut ReminderScheduler<S, N>,
    pub weather: &'a mut WeatherService<R>,
    pub message_context: &'a Mutex<MessageContext>,
    pub snooze_minutes: u32,
    pub now: DateTime<Local>,
}

impl<S, N, R> CommandContext<'_, S, N, R>
where
    S: Store,
    N: Notifier + Send + Sync + 'static,
    R: WeatherRequester,
{
    pub fn today(&self) -> NaiveDate {
        self.now.date_naive()
    }
}

/// Result of command execution.
///
/// # Fields
///
/// * `response` - Markdown-formatted message to print on the console
/// * `unlocked` - Achievements unlocked while executing the command
///
/// # Examples
///
/// ```
/// let result = CommandResult::from("👌 Reminder skipped.".to_string());
/// assert!(result.unlocked.is_empty());
/// ```
#[derive(Debug, Default)]
pub struct CommandResult {
    /// Markdown-formatted response message
    pub response: String,
    /// Achievements unlocked by this command, in catalog order
    pub unlocked: Vec<Achievement>,
}

impl From<String> for CommandResult {
    fn from(response: String) -> Self {
        CommandResult {
            response,
            unlocked: Vec::new(),
        }
    }
}

/// Errors that can occur during command parsing.
///
/// This enum distinguishes between errors that should produce user-facing
/// messages and those that should be silently ignored.
///
/// # Variants
///
/// * `NotForBot` - Line is not a `!water` command.
///   Should be handled silently without responding to the user.
///
/// * `InvalidCommand` - Command syntax or arguments are invalid.
///   Contains a user-friendly error message to display.
#[derive(Debug)]
pub enum CommandParseError {
    /// Line is not a `!water` command (silent error)
    NotForBot,
    /// Invalid command syntax with error message
    InvalidCommand(String),
}
