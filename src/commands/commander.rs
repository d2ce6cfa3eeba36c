//! Command orchestration and execution.
//!
//! This module provides the [`Commander`] struct, which serves as the main entry point
//! for processing console commands. It coordinates command parsing and execution,
//! routing commands to their appropriate handlers.
//!
//! # Architecture
//!
//! The Commander follows a two-phase processing model:
//!
//! 1. **Parsing Phase** - Validates and parses a console line into a structured [`Command`]
//! 2. **Execution Phase** - Routes the parsed command to the handler of its service
//!
//! # Flow
//!
//! ```text
//! Console line → parse() → Command → execute() → CommandResult
//! ```
//!
//! # Examples
//!
//! ```no_run
//! let commander = Commander::new();
//!
//! let command = commander.parse("!water drink")?;
//! let result = commander.execute(&command, &mut context).await;
//! println!("{}", result.response);
//! ```

use command_parser::Parser;
use log::debug;

use crate::{
    commands::{
        CommandContext, CommandParseError, CommandResult,
        actions::{
            handle_achievements, handle_help, handle_hydration, handle_message, handle_reminders,
            handle_report, handle_status, handle_weather,
        },
        command::{Command, format_command_error},
    },
    reminders::Notifier,
    store::Store,
    weather::WeatherRequester,
};

/// Command orchestrator for parsing and executing console commands.
///
/// The Commander is responsible for:
/// - Parsing console lines into structured commands
/// - Converting parsing errors into user-friendly messages
/// - Routing commands to the appropriate handlers
///
/// # Command Prefix
///
/// All commands must start with the `!water` prefix. Lines with another
/// prefix are silently ignored (returning [`CommandParseError::NotForBot`]).
pub struct Commander {
    /// Command parser for processing user commands
    parser: Parser,
}

impl Commander {
    /// Creates a new Commander instance with a configured command parser.
    ///
    /// The parser is configured to recognize commands starting with `!` as the command
    /// prefix and `-` as the option prefix.
    ///
    /// # Examples
    ///
    /// ```
    /// let commander = Commander::new();
    /// ```
    pub fn new() -> Self {
        let parser = Parser::new('!', '-');
        Commander { parser }
    }

    /// Parses a console line into a structured command.
    ///
    /// # Arguments
    ///
    /// * `body` - The line typed by the user, with its `!water` prefix
    ///
    /// # Returns
    ///
    /// * `Ok(Command)` - Successfully parsed command
    /// * `Err(CommandParseError::NotForBot)` - Line is not a `!water` command
    /// * `Err(CommandParseError::InvalidCommand)` - Command syntax is invalid
    ///
    /// # Examples
    ///
    /// ```
    /// let commander = Commander::new();
    ///
    /// assert!(commander.parse("!water drink").is_ok());
    /// assert!(commander.parse("Hello, world!").is_err());
    /// ```
    pub fn parse(&self, body: &str) -> Result<Command, CommandParseError> {
        match Command::parse(&self.parser, body) {
            Ok(command) => Ok(command),
            // Stay silent when the line is not a water command
            Err(error) => match format_command_error(error) {
                Some(message) => Err(CommandParseError::InvalidCommand(message)),
                None => Err(CommandParseError::NotForBot),
            },
        }
    }

    /// Executes a parsed command and returns the result.
    ///
    /// # Arguments
    ///
    /// * `command` - The parsed command to execute
    /// * `context` - The services the command acts on
    ///
    /// # Returns
    ///
    /// The Markdown response, including the error of a rejected command, and
    /// the achievements unlocked by the command.
    ///
    /// # Command Handlers
    ///
    /// - [`Command::Help`] → [`handle_help`]
    /// - [`Command::Status`] → [`handle_status`]
    /// - Drink, undo, set, reset, goal and adjust → [`handle_hydration`]
    /// - Interval, snooze, skip, notifications, sound and reload → [`handle_reminders`]
    /// - [`Command::Weather`] → [`handle_weather`]
    /// - [`Command::Achievements`] → [`handle_achievements`]
    /// - [`Command::Report`] → [`handle_report`]
    /// - [`Command::Message`] → [`handle_message`]
    pub async fn execute<S, N, R>(
        &self,
        command: &Command,
        context: &mut CommandContext<'_, S, N, R>,
    ) -> CommandResult
    where
        S: Store,
        N: Notifier + Send + Sync + 'static,
        R: WeatherRequester,
    {
        debug!("executing command {:?}", command);

        match command {
            Command::Help => handle_help(),
            Command::Status => handle_status(context).await,
            Command::Weather => handle_weather(context).await,
            Command::Achievements => handle_achievements(context).await,
            Command::Report => handle_report(context).await,
            Command::Message => handle_message(context).await,
            Command::Drink
            | Command::Undo
            | Command::Set(_)
            | Command::Reset
            | Command::Goal(_)
            | Command::Adjust(_) => handle_hydration(context, command)
                .await
                .unwrap_or_default(),
            Command::Interval(_)
            | Command::Snooze(_)
            | Command::Skip
            | Command::Notifications(_)
            | Command::Sound(_)
            | Command::Reload => handle_reminders(context, command)
                .await
                .unwrap_or_default(),
        }
    }
}
