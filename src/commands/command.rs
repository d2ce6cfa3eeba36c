//! Command parsing.
//!
//! This module converts a console line into a structured [`Command`]. Numbers
//! are parsed but not range checked: the services validate them so the error
//! messages stay in one place.

use command_parser::{Command as ParserCommand, Parser};
use log::debug;

use crate::commands::markdown_response::{format_invalid_usage, format_unknown_command};

/// Name of the console command, as in `!water drink`.
pub const COMMAND_NAME: &str = "water";

/// Represents a parsed console command.
#[derive(Debug, Hash, PartialEq, Eq)]
pub enum Command {
    /// Display help information
    Help,
    /// Show today's progress and the reminder status
    Status,
    /// Record one cup
    Drink,
    /// Remove the last cup
    Undo,
    /// Set today's cup count
    Set(i64),
    /// Reset today's cup count
    Reset,
    /// Change the base daily goal
    Goal(i64),
    /// Set today's weather adjustment, `0` to remove it
    Adjust(i64),
    /// Fetch the weather and apply its recommendation
    Weather,
    /// Change the reminder interval in minutes
    Interval(i64),
    /// Delay the next reminder, by the configured duration when `None`
    Snooze(Option<i64>),
    /// Dismiss the current reminder
    Skip,
    /// Enable or disable notifications
    Notifications(bool),
    /// Enable or disable the reminder sound
    Sound(bool),
    /// Reload the settings and restart the reminders
    Reload,
    /// List achievements with their progress
    Achievements,
    /// Show the weekly report
    Report,
    /// Generate a reminder message now
    Message,
}

/// Errors that can occur during command parsing.
#[derive(Debug, PartialEq, Eq)]
pub enum CommandParsingError {
    /// The line could not be parsed as a command
    UnableToParse,
    /// The command is not `water`
    NotWater,
    /// The subcommand is not recognized
    Unknown,
    /// The arguments of the named subcommand are invalid
    InvalidUsage(&'static str),
}

impl Command {
    /// Parses a console line into a Command.
    ///
    /// # Arguments
    ///
    /// * `parser` - The command parser instance
    /// * `body` - The line to parse
    ///
    /// # Returns
    ///
    /// * `Ok(Command)` - If the line is a valid command
    /// * `Err(CommandParsingError)` - If parsing fails or the command is invalid
    ///
    /// # Examples
    ///
    /// ```
    /// let parser = Parser::new('!', '-');
    /// let result = Command::parse(&parser, "!water set 4");
    /// assert!(matches!(result, Ok(Command::Set(4))));
    /// ```
    pub fn parse(parser: &Parser, body: &str) -> Result<Self, CommandParsingError> {
        // For an unknown reason the parser ignores the last word, so we add a dummy word at the end
        let body = body.to_string() + " dummy";

        let command = match parser.parse(&body) {
            Ok(cmd) => cmd,
            Err(_) => return Err(CommandParsingError::UnableToParse),
        };

        if command.name != COMMAND_NAME {
            return Err(CommandParsingError::NotWater);
        }

        debug!("parsing command: {:?}", command);

        if command.arguments.is_empty() {
            return Ok(Command::Help);
        }

        match command.arguments[0].as_str() {
            "help" => Ok(Command::Help),
            "status" => Ok(Command::Status),
            "drink" => Ok(Command::Drink),
            "undo" => Ok(Command::Undo),
            "set" => Ok(Command::Set(Self::parse_number(&command, "set")?)),
            "reset" => Ok(Command::Reset),
            "goal" => Ok(Command::Goal(Self::parse_number(&command, "goal")?)),
            "adjust" => Ok(Command::Adjust(Self::parse_adjust(&command)?)),
            "weather" => Ok(Command::Weather),
            "interval" => Ok(Command::Interval(Self::parse_number(
                &command, "interval",
            )?)),
            "snooze" => Ok(Command::Snooze(Self::parse_optional_number(
                &command, "snooze",
            )?)),
            "skip" => Ok(Command::Skip),
            "notifications" => Ok(Command::Notifications(Self::parse_switch(
                &command,
                "notifications",
            )?)),
            "sound" => Ok(Command::Sound(Self::parse_switch(&command, "sound")?)),
            "reload" => Ok(Command::Reload),
            "achievements" => Ok(Command::Achievements),
            "report" => Ok(Command::Report),
            "message" => Ok(Command::Message),
            _ => Err(CommandParsingError::Unknown),
        }
    }

    fn parse_number(
        command: &ParserCommand,
        subcommand: &'static str,
    ) -> Result<i64, CommandParsingError> {
        Self::parse_optional_number(command, subcommand)?
            .ok_or(CommandParsingError::InvalidUsage(subcommand))
    }

    fn parse_optional_number(
        command: &ParserCommand,
        subcommand: &'static str,
    ) -> Result<Option<i64>, CommandParsingError> {
        match command.arguments.get(1) {
            None => Ok(None),
            Some(value) => value.parse::<i64>().map(Some).map_err(|_| {
                debug!("invalid number {} for {}", value, subcommand);
                CommandParsingError::InvalidUsage(subcommand)
            }),
        }
    }

    fn parse_switch(
        command: &ParserCommand,
        subcommand: &'static str,
    ) -> Result<bool, CommandParsingError> {
        match command.arguments.get(1).map(String::as_str) {
            Some("on") => Ok(true),
            Some("off") => Ok(false),
            _ => Err(CommandParsingError::InvalidUsage(subcommand)),
        }
    }

    /// `adjust up <n>`, `adjust down <n>` or `adjust off`.
    ///
    /// Negative numbers would be read as options, hence the direction word.
    fn parse_adjust(command: &ParserCommand) -> Result<i64, CommandParsingError> {
        let cups = || -> Result<i64, CommandParsingError> {
            command
                .arguments
                .get(2)
                .and_then(|value| value.parse::<i64>().ok())
                .ok_or(CommandParsingError::InvalidUsage("adjust"))
        };

        match command.arguments.get(1).map(String::as_str) {
            Some("off") => Ok(0),
            Some("up") => cups(),
            Some("down") => Ok(-cups()?),
            _ => Err(CommandParsingError::InvalidUsage("adjust")),
        }
    }
}

/// Formats a command error into a user-friendly message.
///
/// # Returns
///
/// * `Some(String)` - A message for user-facing errors
/// * `None` - For lines that are not `water` commands
pub fn format_command_error(error: CommandParsingError) -> Option<String> {
    match error {
        CommandParsingError::Unknown => Some(format_unknown_command()),
        CommandParsingError::InvalidUsage(subcommand) => Some(format_invalid_usage(subcommand)),
        _ => None,
    }
}
