//! Help command handler.
//!
//! Displays every available command with its syntax and a short description.
//!
//! This is a stateless command that always returns the same help message.

use log::debug;

use crate::commands::{CommandResult, markdown_response::format_help};

/// Returns formatted help information about available commands.
///
/// Generates a Markdown-formatted message listing all console commands with
/// syntax and usage information. This command is read-only and doesn't modify
/// any state.
pub fn handle_help() -> CommandResult {
    debug!("handling help command");

    CommandResult::from(format_help())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handle_help() {
        let result = handle_help();

        assert!(result.unlocked.is_empty());
        assert!(result.response.contains("`drink`"));
    }
}
