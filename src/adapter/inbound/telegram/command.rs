//! Telegram command parsing.

/// Supported Telegram commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TelegramCommand {
    Start,
    Help,
    /// Start the application and tunnel, reply with the public URL.
    Launch,
    Status,
    Stop,
    Version,
}

/// Parse error for Telegram command messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandParseError {
    NotACommand,
    UnknownCommand(String),
}

impl std::fmt::Display for CommandParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotACommand => write!(f, "message is not a command"),
            Self::UnknownCommand(cmd) => write!(f, "unknown command `{cmd}`"),
        }
    }
}

impl std::error::Error for CommandParseError {}

/// Parse a Telegram message into a bot command.
///
/// Only the first word matters; trailing arguments are ignored.
pub fn parse_command(text: &str) -> Result<TelegramCommand, CommandParseError> {
    let Some(raw_command) = text.split_whitespace().next() else {
        return Err(CommandParseError::NotACommand);
    };
    if !raw_command.starts_with('/') {
        return Err(CommandParseError::NotACommand);
    }

    let command = raw_command
        .split_once('@')
        .map_or(raw_command, |(head, _)| head);

    match command {
        "/start" => Ok(TelegramCommand::Start),
        "/help" => Ok(TelegramCommand::Help),
        "/s" | "/launch" => Ok(TelegramCommand::Launch),
        "/status" => Ok(TelegramCommand::Status),
        "/stop" => Ok(TelegramCommand::Stop),
        "/version" => Ok(TelegramCommand::Version),
        other => Err(CommandParseError::UnknownCommand(other.to_string())),
    }
}

/// Help text returned by `/start` and `/help`.
#[must_use]
pub const fn command_help() -> &'static str {
    "📋 Commands\n\n\
    /s or /launch - 🚀 Start the app and tunnel, reply with the public URL\n\
    /status - 📊 State of the launched processes\n\
    /stop - ⏹️ Stop the launched processes\n\
    /version - 🔖 Build version\n\
    /help - ❓ Show this help"
}

/// Bot commands for Telegram menu registration.
///
/// Returns tuples of (command, description) for `set_my_commands`.
#[must_use]
pub fn bot_commands() -> Vec<(&'static str, &'static str)> {
    vec![
        ("launch", "Start the app and tunnel"),
        ("s", "Shortcut for /launch"),
        ("status", "State of the launched processes"),
        ("stop", "Stop the launched processes"),
        ("version", "Build version"),
        ("help", "Show all commands"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_trigger_aliases() {
        assert_eq!(parse_command("/s").unwrap(), TelegramCommand::Launch);
        assert_eq!(parse_command("/launch").unwrap(), TelegramCommand::Launch);
    }

    #[test]
    fn parse_all_basic_commands() {
        assert_eq!(parse_command("/start").unwrap(), TelegramCommand::Start);
        assert_eq!(parse_command("/help").unwrap(), TelegramCommand::Help);
        assert_eq!(parse_command("/status").unwrap(), TelegramCommand::Status);
        assert_eq!(parse_command("/stop").unwrap(), TelegramCommand::Stop);
        assert_eq!(parse_command("/version").unwrap(), TelegramCommand::Version);
    }

    #[test]
    fn parse_command_with_bot_mention() {
        assert_eq!(
            parse_command("/s@portal_bot").unwrap(),
            TelegramCommand::Launch
        );
        assert_eq!(
            parse_command("/status@another_bot_123").unwrap(),
            TelegramCommand::Status
        );
    }

    #[test]
    fn trailing_arguments_are_ignored() {
        assert_eq!(
            parse_command("/launch now please").unwrap(),
            TelegramCommand::Launch
        );
    }

    #[test]
    fn plain_text_is_not_a_command() {
        assert_eq!(parse_command("hello"), Err(CommandParseError::NotACommand));
        assert_eq!(parse_command(""), Err(CommandParseError::NotACommand));
        assert_eq!(parse_command("   "), Err(CommandParseError::NotACommand));
        assert_eq!(parse_command("!s"), Err(CommandParseError::NotACommand));
    }

    #[test]
    fn unknown_command_is_reported() {
        assert_eq!(
            parse_command("/deploy"),
            Err(CommandParseError::UnknownCommand("/deploy".to_string()))
        );
    }

    #[test]
    fn menu_covers_every_help_entry() {
        let help = command_help();
        for (command, _) in bot_commands() {
            assert!(help.contains(&format!("/{command}")), "missing /{command}");
        }
    }
}
