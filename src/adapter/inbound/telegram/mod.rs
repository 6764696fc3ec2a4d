//! Telegram inbound adapter.
//!
//! Requires the `telegram` feature.

pub mod bot;
pub mod command;
pub mod control;

pub use bot::{ChatReplier, TelegramBot};
pub use command::{parse_command, CommandParseError, TelegramCommand};
pub use control::TelegramControl;
