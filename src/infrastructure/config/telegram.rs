//! Telegram bot configuration.

use serde::Deserialize;

/// Environment variable holding the bot token. Never read from the file.
pub const BOT_TOKEN_ENV: &str = "TELEGRAM_BOT_TOKEN";

/// Telegram bot configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct TelegramAppConfig {
    /// Register the command list with Telegram's "/" menu on startup.
    #[serde(default = "default_true")]
    pub register_commands: bool,
    /// Bot API token, loaded from [`BOT_TOKEN_ENV`].
    #[serde(skip)]
    pub bot_token: Option<String>,
}

const fn default_true() -> bool {
    true
}

impl Default for TelegramAppConfig {
    fn default() -> Self {
        Self {
            register_commands: default_true(),
            bot_token: None,
        }
    }
}

impl TelegramAppConfig {
    /// Fill the token from the environment. Empty values count as unset.
    pub fn load_token_from_env(&mut self) {
        self.bot_token = std::env::var(BOT_TOKEN_ENV)
            .ok()
            .filter(|token| !token.trim().is_empty());
    }
}
