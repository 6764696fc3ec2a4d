//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all application settings.
//! Configuration is loaded from a TOML file; the Telegram bot token comes from
//! the `TELEGRAM_BOT_TOKEN` environment variable (a `.env` file is honored).
//!
//! # Example
//!
//! ```no_run
//! use portal::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use std::path::Path;

use serde::Deserialize;

use super::logging::LoggingConfig;
use super::poll::PollConfig;
use super::services::ServiceConfig;
use super::telegram::TelegramAppConfig;
use crate::error::{ConfigError, Result};

/// Main application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Logging and tracing configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Executables, directories and port of the bootstrapped services.
    #[serde(default)]
    pub services: ServiceConfig,

    /// Tunnel log polling.
    #[serde(default)]
    pub poll: PollConfig,

    /// Telegram bot settings.
    #[serde(default)]
    pub telegram: TelegramAppConfig,
}

impl Config {
    /// Parse configuration from TOML content.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is malformed or validation fails.
    pub fn parse_toml(content: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;

        // The token is a secret: environment only, never the config file.
        config.telegram.load_token_from_env();

        config.validate()?;
        config.services = config.services.anchored_to_cwd()?;

        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, the TOML content is
    /// malformed, or validation fails.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    fn validate(&self) -> Result<()> {
        self.services.validate()?;
        self.poll.validate()?;
        Ok(())
    }

    /// Bot token, or an error naming the variable to set.
    pub fn bot_token(&self) -> Result<&str> {
        self.telegram
            .bot_token
            .as_deref()
            .ok_or_else(|| ConfigError::MissingEnv(super::telegram::BOT_TOKEN_ENV).into())
    }

    /// Initialize logging with the configured settings.
    pub fn init_logging(&self) {
        self.logging.init();
    }
}
