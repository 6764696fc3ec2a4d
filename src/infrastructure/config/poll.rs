//! Tunnel URL polling configuration.

use std::time::Duration;

use serde::Deserialize;

use crate::domain::url::{UrlMatcher, DEFAULT_TUNNEL_DOMAIN};
use crate::error::ConfigError;

/// How the tunnel log is polled for the public URL.
#[derive(Debug, Clone, Deserialize)]
pub struct PollConfig {
    /// Seconds between ticks (default: 2).
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
    /// Ticks before giving up (default: 30).
    #[serde(default = "default_max_ticks")]
    pub max_ticks: u32,
    /// Domain the public URL lives under.
    #[serde(default = "default_tunnel_domain")]
    pub tunnel_domain: String,
    /// Regular expression overriding the domain-derived pattern.
    #[serde(default)]
    pub url_pattern: Option<String>,
}

const fn default_interval_secs() -> u64 {
    2
}

const fn default_max_ticks() -> u32 {
    30
}

fn default_tunnel_domain() -> String {
    DEFAULT_TUNNEL_DOMAIN.to_string()
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_interval_secs(),
            max_ticks: default_max_ticks(),
            tunnel_domain: default_tunnel_domain(),
            url_pattern: None,
        }
    }
}

impl PollConfig {
    #[must_use]
    pub const fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }

    /// Total time budget across all ticks.
    #[must_use]
    pub const fn budget(&self) -> Duration {
        Duration::from_secs(self.interval_secs.saturating_mul(self.max_ticks as u64))
    }

    /// Compile the URL pattern.
    pub fn matcher(&self) -> Result<UrlMatcher, ConfigError> {
        let compiled = match &self.url_pattern {
            Some(pattern) => UrlMatcher::from_pattern(pattern),
            None => UrlMatcher::for_domain(&self.tunnel_domain),
        };
        compiled.map_err(|e| ConfigError::InvalidValue {
            field: "url_pattern",
            reason: e.to_string(),
        })
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.interval_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "interval_secs",
                reason: "must be greater than 0".to_string(),
            });
        }
        if self.max_ticks == 0 {
            return Err(ConfigError::InvalidValue {
                field: "max_ticks",
                reason: "must be greater than 0".to_string(),
            });
        }
        if self.url_pattern.is_none() && self.tunnel_domain.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "tunnel_domain",
            });
        }
        self.matcher().map(|_| ())
    }
}
