//! Paths, port and readiness policy for the two bootstrapped services.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::error::ConfigError;

/// Everything the orchestrator needs to know about the local services.
///
/// Resolved once at startup and handed to the orchestrator by value.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    /// Directory both processes run in.
    #[serde(default)]
    pub working_dir: PathBuf,
    /// Executable of the application (e.g. `node`).
    #[serde(default)]
    pub app_executable: PathBuf,
    /// Arguments passed to the application executable.
    #[serde(default = "default_app_args")]
    pub app_args: Vec<String>,
    /// Tunnel executable (e.g. `cloudflared`).
    #[serde(default)]
    pub tunnel_executable: PathBuf,
    /// Log file the tunnel writes to. Relative paths resolve against
    /// `working_dir`.
    #[serde(default = "default_log_file")]
    pub log_file: PathBuf,
    /// Local HTTP port served by the application.
    #[serde(default = "default_port")]
    pub port: u16,
    /// How to decide the application is ready before starting the tunnel.
    #[serde(default)]
    pub readiness: ReadinessPolicy,
}

fn default_app_args() -> Vec<String> {
    vec!["server.js".to_string()]
}

fn default_log_file() -> PathBuf {
    PathBuf::from("cloudflare_output.log")
}

const fn default_port() -> u16 {
    3001
}

/// Readiness policy applied between the two launches.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum ReadinessPolicy {
    /// Sleep a fixed time and assume the application is up.
    Delay {
        #[serde(default = "default_delay_secs")]
        delay_secs: u64,
    },
    /// Wait until the application accepts TCP connections on its port.
    Port {
        #[serde(default = "default_readiness_timeout_secs")]
        timeout_secs: u64,
        #[serde(default = "default_readiness_interval_ms")]
        interval_ms: u64,
    },
    /// Wait until the application creates a sentinel file.
    Sentinel {
        path: PathBuf,
        #[serde(default = "default_readiness_timeout_secs")]
        timeout_secs: u64,
        #[serde(default = "default_readiness_interval_ms")]
        interval_ms: u64,
    },
}

const fn default_delay_secs() -> u64 {
    5
}

const fn default_readiness_timeout_secs() -> u64 {
    30
}

const fn default_readiness_interval_ms() -> u64 {
    500
}

impl Default for ReadinessPolicy {
    fn default() -> Self {
        Self::Delay {
            delay_secs: default_delay_secs(),
        }
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self::new(PathBuf::new(), PathBuf::new(), PathBuf::new())
    }
}

impl ServiceConfig {
    /// Config with the given paths and defaults for everything else.
    #[must_use]
    pub fn new(
        working_dir: impl Into<PathBuf>,
        app_executable: impl Into<PathBuf>,
        tunnel_executable: impl Into<PathBuf>,
    ) -> Self {
        Self {
            working_dir: working_dir.into(),
            app_executable: app_executable.into(),
            app_args: default_app_args(),
            tunnel_executable: tunnel_executable.into(),
            log_file: default_log_file(),
            port: default_port(),
            readiness: ReadinessPolicy::default(),
        }
    }

    /// Resolve relative `working_dir` and executable paths against `base`.
    ///
    /// The processes run inside `working_dir` while the bot checks and polls
    /// from its own directory; both sides must see the same files.
    #[must_use]
    pub fn anchored(mut self, base: &Path) -> Self {
        for path in [
            &mut self.working_dir,
            &mut self.app_executable,
            &mut self.tunnel_executable,
        ] {
            if path.is_relative() && !path.as_os_str().is_empty() {
                *path = base.join(&*path);
            }
        }
        self
    }

    fn is_anchored(&self) -> bool {
        self.working_dir.is_absolute()
            && self.app_executable.is_absolute()
            && self.tunnel_executable.is_absolute()
    }

    /// [`anchored`](Self::anchored) against the current directory.
    pub fn anchored_to_cwd(self) -> Result<Self, ConfigError> {
        if self.is_anchored() {
            return Ok(self);
        }
        let cwd = std::env::current_dir().map_err(|e| ConfigError::InvalidValue {
            field: "working_dir",
            reason: format!("cannot resolve against the current directory: {e}"),
        })?;
        Ok(self.anchored(&cwd))
    }

    /// Location of the tunnel log artifact.
    #[must_use]
    pub fn log_path(&self) -> PathBuf {
        if self.log_file.is_absolute() {
            self.log_file.clone()
        } else {
            self.working_dir.join(&self.log_file)
        }
    }

    /// Sentinel paths resolve against `working_dir` like the log file.
    #[must_use]
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.working_dir.join(path)
        }
    }

    /// Structural validation. Existence of the paths is checked per run.
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.working_dir.as_os_str().is_empty() {
            return Err(ConfigError::MissingField {
                field: "working_dir",
            });
        }
        if self.app_executable.as_os_str().is_empty() {
            return Err(ConfigError::MissingField {
                field: "app_executable",
            });
        }
        if self.tunnel_executable.as_os_str().is_empty() {
            return Err(ConfigError::MissingField {
                field: "tunnel_executable",
            });
        }
        if self.log_file.as_os_str().is_empty() {
            return Err(ConfigError::MissingField { field: "log_file" });
        }
        if self.port == 0 {
            return Err(ConfigError::InvalidValue {
                field: "port",
                reason: "must be greater than 0".to_string(),
            });
        }
        self.readiness.validate()
    }
}

impl ReadinessPolicy {
    /// Probe interval, or `None` for the fixed delay.
    #[must_use]
    pub fn interval(&self) -> Option<Duration> {
        match self {
            Self::Delay { .. } => None,
            Self::Port { interval_ms, .. } | Self::Sentinel { interval_ms, .. } => {
                Some(Duration::from_millis(*interval_ms))
            }
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        match self {
            Self::Delay { .. } => Ok(()),
            Self::Port {
                timeout_secs,
                interval_ms,
            } => validate_probe(*timeout_secs, *interval_ms),
            Self::Sentinel {
                path,
                timeout_secs,
                interval_ms,
            } => {
                if path.as_os_str().is_empty() {
                    return Err(ConfigError::MissingField {
                        field: "readiness.path",
                    });
                }
                validate_probe(*timeout_secs, *interval_ms)
            }
        }
    }
}

fn validate_probe(timeout_secs: u64, interval_ms: u64) -> Result<(), ConfigError> {
    if timeout_secs == 0 {
        return Err(ConfigError::InvalidValue {
            field: "readiness.timeout_secs",
            reason: "must be greater than 0".to_string(),
        });
    }
    if interval_ms == 0 {
        return Err(ConfigError::InvalidValue {
            field: "readiness.interval_ms",
            reason: "must be greater than 0".to_string(),
        });
    }
    Ok(())
}
