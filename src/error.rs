use std::path::PathBuf;

use thiserror::Error;

use crate::domain::stage::{Resource, Stage};

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),

    #[error("missing environment variable: {0}")]
    MissingEnv(&'static str),
}

/// Terminal failures of a single bootstrap run.
///
/// Each variant is rendered into exactly one reply before the run ends.
#[derive(Error, Debug)]
pub enum BootstrapError {
    #[error("{resource} not found at `{}`. Please check the path.", path.display())]
    MissingResource { resource: Resource, path: PathBuf },

    #[error("failed to start {stage}: {source}")]
    Launch {
        stage: Stage,
        #[source]
        source: std::io::Error,
    },

    #[error(
        "no tunnel URL found in `{}` after {elapsed_secs} seconds ({ticks} checks)",
        log_path.display()
    )]
    Timeout {
        log_path: PathBuf,
        ticks: u32,
        elapsed_secs: u64,
    },
}

impl BootstrapError {
    /// True when the run aborted before any process was launched.
    #[must_use]
    pub const fn is_precondition(&self) -> bool {
        matches!(self, Self::MissingResource { .. })
    }
}

/// Stale tunnel log could not be removed. The run continues.
#[derive(Error, Debug)]
#[error("could not delete old log file `{}`: {source}", path.display())]
pub struct CleanupWarning {
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}

/// Errors from the admin password utility.
#[derive(Error, Debug)]
pub enum PasswordError {
    #[error("no password entered")]
    Empty,

    #[error("passwords do not match")]
    Mismatch,

    #[error("failed to hash password: {0}")]
    Hash(#[from] bcrypt::BcryptError),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Bootstrap(#[from] BootstrapError),

    /// A run failure the user has already been shown as a reply.
    #[error(transparent)]
    Reported(BootstrapError),

    #[error(transparent)]
    Password(#[from] PasswordError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("prompt error: {0}")]
    Prompt(String),

    #[error("bot error: {0}")]
    Bot(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// True when the failure was already shown and must not be printed again.
    #[must_use]
    pub const fn is_reported(&self) -> bool {
        matches!(self, Self::Reported(_))
    }
}

impl From<dialoguer::Error> for Error {
    fn from(err: dialoguer::Error) -> Self {
        Error::Prompt(err.to_string())
    }
}
