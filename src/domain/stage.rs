//! Named stages and resources of a bootstrap run.

use std::fmt;

/// Which of the two launched processes a step refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// The local application (launched first).
    App,
    /// The tunnel exposing the application's port (launched second).
    Tunnel,
}

impl Stage {
    /// Short identifier used in structured log fields.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::App => "app",
            Self::Tunnel => "tunnel",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::App => write!(f, "application process"),
            Self::Tunnel => write!(f, "tunnel process"),
        }
    }
}

/// A file-system resource that must exist before anything is launched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    TunnelExecutable,
    AppExecutable,
    WorkingDirectory,
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TunnelExecutable => write!(f, "tunnel executable"),
            Self::AppExecutable => write!(f, "application executable"),
            Self::WorkingDirectory => write!(f, "application directory"),
        }
    }
}
