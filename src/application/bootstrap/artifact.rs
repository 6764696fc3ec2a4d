//! The tunnel log artifact: reset before launch, read while polling.

use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::domain::{PollObservation, UrlMatcher};
use crate::error::CleanupWarning;

/// Log file written by the tunnel process. Only ever read or deleted here.
#[derive(Debug, Clone)]
pub struct LogArtifact {
    path: PathBuf,
}

impl LogArtifact {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Delete a log left over from a previous run.
    ///
    /// Returns whether a file was removed. A missing file is not an error.
    pub fn reset(&self) -> Result<bool, CleanupWarning> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(source) => Err(CleanupWarning {
                path: self.path.clone(),
                source,
            }),
        }
    }

    /// Read the whole log and look for the public URL.
    ///
    /// The tunnel may be mid-write; invalid UTF-8 is replaced rather than
    /// rejected, and read failures are left for the next tick.
    #[must_use]
    pub fn observe(&self, matcher: &UrlMatcher) -> PollObservation {
        match std::fs::read(&self.path) {
            Ok(bytes) => {
                let content = String::from_utf8_lossy(&bytes);
                matcher
                    .find(&content)
                    .map_or(PollObservation::NoMatch, PollObservation::Match)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => PollObservation::Absent,
            Err(e) => {
                debug!(
                    path = %self.path.display(),
                    error = %e,
                    "Tunnel log unreadable, retrying next tick"
                );
                PollObservation::Unreadable
            }
        }
    }
}
