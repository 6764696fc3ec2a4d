//! Result of one bootstrap run and the process handles it produced.

use std::fmt;
use std::io;
use std::time::Duration;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{ProcessState, Stage, UrlMatch};
use crate::error::{BootstrapError, CleanupWarning};
use crate::port::ProcessHandle;

/// Non-fatal problems reported during a run.
#[derive(Debug)]
pub enum RunWarning {
    Cleanup(CleanupWarning),
    NotReady { waited: Duration },
}

impl fmt::Display for RunWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cleanup(warning) => write!(f, "{warning}"),
            Self::NotReady { waited } => write!(
                f,
                "application did not become ready within {} seconds",
                waited.as_secs()
            ),
        }
    }
}

/// Handles of the processes launched by a run, kept after it ends.
#[derive(Debug, Default)]
pub struct LaunchedServices {
    pub app: Option<Box<dyn ProcessHandle>>,
    pub tunnel: Option<Box<dyn ProcessHandle>>,
}

/// Point-in-time view of one launched process.
#[derive(Debug)]
pub struct ServiceStatus {
    pub stage: Stage,
    pub pid: Option<u32>,
    pub state: io::Result<ProcessState>,
}

impl LaunchedServices {
    /// Number of processes that were started.
    #[must_use]
    pub fn launched(&self) -> usize {
        usize::from(self.app.is_some()) + usize::from(self.tunnel.is_some())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.launched() == 0
    }

    pub(crate) fn store(&mut self, stage: Stage, handle: Box<dyn ProcessHandle>) {
        match stage {
            Stage::App => self.app = Some(handle),
            Stage::Tunnel => self.tunnel = Some(handle),
        }
    }

    fn handles_mut(&mut self) -> impl Iterator<Item = (Stage, &mut Box<dyn ProcessHandle>)> {
        [(Stage::App, self.app.as_mut()), (Stage::Tunnel, self.tunnel.as_mut())]
            .into_iter()
            .filter_map(|(stage, handle)| handle.map(|h| (stage, h)))
    }

    /// Query every launched process without blocking.
    pub fn status(&mut self) -> Vec<ServiceStatus> {
        self.handles_mut()
            .map(|(stage, handle)| ServiceStatus {
                stage,
                pid: handle.id(),
                state: handle.state(),
            })
            .collect()
    }

    /// Request termination of every launched process, tunnel first.
    ///
    /// Returns the stages whose kill request failed.
    pub fn kill_all(&mut self) -> Vec<(Stage, io::Error)> {
        let mut failures = Vec::new();
        if let Some(handle) = self.tunnel.as_mut() {
            if let Err(e) = handle.kill() {
                failures.push((Stage::Tunnel, e));
            }
        }
        if let Some(handle) = self.app.as_mut() {
            if let Err(e) = handle.kill() {
                failures.push((Stage::App, e));
            }
        }
        failures
    }
}

/// Everything a caller may want to know after a run.
#[derive(Debug)]
pub struct BootstrapReport {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub outcome: Result<UrlMatch, BootstrapError>,
    pub warnings: Vec<RunWarning>,
    pub services: LaunchedServices,
}

impl BootstrapReport {
    /// Public URL, when the run succeeded.
    #[must_use]
    pub fn url(&self) -> Option<&UrlMatch> {
        self.outcome.as_ref().ok()
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        self.outcome.is_ok()
    }
}
