//! Tracks the processes of the most recent bootstrap run.
//!
//! Handles used to be thrown away after launch; the registry keeps them so
//! `/status` and `/stop` can act on them later.

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use tracing::{debug, info};
use uuid::Uuid;

use crate::application::bootstrap::{BootstrapReport, LaunchedServices};
use crate::domain::UrlMatch;

/// A run whose processes are still owned by the bot.
#[derive(Debug)]
pub struct TrackedRun {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub url: Option<UrlMatch>,
    pub services: LaunchedServices,
}

impl From<BootstrapReport> for TrackedRun {
    fn from(report: BootstrapReport) -> Self {
        let url = report.url().cloned();
        Self {
            run_id: report.run_id,
            started_at: report.started_at,
            url,
            services: report.services,
        }
    }
}

/// Registry of launched services, shared between command handlers.
#[derive(Debug, Default)]
pub struct ServiceRegistry {
    current: Mutex<Option<TrackedRun>>,
}

impl ServiceRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep the handles of a finished run.
    ///
    /// Runs that launched nothing are not recorded. A recorded run replaces
    /// the previous one, which is returned; its processes keep running.
    pub fn record(&self, report: BootstrapReport) -> Option<TrackedRun> {
        if report.services.is_empty() {
            debug!(run_id = %report.run_id, "Run launched no processes, not tracked");
            return None;
        }

        let run = TrackedRun::from(report);
        info!(
            run_id = %run.run_id,
            launched = run.services.launched(),
            "Tracking launched services"
        );
        self.current.lock().replace(run)
    }

    /// Run `f` against the tracked run, if any.
    pub fn with_current<R>(&self, f: impl FnOnce(&mut TrackedRun) -> R) -> Option<R> {
        self.current.lock().as_mut().map(f)
    }

    /// Stop tracking the current run and hand it to the caller.
    pub fn take(&self) -> Option<TrackedRun> {
        self.current.lock().take()
    }

    #[must_use]
    pub fn is_tracking(&self) -> bool {
        self.current.lock().is_some()
    }
}
