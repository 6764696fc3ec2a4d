//! The bootstrap sequence triggered by a remote command.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tracing::{error, info, info_span, warn, Instrument};
use uuid::Uuid;

use super::artifact::LogArtifact;
use super::poller::UrlPoller;
use super::precondition;
use super::readiness::{wait_until_ready, Readiness};
use super::report::{BootstrapReport, LaunchedServices, RunWarning};
use crate::domain::{LaunchSpec, PollState, Stage, UrlMatch, UrlMatcher};
use crate::error::{BootstrapError, ConfigError};
use crate::infrastructure::config::poll::PollConfig;
use crate::infrastructure::config::services::ServiceConfig;
use crate::infrastructure::config::settings::Config;
use crate::port::{ProcessLauncher, Replier};

/// Runs the start-app / start-tunnel / find-URL sequence.
///
/// One orchestrator serves any number of triggers; it holds only immutable
/// configuration. Overlapping runs are not serialized and share the log
/// file.
pub struct Orchestrator {
    services: ServiceConfig,
    matcher: UrlMatcher,
    poll_interval: Duration,
    max_ticks: u32,
    launcher: Arc<dyn ProcessLauncher>,
}

impl Orchestrator {
    pub fn new(
        services: ServiceConfig,
        poll: &PollConfig,
        launcher: Arc<dyn ProcessLauncher>,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            services: services.anchored_to_cwd()?,
            matcher: poll.matcher()?,
            poll_interval: poll.interval(),
            max_ticks: poll.max_ticks,
            launcher,
        })
    }

    pub fn from_config(
        config: &Config,
        launcher: Arc<dyn ProcessLauncher>,
    ) -> Result<Self, ConfigError> {
        Self::new(config.services.clone(), &config.poll, launcher)
    }

    #[must_use]
    pub fn services(&self) -> &ServiceConfig {
        &self.services
    }

    /// Execute one run, replying at every step.
    ///
    /// Never fails: every terminal error has already been replied when this
    /// returns, and is also available in the report.
    pub async fn run(&self, replier: &dyn Replier) -> BootstrapReport {
        let run_id = Uuid::new_v4();
        let started_at = Utc::now();
        let mut services = LaunchedServices::default();
        let mut warnings = Vec::new();

        let outcome = self
            .execute(replier, &mut services, &mut warnings)
            .instrument(info_span!("bootstrap", %run_id))
            .await;

        if let Err(err) = &outcome {
            error!(%run_id, error = %err, launched = services.launched(), "Bootstrap failed");
            replier.reply(&failure_reply(err)).await;
        }

        BootstrapReport {
            run_id,
            started_at,
            outcome,
            warnings,
            services,
        }
    }

    async fn execute(
        &self,
        replier: &dyn Replier,
        services: &mut LaunchedServices,
        warnings: &mut Vec<RunWarning>,
    ) -> Result<UrlMatch, BootstrapError> {
        replier
            .reply("Attempting to start services and fetch the tunnel link... Please wait.")
            .await;

        precondition::check(&self.services)?;

        let artifact = LogArtifact::new(self.services.log_path());
        match artifact.reset() {
            Ok(removed) => info!(path = %artifact.path().display(), removed, "Tunnel log reset"),
            Err(warning) => {
                warn!(error = %warning, "Continuing with stale tunnel log");
                replier
                    .reply(&format!("Warning: {warning}. Continuing..."))
                    .await;
                warnings.push(RunWarning::Cleanup(warning));
            }
        }

        let app = LaunchSpec::app(
            &self.services.app_executable,
            &self.services.app_args,
            &self.services.working_dir,
        );
        self.launch(&app, services)?;
        replier
            .reply("Application started in the background.")
            .await;

        match wait_until_ready(&self.services).await {
            Readiness::Assumed { waited } | Readiness::Ready { waited } => {
                info!(waited_ms = waited.as_millis() as u64, "Application ready");
            }
            Readiness::TimedOut { waited } => {
                let warning = RunWarning::NotReady { waited };
                warn!(%warning, "Starting tunnel anyway");
                replier
                    .reply(&format!("Warning: {warning}. Starting the tunnel anyway..."))
                    .await;
                warnings.push(warning);
            }
        }

        let tunnel = LaunchSpec::tunnel(
            &self.services.tunnel_executable,
            self.services.port,
            artifact.path(),
            &self.services.working_dir,
        );
        self.launch(&tunnel, services)?;
        replier
            .reply("Tunnel process started in the background. Waiting for URL...")
            .await;

        let poller = UrlPoller::new(
            artifact.clone(),
            self.matcher.clone(),
            self.poll_interval,
            self.max_ticks,
        );
        match poller.run().await {
            PollState::Found { url, ticks } => {
                info!(url = %url, ticks, "Tunnel is up");
                replier
                    .reply(&format!(
                        "Success! Your application should be accessible at: {url}"
                    ))
                    .await;
                Ok(url)
            }
            PollState::TimedOut { ticks } | PollState::Polling { ticks } => {
                Err(BootstrapError::Timeout {
                    log_path: artifact.path().to_path_buf(),
                    ticks,
                    elapsed_secs: polled_secs(self.poll_interval, ticks),
                })
            }
        }
    }

    fn launch(
        &self,
        spec: &LaunchSpec,
        services: &mut LaunchedServices,
    ) -> Result<(), BootstrapError> {
        info!(
            stage = spec.stage.as_str(),
            command = %spec.command_line(),
            cwd = %spec.working_dir.display(),
            "Launching process"
        );
        let handle = self
            .launcher
            .launch(spec)
            .map_err(|source| BootstrapError::Launch {
                stage: spec.stage,
                source,
            })?;
        info!(stage = spec.stage.as_str(), pid = ?handle.id(), "Process launched");
        services.store(spec.stage, handle);
        Ok(())
    }
}

/// Nominal polling time for `ticks` ticks.
fn polled_secs(interval: Duration, ticks: u32) -> u64 {
    interval.as_secs().saturating_mul(u64::from(ticks))
}

/// The single reply emitted for a terminal failure.
fn failure_reply(err: &BootstrapError) -> String {
    match err {
        BootstrapError::Timeout {
            log_path,
            elapsed_secs,
            ..
        } => format!(
            "Failed to retrieve the tunnel URL after {elapsed_secs} seconds. The tunnel might \
             still be starting, or there could be an issue. Check the log file manually: `{}`",
            log_path.display()
        ),
        BootstrapError::MissingResource { .. } | BootstrapError::Launch { .. } => {
            format!("Error: {err}")
        }
    }
}
