//! Command handling for the Telegram bot.
//!
//! Transport-agnostic: replies go through a [`Replier`], so the same control
//! drives the real bot and the tests.

use std::fmt::Write as _;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use super::command::{command_help, parse_command, CommandParseError, TelegramCommand};
use crate::application::bootstrap::{Orchestrator, ServiceStatus};
use crate::domain::ProcessState;
use crate::infrastructure::registry::ServiceRegistry;
use crate::port::Replier;

/// Handles bot commands against the orchestrator and service registry.
#[derive(Clone)]
pub struct TelegramControl {
    orchestrator: Arc<Orchestrator>,
    registry: Arc<ServiceRegistry>,
    started_at: DateTime<Utc>,
}

impl TelegramControl {
    #[must_use]
    pub fn new(orchestrator: Arc<Orchestrator>, registry: Arc<ServiceRegistry>) -> Self {
        Self {
            orchestrator,
            registry,
            started_at: Utc::now(),
        }
    }

    /// Handle one incoming message.
    ///
    /// Plain text is ignored. Unknown commands get the help text back.
    pub async fn handle(&self, text: &str, replier: &dyn Replier) {
        match parse_command(text) {
            Ok(TelegramCommand::Launch) => self.launch(replier).await,
            Ok(command) => replier.reply(&self.execute(command)).await,
            Err(CommandParseError::NotACommand) => {}
            Err(err) => {
                replier
                    .reply(&format!("Invalid command: {err}\n\n{}", command_help()))
                    .await;
            }
        }
    }

    /// Response for commands that answer immediately. `/launch` streams its
    /// replies from [`handle`](Self::handle) and never reaches this.
    fn execute(&self, command: TelegramCommand) -> String {
        match command {
            TelegramCommand::Status => self.status_text(),
            TelegramCommand::Stop => self.stop_text(),
            TelegramCommand::Version => version_text(),
            TelegramCommand::Start | TelegramCommand::Help | TelegramCommand::Launch => {
                command_help().to_string()
            }
        }
    }

    async fn launch(&self, replier: &dyn Replier) {
        let report = self.orchestrator.run(replier).await;
        info!(
            run_id = %report.run_id,
            success = report.is_success(),
            warnings = report.warnings.len(),
            "Launch command finished"
        );
        if let Some(previous) = self.registry.record(report) {
            info!(
                run_id = %previous.run_id,
                "Previous run no longer tracked; its processes keep running"
            );
        }
    }

    fn status_text(&self) -> String {
        let mut text = String::from("📊 Status\n\n");
        let _ = writeln!(text, "Bot uptime: {}", format_uptime(self.started_at));

        let tracked = self.registry.with_current(|run| {
            let mut block = String::new();
            let _ = writeln!(block, "Run: {}", run.run_id);
            let _ = writeln!(
                block,
                "Started: {}",
                run.started_at.format("%Y-%m-%d %H:%M:%S UTC")
            );
            match &run.url {
                Some(url) => {
                    let _ = writeln!(block, "URL: {url}");
                }
                None => block.push_str("URL: not found\n"),
            }
            for status in run.services.status() {
                let _ = writeln!(block, "{}", format_service(&status));
            }
            block
        });

        match tracked {
            Some(block) => {
                text.push('\n');
                text.push_str(&block);
            }
            None => text.push_str("\nNo services launched yet."),
        }
        text.trim_end().to_string()
    }

    fn stop_text(&self) -> String {
        let Some(mut run) = self.registry.take() else {
            return "Nothing to stop.".to_string();
        };

        let requested = run.services.launched();
        let failures = run.services.kill_all();
        info!(run_id = %run.run_id, requested, failed = failures.len(), "Stop requested");

        let mut text = format!("⏹️ Stop requested for {requested} process(es).");
        for (stage, err) in &failures {
            warn!(stage = stage.as_str(), error = %err, "Failed to stop process");
            let _ = write!(text, "\nCould not stop {stage}: {err}");
        }
        text
    }
}

fn format_service(status: &ServiceStatus) -> String {
    let pid = status
        .pid
        .map_or_else(|| "?".to_string(), |pid| pid.to_string());
    let state = match &status.state {
        Ok(ProcessState::Running) => "running".to_string(),
        Ok(ProcessState::Exited(Some(code))) => format!("exited with code {code}"),
        Ok(ProcessState::Exited(None)) => "terminated by signal".to_string(),
        Err(err) => format!("unknown ({err})"),
    };
    format!("{} (pid {pid}): {state}", status.stage.as_str())
}

fn version_text() -> String {
    format!("🔖 portal {}", env!("CARGO_PKG_VERSION"))
}

fn format_uptime(started_at: DateTime<Utc>) -> String {
    let total_seconds = (Utc::now() - started_at).num_seconds().max(0);
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    format!("{hours:02}:{minutes:02}:{seconds:02}")
}
