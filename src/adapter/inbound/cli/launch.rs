//! Handler for the `launch` command: one bootstrap run from the terminal.

use std::sync::Arc;

use async_trait::async_trait;

use super::output;
use crate::adapter::outbound::process::DetachedLauncher;
use crate::application::bootstrap::Orchestrator;
use crate::error::{Error, Result};
use crate::infrastructure::config::settings::Config;
use crate::port::Replier;

/// Prints replies to the terminal instead of a chat.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleReplier;

#[async_trait]
impl Replier for ConsoleReplier {
    async fn reply(&self, text: &str) {
        output::reply(text);
    }
}

/// Execute the launch command.
///
/// The launched processes are detached and keep running after this returns.
pub async fn execute(config: &Config) -> Result<()> {
    output::header(env!("CARGO_PKG_VERSION"));

    let orchestrator = Orchestrator::from_config(config, Arc::new(DetachedLauncher::new()))?;
    let mut report = orchestrator.run(&ConsoleReplier).await;

    output::section("Run");
    output::field("Run ID", report.run_id);
    for status in report.services.status() {
        let pid = status
            .pid
            .map_or_else(|| "unknown".to_string(), |pid| pid.to_string());
        output::field(&format!("{} pid", status.stage.as_str()), pid);
    }
    for warning in &report.warnings {
        output::warning(&warning.to_string());
    }

    match report.outcome {
        Ok(url) => {
            output::success(&format!("Tunnel is up at {url}"));
            Ok(())
        }
        Err(err) => Err(Error::Reported(err)),
    }
}
