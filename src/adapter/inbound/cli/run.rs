//! Handler for the `run` command: serve the Telegram bot.

use crate::error::Result;
use crate::infrastructure::config::settings::Config;

use super::output;

/// Execute the run command.
#[cfg(feature = "telegram")]
pub async fn execute(config: &Config) -> Result<()> {
    use std::sync::Arc;

    use tokio::signal;
    use tracing::info;

    use crate::adapter::inbound::telegram::{TelegramBot, TelegramControl};
    use crate::adapter::outbound::process::DetachedLauncher;
    use crate::application::bootstrap::Orchestrator;
    use crate::infrastructure::registry::ServiceRegistry;

    let token = config.bot_token()?;
    let orchestrator = Orchestrator::from_config(config, Arc::new(DetachedLauncher::new()))?;

    output::header(env!("CARGO_PKG_VERSION"));
    output::field("Working dir", orchestrator.services().working_dir.display());
    output::field("Tunnel log", orchestrator.services().log_path().display());
    output::hint("Send /s or /launch to the bot to start the services.");

    let control = TelegramControl::new(Arc::new(orchestrator), Arc::new(ServiceRegistry::new()));
    let bot = TelegramBot::new(token, control, config.telegram.register_commands);

    info!("portal starting");
    tokio::select! {
        () = bot.run() => {}
        _ = signal::ctrl_c() => {
            info!("Shutdown signal received");
        }
    }
    info!("portal stopped");
    Ok(())
}

/// Execute the run command.
#[cfg(not(feature = "telegram"))]
pub async fn execute(config: &Config) -> Result<()> {
    let _ = config;
    output::hint("Rebuild with `--features telegram` to serve the bot.");
    Err(crate::error::Error::Bot(
        "this build does not include Telegram support".to_string(),
    ))
}
