//! Command dispatch.

use tracing::debug;

use super::command::{Cli, Commands};
use super::{check, launch, password, run};
use crate::error::Result;
use crate::infrastructure::config::settings::Config;

/// Run the parsed command line.
pub async fn execute(cli: &Cli) -> Result<()> {
    match &cli.command {
        Commands::Run => run::execute(&load_config(cli)?).await,
        Commands::Launch => launch::execute(&load_config(cli)?).await,
        Commands::Check => check::execute(&load_config(cli)?),
        Commands::HashPassword(args) => password::execute(args),
    }
}

/// Load the config file, apply logging overrides from the command line and
/// start logging.
fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = Config::load(&cli.config)?;
    if let Some(level) = &cli.log_level {
        config.logging.level.clone_from(level);
    }
    if cli.json_logs {
        config.logging.format = "json".to_string();
    }
    config.init_logging();
    debug!(path = %cli.config.display(), "Configuration loaded");
    Ok(config)
}
