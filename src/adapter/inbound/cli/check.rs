//! Handler for the `check` command.

use crate::application::bootstrap::precondition;
use crate::infrastructure::config::services::ReadinessPolicy;
use crate::infrastructure::config::settings::Config;
use crate::infrastructure::config::telegram::BOT_TOKEN_ENV;

use super::output;
use crate::error::Result;

/// Print the effective configuration and verify every configured path.
///
/// Fails on the first missing resource, the same way a bootstrap run would.
pub fn execute(config: &Config) -> Result<()> {
    output::header(env!("CARGO_PKG_VERSION"));

    let services = &config.services;
    output::section("Services");
    output::field("Working dir", services.working_dir.display());
    output::field(
        "App",
        format!(
            "{} {}",
            services.app_executable.display(),
            services.app_args.join(" ")
        )
        .trim_end(),
    );
    output::field("Tunnel", services.tunnel_executable.display());
    output::field("Port", services.port);
    output::field("Tunnel log", services.log_path().display());
    output::field("Readiness", describe_readiness(&services.readiness));

    output::section("Polling");
    output::field(
        "Budget",
        format!(
            "{} x {}s = {}s",
            config.poll.max_ticks,
            config.poll.interval_secs,
            config.poll.budget().as_secs()
        ),
    );
    let matcher = config.poll.matcher()?;
    output::field("URL pattern", matcher.as_str());

    output::section("Telegram");
    if config.telegram.bot_token.is_some() {
        output::success(&format!("{BOT_TOKEN_ENV} is set"));
    } else {
        output::warning(&format!("{BOT_TOKEN_ENV} is not set; `run` will refuse to start"));
    }

    output::section("Paths");
    precondition::check(services)?;
    output::success("All configured paths exist");
    Ok(())
}

fn describe_readiness(policy: &ReadinessPolicy) -> String {
    match policy {
        ReadinessPolicy::Delay { delay_secs } => format!("fixed delay of {delay_secs}s"),
        ReadinessPolicy::Port {
            timeout_secs,
            interval_ms,
        } => format!("port probe every {interval_ms}ms, up to {timeout_secs}s"),
        ReadinessPolicy::Sentinel {
            path,
            timeout_secs,
            interval_ms,
        } => format!(
            "sentinel `{}` every {interval_ms}ms, up to {timeout_secs}s",
            path.display()
        ),
    }
}
