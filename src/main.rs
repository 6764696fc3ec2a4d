use clap::Parser;
use tracing::error;

use portal::adapter::inbound::cli::command::{Cli, ColorChoice};
use portal::adapter::inbound::cli::dispatch::execute;
use portal::adapter::inbound::cli::output::{self, OutputConfig};

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {}
    }
    output::configure(OutputConfig::new(cli.json, cli.quiet));

    if let Err(e) = execute(&cli).await {
        if !e.is_reported() {
            error!(error = %e, "Fatal error");
            output::error(&e.to_string());
        }
        std::process::exit(1);
    }
}
