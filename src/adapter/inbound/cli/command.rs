//! Command-line interface definitions.
//!
//! Defines the CLI structure for portal using `clap`: serve the Telegram
//! bot, run a single bootstrap from the terminal, check the configuration,
//! and hash the web admin password.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Start an app, open a tunnel, report the public URL
#[derive(Parser, Debug)]
#[command(name = "portal")]
#[command(version)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, global = true, default_value = "config.toml")]
    pub config: PathBuf,

    /// Override the configured log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Color output mode [auto, always, never]
    #[arg(
        long,
        global = true,
        default_value = "auto",
        hide_possible_values = true
    )]
    pub color: ColorChoice,

    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Color output mode for terminal rendering.
#[derive(Clone, Debug, Default, clap::ValueEnum)]
pub enum ColorChoice {
    /// Detect automatically
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Serve the Telegram bot (foreground)
    Run,

    /// Run one bootstrap now and print the replies
    Launch,

    /// Validate the configuration and the configured paths
    Check,

    /// Hash the web admin password with bcrypt
    HashPassword(HashPasswordArgs),
}

/// Arguments for the `hash-password` subcommand.
#[derive(Parser, Debug)]
pub struct HashPasswordArgs {
    /// File that receives the hash
    #[arg(short, long, default_value = "admin_password.txt")]
    pub output: PathBuf,

    /// bcrypt cost factor
    #[arg(long, default_value_t = 10)]
    pub cost: u32,
}
