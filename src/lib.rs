//! Portal - start an application, open a tunnel, report the public URL.
//!
//! A chat command (or the `launch` CLI subcommand) triggers a bootstrap run:
//! the configured paths are checked, the stale tunnel log is removed, the
//! application and a `cloudflared` quick tunnel are started as detached
//! processes, and the tunnel log is polled until a public
//! `https://<token>.trycloudflare.com` URL shows up. Every step is replied
//! back to the caller.
//!
//! # Modules
//!
//! - [`domain`] - Stages, launch specs, URL matching, the polling state machine
//! - [`port`] - `Replier` and `ProcessLauncher` seams
//! - [`application`] - The bootstrap orchestrator and its steps
//! - [`adapter`] - CLI, Telegram bot, detached process launcher
//! - [`infrastructure`] - Configuration and the service registry
//! - [`error`] - Error types for the crate
//!
//! # Features
//!
//! - `telegram` (default) - Serve the bot with teloxide
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use portal::adapter::outbound::process::DetachedLauncher;
//! use portal::application::bootstrap::Orchestrator;
//! use portal::infrastructure::config::settings::Config;
//!
//! # async fn demo(replier: &dyn portal::port::Replier) -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::load("config.toml")?;
//! let orchestrator = Orchestrator::from_config(&config, Arc::new(DetachedLauncher::new()))?;
//! let report = orchestrator.run(replier).await;
//! if let Some(url) = report.url() {
//!     println!("{url}");
//! }
//! # Ok(())
//! # }
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;
