//! Remote-triggered service bootstrap.
//!
//! A run validates the configured paths, clears the stale tunnel log,
//! launches the application, waits for it, launches the tunnel and then
//! polls the tunnel log until the public URL appears or the budget runs out.
//! Progress is replied after every step through a [`Replier`](crate::port::Replier).

pub mod artifact;
pub mod orchestrator;
pub mod poller;
pub mod precondition;
pub mod readiness;
pub mod report;

pub use orchestrator::Orchestrator;
pub use report::{BootstrapReport, LaunchedServices, RunWarning, ServiceStatus};
