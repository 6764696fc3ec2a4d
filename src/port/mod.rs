//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! The bootstrap core talks to the outside world through two seams:
//!
//! ```text
//!   trigger ──► Orchestrator ──► Replier         (chat / console)
//!                    │
//!                    └─────────► ProcessLauncher (detached children)
//! ```

pub mod outbound;

pub use outbound::launcher::{ProcessHandle, ProcessLauncher};
pub use outbound::replier::Replier;
