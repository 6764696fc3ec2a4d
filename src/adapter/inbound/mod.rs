//! Inbound adapters (driving side): what triggers a bootstrap run.

pub mod cli;

#[cfg(feature = "telegram")]
pub mod telegram;
