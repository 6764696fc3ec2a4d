//! Infrastructure layer.
//!
//! Technical concerns that support the application without containing
//! bootstrap logic.
//!
//! # Submodules
//!
//! - [`config`] - Configuration loading and validation
//! - [`registry`] - Handles of launched services, shared by bot commands

pub mod config;
pub mod registry;
