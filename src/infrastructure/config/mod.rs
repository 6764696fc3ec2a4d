//! Infrastructure configuration modules.

pub mod logging;
pub mod poll;
pub mod services;
pub mod settings;
pub mod telegram;
