//! Application layer: use cases built on domain types and ports.

pub mod bootstrap;
