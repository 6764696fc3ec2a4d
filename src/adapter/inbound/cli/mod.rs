//! CLI module graph.

pub mod check;
pub mod command;
pub mod dispatch;
pub mod launch;
pub mod output;
pub mod password;
pub mod run;
