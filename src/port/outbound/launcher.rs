//! Process launching port.

use std::io;

use crate::domain::{LaunchSpec, ProcessState};

/// Owned handle to a launched child process.
///
/// Dropping the handle never terminates the process.
pub trait ProcessHandle: Send + Sync + std::fmt::Debug {
    /// OS process id, when still known.
    fn id(&self) -> Option<u32>;

    /// Non-blocking state query.
    fn state(&mut self) -> io::Result<ProcessState>;

    /// Ask the process to terminate. Does not wait for it.
    fn kill(&mut self) -> io::Result<()>;
}

/// Starts detached child processes.
pub trait ProcessLauncher: Send + Sync {
    fn launch(&self, spec: &LaunchSpec) -> io::Result<Box<dyn ProcessHandle>>;
}
