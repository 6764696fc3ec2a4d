//! Detached child processes via `tokio::process`.
//!
//! Children get null stdio and their own process group (Unix) or a
//! detached, windowless console (Windows), so they outlive the bot and are
//! not hit by signals aimed at it. Handles are never `kill_on_drop`.

use std::io;
use std::process::Stdio;

use tokio::process::{Child, Command};

use crate::domain::{LaunchSpec, ProcessState};
use crate::port::{ProcessHandle, ProcessLauncher};

#[cfg(windows)]
const DETACHED_PROCESS: u32 = 0x0000_0008;
#[cfg(windows)]
const CREATE_NO_WINDOW: u32 = 0x0800_0000;

/// Launcher used in production.
#[derive(Debug, Clone, Copy, Default)]
pub struct DetachedLauncher;

impl DetachedLauncher {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl ProcessLauncher for DetachedLauncher {
    fn launch(&self, spec: &LaunchSpec) -> io::Result<Box<dyn ProcessHandle>> {
        let mut command = Command::new(&spec.program);
        command
            .args(&spec.args)
            .current_dir(&spec.working_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(false);
        detach(&mut command);

        let child = command.spawn()?;
        Ok(Box::new(ChildHandle { child }))
    }
}

#[cfg(unix)]
fn detach(command: &mut Command) {
    command.process_group(0);
}

#[cfg(windows)]
fn detach(command: &mut Command) {
    command.creation_flags(DETACHED_PROCESS | CREATE_NO_WINDOW);
}

#[cfg(not(any(unix, windows)))]
fn detach(_command: &mut Command) {}

/// Owned handle to a detached child.
#[derive(Debug)]
pub struct ChildHandle {
    child: Child,
}

impl ProcessHandle for ChildHandle {
    fn id(&self) -> Option<u32> {
        self.child.id()
    }

    fn state(&mut self) -> io::Result<ProcessState> {
        Ok(match self.child.try_wait()? {
            None => ProcessState::Running,
            Some(status) => ProcessState::Exited(status.code()),
        })
    }

    fn kill(&mut self) -> io::Result<()> {
        self.child.start_kill()
    }
}
