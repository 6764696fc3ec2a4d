//! Launch descriptions and observed process state.

use std::path::{Path, PathBuf};

use super::stage::Stage;

/// Everything needed to start one detached child process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchSpec {
    pub stage: Stage,
    pub program: PathBuf,
    pub args: Vec<String>,
    pub working_dir: PathBuf,
}

impl LaunchSpec {
    /// Launch spec for the application process.
    #[must_use]
    pub fn app(program: &Path, args: &[String], working_dir: &Path) -> Self {
        Self {
            stage: Stage::App,
            program: program.to_path_buf(),
            args: args.to_vec(),
            working_dir: working_dir.to_path_buf(),
        }
    }

    /// Launch spec for the tunnel process.
    ///
    /// The argument vector is fixed: a quick tunnel pointed at the local
    /// port, logging to `log_path`, with self-update disabled.
    #[must_use]
    pub fn tunnel(program: &Path, port: u16, log_path: &Path, working_dir: &Path) -> Self {
        Self {
            stage: Stage::Tunnel,
            program: program.to_path_buf(),
            args: vec![
                "tunnel".to_string(),
                "--url".to_string(),
                format!("http://localhost:{port}"),
                "--logfile".to_string(),
                log_path.display().to_string(),
                "--no-autoupdate".to_string(),
            ],
            working_dir: working_dir.to_path_buf(),
        }
    }

    /// Program and arguments joined for log output.
    #[must_use]
    pub fn command_line(&self) -> String {
        let mut line = self.program.display().to_string();
        for arg in &self.args {
            line.push(' ');
            line.push_str(arg);
        }
        line
    }
}

/// Non-blocking view of a launched process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessState {
    Running,
    /// Exited; the code is `None` when the process was killed by a signal.
    Exited(Option<i32>),
}

impl ProcessState {
    #[must_use]
    pub const fn is_running(self) -> bool {
        matches!(self, Self::Running)
    }
}
