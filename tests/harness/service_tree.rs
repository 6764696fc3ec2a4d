use std::path::{Path, PathBuf};

use portal::infrastructure::config::poll::PollConfig;
use portal::infrastructure::config::services::ServiceConfig;
use tempfile::TempDir;

/// Temporary working directory holding stand-ins for the application and
/// tunnel executables.
pub struct ServiceTree {
    dir: TempDir,
}

impl ServiceTree {
    pub fn new() -> Self {
        Self::with_dir(tempfile::tempdir().expect("create temp dir"))
    }

    /// Tree created under `parent`, so it can be named by a relative path.
    pub fn new_in(parent: &Path) -> Self {
        Self::with_dir(
            tempfile::Builder::new()
                .prefix(".portal-tree")
                .tempdir_in(parent)
                .expect("create temp dir"),
        )
    }

    fn with_dir(dir: TempDir) -> Self {
        std::fs::write(dir.path().join("node"), "").expect("write app stub");
        std::fs::write(dir.path().join("cloudflared"), "").expect("write tunnel stub");
        std::fs::write(dir.path().join("server.js"), "").expect("write server stub");
        Self { dir }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn app(&self) -> PathBuf {
        self.path().join("node")
    }

    pub fn tunnel(&self) -> PathBuf {
        self.path().join("cloudflared")
    }

    pub fn log_path(&self) -> PathBuf {
        self.path().join("cloudflare_output.log")
    }

    /// Service config with every default: port 3001, 5 s readiness delay.
    pub fn services(&self) -> ServiceConfig {
        ServiceConfig::new(self.path(), self.app(), self.tunnel())
    }

    /// Poll config with every default: 30 ticks of 2 s.
    pub fn poll(&self) -> PollConfig {
        PollConfig::default()
    }

    /// A config file pointing at this tree.
    pub fn config_toml(&self) -> String {
        format!(
            "[services]\nworking_dir = {:?}\napp_executable = {:?}\ntunnel_executable = {:?}\n",
            self.path().display().to_string(),
            self.app().display().to_string(),
            self.tunnel().display().to_string(),
        )
    }
}
