use std::collections::VecDeque;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use portal::domain::{LaunchSpec, ProcessState, Stage};
use portal::port::{ProcessHandle, ProcessLauncher};

/// What the fake tunnel writes to its log, relative to its launch.
#[derive(Debug, Clone, Default)]
pub struct TunnelScript {
    writes: Vec<(Duration, String)>,
}

impl TunnelScript {
    /// A tunnel that never logs anything.
    pub fn silent() -> Self {
        Self::default()
    }

    /// Append `content` to the log `after` the tunnel starts.
    pub fn then_write(mut self, after: Duration, content: impl Into<String>) -> Self {
        self.writes.push((after, content.into()));
        self
    }

    /// A tunnel that logs `url` inside a cloudflared banner `after` it starts.
    pub fn url_after(after: Duration, url: &str) -> Self {
        Self::silent().then_write(after, cloudflared_banner(url))
    }
}

pub fn cloudflared_banner(url: &str) -> String {
    format!(
        "2024-05-01T10:00:00Z INF Requesting new quick Tunnel on trycloudflare.com...\n\
         2024-05-01T10:00:01Z INF +--------------------------------------------------------+\n\
         2024-05-01T10:00:01Z INF |  Your quick Tunnel has been created! Visit it at:      |\n\
         2024-05-01T10:00:01Z INF |  {url}  |\n\
         2024-05-01T10:00:01Z INF +--------------------------------------------------------+\n"
    )
}

/// One recorded launch.
#[derive(Debug, Clone)]
pub struct LaunchRecord {
    pub spec: LaunchSpec,
    /// Whether the tunnel log existed at the moment of this launch.
    pub log_existed: bool,
}

#[derive(Default)]
struct State {
    launches: Vec<LaunchRecord>,
    scripts: VecDeque<TunnelScript>,
    fail: Option<Stage>,
    killed: Vec<Arc<AtomicBool>>,
}

/// Scripted launcher: records specs, can fail a stage, and plays a
/// [`TunnelScript`] into the log file for every tunnel launch.
#[derive(Clone)]
pub struct FakeLauncher {
    log_path: PathBuf,
    state: Arc<Mutex<State>>,
    next_pid: Arc<AtomicU32>,
}

impl FakeLauncher {
    pub fn new(log_path: impl Into<PathBuf>) -> Self {
        Self {
            log_path: log_path.into(),
            state: Arc::new(Mutex::new(State::default())),
            next_pid: Arc::new(AtomicU32::new(1000)),
        }
    }

    /// Queue the script played by the next tunnel launch.
    pub fn with_tunnel(self, script: TunnelScript) -> Self {
        self.state
            .lock()
            .expect("lock launcher")
            .scripts
            .push_back(script);
        self
    }

    /// Make every launch of `stage` fail with `NotFound`.
    pub fn failing(self, stage: Stage) -> Self {
        self.state.lock().expect("lock launcher").fail = Some(stage);
        self
    }

    pub fn launches(&self) -> Vec<LaunchRecord> {
        self.state.lock().expect("lock launcher").launches.clone()
    }

    pub fn stages(&self) -> Vec<Stage> {
        self.launches().into_iter().map(|r| r.spec.stage).collect()
    }

    pub fn killed(&self) -> usize {
        self.state
            .lock()
            .expect("lock launcher")
            .killed
            .iter()
            .filter(|k| k.load(Ordering::SeqCst))
            .count()
    }

    fn play(&self, script: TunnelScript) {
        let path = self.log_path.clone();
        tokio::spawn(async move {
            let mut elapsed = Duration::ZERO;
            for (after, content) in script.writes {
                tokio::time::sleep(after.saturating_sub(elapsed)).await;
                elapsed = after;
                append(&path, &content);
            }
        });
    }
}

fn append(path: &Path, content: &str) {
    use std::io::Write;

    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path);
    if let Ok(mut file) = file {
        let _ = file.write_all(content.as_bytes());
    }
}

impl ProcessLauncher for FakeLauncher {
    fn launch(&self, spec: &LaunchSpec) -> io::Result<Box<dyn ProcessHandle>> {
        let mut state = self.state.lock().expect("lock launcher");
        state.launches.push(LaunchRecord {
            spec: spec.clone(),
            log_existed: self.log_path.exists(),
        });

        if state.fail == Some(spec.stage) {
            return Err(io::Error::new(io::ErrorKind::NotFound, "no such file"));
        }

        if spec.stage == Stage::Tunnel {
            let script = state.scripts.pop_front().unwrap_or_default();
            self.play(script);
        }

        let killed = Arc::new(AtomicBool::new(false));
        state.killed.push(Arc::clone(&killed));
        Ok(Box::new(FakeHandle {
            pid: self.next_pid.fetch_add(1, Ordering::SeqCst),
            killed,
        }))
    }
}

#[derive(Debug)]
pub struct FakeHandle {
    pid: u32,
    killed: Arc<AtomicBool>,
}

impl ProcessHandle for FakeHandle {
    fn id(&self) -> Option<u32> {
        Some(self.pid)
    }

    fn state(&mut self) -> io::Result<ProcessState> {
        Ok(if self.killed.load(Ordering::SeqCst) {
            ProcessState::Exited(None)
        } else {
            ProcessState::Running
        })
    }

    fn kill(&mut self) -> io::Result<()> {
        self.killed.store(true, Ordering::SeqCst);
        Ok(())
    }
}
