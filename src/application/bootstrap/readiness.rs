//! Waiting for the application before the tunnel is started.

use std::time::Duration;

use tokio::net::TcpStream;
use tokio::time::{sleep, timeout, Instant};
use tracing::debug;

use crate::infrastructure::config::services::{ReadinessPolicy, ServiceConfig};

/// Result of the readiness wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Readiness {
    /// Fixed delay elapsed; readiness is assumed, not observed.
    Assumed { waited: Duration },
    /// The probe succeeded.
    Ready { waited: Duration },
    /// The probe never succeeded within its timeout.
    TimedOut { waited: Duration },
}

/// Block (asynchronously) according to the configured policy.
pub async fn wait_until_ready(services: &ServiceConfig) -> Readiness {
    match &services.readiness {
        ReadinessPolicy::Delay { delay_secs } => {
            let waited = Duration::from_secs(*delay_secs);
            sleep(waited).await;
            Readiness::Assumed { waited }
        }
        ReadinessPolicy::Port {
            timeout_secs,
            interval_ms,
        } => {
            let port = services.port;
            probe(*timeout_secs, *interval_ms, || async move {
                port_accepts(port, Duration::from_millis(*interval_ms)).await
            })
            .await
        }
        ReadinessPolicy::Sentinel {
            path,
            timeout_secs,
            interval_ms,
        } => {
            let sentinel = services.resolve(path);
            probe(*timeout_secs, *interval_ms, || {
                let present = sentinel.exists();
                async move { present }
            })
            .await
        }
    }
}

async fn probe<F, Fut>(timeout_secs: u64, interval_ms: u64, mut check: F) -> Readiness
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = bool>,
{
    let limit = Duration::from_secs(timeout_secs);
    let interval = Duration::from_millis(interval_ms);
    let started = Instant::now();

    loop {
        if check().await {
            return Readiness::Ready {
                waited: started.elapsed(),
            };
        }
        let waited = started.elapsed();
        if waited >= limit {
            return Readiness::TimedOut { waited };
        }
        debug!(waited_ms = waited.as_millis() as u64, "Application not ready yet");
        sleep(interval.min(limit - waited)).await;
    }
}

/// Probes the same `localhost` target the tunnel forwards to, trying every
/// resolved address (IPv4 and IPv6).
async fn port_accepts(port: u16, connect_timeout: Duration) -> bool {
    matches!(
        timeout(connect_timeout, TcpStream::connect(("localhost", port))).await,
        Ok(Ok(_))
    )
}
