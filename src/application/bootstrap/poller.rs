//! Bounded polling of the tunnel log for the public URL.

use std::time::Duration;

use tokio::time::sleep;
use tracing::{debug, info};

use super::artifact::LogArtifact;
use crate::domain::{PollObservation, PollState, UrlMatcher};

/// Polls the log artifact at a fixed interval until a URL shows up or the
/// tick budget runs out. No backoff.
#[derive(Debug, Clone)]
pub struct UrlPoller {
    artifact: LogArtifact,
    matcher: UrlMatcher,
    interval: Duration,
    max_ticks: u32,
}

impl UrlPoller {
    #[must_use]
    pub fn new(
        artifact: LogArtifact,
        matcher: UrlMatcher,
        interval: Duration,
        max_ticks: u32,
    ) -> Self {
        Self {
            artifact,
            matcher,
            interval,
            max_ticks,
        }
    }

    /// Run to a terminal state. Each tick sleeps first, then reads.
    pub async fn run(&self) -> PollState {
        let mut state = PollState::start();

        while !state.is_terminal() {
            sleep(self.interval).await;

            let observation = self.artifact.observe(&self.matcher);
            let tick = state.ticks() + 1;
            match &observation {
                PollObservation::Match(url) => info!(tick, url = %url, "Tunnel URL found"),
                other => debug!(tick, observation = ?other, "No tunnel URL yet"),
            }

            state = state.advance(observation, self.max_ticks);
        }

        state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::url::DEFAULT_TUNNEL_DOMAIN;
    use tokio::time::Instant;

    fn poller(artifact: LogArtifact, max_ticks: u32) -> UrlPoller {
        UrlPoller::new(
            artifact,
            UrlMatcher::for_domain(DEFAULT_TUNNEL_DOMAIN).unwrap(),
            Duration::from_secs(2),
            max_ticks,
        )
    }

    #[tokio::test(start_paused = true)]
    async fn finds_url_written_mid_poll() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tunnel.log");
        let writer_path = path.clone();

        let writer = tokio::spawn(async move {
            sleep(Duration::from_secs(5)).await;
            std::fs::write(
                writer_path,
                "INF |  https://quick-wren.trycloudflare.com  |\n",
            )
            .unwrap();
        });

        let started = Instant::now();
        let state = poller(LogArtifact::new(&path), 30).run().await;
        writer.await.unwrap();

        // Written at 5s, seen on the tick at 6s.
        match state {
            PollState::Found { url, ticks } => {
                assert_eq!(url.as_str(), "https://quick-wren.trycloudflare.com");
                assert_eq!(ticks, 3);
            }
            other => panic!("expected found, got {other:?}"),
        }
        assert!(started.elapsed() >= Duration::from_secs(6));
        assert!(started.elapsed() < Duration::from_secs(7));
    }

    #[tokio::test(start_paused = true)]
    async fn gives_up_after_max_ticks() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tunnel.log");
        std::fs::write(&path, "INF Starting tunnel\nINF Retrying connection\n").unwrap();

        let started = Instant::now();
        let state = poller(LogArtifact::new(&path), 30).run().await;

        assert_eq!(state, PollState::TimedOut { ticks: 30 });
        assert!(started.elapsed() >= Duration::from_secs(60));
        assert!(started.elapsed() < Duration::from_secs(61));
    }
}
