//! Bounded polling state machine for the tunnel log.

use super::url::UrlMatch;

/// What one poll tick saw in the log artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollObservation {
    /// The log file does not exist yet.
    Absent,
    /// The file exists but could not be read this tick.
    Unreadable,
    /// The file was read and contains no URL.
    NoMatch,
    Match(UrlMatch),
}

/// Poller state. `Found` and `TimedOut` are terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollState {
    Polling { ticks: u32 },
    Found { url: UrlMatch, ticks: u32 },
    TimedOut { ticks: u32 },
}

impl PollState {
    /// Initial state, entered right after the tunnel launch.
    #[must_use]
    pub const fn start() -> Self {
        Self::Polling { ticks: 0 }
    }

    /// Apply one tick's observation.
    ///
    /// A match always wins, including on the last allowed tick. Every other
    /// observation counts as a miss.
    #[must_use]
    pub fn advance(self, observation: PollObservation, max_ticks: u32) -> Self {
        let Self::Polling { ticks } = self else {
            return self;
        };
        let ticks = ticks + 1;

        match observation {
            PollObservation::Match(url) => Self::Found { url, ticks },
            PollObservation::Absent | PollObservation::Unreadable | PollObservation::NoMatch => {
                if ticks >= max_ticks {
                    Self::TimedOut { ticks }
                } else {
                    Self::Polling { ticks }
                }
            }
        }
    }

    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        !matches!(self, Self::Polling { .. })
    }

    /// Ticks performed so far.
    #[must_use]
    pub const fn ticks(&self) -> u32 {
        match self {
            Self::Polling { ticks } | Self::Found { ticks, .. } | Self::TimedOut { ticks } => {
                *ticks
            }
        }
    }
}
