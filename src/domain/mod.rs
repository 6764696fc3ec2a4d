//! Transport-agnostic domain types for a bootstrap run.

pub mod poll;
pub mod process;
pub mod stage;
pub mod url;

pub use poll::{PollObservation, PollState};
pub use process::{LaunchSpec, ProcessState};
pub use stage::{Resource, Stage};
pub use url::{UrlMatch, UrlMatcher};
