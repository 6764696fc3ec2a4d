//! Reply port for progressive operator feedback.

use async_trait::async_trait;

/// Sends one text message back to whoever triggered the run.
///
/// Implementations must not fail the run: delivery errors are logged by the
/// adapter and swallowed.
#[async_trait]
pub trait Replier: Send + Sync {
    async fn reply(&self, text: &str);
}
