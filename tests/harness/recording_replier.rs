use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use portal::port::Replier;

/// Thread-safe reply collector for bootstrap assertions in tests.
#[derive(Clone, Default)]
pub struct RecordingReplier {
    replies: Arc<Mutex<Vec<String>>>,
}

impl RecordingReplier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replies(&self) -> Vec<String> {
        self.replies.lock().expect("lock replies").clone()
    }

    pub fn len(&self) -> usize {
        self.replies.lock().expect("lock replies").len()
    }

    pub fn last(&self) -> Option<String> {
        self.replies.lock().expect("lock replies").last().cloned()
    }

    /// Replies that report a terminal failure.
    pub fn failures(&self) -> Vec<String> {
        self.replies()
            .into_iter()
            .filter(|r| r.starts_with("Error:") || r.starts_with("Failed to retrieve"))
            .collect()
    }
}

#[async_trait]
impl Replier for RecordingReplier {
    async fn reply(&self, text: &str) {
        self.replies
            .lock()
            .expect("lock replies")
            .push(text.to_string());
    }
}
