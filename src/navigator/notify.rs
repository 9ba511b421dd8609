//! Notification sink
//!
//! Receives `(title, description)` pairs when something worth telling the user happens.

use std::sync::Mutex;

pub trait NotificationSink: Send + Sync {
    fn notify(&self, title: &str, description: &str);
}

/// Writes notifications to the log
#[derive(Debug, Default)]
pub struct LogSink;

impl NotificationSink for LogSink {
    fn notify(&self, title: &str, description: &str) {
        log::info!("{} {}", title, description);
    }
}

/// Keeps every notification in memory, oldest first
#[derive(Debug, Default)]
pub struct RecordingSink {
    received: Mutex<Vec<(String, String)>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn received(&self) -> Vec<(String, String)> {
        self.received
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }
}

impl NotificationSink for RecordingSink {
    fn notify(&self, title: &str, description: &str) {
        if let Ok(mut received) = self.received.lock() {
            received.push((title.to_string(), description.to_string()));
        }
    }
}
