//! Shopper Notifications
//!
//! Blocking, user-facing alerts raised by the checkout flow.

use std::sync::Mutex;

/// Something that can put a message in front of the shopper
pub trait Notifier {
    fn alert(&self, message: &str);
}

/// Logs alerts instead of showing them (headless use)
#[derive(Debug, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn alert(&self, message: &str) {
        tracing::info!(alert = %message, "Shopper alert");
    }
}

/// Keeps every alert for later inspection
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Alerts raised so far, oldest first
    pub fn messages(&self) -> Vec<String> {
        self.messages
            .lock()
            .map(|m| m.clone())
            .unwrap_or_default()
    }

    pub fn last(&self) -> Option<String> {
        self.messages().pop()
    }
}

impl Notifier for RecordingNotifier {
    fn alert(&self, message: &str) {
        if let Ok(mut messages) = self.messages.lock() {
            messages.push(message.to_string());
        }
    }
}
