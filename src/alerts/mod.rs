mod history;
mod telegram;

pub use history::{AlertHistory, AlertRecord, TIMESTAMP_FORMAT};
pub use telegram::{TELEGRAM_API_BASE, TelegramChannel};

/// Destination for alert text. Delivery failures are reported as `false`,
/// never as errors, because an undelivered alert must not stop monitoring.
pub trait AlertSink {
    async fn send(&self, message: &str) -> bool;
}

/// Captures sent alerts; reports delivery as configured.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct RecordingSink {
    pub(crate) sent: std::sync::Mutex<Vec<String>>,
    pub(crate) fail_delivery: bool,
}

#[cfg(test)]
impl RecordingSink {
    pub(crate) fn failing() -> Self {
        Self {
            fail_delivery: true,
            ..Self::default()
        }
    }

    pub(crate) fn messages(&self) -> Vec<String> {
        self.sent.lock().expect("sink lock should not be poisoned").clone()
    }
}

#[cfg(test)]
impl AlertSink for RecordingSink {
    async fn send(&self, message: &str) -> bool {
        self.sent
            .lock()
            .expect("sink lock should not be poisoned")
            .push(message.to_string());
        !self.fail_delivery
    }
}
