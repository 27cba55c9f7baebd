use chrono::{DateTime, Local};

use crate::alerts::TIMESTAMP_FORMAT;

use super::{DeviceState, DeviceStatus};

impl DeviceState {
    /// Applies a connectivity change. Returns the alert text when the status
    /// actually changed; repeated identical statuses are ignored.
    pub(crate) fn transition_at(
        &mut self,
        new_status: DeviceStatus,
        error: Option<&str>,
        now: DateTime<Local>,
    ) -> Option<String> {
        if self.status == new_status {
            return None;
        }

        let message = status_message(new_status, error, now);
        self.status = new_status;
        self.log_alert_at(message.clone(), now);
        Some(message)
    }
}

pub(crate) fn status_message(
    status: DeviceStatus,
    error: Option<&str>,
    now: DateTime<Local>,
) -> String {
    let timestamp = now.format(TIMESTAMP_FORMAT);
    let mut message = match status {
        DeviceStatus::Online => format!("🟢 Device Online\nTimestamp: {}", timestamp),
        DeviceStatus::Offline => format!("🔴 Device Offline\nTimestamp: {}", timestamp),
    };

    if status == DeviceStatus::Offline
        && let Some(error) = error
    {
        message.push_str(&format!("\nError: {}", error));
    }

    message
}
