use chrono::Local;
use tokio::sync::Mutex;

use crate::alerts::AlertSink;

use super::super::state::{DeviceState, DeviceStatus};

/// Drives the status state machine. Only a real change is logged and sent;
/// a failed send does not undo the change. Returns whether the status changed.
pub async fn update_device_status<S: AlertSink>(
    state: &Mutex<DeviceState>,
    sink: &S,
    new_status: DeviceStatus,
    error: Option<&str>,
) -> bool {
    let message = {
        let mut state = state.lock().await;
        state.transition_at(new_status, error, Local::now())
    };

    let Some(message) = message else {
        return false;
    };

    log::info!("device_status_changed status={}", new_status);
    if !sink.send(&message).await {
        log::warn!("status_alert_undelivered status={}", new_status);
    }
    true
}

/// Logs an alert and hands it to the sink. Not subject to status dedup.
pub async fn send_alert<S: AlertSink>(state: &Mutex<DeviceState>, sink: &S, message: &str) -> bool {
    {
        let mut state = state.lock().await;
        state.log_alert_at(message, Local::now());
    }

    sink.send(message).await
}
