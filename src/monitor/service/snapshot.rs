use tokio::sync::Mutex;

use super::super::state::{DeviceSnapshot, DeviceState};

pub(crate) const DISPLAYED_ALERTS: usize = 10;

pub async fn device_snapshot(state: &Mutex<DeviceState>) -> DeviceSnapshot {
    let state = state.lock().await;
    state.snapshot(DISPLAYED_ALERTS)
}
