mod device;
mod poller;
#[cfg(test)]
mod scripted;
mod service;
mod state;

pub use device::{DeviceConnector, SerialConnector};
#[cfg(test)]
pub(crate) use scripted::{DeviceScript, ScriptedConnector};
pub use poller::run_poll_cycle;
pub use service::{device_snapshot, send_alert};
pub use state::{DeviceSnapshot, DeviceState, DeviceStatus};
