mod core;
mod snapshot;

pub use self::core::{send_alert, update_device_status};
pub use snapshot::device_snapshot;
