pub(super) fn default_usb_port() -> String {
    "/dev/cu.usbserial-10".to_string()
}

pub(super) fn default_baud_rate() -> u32 {
    9600
}

pub(super) fn default_check_interval() -> u64 {
    5
}

pub(super) fn default_anomaly_threshold() -> f64 {
    0.1
}

pub(super) fn default_enable_telegram_alerts() -> bool {
    true
}
