use serde::{Deserialize, Serialize};

use crate::monitor::DeviceStatus;

use super::defaults::*;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub usb_port: String,
    pub baud_rate: u32,
    pub check_interval: u64,
    pub anomaly_threshold: f64,
    pub telegram_bot_token: String,
    pub telegram_chat_id: String,
    pub enable_telegram_alerts: bool,
    pub last_known_status: DeviceStatus,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            usb_port: default_usb_port(),
            baud_rate: default_baud_rate(),
            check_interval: default_check_interval(),
            anomaly_threshold: default_anomaly_threshold(),
            telegram_bot_token: String::new(),
            telegram_chat_id: String::new(),
            enable_telegram_alerts: default_enable_telegram_alerts(),
            last_known_status: DeviceStatus::Offline,
        }
    }
}

impl Config {
    pub fn has_bot_token(&self) -> bool {
        !self.telegram_bot_token.trim().is_empty()
    }

    /// Copy safe to show in chat: the bot token is masked.
    pub fn redacted(&self) -> Self {
        let mut config = self.clone();
        if config.has_bot_token() {
            config.telegram_bot_token = "[REDACTED]".to_string();
        }
        config
    }
}
