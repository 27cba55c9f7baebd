use thiserror::Error;
use teloxide::types::ChatId;

use super::schema::Config;

pub(super) const MAX_CHECK_INTERVAL_SECS: u64 = 86_400;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },
    #[error("failed to serialize config for {path}: {source}")]
    Serialize {
        path: String,
        source: serde_json::Error,
    },
    #[error("failed to write config file {path}: {source}")]
    Write {
        path: String,
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Validation(String),
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.usb_port.trim().is_empty() {
            return Err(ConfigError::Validation(
                "usb_port must not be empty".to_string(),
            ));
        }
        if self.baud_rate == 0 {
            return Err(ConfigError::Validation(
                "baud_rate must be greater than 0".to_string(),
            ));
        }
        if self.check_interval == 0 {
            return Err(ConfigError::Validation(
                "check_interval must be greater than 0".to_string(),
            ));
        }
        if self.check_interval > MAX_CHECK_INTERVAL_SECS {
            return Err(ConfigError::Validation(format!(
                "check_interval must be at most {} seconds",
                MAX_CHECK_INTERVAL_SECS
            )));
        }
        if !self.anomaly_threshold.is_finite() || !(0.0..=1.0).contains(&self.anomaly_threshold)
        {
            return Err(ConfigError::Validation(
                "anomaly_threshold must be between 0 and 1".to_string(),
            ));
        }
        if !self.telegram_chat_id.trim().is_empty() {
            self.chat_id()?;
        }
        Ok(())
    }

    pub fn chat_id(&self) -> Result<ChatId, ConfigError> {
        self.telegram_chat_id
            .trim()
            .parse::<i64>()
            .map(ChatId)
            .map_err(|_| {
                ConfigError::Validation("telegram_chat_id must be an integer".to_string())
            })
    }
}
