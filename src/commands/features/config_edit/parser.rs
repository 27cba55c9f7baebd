use crate::config::Config;

use super::error::SetCommandError;

pub(super) const EDITABLE_FIELDS: [&str; 7] = [
    "usb_port",
    "baud_rate",
    "check_interval",
    "anomaly_threshold",
    "telegram_bot_token",
    "telegram_chat_id",
    "enable_telegram_alerts",
];

/// Applies `<field> <value>` to a copy of `current`.
pub(super) fn parse_set_request(query: &str, current: &Config) -> Result<Config, SetCommandError> {
    let Some((field, value)) = query.trim().split_once(char::is_whitespace) else {
        return Err(SetCommandError::Usage);
    };
    let value = value.trim();
    if value.is_empty() {
        return Err(SetCommandError::Usage);
    }

    let invalid = || SetCommandError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
    };

    let mut config = current.clone();
    match field {
        "usb_port" => config.usb_port = value.to_string(),
        "baud_rate" => config.baud_rate = value.parse().map_err(|_| invalid())?,
        "check_interval" => config.check_interval = value.parse().map_err(|_| invalid())?,
        "anomaly_threshold" => config.anomaly_threshold = value.parse().map_err(|_| invalid())?,
        "telegram_bot_token" => config.telegram_bot_token = value.to_string(),
        "telegram_chat_id" => config.telegram_chat_id = value.to_string(),
        "enable_telegram_alerts" => {
            config.enable_telegram_alerts = parse_switch(value).ok_or_else(invalid)?
        }
        "last_known_status" => return Err(SetCommandError::ReadOnly(field.to_string())),
        other => return Err(SetCommandError::UnknownField(other.to_string())),
    }

    Ok(config)
}

fn parse_switch(input: &str) -> Option<bool> {
    match input.to_lowercase().as_str() {
        "true" | "on" | "yes" | "1" => Some(true),
        "false" | "off" | "no" | "0" => Some(false),
        _ => None,
    }
}
