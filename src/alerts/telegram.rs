use thiserror::Error;

use crate::config::Config;

use super::AlertSink;

pub const TELEGRAM_API_BASE: &str = "https://api.telegram.org";

#[derive(Debug, Error)]
pub enum AlertError {
    #[error("telegram alerts are disabled")]
    Disabled,
    #[error("telegram bot token or chat id is not configured")]
    NotConfigured,
    #[error("telegram request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("telegram responded with status {0}")]
    Status(u16),
}

/// Sends alert text through the Telegram Bot API `sendMessage` endpoint.
#[derive(Debug, Clone)]
pub struct TelegramChannel {
    client: reqwest::Client,
    api_base: String,
    bot_token: String,
    chat_id: String,
    enabled: bool,
}

impl TelegramChannel {
    pub fn new(client: reqwest::Client, api_base: impl Into<String>, config: &Config) -> Self {
        Self {
            client,
            api_base: api_base.into(),
            bot_token: config.telegram_bot_token.trim().to_string(),
            chat_id: config.telegram_chat_id.trim().to_string(),
            enabled: config.enable_telegram_alerts,
        }
    }

    pub async fn deliver(&self, message: &str) -> Result<(), AlertError> {
        if !self.enabled {
            return Err(AlertError::Disabled);
        }
        if self.bot_token.is_empty() || self.chat_id.is_empty() {
            return Err(AlertError::NotConfigured);
        }

        let url = format!(
            "{}/bot{}/sendMessage",
            self.api_base.trim_end_matches('/'),
            self.bot_token
        );
        // Sent with HTML parse mode, so device text must not be read as markup.
        let text = html_escape::encode_text(message);
        let response = self
            .client
            .get(url)
            .query(&[
                ("chat_id", self.chat_id.as_str()),
                ("text", text.as_ref()),
                ("parse_mode", "HTML"),
            ])
            .send()
            .await?;

        let status = response.status().as_u16();
        if status != 200 {
            return Err(AlertError::Status(status));
        }
        Ok(())
    }
}

impl AlertSink for TelegramChannel {
    async fn send(&self, message: &str) -> bool {
        match self.deliver(message).await {
            Ok(()) => true,
            Err(AlertError::Disabled) => false,
            Err(AlertError::NotConfigured) => {
                log::warn!("alert_channel_not_configured channel=telegram");
                false
            }
            Err(error) => {
                log::warn!("Telegram alert failed: {}", error);
                false
            }
        }
    }
}
