use teloxide::prelude::*;
use teloxide::types::ChatId;

use crate::config::Config;

/// Only the chat that receives alerts may drive the bot.
pub(crate) fn is_authorized(msg: &Message, config: &Config) -> bool {
    chat_matches(msg.chat.id, config)
}

fn chat_matches(chat_id: ChatId, config: &Config) -> bool {
    if config.telegram_chat_id.trim().is_empty() {
        return false;
    }

    config
        .chat_id()
        .map(|configured| configured == chat_id)
        .unwrap_or(false)
}
