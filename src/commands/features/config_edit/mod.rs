use teloxide::{prelude::*, types::ParseMode};

use crate::app_context::AppContext;

use super::super::helpers::as_html_block;

mod error;
mod parser;

use parser::parse_set_request;

pub(crate) async fn handle_config(
    bot: &Bot,
    msg: &Message,
    app_context: &AppContext,
) -> ResponseResult<()> {
    let config = app_context.current_config().await.redacted();
    let body = serde_json::to_string_pretty(&config)
        .unwrap_or_else(|error| format!("config could not be rendered: {}", error));

    bot.send_message(msg.chat.id, as_html_block("⚙️ Configuration", &body))
        .parse_mode(ParseMode::Html)
        .await?;

    Ok(())
}

pub(crate) async fn handle_set(
    bot: &Bot,
    msg: &Message,
    app_context: &AppContext,
    query: &str,
) -> ResponseResult<()> {
    let current = app_context.current_config().await;
    let updated = match parse_set_request(query, &current) {
        Ok(updated) => updated,
        Err(error) => {
            bot.send_message(
                msg.chat.id,
                as_html_block("Configuration not saved", &error.user_message()),
            )
            .parse_mode(ParseMode::Html)
            .await?;
            return Ok(());
        }
    };

    let message = match app_context.save_config(updated).await {
        Ok(refitted) => {
            log::info!("config_saved source=telegram refitted={}", refitted);
            let mut body = "Configuration saved!".to_string();
            if refitted {
                body.push_str("\nAnomaly detector refitted with the new threshold.");
            }
            as_html_block("✅ Configuration saved", &body)
        }
        Err(error) => {
            log::warn!("config_save_failed source=telegram error={}", error);
            as_html_block("Configuration not saved", &error.to_string())
        }
    };

    bot.send_message(msg.chat.id, message)
        .parse_mode(ParseMode::Html)
        .await?;

    Ok(())
}
