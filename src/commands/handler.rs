use teloxide::prelude::*;

use super::command_def::MonitorCommands;
use super::helpers::is_authorized;
use super::router::route_command;
use crate::app_context::AppContext;

pub async fn answer(
    bot: Bot,
    msg: Message,
    cmd: MonitorCommands,
    app_context: &AppContext,
) -> ResponseResult<()> {
    let config = app_context.current_config().await;
    if !is_authorized(&msg, &config) {
        log::warn!(
            "SECURITY: Unauthorized access attempt. mode=configured_chat_only expected_chat_id={:?} chat_id={} command_text={:?}",
            config.telegram_chat_id,
            msg.chat.id.0,
            msg.text()
        );
        return Ok(());
    }
    route_command(bot, msg, cmd, app_context).await
}
