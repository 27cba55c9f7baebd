use teloxide::{prelude::*, types::ParseMode, utils::command::BotCommands};

use super::super::{command_def::MonitorCommands, helpers::as_html_block};

pub(crate) async fn handle_help(bot: &Bot, msg: &Message) -> ResponseResult<()> {
    bot.send_message(
        msg.chat.id,
        as_html_block(
            "Available commands",
            &MonitorCommands::descriptions().to_string(),
        ),
    )
    .parse_mode(ParseMode::Html)
    .await?;

    Ok(())
}
