use teloxide::prelude::*;

use crate::app_context::AppContext;

use super::command_def::MonitorCommands;
use super::features::{
    alerts::{handle_alerts, handle_test_alert},
    config_edit::{handle_config, handle_set},
    help::handle_help,
    status::handle_status_overview,
};

pub(super) async fn route_command(
    bot: Bot,
    msg: Message,
    cmd: MonitorCommands,
    app_context: &AppContext,
) -> ResponseResult<()> {
    match cmd {
        MonitorCommands::Help => handle_help(&bot, &msg).await?,
        MonitorCommands::Status => handle_status_overview(&bot, &msg, app_context).await?,
        MonitorCommands::Alerts => handle_alerts(&bot, &msg, app_context).await?,
        MonitorCommands::Testalert => handle_test_alert(&bot, &msg, app_context).await?,
        MonitorCommands::Config => handle_config(&bot, &msg, app_context).await?,
        MonitorCommands::Set(query) => handle_set(&bot, &msg, app_context, &query).await?,
    }

    Ok(())
}
