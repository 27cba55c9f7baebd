use teloxide::{prelude::*, types::ParseMode};

use crate::app_context::AppContext;
use crate::monitor::{device_snapshot, send_alert};

use super::super::helpers::as_html_block;
use super::status::alert_history_body;

pub(crate) const TEST_ALERT_MESSAGE: &str = "🔔 Test alert from System Monitor";

pub(crate) async fn handle_alerts(
    bot: &Bot,
    msg: &Message,
    app_context: &AppContext,
) -> ResponseResult<()> {
    let snapshot = device_snapshot(&app_context.device_state).await;
    let title = format!(
        "📝 Alert History (last {} of {})",
        snapshot.recent_alerts.len(),
        snapshot.alert_count
    );

    bot.send_message(
        msg.chat.id,
        as_html_block(&title, &alert_history_body(&snapshot.recent_alerts)),
    )
    .parse_mode(ParseMode::Html)
    .await?;

    Ok(())
}

pub(crate) async fn handle_test_alert(
    bot: &Bot,
    msg: &Message,
    app_context: &AppContext,
) -> ResponseResult<()> {
    let channel = app_context.alert_channel().await;
    let delivered = send_alert(&app_context.device_state, &channel, TEST_ALERT_MESSAGE).await;

    let body = if delivered {
        "Test alert sent!"
    } else {
        "Test alert recorded, but Telegram delivery is disabled or failed."
    };
    bot.send_message(msg.chat.id, as_html_block("Test alert", body))
        .parse_mode(ParseMode::Html)
        .await?;

    Ok(())
}
