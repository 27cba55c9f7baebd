use teloxide::{prelude::*, types::ParseMode};

use crate::alerts::{AlertRecord, TIMESTAMP_FORMAT};
use crate::app_context::AppContext;
use crate::config::Config;
use crate::monitor::{DeviceSnapshot, device_snapshot};

use super::super::helpers::as_html_block;

pub(crate) async fn handle_status_overview(
    bot: &Bot,
    msg: &Message,
    app_context: &AppContext,
) -> ResponseResult<()> {
    let config = app_context.current_config().await;
    let snapshot = device_snapshot(&app_context.device_state).await;
    let active_threshold = app_context.current_detector().await.contamination();
    let body = status_body(&config, &snapshot, active_threshold);

    bot.send_message(msg.chat.id, as_html_block("🛠️ System Status Monitor", &body))
        .parse_mode(ParseMode::Html)
        .await?;

    Ok(())
}

pub(super) fn status_body(
    config: &Config,
    snapshot: &DeviceSnapshot,
    active_threshold: f64,
) -> String {
    let reading_line = snapshot
        .latest_reading
        .as_ref()
        .map(|reading| {
            format!(
                "{} (at {})",
                reading.value,
                reading.received_at.format(TIMESTAMP_FORMAT)
            )
        })
        .unwrap_or_else(|| "no reading yet".to_string());
    let poll_line = snapshot
        .last_poll_at
        .map(|at| at.format(TIMESTAMP_FORMAT).to_string())
        .unwrap_or_else(|| "not polled yet".to_string());

    format!(
        "📊 Current Status\n{} Device is currently {}\n\nLatest Reading: {}\nLast poll: {}\nDevice: {} @ {} baud, every {}s\nAnomaly threshold: {}\nTelegram alerts: {}\n\n📝 Alert History\n{}",
        snapshot.status.emoji(),
        snapshot.status,
        reading_line,
        poll_line,
        config.usb_port,
        config.baud_rate,
        config.check_interval,
        active_threshold,
        if config.enable_telegram_alerts { "enabled" } else { "disabled" },
        alert_history_body(&snapshot.recent_alerts),
    )
}

/// Records are expected newest first.
pub(crate) fn alert_history_body(records: &[AlertRecord]) -> String {
    if records.is_empty() {
        return "No alerts recorded".to_string();
    }

    records
        .iter()
        .map(|record| format!("{}: {}", record.timestamp, record.message))
        .collect::<Vec<_>>()
        .join("\n\n")
}
