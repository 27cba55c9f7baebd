mod alerts;
mod anomaly;
mod app_context;
mod commands;
mod config;
mod jobs;
mod monitor;

use std::sync::Arc;

use teloxide::prelude::*;
use tokio::sync::watch;
use tracing_subscriber::EnvFilter;

use crate::app_context::AppContext;
use crate::commands::{MonitorCommands, answer};
use crate::config::{Config, load_config};
use crate::jobs::start_background_jobs;
use crate::monitor::SerialConnector;

fn init_json_logging() {
    if let Err(error) = tracing_log::LogTracer::init() {
        eprintln!(
            "logging bridge initialization failed (continuing with existing logger): {}",
            error
        );
    }

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .json()
        .with_current_span(false)
        .with_span_list(false)
        .finish();

    if let Err(error) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("global logger initialization failed: {}", error);
    }
}

const CONFIG_PATH: &str = "config.json";

fn log_alerting_mode(config: &Config) {
    if !config.enable_telegram_alerts {
        log::warn!("alerting_degraded channel=telegram reason=disabled_in_config");
    } else if !config.has_bot_token() || config.telegram_chat_id.trim().is_empty() {
        log::warn!("alerting_degraded channel=telegram reason=missing_token_or_chat_id");
    }

    if !config.has_bot_token() {
        log::warn!("command_surface_disabled reason=missing_bot_token");
    }
}

// Main
#[tokio::main]
async fn main() {
    init_json_logging();

    let config: Config = match load_config(CONFIG_PATH) {
        Ok(config) => config,
        Err(error) => {
            log::error!("Configuration error: {}", error);
            return;
        }
    };

    log::info!(
        "System monitor is starting... usb_port={} baud_rate={} check_interval={} initial_status={}",
        config.usb_port,
        config.baud_rate,
        config.check_interval,
        config.last_known_status
    );
    log_alerting_mode(&config);

    let app_context = match AppContext::new(config.clone(), CONFIG_PATH, Arc::new(SerialConnector))
    {
        Ok(app_context) => app_context,
        Err(error) => {
            log::error!("Anomaly detector setup failed: {}", error);
            return;
        }
    };

    let (stop_tx, stop_rx) = watch::channel(false);
    let jobs = start_background_jobs(app_context.clone(), stop_rx);

    if config.has_bot_token() {
        let bot = Bot::new(config.telegram_bot_token.trim());
        MonitorCommands::repl(bot, move |bot: Bot, msg: Message, cmd: MonitorCommands| {
            let app_context = app_context.clone();
            async move { answer(bot, msg, cmd, &app_context).await }
        })
        .await;
    } else if let Err(error) = tokio::signal::ctrl_c().await {
        log::error!("failed to listen for shutdown signal: {}", error);
    }

    log::info!("System monitor is shutting down...");
    let _ = stop_tx.send(true);
    jobs.shutdown().await;
}
