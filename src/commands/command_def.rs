use teloxide::utils::command::BotCommands;

#[derive(BotCommands, Clone)]
#[command(rename_rule = "lowercase", description = "Available commands:")]
pub enum MonitorCommands {
    #[command(description = "Show help menu.")]
    Help,
    #[command(description = "Show device status, latest reading and recent alerts.")]
    Status,
    #[command(description = "Show the last 10 alerts, newest first.")]
    Alerts,
    #[command(description = "Send a test alert.")]
    Testalert,
    #[command(description = "Show the current configuration.")]
    Config,
    #[command(description = "Change and save one setting, e.g. /set anomaly_threshold 0.2")]
    Set(String),
}
