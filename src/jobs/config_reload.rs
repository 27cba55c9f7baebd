use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use notify::{Config as NotifyConfig, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::task::JoinHandle;

use crate::app_context::AppContext;
use crate::config::{Config, load_config};

async fn apply_reload_from_path(app_context: &AppContext, config_path: &str) -> Result<Config, String> {
    let mut new_config = load_config(config_path).map_err(|error| error.to_string())?;
    // Device status is owned by the poller, not the file.
    new_config.last_known_status = app_context.device_state.lock().await.status();
    if new_config == app_context.current_config().await {
        return Ok(new_config);
    }

    app_context
        .apply_config(new_config.clone())
        .await
        .map_err(|error| error.to_string())?;
    Ok(new_config)
}

/// The directory holding the config file, so a file created after startup is
/// still seen.
fn watch_dir(config_path: &Path) -> &Path {
    match config_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

fn touches_config_file(event: &Event, file_name: &OsStr) -> bool {
    let relevant_kind = matches!(
        event.kind,
        EventKind::Create(_) | EventKind::Modify(_) | EventKind::Any
    );
    relevant_kind
        && event
            .paths
            .iter()
            .any(|path| path.file_name() == Some(file_name))
}

pub(super) fn start_config_hot_reload_job(app_context: AppContext) -> JoinHandle<()> {
    tokio::spawn(async move {
        let config_path = PathBuf::from(&app_context.config_path);
        let Some(file_name) = config_path.file_name().map(OsStr::to_os_string) else {
            log::warn!(
                "config_hot_reload_disabled reason=no_file_name path={}",
                config_path.display()
            );
            return;
        };

        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        let mut watcher = match RecommendedWatcher::new(
            move |result| {
                let _ = tx.send(result);
            },
            NotifyConfig::default(),
        ) {
            Ok(watcher) => watcher,
            Err(error) => {
                log::warn!("config_hot_reload_disabled reason=watcher_init error={}", error);
                return;
            }
        };

        let dir = watch_dir(&config_path);
        if let Err(error) = watcher.watch(dir, RecursiveMode::NonRecursive) {
            log::warn!(
                "config_hot_reload_disabled reason=watch_failed dir={} error={}",
                dir.display(),
                error
            );
            return;
        }
        log::info!("config_hot_reload_watching path={}", config_path.display());

        while let Some(event_result) = rx.recv().await {
            match event_result {
                Ok(event) if touches_config_file(&event, &file_name) => {}
                Ok(_) => continue,
                Err(error) => {
                    log::warn!("config_hot_reload_event_error error={}", error);
                    continue;
                }
            }

            match apply_reload_from_path(&app_context, &app_context.config_path).await {
                Ok(config) => log::info!(
                    "config_hot_reload_applied usb_port={} baud_rate={} check_interval={} anomaly_threshold={} telegram_alerts={}",
                    config.usb_port,
                    config.baud_rate,
                    config.check_interval,
                    config.anomaly_threshold,
                    config.enable_telegram_alerts,
                ),
                Err(error) => log::warn!("config_hot_reload_rejected error={}", error),
            }
        }
    })
}
