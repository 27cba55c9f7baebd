use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::app_context::AppContext;

mod config_reload;
mod monitor;

pub struct BackgroundJobs {
    monitor: JoinHandle<()>,
    config_reload: JoinHandle<()>,
}

impl BackgroundJobs {
    /// Waits for the poll loop to observe the stop signal, then drops the watcher.
    pub async fn shutdown(self) {
        if let Err(error) = self.monitor.await {
            log::warn!("monitor job ended abnormally: {}", error);
        }
        self.config_reload.abort();
    }
}

pub fn start_background_jobs(app_context: AppContext, stop: watch::Receiver<bool>) -> BackgroundJobs {
    BackgroundJobs {
        monitor: monitor::start_monitor_job(app_context.clone(), stop),
        config_reload: config_reload::start_config_hot_reload_job(app_context),
    }
}
