use std::sync::Arc;

use tokio::sync::{Mutex, Notify, RwLock};

use crate::alerts::{TELEGRAM_API_BASE, TelegramChannel};
use crate::anomaly::{AnomalyDetector, DetectorError};
use crate::config::{Config, ConfigError, save_config};
use crate::monitor::{DeviceConnector, DeviceState};

#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<RwLock<Config>>,
    pub config_path: String,
    pub device_state: Arc<Mutex<DeviceState>>,
    pub detector: Arc<RwLock<Arc<AnomalyDetector>>>,
    pub connector: Arc<dyn DeviceConnector>,
    pub http_client: reqwest::Client,
    pub telegram_api_base: String,
    pub runtime_update_notify: Arc<Notify>,
}

impl AppContext {
    pub fn new(
        config: Config,
        config_path: impl Into<String>,
        connector: Arc<dyn DeviceConnector>,
    ) -> Result<Self, DetectorError> {
        let detector = AnomalyDetector::fit(config.anomaly_threshold)?;
        let device_state = DeviceState::new(config.last_known_status);

        Ok(Self {
            config: Arc::new(RwLock::new(config)),
            config_path: config_path.into(),
            device_state: Arc::new(Mutex::new(device_state)),
            detector: Arc::new(RwLock::new(Arc::new(detector))),
            connector,
            http_client: reqwest::Client::new(),
            telegram_api_base: TELEGRAM_API_BASE.to_string(),
            runtime_update_notify: Arc::new(Notify::new()),
        })
    }

    pub async fn current_config(&self) -> Config {
        self.config.read().await.clone()
    }

    pub async fn current_detector(&self) -> Arc<AnomalyDetector> {
        Arc::clone(&*self.detector.read().await)
    }

    /// Channel built from the configuration as it is right now.
    pub async fn alert_channel(&self) -> TelegramChannel {
        let config = self.config.read().await;
        TelegramChannel::new(
            self.http_client.clone(),
            self.telegram_api_base.clone(),
            &config,
        )
    }

    /// Swaps in a new configuration. The detector is refitted only when the
    /// anomaly threshold changed; returns whether that happened.
    pub async fn apply_config(&self, new_config: Config) -> Result<bool, DetectorError> {
        let previous_threshold = self.config.read().await.anomaly_threshold;
        let threshold_changed = previous_threshold != new_config.anomaly_threshold;

        if threshold_changed {
            let detector = AnomalyDetector::fit(new_config.anomaly_threshold)?;
            *self.detector.write().await = Arc::new(detector);
            log::info!(
                "anomaly_detector_refitted previous_threshold={} threshold={}",
                previous_threshold,
                new_config.anomaly_threshold
            );
        }

        *self.config.write().await = new_config;
        self.runtime_update_notify.notify_waiters();
        Ok(threshold_changed)
    }

    /// Persists the whole record, stamped with the current device status,
    /// then applies it.
    pub async fn save_config(&self, mut new_config: Config) -> Result<bool, ConfigError> {
        new_config.last_known_status = self.device_state.lock().await.status();
        save_config(&self.config_path, &new_config)?;
        self.apply_config(new_config)
            .await
            .map_err(|error| ConfigError::Validation(error.to_string()))
    }
}
