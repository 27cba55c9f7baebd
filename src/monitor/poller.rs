use std::sync::Arc;

use chrono::Local;

use crate::alerts::AlertSink;
use crate::anomaly::Classification;
use crate::app_context::AppContext;

use super::device::PollError;
use super::service::{send_alert, update_device_status};
use super::state::DeviceStatus;

#[derive(Debug, Clone, PartialEq)]
pub struct PollReport {
    /// Trimmed line read from the device; `None` when nothing arrived.
    pub reading: Option<String>,
    pub classification: Option<Classification>,
}

impl PollReport {
    pub fn is_anomalous(&self) -> bool {
        self.classification
            .as_ref()
            .is_some_and(Classification::is_anomalous)
    }
}

/// One connect-read-classify pass. Opening the device marks it online before
/// the read; errors are returned untouched for the caller to categorise.
pub async fn poll_device<S: AlertSink>(
    app: &AppContext,
    sink: &S,
) -> Result<PollReport, PollError> {
    let (port, baud_rate) = {
        let config = app.config.read().await;
        (config.usb_port.clone(), config.baud_rate)
    };

    let connector = Arc::clone(&app.connector);
    let link = tokio::task::spawn_blocking(move || connector.open(&port, baud_rate))
        .await
        .map_err(|error| PollError::Unexpected(format!("device open task failed: {}", error)))??;

    update_device_status(&app.device_state, sink, DeviceStatus::Online, None).await;

    let line = tokio::task::spawn_blocking(move || {
        let mut link = link;
        link.read_line()
    })
    .await
    .map_err(|error| PollError::Unexpected(format!("device read task failed: {}", error)))??;

    if line.is_empty() {
        return Ok(PollReport {
            reading: None,
            classification: None,
        });
    }

    app.device_state
        .lock()
        .await
        .record_reading(&line, Local::now());

    let detector = app.current_detector().await;
    let classification = detector.classify(&line);
    if let Classification::InvalidInput(raw) = &classification {
        log::error!("Invalid data point received: {}", raw);
    }

    if classification.is_anomalous() {
        let message = format!("⚠️ Anomaly detected: Reading value {}", line);
        log::warn!("anomaly_detected reading={:?}", line);
        send_alert(&app.device_state, sink, &message).await;
    }

    Ok(PollReport {
        reading: Some(line),
        classification: Some(classification),
    })
}

/// Runs one poll and applies its outcome: connection failures take the device
/// offline, other failures are reported and leave the status alone.
pub async fn run_poll_cycle<S: AlertSink>(
    app: &AppContext,
    sink: &S,
) -> Result<PollReport, PollError> {
    let result = poll_device(app, sink).await;

    match &result {
        Ok(report) => {
            tracing::info!(
                target: "monitor",
                module = "monitor",
                status = DeviceStatus::Online.as_str(),
                reading = report.reading.as_deref().unwrap_or(""),
                anomalous = report.is_anomalous(),
                "device_poll"
            );
        }
        Err(PollError::Connection(error)) => {
            update_device_status(
                &app.device_state,
                sink,
                DeviceStatus::Offline,
                Some(error.as_str()),
            )
            .await;
            log::error!("🔴 Device Offline - Connection Error: {}", error);
        }
        Err(PollError::Unexpected(error)) => {
            log::error!("Unexpected error: {}", error);
        }
    }

    app.device_state.lock().await.record_poll(Local::now());
    result
}
