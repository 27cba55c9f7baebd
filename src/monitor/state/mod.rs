use std::fmt;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::alerts::{AlertHistory, AlertRecord};

mod transition;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceStatus {
    Online,
    #[default]
    Offline,
}

impl DeviceStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            DeviceStatus::Online => "online",
            DeviceStatus::Offline => "offline",
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            DeviceStatus::Online => "🟢",
            DeviceStatus::Offline => "🔴",
        }
    }
}

impl fmt::Display for DeviceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LatestReading {
    pub value: String,
    pub received_at: DateTime<Local>,
}

/// Connectivity state, alert log and last reading of the polled device.
#[derive(Debug, Default)]
pub struct DeviceState {
    pub(crate) status: DeviceStatus,
    pub(crate) history: AlertHistory,
    pub(crate) latest_reading: Option<LatestReading>,
    pub(crate) last_poll_at: Option<DateTime<Local>>,
}

#[derive(Debug, Clone)]
pub struct DeviceSnapshot {
    pub status: DeviceStatus,
    pub latest_reading: Option<LatestReading>,
    pub last_poll_at: Option<DateTime<Local>>,
    pub alert_count: usize,
    pub recent_alerts: Vec<AlertRecord>,
}

impl DeviceState {
    pub fn new(initial_status: DeviceStatus) -> Self {
        Self {
            status: initial_status,
            ..Self::default()
        }
    }

    pub fn status(&self) -> DeviceStatus {
        self.status
    }

    pub fn history(&self) -> &AlertHistory {
        &self.history
    }

    pub(crate) fn log_alert_at(&mut self, message: impl Into<String>, now: DateTime<Local>) {
        self.history.push(message, now.naive_local());
    }

    pub(crate) fn record_reading(&mut self, value: &str, now: DateTime<Local>) {
        self.latest_reading = Some(LatestReading {
            value: value.to_string(),
            received_at: now,
        });
    }

    pub(crate) fn record_poll(&mut self, now: DateTime<Local>) {
        self.last_poll_at = Some(now);
    }

    pub(crate) fn snapshot(&self, alert_limit: usize) -> DeviceSnapshot {
        DeviceSnapshot {
            status: self.status,
            latest_reading: self.latest_reading.clone(),
            last_poll_at: self.last_poll_at,
            alert_count: self.history().len(),
            recent_alerts: self.history().recent(alert_limit),
        }
    }
}
