use chrono::NaiveDateTime;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertRecord {
    pub timestamp: String,
    pub message: String,
}

/// In-memory alert log in insertion order. Nothing is ever evicted.
#[derive(Debug, Default)]
pub struct AlertHistory {
    records: Vec<AlertRecord>,
}

impl AlertHistory {
    pub fn push(&mut self, message: impl Into<String>, at: NaiveDateTime) {
        self.records.push(AlertRecord {
            timestamp: at.format(TIMESTAMP_FORMAT).to_string(),
            message: message.into(),
        });
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[cfg(test)]
    pub fn last(&self) -> Option<&AlertRecord> {
        self.records.last()
    }

    /// Up to `limit` most recent records, newest first.
    pub fn recent(&self, limit: usize) -> Vec<AlertRecord> {
        self.records.iter().rev().take(limit).cloned().collect()
    }
}
