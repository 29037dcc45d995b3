// ── Activity log entries ──

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Action text recorded when a MAC is seen for the first time.
pub const CONNECTED_ACTION: &str = "Connected to network";

/// One entry in the device activity ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityEvent {
    /// `activity-{sequence}-{unix_secs}`; the sequence keeps ids unique
    /// when several events land in the same instant.
    pub id: String,
    /// Display name of the device the event is about.
    #[serde(rename = "device")]
    pub device_name: String,
    pub action: String,
    pub timestamp: DateTime<Utc>,
}

impl ActivityEvent {
    pub fn new(
        sequence: u64,
        device_name: impl Into<String>,
        action: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id: format!("activity-{sequence}-{}", timestamp.timestamp()),
            device_name: device_name.into(),
            action: action.into(),
            timestamp,
        }
    }
}
