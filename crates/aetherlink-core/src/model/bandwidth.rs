// ── Bandwidth measurements ──

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Throughput of the primary interface at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BandwidthSample {
    pub timestamp: DateTime<Utc>,
    pub download_mbps: u32,
    pub upload_mbps: u32,
}

/// Result of one sampler pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BandwidthReading {
    pub download_mbps: u32,
    pub upload_mbps: u32,
    /// Cumulative rx+tx across every interface, GiB rounded to 0.1.
    #[serde(rename = "totalUsageGB")]
    pub total_usage_gb: f64,
}

impl BandwidthReading {
    /// Combined throughput reported as the dashboard's network speed.
    pub fn network_speed_mbps(&self) -> u32 {
        self.download_mbps.saturating_add(self.upload_mbps)
    }
}

/// Raw cumulative counters for one interface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceCounters {
    pub name: String,
    pub rx_bytes: u64,
    pub tx_bytes: u64,
}

impl InterfaceCounters {
    pub fn total_bytes(&self) -> u64 {
        self.rx_bytes.saturating_add(self.tx_bytes)
    }
}
