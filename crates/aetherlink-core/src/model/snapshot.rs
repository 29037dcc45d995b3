// ── Dashboard snapshot ──
//
// The single aggregate returned per status query. Field names follow
// the dashboard's JSON contract, hence the camelCase renames.

use serde::{Deserialize, Serialize};

use super::activity::ActivityEvent;
use super::device::Device;

/// Headline numbers shown above the device list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkStats {
    pub connected_devices: usize,
    /// Mbps.
    pub network_speed: u32,
    /// GiB, one decimal place.
    pub data_usage: f64,
    pub uptime: String,
}

/// Number of hourly points in every chart series, `23h` through `Now`.
pub const CHART_POINTS: i64 = 24;

/// One point of the traffic chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartPoint {
    /// `"Now"` or `"{n}h"`.
    pub time: String,
    pub download: u32,
    pub upload: u32,
}

impl ChartPoint {
    pub fn new(hours_ago: i64, download: u32, upload: u32) -> Self {
        Self {
            time: hour_label(hours_ago),
            download,
            upload,
        }
    }
}

/// Where a snapshot's data came from. Not part of the wire format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SnapshotOrigin {
    /// Real collection pipeline finished in time.
    Live,
    /// Real data collection disabled.
    #[default]
    Mock,
    /// Real collection timed out or failed; synthetic values substituted.
    Degraded,
}

/// Complete response to a status query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub stats: NetworkStats,
    pub devices: Vec<Device>,
    /// Newest first.
    pub activities: Vec<ActivityEvent>,
    /// Oldest first.
    pub chart_data: Vec<ChartPoint>,
    #[serde(skip)]
    pub origin: SnapshotOrigin,
}

/// `"Now"` for the current hour, `"{n}h"` otherwise.
pub fn hour_label(hours_ago: i64) -> String {
    if hours_ago <= 0 {
        "Now".to_owned()
    } else {
        format!("{hours_ago}h")
    }
}

/// Compact uptime: `"{d}d {h}h"`, `"{h}h {m}m"`, or `"{m}m"`.
pub fn format_uptime(seconds: u64) -> String {
    let days = seconds / 86_400;
    let hours = (seconds % 86_400) / 3_600;
    let minutes = (seconds % 3_600) / 60;

    if days > 0 {
        format!("{days}d {hours}h")
    } else if hours > 0 {
        format!("{hours}h {minutes}m")
    } else {
        format!("{minutes}m")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uptime_formats() {
        assert_eq!(format_uptime(0), "0m");
        assert_eq!(format_uptime(59), "0m");
        assert_eq!(format_uptime(61 * 60), "1h 1m");
        assert_eq!(format_uptime(3 * 86_400 + 5 * 3_600 + 42 * 60), "3d 5h");
    }

    #[test]
    fn hour_labels() {
        assert_eq!(hour_label(0), "Now");
        assert_eq!(hour_label(1), "1h");
        assert_eq!(hour_label(23), "23h");
    }
}
