// ── Domain model ──
//
// Plain data types shared by discovery, the history store, and the
// snapshot aggregator. All of them serialize to the dashboard's JSON shape.

pub mod activity;
pub mod bandwidth;
pub mod device;
pub mod mac;
pub mod snapshot;

pub use activity::{ActivityEvent, CONNECTED_ACTION};
pub use bandwidth::{BandwidthReading, BandwidthSample, InterfaceCounters};
pub use device::{Device, DeviceCategory, DeviceStatus};
pub use mac::{InvalidMacAddress, MacAddress};
pub use snapshot::{
    CHART_POINTS, ChartPoint, NetworkStats, Snapshot, SnapshotOrigin, format_uptime, hour_label,
};
