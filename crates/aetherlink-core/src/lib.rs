//! Local network discovery, classification and bounded history for AetherLink.
//!
//! This crate owns the host probing and aggregation logic behind the
//! `aetherlink` CLI:
//!
//! - **[`Monitor`]**: Central facade. [`build_snapshot()`](Monitor::build_snapshot)
//!   races a real collection pass against a wall-clock timeout and falls back
//!   to synthetic data when collection is slow or fails; it never errors.
//!
//! - **[`DiscoveryEngine`]**: Ordered chain of [`DeviceSource`]s (the `arp -a`
//!   neighbor table, then local interfaces). Deduplicates by MAC and records
//!   first sightings as activity events.
//!
//! - **[`BandwidthSampler`]**: Derives throughput and cumulative usage from
//!   interface byte counters ([`HostMetrics`], backed by `sysinfo`).
//!
//! - **[`HistoryStore`]**: 24h bandwidth ledger, capped activity ledger and
//!   the set of MACs seen so far, behind one async mutex.
//!
//! - **Classification** ([`classify`]): vendor prefix and hostname keyword
//!   tables mapping a neighbor to a [`DeviceCategory`].

pub mod bandwidth;
pub mod classify;
pub mod config;
pub mod discovery;
pub mod error;
pub mod model;
pub mod monitor;
pub mod store;

// ── Primary re-exports ──────────────────────────────────────────────
pub use bandwidth::{BandwidthSampler, HostMetrics, SystemMetrics};
pub use config::MonitorConfig;
pub use discovery::{DeviceSource, DiscoveryEngine};
pub use error::CoreError;
pub use monitor::Monitor;
pub use store::{HistoryLimits, HistoryStore};

pub use model::{
    ActivityEvent, BandwidthReading, BandwidthSample, ChartPoint, Device, DeviceCategory,
    DeviceStatus, MacAddress, NetworkStats, Snapshot, SnapshotOrigin,
};
