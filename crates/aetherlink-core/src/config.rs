// ── Runtime monitor configuration ──
//
// Describes *how* the monitor collects data. The CLI builds one of these
// from `aetherlink-config` (file + env + flags) and hands it in; core
// never reads configuration files itself.

use std::time::Duration;

/// Network prefix assumed when none is configured.
pub const DEFAULT_NETWORK_PREFIX: &str = "192.168.1";

/// Hard wall-clock bound on one real collection pass.
pub const DEFAULT_SNAPSHOT_TIMEOUT: Duration = Duration::from_secs(10);

/// Bound on the neighbor-table subprocess.
pub const DEFAULT_ARP_TIMEOUT: Duration = Duration::from_secs(3);

/// Gap between the two counter reads of the very first bandwidth sample.
pub const DEFAULT_RATE_PROBE_WINDOW: Duration = Duration::from_secs(1);

/// How long bandwidth samples are kept.
pub const DEFAULT_RETENTION: Duration = Duration::from_secs(24 * 60 * 60);

/// Maximum number of retained activity events.
pub const DEFAULT_ACTIVITY_CAPACITY: usize = 50;

/// Number of activities included in a snapshot.
pub const SNAPSHOT_ACTIVITY_LIMIT: usize = 10;

/// Configuration for one [`Monitor`](crate::Monitor).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitorConfig {
    /// Collect from the host instead of returning synthetic snapshots.
    pub use_real_data: bool,
    /// Local network prefix (e.g. `"192.168.1"`). Carried for context;
    /// discovery reads the whole neighbor table and does not filter on it.
    pub network_prefix: String,
    /// Race timeout for the real collection pipeline.
    pub snapshot_timeout: Duration,
    /// Timeout for the `arp -a` subprocess.
    pub arp_timeout: Duration,
    /// Counter probe window used when no previous reading exists.
    pub rate_probe_window: Duration,
    /// Bandwidth ledger retention.
    pub retention: Duration,
    /// Activity ledger capacity.
    pub activity_capacity: usize,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            use_real_data: false,
            network_prefix: DEFAULT_NETWORK_PREFIX.into(),
            snapshot_timeout: DEFAULT_SNAPSHOT_TIMEOUT,
            arp_timeout: DEFAULT_ARP_TIMEOUT,
            rate_probe_window: DEFAULT_RATE_PROBE_WINDOW,
            retention: DEFAULT_RETENTION,
            activity_capacity: DEFAULT_ACTIVITY_CAPACITY,
        }
    }
}
