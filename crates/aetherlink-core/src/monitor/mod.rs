// ── Monitor facade ──
//
// Owns the history store, the discovery chain and the bandwidth sampler
// for one process, and assembles dashboard snapshots from them.
//
// A real collection pass runs as a spawned task raced against the
// snapshot timeout. Losing the race drops the JoinHandle, which detaches
// the task: it still finishes and its store updates still land, the
// caller just gets synthetic data this time.

pub mod synthetic;

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, warn};

use crate::bandwidth::{BandwidthSampler, HostMetrics, SystemMetrics};
use crate::config::{MonitorConfig, SNAPSHOT_ACTIVITY_LIMIT};
use crate::discovery::{DeviceSource, DiscoveryEngine};
use crate::error::CoreError;
use crate::model::{ActivityEvent, Device, NetworkStats, Snapshot, SnapshotOrigin, format_uptime};
use crate::store::{HistoryLimits, HistoryStore};

/// Entry point for consumers.
///
/// Cheaply cloneable via `Arc<MonitorInner>`; clones share one history.
#[derive(Clone)]
pub struct Monitor {
    inner: Arc<MonitorInner>,
}

struct MonitorInner {
    config: MonitorConfig,
    store: Arc<HistoryStore>,
    discovery: DiscoveryEngine,
    sampler: BandwidthSampler,
}

impl Monitor {
    /// A monitor probing this host: `arp -a`, then local interfaces, with
    /// counters from `sysinfo`.
    pub fn new(config: MonitorConfig) -> Self {
        let sources = DiscoveryEngine::default_sources(&config);
        Self::with_sources(config, sources, Arc::new(SystemMetrics::new()))
    }

    /// A monitor with explicit device sources and host metrics.
    pub fn with_sources(
        config: MonitorConfig,
        sources: Vec<Box<dyn DeviceSource>>,
        metrics: Arc<dyn HostMetrics>,
    ) -> Self {
        let store = Arc::new(HistoryStore::new(HistoryLimits {
            retention: config.retention,
            activity_capacity: config.activity_capacity,
        }));
        let discovery = DiscoveryEngine::new(sources, Arc::clone(&store));
        let sampler = BandwidthSampler::new(metrics, Arc::clone(&store), config.rate_probe_window);

        Self {
            inner: Arc::new(MonitorInner {
                config,
                store,
                discovery,
                sampler,
            }),
        }
    }

    pub fn store(&self) -> &Arc<HistoryStore> {
        &self.inner.store
    }

    fn uses_real_data(&self) -> bool {
        self.inner.config.use_real_data
    }

    // ── Snapshots ────────────────────────────────────────────────────

    /// Snapshot using the configured data mode.
    pub async fn snapshot(&self) -> Snapshot {
        self.build_snapshot(self.uses_real_data()).await
    }

    /// Build a snapshot. Never fails.
    ///
    /// Mock mode returns synthetic data without touching the store. Real
    /// mode races [`collect`](Self::collect) against the snapshot timeout
    /// and degrades to synthetic data when the timer wins or the pipeline
    /// fails.
    pub async fn build_snapshot(&self, use_real_data: bool) -> Snapshot {
        if !use_real_data {
            return synthetic::snapshot(SnapshotOrigin::Mock);
        }

        let monitor = self.clone();
        let pipeline = tokio::spawn(async move { monitor.collect().await });
        let timeout = self.inner.config.snapshot_timeout;

        let err = match tokio::time::timeout(timeout, pipeline).await {
            Ok(Ok(Ok(snapshot))) => return snapshot,
            Ok(Ok(Err(e))) => e,
            Ok(Err(join)) => CoreError::from(join),
            Err(_) => CoreError::Timeout {
                timeout_secs: timeout.as_secs(),
            },
        };

        warn!(error = %err, host = err.is_host_failure(), "serving degraded snapshot");
        synthetic::snapshot(SnapshotOrigin::Degraded)
    }

    /// One real collection pass, unbounded in time.
    pub async fn collect(&self) -> Result<Snapshot, CoreError> {
        let inner = &self.inner;
        let devices = inner
            .discovery
            .try_discover(&inner.config.network_prefix)
            .await?;
        let reading = inner.sampler.sample().await?;

        let now = Utc::now();
        let chart_data = inner.store.chart_series(now).await;
        let activities = inner.store.recent_activities(SNAPSHOT_ACTIVITY_LIMIT).await;

        debug!(
            devices = devices.len(),
            activities = activities.len(),
            chart_points = chart_data.len(),
            "collected live snapshot"
        );

        Ok(Snapshot {
            stats: NetworkStats {
                connected_devices: devices.len(),
                network_speed: reading.network_speed_mbps(),
                data_usage: reading.total_usage_gb,
                uptime: format_uptime(inner.sampler.uptime_secs()),
            },
            devices,
            activities,
            chart_data,
            origin: SnapshotOrigin::Live,
        })
    }

    // ── Queries ──────────────────────────────────────────────────────

    /// Run `fut` under the snapshot timeout.
    async fn bounded<T>(
        &self,
        fut: impl Future<Output = Result<T, CoreError>>,
    ) -> Result<T, CoreError> {
        let timeout = self.inner.config.snapshot_timeout;
        tokio::time::timeout(timeout, fut)
            .await
            .map_err(|_| CoreError::Timeout {
                timeout_secs: timeout.as_secs(),
            })?
    }

    /// Devices on the segment: a real scan, or the demo roster in mock mode.
    pub async fn devices(&self) -> Result<Vec<Device>, CoreError> {
        if !self.uses_real_data() {
            return Ok(synthetic::devices(Utc::now()));
        }
        let prefix = &self.inner.config.network_prefix;
        self.bounded(self.inner.discovery.try_discover(prefix)).await
    }

    /// Look up one device by id. Any MAC spelling is accepted.
    pub async fn device(&self, identifier: &str) -> Result<Device, CoreError> {
        let wanted = normalize_id(identifier);
        self.devices()
            .await?
            .into_iter()
            .find(|d| d.id == wanted)
            .ok_or_else(|| CoreError::DeviceNotFound {
                identifier: identifier.to_owned(),
            })
    }

    /// Headline numbers only.
    pub async fn stats(&self) -> Result<NetworkStats, CoreError> {
        if !self.uses_real_data() {
            return Ok(synthetic::stats());
        }

        let inner = &self.inner;
        self.bounded(async {
            let devices = inner
                .discovery
                .try_discover(&inner.config.network_prefix)
                .await?;
            let reading = inner.sampler.sample().await?;
            Ok(NetworkStats {
                connected_devices: devices.len(),
                network_speed: reading.network_speed_mbps(),
                data_usage: reading.total_usage_gb,
                uptime: format_uptime(inner.sampler.uptime_secs()),
            })
        })
        .await
    }

    /// The newest `limit` activities, newest first. `limit` is clamped to
    /// the ledger capacity.
    pub async fn activities(&self, limit: usize) -> Vec<ActivityEvent> {
        let limit = limit.min(self.inner.config.activity_capacity);
        if !self.uses_real_data() {
            let mut activities = synthetic::activities(Utc::now());
            activities.truncate(limit);
            return activities;
        }
        self.inner.store.recent_activities(limit).await
    }
}

/// Reduce a MAC or device id to the delimiter-stripped lowercase form.
fn normalize_id(identifier: &str) -> String {
    identifier
        .trim()
        .chars()
        .filter(|c| !matches!(c, ':' | '-' | '.'))
        .flat_map(char::to_lowercase)
        .collect()
}
