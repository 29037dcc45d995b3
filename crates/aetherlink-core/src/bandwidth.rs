// ── Bandwidth sampler ──
//
// Turns cumulative interface byte counters into throughput. Rates need
// two readings: the sampler keeps the previous one, and on its very
// first pass takes two reads a short probe window apart.

use std::sync::{Arc, Mutex as StdMutex};
use std::time::Duration;

use chrono::Utc;
use sysinfo::{NetworkExt, NetworksExt, System, SystemExt};
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::debug;

use crate::error::CoreError;
use crate::model::{BandwidthReading, BandwidthSample, InterfaceCounters};
use crate::store::HistoryStore;

const BYTES_PER_GIB: f64 = 1_073_741_824.0;

/// Host-level counters the sampler and snapshot need.
pub trait HostMetrics: Send + Sync {
    /// Cumulative rx/tx bytes per interface.
    fn interface_counters(&self) -> Result<Vec<InterfaceCounters>, CoreError>;

    /// Seconds since the host booted.
    fn uptime_secs(&self) -> u64;
}

/// [`HostMetrics`] backed by `sysinfo`.
pub struct SystemMetrics {
    system: StdMutex<System>,
}

impl SystemMetrics {
    pub fn new() -> Self {
        let mut system = System::new();
        system.refresh_networks_list();
        Self {
            system: StdMutex::new(system),
        }
    }
}

impl Default for SystemMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl HostMetrics for SystemMetrics {
    fn interface_counters(&self) -> Result<Vec<InterfaceCounters>, CoreError> {
        let mut system = self.system.lock().map_err(|e| CoreError::Counters {
            message: e.to_string(),
        })?;
        system.refresh_networks_list();
        system.refresh_networks();

        let counters: Vec<InterfaceCounters> = system
            .networks()
            .iter()
            .map(|(name, data)| InterfaceCounters {
                name: name.clone(),
                rx_bytes: data.total_received(),
                tx_bytes: data.total_transmitted(),
            })
            .collect();

        if counters.is_empty() {
            return Err(CoreError::Counters {
                message: "no network interfaces reported".into(),
            });
        }
        Ok(counters)
    }

    fn uptime_secs(&self) -> u64 {
        self.system.lock().map_or(0, |system| system.uptime())
    }
}

#[derive(Debug, Clone)]
struct CounterReading {
    at: Instant,
    counters: Vec<InterfaceCounters>,
}

/// Derive a reading from two counter snapshots `elapsed` apart.
///
/// The primary interface is the one with the largest cumulative traffic in
/// `current`; rates are its byte deltas. Total usage spans every interface.
/// A counter that went backwards (interface reset) counts as zero traffic.
pub fn derive_reading(
    baseline: &[InterfaceCounters],
    current: &[InterfaceCounters],
    elapsed: Duration,
) -> BandwidthReading {
    let total: u64 = current.iter().map(InterfaceCounters::total_bytes).sum();

    let (download_mbps, upload_mbps) = current
        .iter()
        .max_by_key(|c| c.total_bytes())
        .and_then(|primary| {
            baseline
                .iter()
                .find(|b| b.name == primary.name)
                .map(|before| {
                    (
                        to_mbps(primary.rx_bytes.saturating_sub(before.rx_bytes), elapsed),
                        to_mbps(primary.tx_bytes.saturating_sub(before.tx_bytes), elapsed),
                    )
                })
        })
        .unwrap_or((0, 0));

    BandwidthReading {
        download_mbps,
        upload_mbps,
        total_usage_gb: to_gib_tenths(total),
    }
}

#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::as_conversions
)]
fn to_mbps(bytes: u64, elapsed: Duration) -> u32 {
    let secs = elapsed.as_secs_f64();
    if secs <= 0.0 {
        return 0;
    }
    let bits_per_sec = bytes as f64 / secs * 8.0;
    (bits_per_sec / 1_000_000.0).round().min(f64::from(u32::MAX)) as u32
}

#[allow(clippy::cast_precision_loss, clippy::as_conversions)]
fn to_gib_tenths(bytes: u64) -> f64 {
    (bytes as f64 / BYTES_PER_GIB * 10.0).round() / 10.0
}

/// Samples throughput and appends it to the bandwidth ledger.
pub struct BandwidthSampler {
    metrics: Arc<dyn HostMetrics>,
    store: Arc<HistoryStore>,
    probe_window: Duration,
    previous: Mutex<Option<CounterReading>>,
}

impl BandwidthSampler {
    pub fn new(metrics: Arc<dyn HostMetrics>, store: Arc<HistoryStore>, probe_window: Duration) -> Self {
        Self {
            metrics,
            store,
            probe_window,
            previous: Mutex::new(None),
        }
    }

    fn read(&self) -> Result<CounterReading, CoreError> {
        Ok(CounterReading {
            at: Instant::now(),
            counters: self.metrics.interface_counters()?,
        })
    }

    /// Take one sample and record it in the history store.
    pub async fn sample(&self) -> Result<BandwidthReading, CoreError> {
        let mut previous = self.previous.lock().await;

        let baseline = if let Some(reading) = previous.take() {
            reading
        } else {
            let first = self.read()?;
            tokio::time::sleep(self.probe_window).await;
            first
        };

        // A failed read keeps the baseline so the next pass skips the probe.
        let current = match self.read() {
            Ok(current) => current,
            Err(e) => {
                *previous = Some(baseline);
                return Err(e);
            }
        };
        let reading = derive_reading(
            &baseline.counters,
            &current.counters,
            current.at.duration_since(baseline.at),
        );
        *previous = Some(current);
        drop(previous);

        debug!(
            download_mbps = reading.download_mbps,
            upload_mbps = reading.upload_mbps,
            total_usage_gb = reading.total_usage_gb,
            "sampled bandwidth"
        );
        self.store
            .record_bandwidth(BandwidthSample {
                timestamp: Utc::now(),
                download_mbps: reading.download_mbps,
                upload_mbps: reading.upload_mbps,
            })
            .await;

        Ok(reading)
    }

    pub fn uptime_secs(&self) -> u64 {
        self.metrics.uptime_secs()
    }
}
