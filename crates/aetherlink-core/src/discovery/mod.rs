// ── Device discovery ──
//
// An ordered chain of device sources. The first source that answers
// wins; a failing source hands over to the next one. Whatever comes back
// is deduplicated by MAC, stamped as seen now, and reported to the
// history store so first sightings become activity events.

pub mod arp;
pub mod interfaces;

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tracing::{debug, info, warn};

use crate::config::MonitorConfig;
use crate::error::CoreError;
use crate::model::{Device, DeviceStatus};
use crate::store::HistoryStore;

pub use arp::{ArpSource, ArpTableReader, NeighborEntry};
pub use interfaces::{InterfaceSource, LocalInterface};

/// Something that can list the devices on the local segment.
#[async_trait]
pub trait DeviceSource: Send + Sync {
    /// Short name used in logs and error messages.
    fn name(&self) -> &'static str;

    async fn scan(&self, network_prefix: &str) -> Result<Vec<Device>, CoreError>;
}

/// Runs the source chain and records sightings.
pub struct DiscoveryEngine {
    sources: Vec<Box<dyn DeviceSource>>,
    store: Arc<HistoryStore>,
}

impl DiscoveryEngine {
    pub fn new(sources: Vec<Box<dyn DeviceSource>>, store: Arc<HistoryStore>) -> Self {
        Self { sources, store }
    }

    /// The host sources in fallback order: neighbor table, then interfaces.
    pub fn default_sources(config: &MonitorConfig) -> Vec<Box<dyn DeviceSource>> {
        vec![
            Box::new(ArpSource::new(ArpTableReader::new(config.arp_timeout))),
            Box::new(InterfaceSource::new()),
        ]
    }

    /// Scan with the first source that succeeds.
    ///
    /// Fails with [`CoreError::SourcesExhausted`] only when every source
    /// failed. An empty device list from a working source is a success.
    pub async fn try_discover(&self, network_prefix: &str) -> Result<Vec<Device>, CoreError> {
        let mut tried = Vec::with_capacity(self.sources.len());

        for source in &self.sources {
            match source.scan(network_prefix).await {
                Ok(devices) => {
                    info!(source = source.name(), count = devices.len(), "discovered devices");
                    return Ok(self.settle(devices).await);
                }
                Err(e) => {
                    warn!(source = source.name(), error = %e, "device source failed, falling back");
                    tried.push(source.name());
                }
            }
        }

        Err(CoreError::SourcesExhausted {
            tried: tried.join(", "),
        })
    }

    /// Like [`try_discover`](Self::try_discover) but never fails: an
    /// exhausted chain yields no devices.
    pub async fn discover(&self, network_prefix: &str) -> Vec<Device> {
        match self.try_discover(network_prefix).await {
            Ok(devices) => devices,
            Err(e) => {
                warn!(error = %e, "discovery produced no devices");
                Vec::new()
            }
        }
    }

    /// Dedupe by MAC, stamp, and log first sightings.
    async fn settle(&self, devices: Vec<Device>) -> Vec<Device> {
        let now = Utc::now();
        let mut seen = HashSet::new();
        let devices: Vec<Device> = devices
            .into_iter()
            .filter(|d| seen.insert(d.mac.clone()))
            .map(|mut d| {
                d.status = DeviceStatus::Online;
                d.last_seen = Some(now);
                d
            })
            .collect();

        let new_devices = self.store.record_sightings(&devices, now).await;
        if new_devices > 0 {
            debug!(new_devices, "recorded first sightings");
        }
        devices
    }
}
