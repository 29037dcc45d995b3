// ── History store ──
//
// Two bounded ledgers plus the set of MACs seen so far, all behind one
// async mutex so a scan's "is this MAC new → log it" step and the
// sampler's "append → prune" step never interleave.
//
//   bandwidth:  ascending by timestamp, pruned by age on every append
//   activities: newest first, truncated to capacity on every insert
//   known:      grows for the lifetime of the store, never evicted

use std::collections::{HashSet, VecDeque};
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use tracing::debug;

use crate::config::{DEFAULT_ACTIVITY_CAPACITY, DEFAULT_RETENTION};
use crate::model::{
    ActivityEvent, BandwidthSample, CHART_POINTS, CONNECTED_ACTION, ChartPoint, Device,
    MacAddress,
};

/// Size and age bounds for the ledgers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryLimits {
    pub retention: Duration,
    pub activity_capacity: usize,
}

impl Default for HistoryLimits {
    fn default() -> Self {
        Self {
            retention: DEFAULT_RETENTION,
            activity_capacity: DEFAULT_ACTIVITY_CAPACITY,
        }
    }
}

#[derive(Default)]
struct Ledgers {
    bandwidth: VecDeque<BandwidthSample>,
    activities: VecDeque<ActivityEvent>,
    known: HashSet<MacAddress>,
    /// Monotonic activity counter, part of every activity id.
    sequence: u64,
}

impl Ledgers {
    fn push_activity(
        &mut self,
        device_name: &str,
        action: &str,
        at: DateTime<Utc>,
        capacity: usize,
    ) -> ActivityEvent {
        self.sequence += 1;
        let event = ActivityEvent::new(self.sequence, device_name, action, at);
        self.activities.push_front(event.clone());
        self.activities.truncate(capacity);
        event
    }
}

/// Shared, bounded history for one monitor.
pub struct HistoryStore {
    limits: HistoryLimits,
    retention: chrono::Duration,
    ledgers: Mutex<Ledgers>,
}

impl HistoryStore {
    pub fn new(limits: HistoryLimits) -> Self {
        let retention =
            chrono::Duration::from_std(limits.retention).unwrap_or_else(|_| chrono::Duration::hours(24));
        Self {
            limits,
            retention,
            ledgers: Mutex::new(Ledgers::default()),
        }
    }

    // ── Bandwidth ledger ─────────────────────────────────────────────

    /// Append a sample, then drop every sample older than the retention
    /// window measured from this sample's timestamp.
    pub async fn record_bandwidth(&self, sample: BandwidthSample) {
        let mut ledgers = self.ledgers.lock().await;

        // Keep ascending order even if the wall clock stepped backwards.
        let at = ledgers
            .bandwidth
            .partition_point(|s| s.timestamp <= sample.timestamp);
        ledgers.bandwidth.insert(at, sample);

        let now = sample.timestamp;
        let mut pruned = 0usize;
        while ledgers
            .bandwidth
            .front()
            .is_some_and(|head| now - head.timestamp > self.retention)
        {
            ledgers.bandwidth.pop_front();
            pruned += 1;
        }
        if pruned > 0 {
            debug!(pruned, retained = ledgers.bandwidth.len(), "pruned bandwidth history");
        }
    }

    pub async fn bandwidth_samples(&self) -> Vec<BandwidthSample> {
        self.ledgers.lock().await.bandwidth.iter().copied().collect()
    }

    /// Project the bandwidth ledger onto hourly chart points, oldest first.
    ///
    /// Always [`CHART_POINTS`] points, `23h` through `Now`. Samples are
    /// bucketed by whole hours of age relative to `now` and averaged per
    /// bucket; an hour without samples is a zero point.
    pub async fn chart_series(&self, now: DateTime<Utc>) -> Vec<ChartPoint> {
        let ledgers = self.ledgers.lock().await;

        let mut buckets = vec![(0u64, 0u64, 0u64); usize::try_from(CHART_POINTS).unwrap_or_default()];
        for sample in &ledgers.bandwidth {
            let hours_ago = (now - sample.timestamp).num_hours().max(0);
            let Some(bucket) = usize::try_from(hours_ago)
                .ok()
                .and_then(|idx| buckets.get_mut(idx))
            else {
                continue;
            };
            bucket.0 += u64::from(sample.download_mbps);
            bucket.1 += u64::from(sample.upload_mbps);
            bucket.2 += 1;
        }

        (0..CHART_POINTS)
            .rev()
            .zip(buckets.iter().rev())
            .map(|(hours_ago, &(down, up, count))| {
                ChartPoint::new(hours_ago, rounded_mean(down, count), rounded_mean(up, count))
            })
            .collect()
    }

    // ── Activity ledger ──────────────────────────────────────────────

    /// Prepend an activity, truncating the ledger to capacity.
    pub async fn record_activity(
        &self,
        device_name: &str,
        action: &str,
        at: DateTime<Utc>,
    ) -> ActivityEvent {
        let capacity = self.limits.activity_capacity;
        self.ledgers
            .lock()
            .await
            .push_activity(device_name, action, at, capacity)
    }

    /// The newest `limit` activities, newest first.
    pub async fn recent_activities(&self, limit: usize) -> Vec<ActivityEvent> {
        self.ledgers
            .lock()
            .await
            .activities
            .iter()
            .take(limit)
            .cloned()
            .collect()
    }

    // ── Known devices ────────────────────────────────────────────────

    /// Mark every device in a scan as seen. Each MAC not seen before gets
    /// one "connected" activity. Returns the number of new devices.
    pub async fn record_sightings(&self, devices: &[Device], at: DateTime<Utc>) -> usize {
        let capacity = self.limits.activity_capacity;
        let mut ledgers = self.ledgers.lock().await;

        let mut new_devices = 0;
        for device in devices {
            if ledgers.known.insert(device.mac.clone()) {
                ledgers.push_activity(&device.name, CONNECTED_ACTION, at, capacity);
                new_devices += 1;
            }
        }
        new_devices
    }

    pub async fn is_known(&self, mac: &MacAddress) -> bool {
        self.ledgers.lock().await.known.contains(mac)
    }

    pub async fn known_device_count(&self) -> usize {
        self.ledgers.lock().await.known.len()
    }
}

impl Default for HistoryStore {
    fn default() -> Self {
        Self::new(HistoryLimits::default())
    }
}

fn rounded_mean(sum: u64, count: u64) -> u32 {
    if count == 0 {
        return 0;
    }
    let mean = (sum + count / 2) / count;
    u32::try_from(mean).unwrap_or(u32::MAX)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::DeviceCategory;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use std::net::Ipv4Addr;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 11, 6, 12, 0, 0).unwrap()
    }

    fn sample(at: DateTime<Utc>, down: u32, up: u32) -> BandwidthSample {
        BandwidthSample {
            timestamp: at,
            download_mbps: down,
            upload_mbps: up,
        }
    }

    fn device(mac: &str, name: &str) -> Device {
        Device::online(
            name.into(),
            Ipv4Addr::new(192, 168, 1, 2),
            MacAddress::parse(mac).unwrap(),
            DeviceCategory::Default,
            None,
            t0(),
        )
    }

    #[tokio::test]
    async fn bandwidth_ledger_drops_samples_older_than_retention() {
        let store = HistoryStore::default();
        // One sample every 30 minutes for 30 hours.
        for i in 0..=60 {
            let at = t0() + chrono::Duration::minutes(30 * i);
            store.record_bandwidth(sample(at, 10, 1)).await;
        }

        let latest = t0() + chrono::Duration::minutes(30 * 60);
        let samples = store.bandwidth_samples().await;
        assert!(!samples.is_empty());
        assert!(
            samples
                .iter()
                .all(|s| latest - s.timestamp <= chrono::Duration::hours(24))
        );
        // Exactly 24h old is still inside the window.
        assert_eq!(samples.first().unwrap().timestamp, latest - chrono::Duration::hours(24));
        assert!(samples.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));
    }

    #[tokio::test]
    async fn bandwidth_ledger_stays_ordered_when_clock_steps_back() {
        let store = HistoryStore::default();
        store.record_bandwidth(sample(t0(), 1, 1)).await;
        store
            .record_bandwidth(sample(t0() - chrono::Duration::minutes(5), 2, 2))
            .await;

        let samples = store.bandwidth_samples().await;
        assert_eq!(samples[0].download_mbps, 2);
        assert_eq!(samples[1].download_mbps, 1);
    }

    #[tokio::test]
    async fn activity_ledger_keeps_newest_fifty() {
        let store = HistoryStore::default();
        for i in 0..51 {
            let at = t0() + chrono::Duration::seconds(i);
            store
                .record_activity(&format!("device-{i}"), CONNECTED_ACTION, at)
                .await;
        }

        let all = store.recent_activities(usize::MAX).await;
        assert_eq!(all.len(), 50);
        assert_eq!(all.first().unwrap().device_name, "device-50");
        assert_eq!(all.last().unwrap().device_name, "device-1");
        assert!(all.windows(2).all(|w| w[0].timestamp >= w[1].timestamp));
    }

    #[tokio::test]
    async fn activity_ids_unique_within_same_instant() {
        let store = HistoryStore::default();
        for _ in 0..5 {
            store.record_activity("burst", CONNECTED_ACTION, t0()).await;
        }

        let ids: HashSet<String> = store
            .recent_activities(10)
            .await
            .into_iter()
            .map(|a| a.id)
            .collect();
        assert_eq!(ids.len(), 5);
    }

    #[tokio::test]
    async fn recent_activities_respects_limit() {
        let store = HistoryStore::default();
        for i in 0..20 {
            store
                .record_activity(&format!("d{i}"), CONNECTED_ACTION, t0())
                .await;
        }
        let recent = store.recent_activities(10).await;
        assert_eq!(recent.len(), 10);
        assert_eq!(recent[0].device_name, "d19");
    }

    #[tokio::test]
    async fn sightings_log_each_mac_once() {
        let store = HistoryStore::default();
        let scan = vec![device("aa:bb:cc:dd:ee:01", "one"), device("aa:bb:cc:dd:ee:02", "two")];

        assert_eq!(store.record_sightings(&scan, t0()).await, 2);
        assert_eq!(store.record_sightings(&scan, t0()).await, 0);

        assert_eq!(store.known_device_count().await, 2);
        assert_eq!(store.recent_activities(10).await.len(), 2);
        assert!(
            store
                .is_known(&MacAddress::parse("AA-BB-CC-DD-EE-01").unwrap())
                .await
        );
    }

    #[tokio::test]
    async fn chart_series_buckets_by_hour_oldest_first() {
        let store = HistoryStore::default();
        let now = t0();
        store
            .record_bandwidth(sample(now - chrono::Duration::minutes(150), 100, 20))
            .await;
        store
            .record_bandwidth(sample(now - chrono::Duration::minutes(130), 200, 40))
            .await;
        store.record_bandwidth(sample(now, 50, 10)).await;

        let series = store.chart_series(now).await;
        assert_eq!(series.len(), 24);
        assert_eq!(series[0].time, "23h");
        assert_eq!(series[21], ChartPoint::new(2, 150, 30));
        assert_eq!(series[22], ChartPoint::new(1, 0, 0));
        assert_eq!(series[23], ChartPoint::new(0, 50, 10));
        assert_eq!(series[23].time, "Now");
    }

    #[tokio::test]
    async fn chart_series_single_sample_still_spans_a_day() {
        let store = HistoryStore::default();
        store.record_bandwidth(sample(t0(), 80, 12)).await;

        let series = store.chart_series(t0()).await;
        assert_eq!(series.len(), 24);
        assert!(series[..23].iter().all(|p| p.download == 0 && p.upload == 0));
        assert_eq!(series[23], ChartPoint::new(0, 80, 12));
    }

    #[tokio::test]
    async fn chart_series_zero_filled_without_samples() {
        let store = HistoryStore::default();
        let series = store.chart_series(t0()).await;

        let labels: Vec<&str> = series.iter().map(|p| p.time.as_str()).collect();
        assert_eq!(labels.len(), 24);
        assert_eq!(labels.first(), Some(&"23h"));
        assert_eq!(labels.last(), Some(&"Now"));
        assert!(series.iter().all(|p| p.download == 0 && p.upload == 0));
    }
}
