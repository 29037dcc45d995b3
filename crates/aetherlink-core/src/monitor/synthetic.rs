// ── Synthetic snapshots ──
//
// Demo data returned when real collection is disabled, and substituted
// when it times out or fails. Values are random within fixed ranges so a
// dashboard has something plausible to draw. Nothing here touches the
// history store.

use std::net::Ipv4Addr;

use chrono::{DateTime, Duration, Utc};
use rand::Rng;

use crate::model::{
    ActivityEvent, CHART_POINTS, CONNECTED_ACTION, ChartPoint, Device, DeviceCategory, DeviceStatus, MacAddress,
    NetworkStats, Snapshot, SnapshotOrigin,
};

struct RosterEntry {
    name: &'static str,
    octet: u8,
    mac: &'static str,
    category: DeviceCategory,
}

const ROSTER: &[RosterEntry] = &[
    RosterEntry { name: "iPhone 13", octet: 10, mac: "aa:bb:cc:dd:ee:01", category: DeviceCategory::Phone },
    RosterEntry { name: "MacBook Pro", octet: 11, mac: "aa:bb:cc:dd:ee:02", category: DeviceCategory::Laptop },
    RosterEntry { name: "Smart TV", octet: 15, mac: "aa:bb:cc:dd:ee:03", category: DeviceCategory::Tv },
    RosterEntry { name: "Raspberry Pi", octet: 20, mac: "aa:bb:cc:dd:ee:04", category: DeviceCategory::Iot },
    RosterEntry { name: "Google Home", octet: 25, mac: "aa:bb:cc:dd:ee:05", category: DeviceCategory::Iot },
];

/// (device, action, minutes ago)
const DEMO_ACTIVITIES: &[(&str, &str, i64)] = &[
    ("iPhone 13", CONNECTED_ACTION, 5),
    ("MacBook Pro", "High bandwidth usage detected", 10),
    ("Smart TV", "Streaming detected", 15),
];

/// A complete synthetic snapshot.
pub fn snapshot(origin: SnapshotOrigin) -> Snapshot {
    let now = Utc::now();
    Snapshot {
        stats: stats(),
        devices: devices(now),
        activities: activities(now),
        chart_data: chart(),
        origin,
    }
}

pub fn stats() -> NetworkStats {
    let mut rng = rand::thread_rng();
    NetworkStats {
        connected_devices: rng.gen_range(5..10),
        network_speed: rng.gen_range(400..500),
        data_usage: f64::from(rng.gen_range(100u32..150)),
        uptime: format!("{}d {}h", rng.gen_range(0..10), rng.gen_range(0..24)),
    }
}

/// The demo roster. The last device flips between online and offline.
pub fn devices(now: DateTime<Utc>) -> Vec<Device> {
    let mut rng = rand::thread_rng();
    let last = ROSTER.len() - 1;

    ROSTER
        .iter()
        .enumerate()
        .filter_map(|(i, entry)| {
            let mac = MacAddress::parse(entry.mac).ok()?;
            let status = if i == last && rng.gen_bool(0.5) {
                DeviceStatus::Offline
            } else {
                DeviceStatus::Online
            };
            Some(Device {
                id: mac.id(),
                name: entry.name.to_owned(),
                ip: Ipv4Addr::new(192, 168, 1, entry.octet),
                mac,
                status,
                category: entry.category,
                vendor: None,
                last_seen: status.is_online().then_some(now),
            })
        })
        .collect()
}

/// Newest first.
pub fn activities(now: DateTime<Utc>) -> Vec<ActivityEvent> {
    DEMO_ACTIVITIES
        .iter()
        .zip(1u64..)
        .map(|(&(device, action, minutes), sequence)| {
            ActivityEvent::new(sequence, device, action, now - Duration::minutes(minutes))
        })
        .collect()
}

/// 24 random hourly points, `23h` through `Now`.
pub fn chart() -> Vec<ChartPoint> {
    let mut rng = rand::thread_rng();
    (0..CHART_POINTS)
        .rev()
        .map(|hours_ago| ChartPoint::new(hours_ago, rng.gen_range(50..150), rng.gen_range(10..60)))
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn stats_within_ranges() {
        for _ in 0..200 {
            let stats = stats();
            assert!((5..10).contains(&stats.connected_devices));
            assert!((400..500).contains(&stats.network_speed));
            assert!((100.0..150.0).contains(&stats.data_usage));

            let (days, hours) = stats.uptime.split_once(' ').unwrap();
            let days: u32 = days.strip_suffix('d').unwrap().parse().unwrap();
            let hours: u32 = hours.strip_suffix('h').unwrap().parse().unwrap();
            assert!(days < 10);
            assert!(hours < 24);
        }
    }

    #[test]
    fn chart_has_24_points_ending_now() {
        for _ in 0..50 {
            let chart = chart();
            assert_eq!(chart.len(), 24);
            assert_eq!(chart.first().unwrap().time, "23h");
            assert_eq!(chart.last().unwrap().time, "Now");
            assert!(chart.iter().all(|p| (50..150).contains(&p.download)));
            assert!(chart.iter().all(|p| (10..60).contains(&p.upload)));
        }
    }

    #[test]
    fn roster_is_stable_except_last_status() {
        let devices = devices(Utc::now());
        assert_eq!(devices.len(), 5);
        assert_eq!(devices[0].id, "aabbccddee01");
        assert_eq!(devices[0].category, DeviceCategory::Phone);
        assert!(devices[..4].iter().all(|d| d.status.is_online()));
    }

    #[test]
    fn roster_last_status_varies() {
        let statuses: std::collections::HashSet<bool> = (0..200)
            .map(|_| devices(Utc::now())[4].status.is_online())
            .collect();
        assert_eq!(statuses.len(), 2);
    }

    #[test]
    fn activities_newest_first() {
        let now = Utc::now();
        let activities = activities(now);
        assert_eq!(activities.len(), 3);
        assert_eq!(activities[0].action, CONNECTED_ACTION);
        assert_eq!(activities[0].timestamp, now - Duration::minutes(5));
        assert!(activities.windows(2).all(|w| w[0].timestamp > w[1].timestamp));
    }

    #[test]
    fn snapshot_carries_origin() {
        assert_eq!(snapshot(SnapshotOrigin::Degraded).origin, SnapshotOrigin::Degraded);
    }
}
