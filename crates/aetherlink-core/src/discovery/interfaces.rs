// ── Interface enumerator ──
//
// Degraded device source used when the ARP table cannot be read: every
// local interface with a routable IPv4 address and a real MAC becomes a
// pseudo-device. Records from here carry no hostname and no vendor.

use std::collections::HashSet;
use std::net::Ipv4Addr;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use network_interface::{Addr, NetworkInterface, NetworkInterfaceConfig};
use tracing::debug;

use super::DeviceSource;
use crate::error::CoreError;
use crate::model::{Device, DeviceCategory, MacAddress};

/// Name fragments that mark an interface as wireless.
const WIRELESS_HINTS: &[&str] = &["wlan", "wlp", "wifi", "wi-fi", "wireless", "airport"];

/// The parts of a host interface this source looks at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalInterface {
    pub name: String,
    pub ipv4: Vec<Ipv4Addr>,
    pub mac: Option<String>,
}

impl From<NetworkInterface> for LocalInterface {
    fn from(iface: NetworkInterface) -> Self {
        let ipv4 = iface
            .addr
            .iter()
            .filter_map(|addr| match addr {
                Addr::V4(v4) => Some(v4.ip),
                Addr::V6(_) => None,
            })
            .collect();
        Self {
            name: iface.name,
            ipv4,
            mac: iface.mac_addr,
        }
    }
}

fn category_for(name: &str) -> DeviceCategory {
    let lower = name.to_lowercase();
    if WIRELESS_HINTS.iter().any(|hint| lower.contains(hint)) {
        DeviceCategory::Laptop
    } else {
        DeviceCategory::Default
    }
}

/// Turn interfaces into pseudo-devices, one per MAC.
pub fn pseudo_devices(interfaces: Vec<LocalInterface>, seen_at: DateTime<Utc>) -> Vec<Device> {
    let mut seen = HashSet::new();
    let mut devices = Vec::new();

    for iface in interfaces {
        let Some(ip) = iface.ipv4.iter().copied().find(|ip| !ip.is_loopback()) else {
            continue;
        };
        let Some(mac) = iface
            .mac
            .as_deref()
            .and_then(|m| MacAddress::parse(m).ok())
            .filter(|m| !m.is_zero())
        else {
            continue;
        };
        if !seen.insert(mac.clone()) {
            continue;
        }

        let category = category_for(&iface.name);
        devices.push(Device::online(iface.name, ip, mac, category, None, seen_at));
    }

    devices
}

/// Fallback device source: the host's own interfaces.
#[derive(Debug, Default)]
pub struct InterfaceSource;

impl InterfaceSource {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl DeviceSource for InterfaceSource {
    fn name(&self) -> &'static str {
        "interfaces"
    }

    async fn scan(&self, _network_prefix: &str) -> Result<Vec<Device>, CoreError> {
        let interfaces = tokio::task::spawn_blocking(NetworkInterface::show).await??;
        debug!(count = interfaces.len(), "enumerated local interfaces");
        let local = interfaces.into_iter().map(LocalInterface::from).collect();
        Ok(pseudo_devices(local, Utc::now()))
    }
}
