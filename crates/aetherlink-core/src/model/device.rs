// ── Device domain types ──

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::net::Ipv4Addr;
use strum::{Display, EnumString};

use super::mac::MacAddress;

/// Inferred device category, rendered as the dashboard's `type` field.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum DeviceCategory {
    Phone,
    Laptop,
    Tv,
    Speaker,
    Iot,
    #[default]
    Default,
}

impl DeviceCategory {
    /// Human label used when templating a device name from its vendor.
    pub fn label(self) -> &'static str {
        match self {
            Self::Phone => "Phone",
            Self::Laptop => "Laptop",
            Self::Tv => "TV",
            Self::Speaker => "Speaker",
            Self::Iot | Self::Default => "Device",
        }
    }
}

/// Reachability. Discovery only ever produces `Online`; `Offline` only
/// shows up in synthetic data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum DeviceStatus {
    Online,
    Offline,
}

impl DeviceStatus {
    pub fn is_online(self) -> bool {
        matches!(self, Self::Online)
    }
}

/// A device seen on the local segment during one scan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    /// Delimiter-stripped MAC (`aabbccddeeff`).
    pub id: String,
    pub name: String,
    pub ip: Ipv4Addr,
    pub mac: MacAddress,
    pub status: DeviceStatus,
    #[serde(rename = "type")]
    pub category: DeviceCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_seen: Option<DateTime<Utc>>,
}

impl Device {
    /// A freshly discovered, online device.
    pub fn online(
        name: String,
        ip: Ipv4Addr,
        mac: MacAddress,
        category: DeviceCategory,
        vendor: Option<String>,
        seen_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: mac.id(),
            name,
            ip,
            mac,
            status: DeviceStatus::Online,
            category,
            vendor,
            last_seen: Some(seen_at),
        }
    }
}

/// Last octet of an IPv4 address, used as a short display suffix.
pub(crate) fn last_octet(ip: Ipv4Addr) -> u8 {
    ip.octets()[3]
}
