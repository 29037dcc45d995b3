// ── OUI classifier ──
//
// Exact match on the first three MAC octets. The table is illustrative,
// not the IEEE registry: it covers the consumer brands most often seen
// on home networks and maps each prefix to the category that brand's
// hardware usually is.

use std::collections::HashMap;
use std::sync::LazyLock;

use crate::model::{DeviceCategory, MacAddress};

/// Vendor and inferred category for a known prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VendorInfo {
    pub vendor: &'static str,
    pub category: DeviceCategory,
}

#[rustfmt::skip]
const OUI_TABLE: &[(&str, &str, DeviceCategory)] = &[
    // Apple
    ("00:03:93", "Apple", DeviceCategory::Phone),
    ("00:0a:95", "Apple", DeviceCategory::Phone),
    ("00:1b:63", "Apple", DeviceCategory::Phone),
    ("a4:83:e7", "Apple", DeviceCategory::Phone),
    ("ac:87:a3", "Apple", DeviceCategory::Phone),
    ("ac:de:48", "Apple", DeviceCategory::Phone),
    ("f0:99:b6", "Apple", DeviceCategory::Phone),
    ("f0:18:98", "Apple", DeviceCategory::Laptop),
    ("a4:5e:60", "Apple", DeviceCategory::Laptop),
    // Amazon
    ("00:71:47", "Amazon", DeviceCategory::Speaker),
    ("38:f7:3d", "Amazon", DeviceCategory::Speaker),
    ("68:37:e9", "Amazon", DeviceCategory::Speaker),
    ("a0:02:dc", "Amazon", DeviceCategory::Tv),
    // Roku
    ("b0:a7:37", "Roku", DeviceCategory::Tv),
    ("d8:31:34", "Roku", DeviceCategory::Tv),
    // Sony
    ("30:f9:ed", "Sony", DeviceCategory::Tv),
    ("54:42:49", "Sony", DeviceCategory::Tv),
    // Samsung
    ("00:12:fb", "Samsung", DeviceCategory::Tv),
    ("00:1d:25", "Samsung", DeviceCategory::Tv),
    ("e8:50:8b", "Samsung", DeviceCategory::Tv),
    // Google / Nest
    ("1c:f2:9a", "Google", DeviceCategory::Speaker),
    ("54:60:09", "Google", DeviceCategory::Speaker),
    ("6c:ad:f8", "Google", DeviceCategory::Iot),
    // Raspberry Pi
    ("b8:27:eb", "Raspberry Pi Foundation", DeviceCategory::Iot),
    ("dc:a6:32", "Raspberry Pi Trading", DeviceCategory::Iot),
];

static OUI_INDEX: LazyLock<HashMap<&'static str, VendorInfo>> = LazyLock::new(|| {
    OUI_TABLE
        .iter()
        .map(|&(prefix, vendor, category)| (prefix, VendorInfo { vendor, category }))
        .collect()
});

/// Look up the vendor prefix of `mac`.
pub fn lookup(mac: &MacAddress) -> Option<VendorInfo> {
    OUI_INDEX.get(mac.oui()).copied()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn mac(s: &str) -> MacAddress {
        MacAddress::parse(s).unwrap()
    }

    #[test]
    fn known_prefix_resolves() {
        let info = lookup(&mac("B8:27:EB:12:34:56")).unwrap();
        assert_eq!(info.vendor, "Raspberry Pi Foundation");
        assert_eq!(info.category, DeviceCategory::Iot);
    }

    #[test]
    fn unknown_prefix_is_none() {
        assert!(lookup(&mac("00:11:22:33:44:55")).is_none());
    }

    #[test]
    fn shared_prefix_is_deterministic() {
        let first = lookup(&mac("00:1b:63:00:00:01"));
        for suffix in ["aa:bb:cc", "00:00:00", "ff:ff:ff", "12:34:56"] {
            let other = lookup(&mac(&format!("00-1B-63-{}", suffix.replace(':', "-"))));
            assert_eq!(first, other);
        }
        assert_eq!(first.unwrap().vendor, "Apple");
    }

    #[test]
    fn table_prefixes_are_normalized() {
        for (prefix, _, _) in OUI_TABLE {
            let full = mac(&format!("{prefix}:00:00:00"));
            assert_eq!(full.oui(), *prefix);
        }
        assert_eq!(OUI_INDEX.len(), OUI_TABLE.len(), "duplicate prefix in table");
    }
}
