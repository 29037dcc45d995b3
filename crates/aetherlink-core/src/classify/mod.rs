// ── Device classification ──
//
// Two pure classifiers backed by static tables. `classify_device`
// combines them: hostname evidence first, then the vendor prefix,
// then `Default`.

pub mod hostname;
pub mod oui;

pub use oui::VendorInfo;

use crate::model::{DeviceCategory, MacAddress};

/// Combined classification result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub category: DeviceCategory,
    pub vendor: Option<&'static str>,
}

/// Classify a neighbor from its hostname and MAC.
pub fn classify_device(hostname: Option<&str>, mac: &MacAddress) -> Classification {
    let vendor_info = oui::lookup(mac);
    let category = hostname::classify(hostname)
        .or(vendor_info.map(|v| v.category))
        .unwrap_or_default();

    Classification {
        category,
        vendor: vendor_info.map(|v| v.vendor),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn mac(s: &str) -> MacAddress {
        MacAddress::parse(s).unwrap()
    }

    #[test]
    fn hostname_overrides_vendor_category() {
        // Amazon prefix maps to Speaker; the hostname says TV.
        let c = classify_device(Some("bedroom-firestick"), &mac("00:71:47:aa:bb:cc"));
        assert_eq!(c.category, DeviceCategory::Tv);
        assert_eq!(c.vendor, Some("Amazon"));
    }

    #[test]
    fn vendor_category_when_hostname_is_silent() {
        let c = classify_device(Some("host-42"), &mac("b0:a7:37:00:00:01"));
        assert_eq!(c.category, DeviceCategory::Tv);
        assert_eq!(c.vendor, Some("Roku"));
    }

    #[test]
    fn default_when_nothing_matches() {
        let c = classify_device(None, &mac("00:11:22:33:44:55"));
        assert_eq!(c.category, DeviceCategory::Default);
        assert_eq!(c.vendor, None);
    }
}
