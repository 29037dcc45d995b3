// ── Hostname classifier ──
//
// Advertised hostnames ("Johns-iPhone", "LivingRoom-Roku") are more
// specific than a vendor prefix, so a keyword hit here overrides the
// OUI category. Rules are evaluated top to bottom; first match wins.

use crate::model::DeviceCategory;

#[rustfmt::skip]
const RULES: &[(&[&str], DeviceCategory)] = &[
    (&["iphone", "android", "pixel", "galaxy", "phone"], DeviceCategory::Phone),
    (&["echo", "alexa", "homepod", "sonos", "nest", "speaker"], DeviceCategory::Speaker),
    (&["tv", "roku", "chromecast", "firestick", "bravia"], DeviceCategory::Tv),
    (&["macbook", "laptop", "thinkpad", "notebook", "desktop", "imac"], DeviceCategory::Laptop),
];

/// Category implied by the hostname alone, if any rule matches.
pub fn classify(hostname: Option<&str>) -> Option<DeviceCategory> {
    let hostname = hostname?.to_lowercase();
    RULES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| hostname.contains(k)))
        .map(|&(_, category)| category)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_match_is_case_insensitive() {
        assert_eq!(classify(Some("Johns-iPhone")), Some(DeviceCategory::Phone));
        assert_eq!(classify(Some("KITCHEN-ECHO")), Some(DeviceCategory::Speaker));
        assert_eq!(classify(Some("livingroom-roku.lan")), Some(DeviceCategory::Tv));
        assert_eq!(classify(Some("work-ThinkPad")), Some(DeviceCategory::Laptop));
    }

    #[test]
    fn earlier_rule_wins() {
        // "phone" precedes "tv" even though both substrings occur.
        assert_eq!(classify(Some("tv-phone-bridge")), Some(DeviceCategory::Phone));
    }

    #[test]
    fn no_match_or_missing() {
        assert_eq!(classify(Some("router.lan")), None);
        assert_eq!(classify(None), None);
    }
}
