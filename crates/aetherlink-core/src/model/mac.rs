// ── MAC address identity ──
//
// Every device is keyed by its MAC. Neighbor tables print MACs in
// several shapes (`0:1b:63:84:45:e6` on BSD, `00-1B-63-84-45-E6` on
// Windows), so everything is normalized to zero-padded lowercase
// colon-separated form before it is compared or stored.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Rejected MAC address text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid MAC address: {0}")]
pub struct InvalidMacAddress(pub String);

/// MAC address, normalized to lowercase colon-separated format (aa:bb:cc:dd:ee:ff).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MacAddress(String);

impl MacAddress {
    /// Parse six colon- or hyphen-delimited octets of one or two hex digits.
    pub fn parse(raw: &str) -> Result<Self, InvalidMacAddress> {
        let octets: Vec<&str> = raw.trim().split([':', '-']).collect();
        if octets.len() != 6 {
            return Err(InvalidMacAddress(raw.to_owned()));
        }

        let mut normalized = String::with_capacity(17);
        for (i, octet) in octets.iter().enumerate() {
            let valid = (1..=2).contains(&octet.len())
                && octet.chars().all(|c| c.is_ascii_hexdigit());
            if !valid {
                return Err(InvalidMacAddress(raw.to_owned()));
            }
            if i > 0 {
                normalized.push(':');
            }
            if octet.len() == 1 {
                normalized.push('0');
            }
            normalized.push_str(&octet.to_ascii_lowercase());
        }

        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Delimiter-stripped form used as the device id (`aabbccddeeff`).
    pub fn id(&self) -> String {
        self.0.replace(':', "")
    }

    /// First three octets (`aa:bb:cc`), the vendor prefix.
    pub fn oui(&self) -> &str {
        // Normalized form is always 17 ASCII bytes.
        &self.0[..8]
    }

    pub fn is_zero(&self) -> bool {
        self.0 == "00:00:00:00:00:00"
    }
}

impl fmt::Display for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for MacAddress {
    type Err = InvalidMacAddress;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for MacAddress {
    type Error = InvalidMacAddress;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<MacAddress> for String {
    fn from(mac: MacAddress) -> Self {
        mac.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_dashes() {
        let mac = MacAddress::parse("AA-BB-CC-DD-EE-FF").unwrap();
        assert_eq!(mac.as_str(), "aa:bb:cc:dd:ee:ff");
    }

    #[test]
    fn normalizes_case() {
        let mac = MacAddress::parse("AA:BB:CC:DD:EE:FF").unwrap();
        assert_eq!(mac.as_str(), "aa:bb:cc:dd:ee:ff");
    }

    #[test]
    fn pads_single_digit_octets() {
        let mac: MacAddress = "0:1b:63:4:45:e6".parse().unwrap();
        assert_eq!(mac.to_string(), "00:1b:63:04:45:e6");
        assert_eq!(mac.oui(), "00:1b:63");
    }

    #[test]
    fn id_strips_delimiters() {
        let mac = MacAddress::parse("aa:bb:cc:dd:ee:01").unwrap();
        assert_eq!(mac.id(), "aabbccddee01");
    }

    #[test]
    fn zero_address_detected_in_any_form() {
        assert!(MacAddress::parse("0:0:0:0:0:0").unwrap().is_zero());
        assert!(!MacAddress::parse("00:00:00:00:00:01").unwrap().is_zero());
    }

    #[test]
    fn rejects_malformed() {
        assert!(MacAddress::parse("invalid-mac").is_err());
        assert!(MacAddress::parse("aa:bb:cc:dd:ee").is_err());
        assert!(MacAddress::parse("aaa:bb:cc:dd:ee:ff").is_err());
        assert!(MacAddress::parse("gg:bb:cc:dd:ee:ff").is_err());
    }

    #[test]
    fn serializes_as_plain_string() {
        let mac = MacAddress::parse("AA:BB:CC:DD:EE:FF").unwrap();
        assert_eq!(serde_json::to_string(&mac).unwrap(), "\"aa:bb:cc:dd:ee:ff\"");
    }
}
