// ── ARP table reader ──
//
// Runs `arp -a` and turns its output into neighbor tuples. The output
// format differs per platform:
//
//   Linux:   `MyPhone (192.168.1.10) at aa:bb:cc:dd:ee:01 [ether] on eth0`
//   macOS:   `? (192.168.1.1) at 0:1b:63:84:45:e6 on en0 ifscope [ethernet]`
//   Windows: `  192.168.1.1           00-1b-63-84-45-e6     dynamic`
//
// Lines are matched leniently; anything that does not yield both an IPv4
// address and a MAC is skipped, never reported as an error.

use std::collections::HashSet;
use std::net::Ipv4Addr;
use std::process::Stdio;
use std::sync::LazyLock;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use regex::Regex;
use tokio::process::Command;
use tracing::debug;

use super::DeviceSource;
use crate::classify::classify_device;
use crate::error::CoreError;
use crate::model::device::last_octet;
use crate::model::{Device, MacAddress};

static IP_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\((\d{1,3}\.\d{1,3}\.\d{1,3}\.\d{1,3})\)").expect("valid regex")
});

static MAC_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b[0-9a-f]{1,2}(?:[:-][0-9a-f]{1,2}){5}\b").expect("valid regex")
});

static HOSTNAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\S+)\s+\(").expect("valid regex"));

/// One usable neighbor-table entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NeighborEntry {
    pub ip: Ipv4Addr,
    pub mac: MacAddress,
    pub hostname: Option<String>,
}

/// Parse a single line. `None` for headers, incomplete entries, the
/// all-zero MAC, and anything else that is not a complete neighbor.
pub fn parse_line(line: &str) -> Option<NeighborEntry> {
    if line.to_ascii_lowercase().contains("incomplete") {
        return None;
    }

    let ip = IP_RE.captures(line)?.get(1)?.as_str().parse().ok()?;
    let mac = MacAddress::parse(MAC_RE.find(line)?.as_str()).ok()?;
    if mac.is_zero() {
        return None;
    }

    let hostname = HOSTNAME_RE
        .captures(line)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_owned());

    Some(NeighborEntry { ip, mac, hostname })
}

/// Parse a whole table, keeping the first entry per MAC.
pub fn parse_table<'a>(lines: impl IntoIterator<Item = &'a str>) -> Vec<NeighborEntry> {
    let mut seen = HashSet::new();
    lines
        .into_iter()
        .filter_map(parse_line)
        .filter(|entry| seen.insert(entry.mac.clone()))
        .collect()
}

/// A hostname worth showing: not the bare IP, not a placeholder.
fn is_informative(hostname: &str, ip: Ipv4Addr) -> bool {
    let lower = hostname.to_lowercase();
    !hostname.is_empty()
        && hostname != ip.to_string()
        && !lower.contains("unknown")
        && !hostname.contains('?')
}

/// Display name: informative hostname, else vendor template, else generic.
pub fn display_name(entry: &NeighborEntry, vendor: Option<&str>, label: &str) -> String {
    if let Some(host) = entry.hostname.as_deref().filter(|h| is_informative(h, entry.ip)) {
        return host.to_owned();
    }
    let suffix = last_octet(entry.ip);
    match vendor {
        Some(vendor) => format!("{vendor} {label} ({suffix})"),
        None => format!("Device {suffix}"),
    }
}

/// Classify and name one neighbor.
pub fn to_device(entry: NeighborEntry, seen_at: DateTime<Utc>) -> Device {
    let class = classify_device(entry.hostname.as_deref(), &entry.mac);
    let name = display_name(&entry, class.vendor, class.category.label());
    Device::online(
        name,
        entry.ip,
        entry.mac,
        class.category,
        class.vendor.map(str::to_owned),
        seen_at,
    )
}

// ── Subprocess ───────────────────────────────────────────────────────

/// Time-bounded invocation of the system neighbor-table command.
#[derive(Debug, Clone)]
pub struct ArpTableReader {
    program: String,
    args: Vec<String>,
    timeout: Duration,
}

impl ArpTableReader {
    pub fn new(timeout: Duration) -> Self {
        Self::with_command("arp", &["-a"], timeout)
    }

    /// Use a different command (tests, or hosts where `arp` lives elsewhere).
    pub fn with_command(program: &str, args: &[&str], timeout: Duration) -> Self {
        Self {
            program: program.to_owned(),
            args: args.iter().map(|&a| a.to_owned()).collect(),
            timeout,
        }
    }

    fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Run the command and return its stdout. The child is killed if the
    /// timeout elapses.
    pub async fn read(&self) -> Result<String, CoreError> {
        let command = self.command_line();
        let child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output();

        let output = tokio::time::timeout(self.timeout, child)
            .await
            .map_err(|_| CoreError::CommandTimeout {
                command: command.clone(),
                timeout_ms: u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX),
            })?
            .map_err(|e| CoreError::CommandFailed {
                command: command.clone(),
                reason: e.to_string(),
            })?;

        if !output.status.success() {
            return Err(CoreError::CommandFailed {
                command,
                reason: format!(
                    "{}: {}",
                    output.status,
                    String::from_utf8_lossy(&output.stderr).trim()
                ),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    /// Read and parse the neighbor table.
    pub async fn neighbors(&self) -> Result<Vec<NeighborEntry>, CoreError> {
        let stdout = self.read().await?;
        let entries = parse_table(stdout.lines());
        debug!(
            lines = stdout.lines().count(),
            neighbors = entries.len(),
            "parsed neighbor table"
        );
        Ok(entries)
    }
}

/// Primary device source: the system ARP cache.
pub struct ArpSource {
    reader: ArpTableReader,
}

impl ArpSource {
    pub fn new(reader: ArpTableReader) -> Self {
        Self { reader }
    }
}

#[async_trait]
impl DeviceSource for ArpSource {
    fn name(&self) -> &'static str {
        "arp"
    }

    async fn scan(&self, _network_prefix: &str) -> Result<Vec<Device>, CoreError> {
        let now = Utc::now();
        let neighbors = self.reader.neighbors().await?;
        Ok(neighbors.into_iter().map(|n| to_device(n, now)).collect())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::{DeviceCategory, DeviceStatus};
    use pretty_assertions::assert_eq;

    const LINUX_TABLE: &str = "\
MyPhone (192.168.1.10) at aa:bb:cc:dd:ee:01 [ether] on eth0
? (192.168.1.1) at 00:1b:63:84:45:e6 [ether] on eth0
? (192.168.1.50) at <incomplete> on eth0
ghost (192.168.1.51) at 00:00:00:00:00:00 [ether] on eth0
dup-name (192.168.1.11) at AA:BB:CC:DD:EE:01 [ether] on eth0
unknown-host (192.168.1.77) at b8:27:eb:01:02:03 [ether] on eth0
";

    #[test]
    fn myphone_scenario() {
        let entries = parse_table(["MyPhone (192.168.1.10) at aa:bb:cc:dd:ee:01 [ether] on eth0"]);
        assert_eq!(entries.len(), 1);

        let device = to_device(entries.into_iter().next().unwrap(), Utc::now());
        assert_eq!(device.ip, Ipv4Addr::new(192, 168, 1, 10));
        assert_eq!(device.mac.as_str(), "aa:bb:cc:dd:ee:01");
        assert_eq!(device.name, "MyPhone");
        assert_eq!(device.status, DeviceStatus::Online);
        assert_eq!(device.id, "aabbccddee01");
        assert_eq!(device.category, DeviceCategory::Phone);
    }

    #[test]
    fn table_has_no_duplicate_macs_and_skips_rejects() {
        let entries = parse_table(LINUX_TABLE.lines());
        let macs: Vec<&str> = entries.iter().map(|e| e.mac.as_str()).collect();
        assert_eq!(
            macs,
            vec!["aa:bb:cc:dd:ee:01", "00:1b:63:84:45:e6", "b8:27:eb:01:02:03"]
        );
        // First occurrence wins.
        assert_eq!(entries[0].ip, Ipv4Addr::new(192, 168, 1, 10));
        assert!(entries.iter().all(|e| !e.mac.is_zero()));
    }

    #[test]
    fn incomplete_marker_rejects_line_even_with_mac() {
        assert!(parse_line("host (10.0.0.2) at aa:bb:cc:dd:ee:ff INCOMPLETE").is_none());
    }

    #[test]
    fn bsd_short_octets_and_question_mark_host() {
        let entry = parse_line("? (192.168.1.1) at 0:1b:63:84:45:e6 on en0 ifscope [ethernet]").unwrap();
        assert_eq!(entry.mac.as_str(), "00:1b:63:84:45:e6");
        assert_eq!(entry.hostname.as_deref(), Some("?"));

        // "?" is not informative, so the Apple prefix names it.
        let device = to_device(entry, Utc::now());
        assert_eq!(device.name, "Apple Phone (1)");
        assert_eq!(device.vendor.as_deref(), Some("Apple"));
    }

    #[test]
    fn windows_lines_without_parenthesized_ip_are_skipped() {
        let table = "Interface: 192.168.1.5 --- 0x4\n  192.168.1.1   00-1b-63-84-45-e6   dynamic\n";
        assert!(parse_table(table.lines()).is_empty());
    }

    #[test]
    fn empty_table_is_empty_not_error() {
        assert!(parse_table("".lines()).is_empty());
        assert!(parse_table("Address HWtype HWaddress Flags Mask Iface".lines()).is_empty());
    }

    #[test]
    fn naming_falls_back_in_order() {
        let entry = |host: Option<&str>, mac: &str| NeighborEntry {
            ip: Ipv4Addr::new(192, 168, 1, 77),
            mac: MacAddress::parse(mac).unwrap(),
            hostname: host.map(str::to_owned),
        };

        // Hostname containing "unknown" falls through to the vendor template.
        let d = to_device(entry(Some("unknown-host"), "b8:27:eb:01:02:03"), Utc::now());
        assert_eq!(d.name, "Raspberry Pi Foundation Device (77)");

        // Bare IP as hostname, unknown vendor.
        let d = to_device(entry(Some("192.168.1.77"), "00:11:22:33:44:55"), Utc::now());
        assert_eq!(d.name, "Device 77");
        assert_eq!(d.vendor, None);

        // No hostname, vendor with a TV category.
        let d = to_device(entry(None, "b0:a7:37:00:00:01"), Utc::now());
        assert_eq!(d.name, "Roku TV (77)");
    }

    #[tokio::test]
    async fn missing_binary_is_command_failure() {
        let reader = ArpTableReader::with_command(
            "aetherlink-no-such-arp-binary",
            &["-a"],
            Duration::from_secs(1),
        );
        let err = reader.read().await.unwrap_err();
        assert!(matches!(err, CoreError::CommandFailed { .. }), "got {err:?}");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn reader_parses_command_output() {
        let reader = ArpTableReader::with_command("printf", &[LINUX_TABLE], Duration::from_secs(5));

        let entries = reader.neighbors().await.unwrap();
        let macs: Vec<&str> = entries.iter().map(|e| e.mac.as_str()).collect();
        assert_eq!(
            macs,
            vec!["aa:bb:cc:dd:ee:01", "00:1b:63:84:45:e6", "b8:27:eb:01:02:03"]
        );

        let devices = ArpSource::new(reader).scan("192.168.1").await.unwrap();
        assert_eq!(devices.len(), 3);
        assert_eq!(devices[0].name, "MyPhone");
        assert!(devices.iter().all(|d| d.status == DeviceStatus::Online));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn slow_command_times_out() {
        let reader = ArpTableReader::with_command("sleep", &["5"], Duration::from_millis(50));
        let err = reader.read().await.unwrap_err();
        assert!(matches!(err, CoreError::CommandTimeout { timeout_ms: 50, .. }), "got {err:?}");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn non_zero_exit_is_command_failure() {
        let reader = ArpTableReader::with_command("false", &[], Duration::from_secs(1));
        let err = reader.read().await.unwrap_err();
        assert!(matches!(err, CoreError::CommandFailed { .. }), "got {err:?}");
    }
}
