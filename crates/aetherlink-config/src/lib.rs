//! Configuration for the AetherLink CLI.
//!
//! Layered loading (built-in defaults, then `config.toml` in the platform
//! config directory, then `AETHERLINK_*` environment variables) and
//! translation to `aetherlink_core::MonitorConfig`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use aetherlink_core::MonitorConfig;
use aetherlink_core::config::{
    DEFAULT_ACTIVITY_CAPACITY, DEFAULT_ARP_TIMEOUT, DEFAULT_NETWORK_PREFIX,
    DEFAULT_RATE_PROBE_WINDOW, DEFAULT_RETENTION, DEFAULT_SNAPSHOT_TIMEOUT,
};

/// Prefix for environment overrides, e.g. `AETHERLINK_USE_REAL_DATA=true`.
pub const ENV_PREFIX: &str = "AETHERLINK_";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config struct ──────────────────────────────────────────────

/// On-disk configuration. Every key is optional in the file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Probe the host instead of serving demo data.
    pub use_real_data: bool,

    /// Local network prefix, e.g. "192.168.1".
    pub network_prefix: String,

    /// Hard bound on one collection pass.
    pub snapshot_timeout_secs: u64,

    /// Bound on the `arp -a` subprocess.
    pub arp_timeout_ms: u64,

    /// Gap between the two counter reads of the first bandwidth sample.
    pub rate_probe_ms: u64,

    /// Bandwidth history retention.
    pub retention_hours: u64,

    /// Number of activity events kept.
    pub activity_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            use_real_data: false,
            network_prefix: DEFAULT_NETWORK_PREFIX.into(),
            snapshot_timeout_secs: DEFAULT_SNAPSHOT_TIMEOUT.as_secs(),
            arp_timeout_ms: millis(DEFAULT_ARP_TIMEOUT),
            rate_probe_ms: millis(DEFAULT_RATE_PROBE_WINDOW),
            retention_hours: DEFAULT_RETENTION.as_secs() / 3_600,
            activity_capacity: DEFAULT_ACTIVITY_CAPACITY,
        }
    }
}

fn millis(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}

impl Config {
    /// Reject values the monitor cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.snapshot_timeout_secs == 0 {
            return Err(ConfigError::Validation {
                field: "snapshot_timeout_secs".into(),
                reason: "must be at least 1".into(),
            });
        }
        if self.arp_timeout_ms == 0 {
            return Err(ConfigError::Validation {
                field: "arp_timeout_ms".into(),
                reason: "must be at least 1".into(),
            });
        }
        if self.activity_capacity == 0 {
            return Err(ConfigError::Validation {
                field: "activity_capacity".into(),
                reason: "must be at least 1".into(),
            });
        }
        validate_prefix(&self.network_prefix)
    }

    /// Translate to the core runtime config.
    pub fn to_monitor_config(&self) -> MonitorConfig {
        MonitorConfig {
            use_real_data: self.use_real_data,
            network_prefix: self.network_prefix.clone(),
            snapshot_timeout: Duration::from_secs(self.snapshot_timeout_secs),
            arp_timeout: Duration::from_millis(self.arp_timeout_ms),
            rate_probe_window: Duration::from_millis(self.rate_probe_ms),
            retention: Duration::from_secs(self.retention_hours.saturating_mul(3_600)),
            activity_capacity: self.activity_capacity,
        }
    }
}

/// Accept one to three dotted decimal octets, e.g. "192.168.1".
pub fn validate_prefix(prefix: &str) -> Result<(), ConfigError> {
    let octets: Vec<&str> = prefix.split('.').collect();
    let valid = (1..=3).contains(&octets.len())
        && octets.iter().all(|o| !o.is_empty() && o.parse::<u8>().is_ok());
    if valid {
        Ok(())
    } else {
        Err(ConfigError::Validation {
            field: "network_prefix".into(),
            reason: format!("expected dotted octets like '192.168.1', got '{prefix}'"),
        })
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "aetherlink", "aetherlink").map_or_else(
        || {
            let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
            p.push(".config");
            p.push("aetherlink");
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

// ── Config loading ──────────────────────────────────────────────────

/// Load from `path` + environment. A missing file is not an error.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let config: Config = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed(ENV_PREFIX))
        .extract()?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn defaults_match_core() {
        assert_eq!(Config::default().to_monitor_config(), MonitorConfig::default());
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.network_prefix, "192.168.1");
        assert_eq!(config.snapshot_timeout_secs, 10);
        assert_eq!(config.activity_capacity, 50);
    }

    #[test]
    fn file_overrides_defaults() {
        let file = write_config(
            r#"
use_real_data = true
network_prefix = "10.0.0"
arp_timeout_ms = 1500
"#,
        );

        let config = load_config_from(file.path()).unwrap();
        assert!(config.use_real_data);
        assert_eq!(config.network_prefix, "10.0.0");
        assert_eq!(config.arp_timeout_ms, 1500);
        // Untouched keys keep their defaults.
        assert_eq!(config.retention_hours, 24);

        let monitor = config.to_monitor_config();
        assert_eq!(monitor.arp_timeout, Duration::from_millis(1500));
        assert_eq!(monitor.retention, Duration::from_secs(24 * 3_600));
    }

    #[test]
    fn invalid_values_rejected() {
        let file = write_config("snapshot_timeout_secs = 0\n");
        assert!(matches!(
            load_config_from(file.path()),
            Err(ConfigError::Validation { ref field, .. }) if field == "snapshot_timeout_secs"
        ));

        let file = write_config("network_prefix = \"192.168.300\"\n");
        assert!(matches!(
            load_config_from(file.path()),
            Err(ConfigError::Validation { ref field, .. }) if field == "network_prefix"
        ));
    }

    #[test]
    fn malformed_toml_is_a_load_error() {
        let file = write_config("use_real_data = \"definitely\"\n");
        assert!(matches!(load_config_from(file.path()), Err(ConfigError::Figment(_))));
    }

    #[test]
    fn prefix_shapes() {
        assert!(validate_prefix("192.168.1").is_ok());
        assert!(validate_prefix("10").is_ok());
        assert!(validate_prefix("").is_err());
        assert!(validate_prefix("192.168.1.0").is_err());
        assert!(validate_prefix("192..1").is_err());
    }
}
