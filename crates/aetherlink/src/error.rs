//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with
//! actionable help text.

use std::path::Path;

use miette::Diagnostic;
use thiserror::Error;

use aetherlink_config::ConfigError;
use aetherlink_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const CONFIG: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const HOST: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Host probing ─────────────────────────────────────────────────
    #[error("Could not probe the local network: {message}")]
    #[diagnostic(
        code(aetherlink::host_probe),
        help(
            "Real mode reads the `arp -a` neighbor table and local interfaces.\n\
             Check that `arp` is installed, or drop --real to see demo data."
        )
    )]
    HostProbe { message: String },

    // ── Resources ────────────────────────────────────────────────────
    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(aetherlink::not_found),
        help("Run: aetherlink {list_command} to see available {resource_type}s")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(aetherlink::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Configuration error in {path}")]
    #[diagnostic(
        code(aetherlink::config),
        help("Fix the file or the AETHERLINK_* environment variables, then retry.")
    )]
    Config {
        path: String,
        #[source]
        source: ConfigError,
    },

    // ── Timeout ──────────────────────────────────────────────────────
    #[error("Network collection timed out after {seconds}s")]
    #[diagnostic(
        code(aetherlink::timeout),
        help("Increase the limit with --timeout or snapshot_timeout_secs.")
    )]
    Timeout { seconds: u64 },

    // ── Internal ─────────────────────────────────────────────────────
    #[error("Internal error: {0}")]
    #[diagnostic(code(aetherlink::internal))]
    Internal(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::HostProbe { .. } => exit_code::HOST,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Validation { .. } => exit_code::USAGE,
            Self::Config { .. } => exit_code::CONFIG,
            Self::Timeout { .. } => exit_code::TIMEOUT,
            Self::Internal(_) | Self::Io(_) => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::DeviceNotFound { identifier } => CliError::NotFound {
                resource_type: "device".into(),
                identifier,
                list_command: "devices list".into(),
            },

            CoreError::Timeout { timeout_secs } => CliError::Timeout {
                seconds: timeout_secs,
            },

            CoreError::Internal(message) => CliError::Internal(message),

            other @ (CoreError::CommandFailed { .. }
            | CoreError::CommandTimeout { .. }
            | CoreError::Interfaces { .. }
            | CoreError::Counters { .. }
            | CoreError::SourcesExhausted { .. }) => CliError::HostProbe {
                message: other.to_string(),
            },
        }
    }
}

impl CliError {
    /// Wrap a config error raised while loading `path`.
    pub fn config(err: ConfigError, path: &Path) -> Self {
        match err {
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            other => CliError::Config {
                path: path.display().to_string(),
                source: other,
            },
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        Self::config(err, &aetherlink_config::config_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn core_errors_map_to_exit_codes() {
        let not_found: CliError = CoreError::DeviceNotFound {
            identifier: "aabbccddeeff".into(),
        }
        .into();
        assert_eq!(not_found.exit_code(), exit_code::NOT_FOUND);

        let exhausted: CliError = CoreError::SourcesExhausted {
            tried: "arp, interfaces".into(),
        }
        .into();
        assert_eq!(exhausted.exit_code(), exit_code::HOST);
        assert!(exhausted.to_string().contains("arp, interfaces"));

        let timeout: CliError = CoreError::Timeout { timeout_secs: 10 }.into();
        assert_eq!(timeout.exit_code(), exit_code::TIMEOUT);
    }

    #[test]
    fn config_validation_is_usage_error() {
        let err: CliError = ConfigError::Validation {
            field: "network_prefix".into(),
            reason: "bad".into(),
        }
        .into();
        assert_eq!(err.exit_code(), exit_code::USAGE);
    }
}
