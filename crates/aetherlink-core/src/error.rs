// ── Core error types ──
//
// Errors raised inside the collection pipeline. None of these reach a
// snapshot consumer: `Monitor::build_snapshot` degrades every variant
// into a synthetic snapshot. They surface only through the lower-level
// query methods (`collect`, `device`, `stats`) used by the CLI.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Host command errors ──────────────────────────────────────────
    #[error("Command `{command}` failed: {reason}")]
    CommandFailed { command: String, reason: String },

    #[error("Command `{command}` timed out after {timeout_ms}ms")]
    CommandTimeout { command: String, timeout_ms: u64 },

    // ── Host probing errors ──────────────────────────────────────────
    #[error("Cannot enumerate network interfaces: {message}")]
    Interfaces { message: String },

    #[error("Cannot read interface counters: {message}")]
    Counters { message: String },

    // ── Discovery errors ─────────────────────────────────────────────
    #[error("All device sources failed (tried: {tried})")]
    SourcesExhausted { tried: String },

    #[error("Device not found: {identifier}")]
    DeviceNotFound { identifier: String },

    // ── Pipeline errors ──────────────────────────────────────────────
    #[error("Snapshot collection timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Whether this error came from the host rather than from our own logic.
    pub fn is_host_failure(&self) -> bool {
        matches!(
            self,
            Self::CommandFailed { .. }
                | Self::CommandTimeout { .. }
                | Self::Interfaces { .. }
                | Self::Counters { .. }
        )
    }
}

impl From<network_interface::Error> for CoreError {
    fn from(err: network_interface::Error) -> Self {
        Self::Interfaces {
            message: err.to_string(),
        }
    }
}

impl From<tokio::task::JoinError> for CoreError {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::Internal(format!("collection task aborted: {err}"))
    }
}
