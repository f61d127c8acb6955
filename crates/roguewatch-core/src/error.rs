// ── Core error types ──
//
// Errors surfaced by the scan sources, the baseline store, and the monitor
// handle. The detection path itself is infallible: the scheduler turns
// every one of these into an empty observation or a log line.

use std::path::PathBuf;

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Acquisition errors ───────────────────────────────────────────
    #[error("Scan acquisition failed: {reason}")]
    Acquisition { reason: String },

    #[error("Scan acquisition timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    // ── Data errors ──────────────────────────────────────────────────
    #[error("Invalid hardware address: {input:?}")]
    InvalidMac { input: String },

    // ── Baseline persistence ─────────────────────────────────────────
    #[error("Baseline file {path} could not be accessed: {source}")]
    BaselineIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Monitor lifecycle ────────────────────────────────────────────
    #[error("Monitor is stopped")]
    MonitorStopped,

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Whether the error is a per-cycle acquisition problem that the next
    /// cycle is expected to retry.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Acquisition { .. } | Self::Timeout { .. })
    }
}
