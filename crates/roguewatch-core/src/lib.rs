//! Detection engine for rogue and look-alike Wi-Fi access points.
//!
//! The crate turns periodic wireless scans into security events:
//!
//! - [`parse`] reads the OS scan dumps into a [`ScanSnapshot`],
//! - [`Detector`] compares a snapshot and the live connection against the
//!   trusted [`Baseline`],
//! - [`Monitor`] owns the baseline and drives detection on a schedule,
//!   persisting it through a [`BaselineStore`] and handing alerts to a
//!   [`Notifier`].
//!
//! Front ends construct a [`Monitor`] and either run a single cycle or
//! [`spawn`](Monitor::spawn) it and talk to it through a [`MonitorHandle`].

pub mod config;
pub mod detect;
pub mod error;
pub mod model;
pub mod monitor;
pub mod notify;
pub mod parse;
pub mod similarity;
pub mod source;
pub mod store;
pub mod suppress;

// ── Primary re-exports ───────────────────────────────────────────────

pub use config::MonitorConfig;
pub use detect::{Detection, Detector, learn_baseline};
pub use error::CoreError;
pub use monitor::{CycleReport, Monitor, MonitorCommand, MonitorHandle, MonitorState, MonitorStatus};
pub use notify::{LogNotifier, Notifier, spawn_notifier};
pub use parse::{parse_connection, parse_scan};
pub use similarity::{DEFAULT_SIMILARITY_THRESHOLD, similarity};
pub use source::{NetshSource, ReplaySource, ScanSource};
pub use store::BaselineStore;
pub use suppress::AlertSuppressor;

// ── Model re-exports ─────────────────────────────────────────────────

pub use model::{
    Alert, ApObservation, Baseline, DetectionEvent, MacAddress, ScanSnapshot, Sighting, normalize,
};
