// ── Monitor configuration ──
//
// Resolved runtime knobs for the scheduler. Front ends build this from their
// own layered config; the core never reads files or the environment.

use std::time::Duration;

use crate::similarity::DEFAULT_SIMILARITY_THRESHOLD;

#[derive(Debug, Clone, PartialEq)]
pub struct MonitorConfig {
    /// Period between detection cycles.
    pub interval: Duration,
    /// Upper bound on each acquisition call.
    pub scan_timeout: Duration,
    pub similarity_threshold: f64,
    /// Learning mode: auto-baseline on first connection and trust newly
    /// connected radios.
    pub learn: bool,
    /// Notification cool-down per finding. Zero disables suppression.
    pub alert_cooldown: Duration,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(10),
            scan_timeout: Duration::from_secs(10),
            similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
            learn: false,
            alert_cooldown: Duration::ZERO,
        }
    }
}
