//! Optional per-finding alert cool-down.

use std::collections::HashMap;
use std::time::Duration;

use tokio::time::Instant;

use crate::model::DetectionEvent;

/// Drops repeat notifications for the same finding inside a time window.
///
/// Keyed by [`DetectionEvent::identity`]. A zero window admits everything,
/// which is the engine's literal every-cycle behaviour.
#[derive(Debug, Clone, Default)]
pub struct AlertSuppressor {
    window: Duration,
    last_seen: HashMap<String, Instant>,
}

impl AlertSuppressor {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            last_seen: HashMap::new(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        !self.window.is_zero()
    }

    /// Whether `event` should be forwarded at `now`. Admitting an event
    /// restarts its window.
    pub fn admit(&mut self, event: &DetectionEvent, now: Instant) -> bool {
        if !self.is_enabled() {
            return true;
        }
        let window = self.window;
        self.last_seen
            .retain(|_, seen| now.saturating_duration_since(*seen) < window);

        let key = event.identity();
        if self.last_seen.contains_key(&key) {
            return false;
        }
        self.last_seen.insert(key, now);
        true
    }

    pub fn tracked(&self) -> usize {
        self.last_seen.len()
    }
}
