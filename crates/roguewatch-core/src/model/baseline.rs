// ── Trusted baseline ──

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::mac::MacAddress;

/// The trusted SSID and the radios known to legitimately serve it.
///
/// An unconfigured baseline has no SSID; detection is a no-op until one is
/// learned. The monitor owns the only live instance and hands out clones.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Baseline {
    pub ssid: Option<String>,
    pub bssids: BTreeSet<MacAddress>,
}

impl Baseline {
    pub fn new(ssid: impl Into<String>, bssids: impl IntoIterator<Item = MacAddress>) -> Self {
        Self {
            ssid: Some(ssid.into()),
            bssids: bssids.into_iter().collect(),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.ssid.is_some()
    }

    pub fn trusted_ssid(&self) -> Option<&str> {
        self.ssid.as_deref()
    }

    pub fn contains(&self, bssid: &MacAddress) -> bool {
        self.bssids.contains(bssid)
    }

    /// Trust an additional radio. Returns `false` if it was already trusted.
    pub fn trust(&mut self, bssid: MacAddress) -> bool {
        self.bssids.insert(bssid)
    }
}
