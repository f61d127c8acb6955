// ── Observation types ──
//
// What one cycle saw: the live connection (if any) and the full scan.

use std::collections::BTreeSet;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::mac::MacAddress;

/// One SSID together with the radios seen broadcasting it.
///
/// A single SSID is commonly served by several radios (mesh, multi-band
/// APs), hence a set rather than a single address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApObservation {
    pub ssid: String,
    pub bssids: BTreeSet<MacAddress>,
}

impl ApObservation {
    pub fn new(ssid: impl Into<String>, bssids: impl IntoIterator<Item = MacAddress>) -> Self {
        Self {
            ssid: ssid.into(),
            bssids: bssids.into_iter().collect(),
        }
    }

    /// Observation of the link the host is currently associated with.
    pub fn connected(ssid: impl Into<String>, bssid: Option<MacAddress>) -> Self {
        Self::new(ssid, bssid)
    }
}

/// All SSIDs visible in one scan, in scan order.
///
/// SSID keys are kept exactly as observed (case and inner whitespace
/// preserved). Insertion order carries no meaning for detection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScanSnapshot {
    networks: IndexMap<String, BTreeSet<MacAddress>>,
}

impl ScanSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an SSID, keeping any addresses already recorded for it.
    pub fn insert_ssid(&mut self, ssid: &str) {
        if !self.networks.contains_key(ssid) {
            self.networks.insert(ssid.to_owned(), BTreeSet::new());
        }
    }

    /// Record a radio for an SSID. Returns `false` if it was already known.
    pub fn insert_bssid(&mut self, ssid: &str, bssid: MacAddress) -> bool {
        self.insert_ssid(ssid);
        self.networks
            .get_mut(ssid)
            .is_some_and(|bssids| bssids.insert(bssid))
    }

    pub fn get(&self, ssid: &str) -> Option<&BTreeSet<MacAddress>> {
        self.networks.get(ssid)
    }

    pub fn contains(&self, ssid: &str) -> bool {
        self.networks.contains_key(ssid)
    }

    /// First SSID in scan order.
    pub fn first(&self) -> Option<(&str, &BTreeSet<MacAddress>)> {
        self.networks
            .first()
            .map(|(ssid, bssids)| (ssid.as_str(), bssids))
    }

    pub fn ssids(&self) -> impl Iterator<Item = &str> {
        self.networks.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &BTreeSet<MacAddress>)> {
        self.networks
            .iter()
            .map(|(ssid, bssids)| (ssid.as_str(), bssids))
    }

    pub fn len(&self) -> usize {
        self.networks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.networks.is_empty()
    }

    /// Total number of distinct (SSID, BSSID) pairs.
    pub fn radio_count(&self) -> usize {
        self.networks.values().map(BTreeSet::len).sum()
    }
}

impl FromIterator<ApObservation> for ScanSnapshot {
    fn from_iter<I: IntoIterator<Item = ApObservation>>(iter: I) -> Self {
        let mut snapshot = Self::new();
        for obs in iter {
            snapshot.insert_ssid(&obs.ssid);
            for bssid in obs.bssids {
                snapshot.insert_bssid(&obs.ssid, bssid);
            }
        }
        snapshot
    }
}
