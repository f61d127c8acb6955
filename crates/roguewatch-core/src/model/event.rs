// ── Detection event types ──

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use super::mac::MacAddress;

/// Where a rogue radio was spotted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Sighting {
    /// The host is associated with it right now.
    Connection,
    /// It answered the last scan.
    Scan,
}

/// A single security finding from one detection cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[non_exhaustive]
pub enum DetectionEvent {
    /// A radio broadcasting the trusted SSID that is not in the baseline.
    RogueBssid {
        ssid: String,
        bssid: MacAddress,
        source: Sighting,
    },
    /// A different SSID that looks like the trusted one.
    SimilarSsid {
        observed: String,
        baseline: String,
        score: f64,
    },
}

/// Rendered, human-facing form of an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub title: String,
    pub message: String,
}

impl DetectionEvent {
    pub fn rogue(ssid: impl Into<String>, bssid: MacAddress, source: Sighting) -> Self {
        Self::RogueBssid {
            ssid: ssid.into(),
            bssid,
            source,
        }
    }

    pub fn similar(observed: impl Into<String>, baseline: impl Into<String>, score: f64) -> Self {
        Self::SimilarSsid {
            observed: observed.into(),
            baseline: baseline.into(),
            score,
        }
    }

    /// Short machine-friendly kind name.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::RogueBssid { .. } => "rogue_bssid",
            Self::SimilarSsid { .. } => "similar_ssid",
        }
    }

    /// Stable identity used to recognise the same finding across cycles.
    ///
    /// The score of a look-alike SSID is not part of the identity.
    pub fn identity(&self) -> String {
        match self {
            Self::RogueBssid { ssid, bssid, .. } => format!("rogue:{ssid}:{bssid}"),
            Self::SimilarSsid {
                observed, baseline, ..
            } => format!("similar:{baseline}:{observed}"),
        }
    }

    pub fn alert(&self) -> Alert {
        match self {
            Self::RogueBssid {
                ssid,
                bssid,
                source: Sighting::Connection,
            } => Alert {
                title: "Rogue AP detected".into(),
                message: format!("SSID {ssid} changed BSSID to {bssid}"),
            },
            Self::RogueBssid {
                ssid,
                bssid,
                source: Sighting::Scan,
            } => Alert {
                title: "Rogue AP detected".into(),
                message: format!("Found unknown AP: SSID {ssid} with BSSID {bssid}"),
            },
            Self::SimilarSsid {
                observed, baseline, ..
            } => Alert {
                title: "Similar SSID detected".into(),
                message: format!("Found similar SSID: '{observed}' (similar to '{baseline}')"),
            },
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::mac::normalize;

    #[test]
    fn rogue_alert_wording_depends_on_sighting() {
        let bssid = normalize("bb:bb:bb:bb:bb:bb").unwrap();
        let live = DetectionEvent::rogue("Corp", bssid, Sighting::Connection).alert();
        let scan = DetectionEvent::rogue("Corp", bssid, Sighting::Scan).alert();
        assert_eq!(live.title, "Rogue AP detected");
        assert_eq!(live.message, "SSID Corp changed BSSID to BB:BB:BB:BB:BB:BB");
        assert_eq!(
            scan.message,
            "Found unknown AP: SSID Corp with BSSID BB:BB:BB:BB:BB:BB"
        );
    }

    #[test]
    fn identity_ignores_score_and_sighting() {
        let bssid = normalize("bb:bb:bb:bb:bb:bb").unwrap();
        assert_eq!(
            DetectionEvent::rogue("Corp", bssid, Sighting::Connection).identity(),
            DetectionEvent::rogue("Corp", bssid, Sighting::Scan).identity(),
        );
        assert_eq!(
            DetectionEvent::similar("Corp1", "Corp", 0.8).identity(),
            DetectionEvent::similar("Corp1", "Corp", 0.9).identity(),
        );
    }

    #[test]
    fn serializes_with_kind_tag() {
        let event = DetectionEvent::similar("CorpWifi", "CorpWiFi", 1.0);
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["kind"], "similar_ssid");
        assert_eq!(json["observed"], "CorpWifi");
    }
}
