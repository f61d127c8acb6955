//! Detection engine: classify one cycle's observations against the baseline.
//!
//! The engine is a pure function of its inputs. It holds no memory of
//! earlier cycles, so a rogue radio that stays on the air is reported again
//! every cycle; de-duplication belongs to the caller (see
//! [`AlertSuppressor`](crate::suppress::AlertSuppressor)).

use tracing::{debug, info};

use crate::model::{ApObservation, Baseline, DetectionEvent, ScanSnapshot, Sighting};
use crate::similarity::{DEFAULT_SIMILARITY_THRESHOLD, similarity};

/// Outcome of one detection pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Detection {
    /// Findings in discovery order.
    pub events: Vec<DetectionEvent>,
    /// The baseline after any learning this pass performed.
    pub baseline: Baseline,
    /// Whether `baseline` differs from the input and should be persisted.
    pub changed: bool,
}

/// Stateless classifier, parameterised only by the look-alike threshold.
#[derive(Debug, Clone, PartialEq)]
pub struct Detector {
    similarity_threshold: f64,
}

impl Default for Detector {
    fn default() -> Self {
        Self::new(DEFAULT_SIMILARITY_THRESHOLD)
    }
}

impl Detector {
    pub fn new(similarity_threshold: f64) -> Self {
        Self {
            similarity_threshold,
        }
    }

    pub fn similarity_threshold(&self) -> f64 {
        self.similarity_threshold
    }

    /// Run one detection pass.
    ///
    /// With a configured baseline for trusted SSID `T`:
    ///
    /// 1. the live link on `T` through an untrusted radio is a rogue
    ///    (learned when `learn` is set, the association itself vouches for it);
    /// 2. every radio the scan shows on `T` that is still untrusted after
    ///    step 1 is a rogue (never learned);
    /// 3. every other SSID scoring at or above the threshold against `T` is
    ///    a look-alike.
    ///
    /// With no baseline, `learn` set and a live link, the baseline is
    /// initialised from the link plus the scan's radios for that SSID.
    pub fn detect(
        &self,
        connection: Option<&ApObservation>,
        scan: &ScanSnapshot,
        baseline: &Baseline,
        learn: bool,
    ) -> Detection {
        let mut events = Vec::new();
        let mut updated = baseline.clone();
        let mut changed = false;

        if let Some(trusted) = baseline.trusted_ssid() {
            // ── 1. live connection ──
            if let Some(conn) = connection.filter(|c| c.ssid == trusted) {
                for &bssid in conn.bssids.iter().filter(|b| !baseline.contains(b)) {
                    events.push(DetectionEvent::rogue(trusted, bssid, Sighting::Connection));
                    if learn && updated.trust(bssid) {
                        info!(ssid = trusted, %bssid, "trusting connected radio");
                        changed = true;
                    }
                }
            }

            // ── 2. scan radios on the trusted SSID ──
            if let Some(seen) = scan.get(trusted) {
                for &bssid in seen.iter().filter(|b| !updated.contains(b)) {
                    events.push(DetectionEvent::rogue(trusted, bssid, Sighting::Scan));
                }
            }

            // ── 3. look-alike SSIDs ──
            for ssid in scan.ssids().filter(|s| *s != trusted) {
                let score = similarity(trusted, ssid);
                if score >= self.similarity_threshold {
                    events.push(DetectionEvent::similar(ssid, trusted, score));
                }
            }
        } else if learn {
            // ── 4. first-run auto-baseline ──
            if let Some(learned) = connection.map(|conn| initial_baseline(conn, scan)) {
                info!(
                    ssid = ?learned.ssid,
                    bssids = learned.bssids.len(),
                    "initialised baseline from live connection"
                );
                updated = learned;
                changed = true;
            }
        }

        debug!(events = events.len(), changed, "detection pass complete");
        Detection {
            events,
            baseline: updated,
            changed,
        }
    }
}

/// Derive a fresh baseline for an explicit "learn now" request.
///
/// Prefers the live connection; when not associated, adopts the first SSID
/// in the scan with the radios seen for it. `None` when there is nothing to
/// learn from.
pub fn learn_baseline(connection: Option<&ApObservation>, scan: &ScanSnapshot) -> Option<Baseline> {
    if let Some(conn) = connection {
        return Some(initial_baseline(conn, scan));
    }
    scan.first()
        .map(|(ssid, bssids)| Baseline::new(ssid, bssids.iter().copied()))
}

fn initial_baseline(conn: &ApObservation, scan: &ScanSnapshot) -> Baseline {
    let from_scan = scan.get(&conn.ssid).into_iter().flatten().copied();
    Baseline::new(conn.ssid.clone(), from_scan.chain(conn.bssids.iter().copied()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::{MacAddress, normalize};
    use pretty_assertions::assert_eq;

    fn mac(s: &str) -> MacAddress {
        normalize(s).unwrap()
    }

    fn scan(entries: &[(&str, &[&str])]) -> ScanSnapshot {
        entries
            .iter()
            .map(|(ssid, bssids)| ApObservation::new(*ssid, bssids.iter().map(|b| mac(b))))
            .collect()
    }

    const AA: &str = "AA:AA:AA:AA:AA:AA";
    const BB: &str = "BB:BB:BB:BB:BB:BB";
    const CC: &str = "CC:CC:CC:CC:CC:CC";

    #[test]
    fn unknown_scan_radio_is_single_rogue() {
        let baseline = Baseline::new("Corp", [mac(AA)]);
        let snapshot = scan(&[("Corp", &[AA, BB])]);

        let out = Detector::default().detect(None, &snapshot, &baseline, false);
        assert_eq!(
            out.events,
            vec![DetectionEvent::rogue("Corp", mac(BB), Sighting::Scan)]
        );
        assert!(!out.changed);
        assert_eq!(out.baseline, baseline);
    }

    #[test]
    fn look_alikes_fire_and_unrelated_do_not() {
        let baseline = Baseline::new("CorpWiFi", [mac(AA)]);
        let snapshot = scan(&[
            ("CorpWiFi", &[AA]),
            ("CorpWifi", &[BB]),
            ("CorpWiFi-Guest", &[CC]),
            ("Starbucks", &["11:22:33:44:55:66"]),
        ]);

        let out = Detector::default().detect(None, &snapshot, &baseline, false);
        let observed: Vec<&str> = out
            .events
            .iter()
            .map(|e| match e {
                DetectionEvent::SimilarSsid { observed, score, .. } => {
                    assert!(*score >= DEFAULT_SIMILARITY_THRESHOLD);
                    observed.as_str()
                }
                other => panic!("unexpected event {other:?}"),
            })
            .collect();
        assert_eq!(observed, vec!["CorpWifi", "CorpWiFi-Guest"]);
    }

    #[test]
    fn threshold_is_tunable() {
        let baseline = Baseline::new("CorpWiFi", []);
        let snapshot = scan(&[("CorpWiFi-Guest", &[])]);
        assert!((Detector::default().similarity_threshold() - DEFAULT_SIMILARITY_THRESHOLD).abs() < f64::EPSILON);
        assert_eq!(Detector::new(0.95).detect(None, &snapshot, &baseline, false).events, vec![]);
        assert_eq!(Detector::new(0.5).detect(None, &snapshot, &baseline, false).events.len(), 1);
    }

    #[test]
    fn connected_rogue_is_learned_only_in_learn_mode() {
        let baseline = Baseline::new("Corp", [mac(AA)]);
        let conn = ApObservation::connected("Corp", Some(mac(BB)));
        let empty = ScanSnapshot::new();

        let passive = Detector::default().detect(Some(&conn), &empty, &baseline, false);
        assert_eq!(
            passive.events,
            vec![DetectionEvent::rogue("Corp", mac(BB), Sighting::Connection)]
        );
        assert!(!passive.changed);

        let learning = Detector::default().detect(Some(&conn), &empty, &baseline, true);
        assert_eq!(learning.events.len(), 1);
        assert!(learning.changed);
        assert!(learning.baseline.contains(&mac(BB)));
    }

    #[test]
    fn connected_and_scanned_rogue_reports_both_sightings() {
        let baseline = Baseline::new("Corp", [mac(AA)]);
        let conn = ApObservation::connected("Corp", Some(mac(BB)));
        let snapshot = scan(&[("Corp", &[AA, BB])]);

        let out = Detector::default().detect(Some(&conn), &snapshot, &baseline, false);
        assert_eq!(
            out.events,
            vec![
                DetectionEvent::rogue("Corp", mac(BB), Sighting::Connection),
                DetectionEvent::rogue("Corp", mac(BB), Sighting::Scan),
            ]
        );
    }

    #[test]
    fn radio_learned_from_connection_is_not_a_scan_rogue() {
        let baseline = Baseline::new("Corp", [mac(AA)]);
        let conn = ApObservation::connected("Corp", Some(mac(BB)));
        let snapshot = scan(&[("Corp", &[AA, BB, CC])]);

        let out = Detector::default().detect(Some(&conn), &snapshot, &baseline, true);
        assert_eq!(
            out.events,
            vec![
                DetectionEvent::rogue("Corp", mac(BB), Sighting::Connection),
                DetectionEvent::rogue("Corp", mac(CC), Sighting::Scan),
            ]
        );
        assert!(out.changed);
        assert!(out.baseline.contains(&mac(BB)));
        assert!(!out.baseline.contains(&mac(CC)));
    }

    #[test]
    fn scan_rogues_are_never_learned() {
        let baseline = Baseline::new("Corp", [mac(AA)]);
        let snapshot = scan(&[("Corp", &[BB])]);
        let out = Detector::default().detect(None, &snapshot, &baseline, true);
        assert!(!out.changed);
        assert!(!out.baseline.contains(&mac(BB)));
    }

    #[test]
    fn connection_to_other_network_is_ignored() {
        let baseline = Baseline::new("Corp", [mac(AA)]);
        let conn = ApObservation::connected("Home", Some(mac(BB)));
        let out = Detector::default().detect(Some(&conn), &ScanSnapshot::new(), &baseline, true);
        assert!(out.events.is_empty());
        assert!(!out.changed);
    }

    #[test]
    fn learns_initial_baseline_from_connection_and_scan() {
        let conn = ApObservation::connected("Corp", Some(mac(AA)));
        let snapshot = scan(&[("Corp", &[BB, CC]), ("Guest", &["11:11:11:11:11:11"])]);

        let out = Detector::default().detect(Some(&conn), &snapshot, &Baseline::default(), true);
        assert!(out.events.is_empty());
        assert!(out.changed);
        assert_eq!(out.baseline, Baseline::new("Corp", [mac(AA), mac(BB), mac(CC)]));
    }

    #[test]
    fn initial_baseline_falls_back_to_connected_radio() {
        let conn = ApObservation::connected("Corp", Some(mac(AA)));
        let out = Detector::default().detect(Some(&conn), &ScanSnapshot::new(), &Baseline::default(), true);
        assert_eq!(out.baseline, Baseline::new("Corp", [mac(AA)]));
    }

    #[test]
    fn unconfigured_without_learning_is_silent() {
        let conn = ApObservation::connected("Corp", Some(mac(AA)));
        let snapshot = scan(&[("Corp", &[BB])]);
        let out = Detector::default().detect(Some(&conn), &snapshot, &Baseline::default(), false);
        assert!(out.events.is_empty());
        assert!(!out.changed);
        assert_eq!(out.baseline, Baseline::default());
    }

    #[test]
    fn learn_now_prefers_connection() {
        let conn = ApObservation::connected("Corp", Some(mac(AA)));
        let snapshot = scan(&[("Other", &[BB]), ("Corp", &[CC])]);
        assert_eq!(
            learn_baseline(Some(&conn), &snapshot),
            Some(Baseline::new("Corp", [mac(AA), mac(CC)]))
        );
    }

    #[test]
    fn learn_now_without_connection_takes_first_scanned() {
        let snapshot = scan(&[("Other", &[BB]), ("Corp", &[CC])]);
        assert_eq!(
            learn_baseline(None, &snapshot),
            Some(Baseline::new("Other", [mac(BB)]))
        );
        assert_eq!(learn_baseline(None, &ScanSnapshot::new()), None);
    }
}
