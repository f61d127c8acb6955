//! Parsers for the textual dumps produced by the OS wireless tooling.
//!
//! Both parsers are best-effort: lines that do not look like `key : value`
//! pairs, or whose key is not recognised, are skipped. Neither can fail.
//!
//! The scan dump groups radios under the SSID they broadcast:
//!
//! ```text
//! SSID 1 : CorpWiFi
//!     Network type            : Infrastructure
//!     BSSID 1                 : aa:bb:cc:dd:ee:01
//!          Signal             : 84%
//!     BSSID 2                 : aa:bb:cc:dd:ee:02
//! SSID 2 : Starbucks
//!     BSSID 1                 : 11:22:33:44:55:66
//! ```

use crate::model::{ApObservation, ScanSnapshot, normalize};

/// Parse a full scan dump into an SSID → BSSID-set mapping.
///
/// Hidden networks (empty SSID or the literal `NONE`) are dropped along
/// with their radios, as are BSSID lines seen before the first named SSID.
pub fn parse_scan(text: &str) -> ScanSnapshot {
    let mut snapshot = ScanSnapshot::new();
    let mut current: Option<String> = None;

    for (key, value) in text.lines().filter_map(split_kv) {
        if has_prefix_ci(key, "ssid") {
            current = is_named(value).then(|| {
                snapshot.insert_ssid(value);
                value.to_owned()
            });
            continue;
        }

        if has_prefix_ci(key, "bssid") {
            let Some(ssid) = current.as_deref() else {
                continue;
            };
            if let Some(bssid) = normalize(value) {
                snapshot.insert_bssid(ssid, bssid);
            }
        }
    }

    snapshot
}

/// Parse the "current interface" dump into the live connection, if any.
///
/// The first `SSID` key names the network; the last `BSSID` key names the
/// radio. A dump without an SSID means the host is not associated.
pub fn parse_connection(text: &str) -> Option<ApObservation> {
    let mut ssid: Option<&str> = None;
    let mut bssid: Option<&str> = None;

    for (key, value) in text.lines().filter_map(split_kv) {
        if ssid.is_none() && has_prefix_ci(key, "ssid") {
            ssid = Some(value);
        } else if has_prefix_ci(key, "bssid") {
            bssid = Some(value);
        }
    }

    let ssid = ssid.filter(|s| !s.is_empty())?;
    Some(ApObservation::connected(ssid, bssid.and_then(normalize)))
}

/// Split `key : value` on the first colon, trimming both halves.
fn split_kv(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once(':')?;
    Some((key.trim(), value.trim()))
}

fn has_prefix_ci(key: &str, prefix: &str) -> bool {
    key.get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}

fn is_named(ssid: &str) -> bool {
    !ssid.is_empty() && !ssid.eq_ignore_ascii_case("none")
}
