// ── Hardware address identity ──
//
// Every BSSID that enters the engine goes through `normalize`. Equality,
// ordering, and set membership are defined on the six raw octets, so two
// spellings of the same radio can never land in a set twice.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Canonical 48-bit hardware address, rendered as `AA:BB:CC:DD:EE:FF`.
///
/// Ordering follows the octets, which matches the lexicographic order of
/// the rendered form (fixed width, uppercase hex).
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MacAddress([u8; 6]);

impl MacAddress {
    pub const fn from_octets(octets: [u8; 6]) -> Self {
        Self(octets)
    }

    pub const fn octets(&self) -> [u8; 6] {
        self.0
    }

    /// Parse any common spelling into a canonical address.
    ///
    /// Accepts colon-, dash-, or space-separated groups and bare hex, in any
    /// case. Anything after the first comma is link metadata and ignored.
    /// Returns `None` for empty or unparsable input.
    pub fn parse(raw: &str) -> Option<Self> {
        let head = raw.split_once(',').map_or(raw, |(head, _)| head).trim();
        if head.is_empty() {
            return None;
        }

        let groups: Vec<&str> = head
            .split([':', '-', ' '])
            .filter(|group| !group.is_empty())
            .collect();

        let mut octets = [0u8; 6];
        match groups.as_slice() {
            [bare] if bare.len() == 12 => {
                for (slot, pair) in octets.iter_mut().zip(bare.as_bytes().chunks(2)) {
                    *slot = hex_octet(pair)?;
                }
            }
            parts if parts.len() == 6 => {
                for (slot, part) in octets.iter_mut().zip(parts) {
                    if part.len() > 2 {
                        return None;
                    }
                    *slot = hex_octet(part.as_bytes())?;
                }
            }
            _ => return None,
        }
        Some(Self(octets))
    }
}

/// Normalize a raw BSSID string. `None` means "absent".
pub fn normalize(raw: &str) -> Option<MacAddress> {
    MacAddress::parse(raw)
}

fn hex_octet(digits: &[u8]) -> Option<u8> {
    digits.iter().try_fold(0u8, |acc, &digit| {
        let nibble = char::from(digit).to_digit(16)?;
        let nibble = u8::try_from(nibble).ok()?;
        Some((acc << 4) | nibble)
    })
}

impl fmt::Display for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d, e, g] = self.0;
        write!(f, "{a:02X}:{b:02X}:{c:02X}:{d:02X}:{e:02X}:{g:02X}")
    }
}

impl fmt::Debug for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MacAddress({self})")
    }
}

impl FromStr for MacAddress {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| CoreError::InvalidMac {
            input: s.to_owned(),
        })
    }
}

impl TryFrom<String> for MacAddress {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<MacAddress> for String {
    fn from(mac: MacAddress) -> Self {
        mac.to_string()
    }
}
