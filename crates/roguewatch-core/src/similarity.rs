//! Look-alike SSID scoring.

/// Score at or above which a distinct SSID is reported as a look-alike.
pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.7;

const SUBSTRING_SCORE: f64 = 0.9;
const LENGTH_BONUS: f64 = 0.1;
const LENGTH_BONUS_MAX_DELTA: usize = 2;

/// Similarity of two SSIDs in `[0, 1]`, ignoring case and surrounding
/// whitespace.
///
/// 1. equal → `1.0`
/// 2. one contains the other → `0.9` (`CorpWiFi` vs `CorpWiFi-Guest`)
/// 3. otherwise the share of equal characters at equal positions, over the
///    longer length, plus `0.1` when the lengths differ by at most two
///    (single-character typos), capped at `1.0`.
///
/// Symmetric in its arguments. Empty input scores `0.0`.
#[allow(clippy::cast_precision_loss, clippy::as_conversions)]
pub fn similarity(a: &str, b: &str) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let a = a.trim().to_lowercase();
    let b = b.trim().to_lowercase();
    if a == b {
        return 1.0;
    }
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    if a.contains(&b) || b.contains(&a) {
        return SUBSTRING_SCORE;
    }

    let len_a = a.chars().count();
    let len_b = b.chars().count();
    let longest = len_a.max(len_b);
    let matches = a.chars().zip(b.chars()).filter(|(x, y)| x == y).count();

    let mut score = matches as f64 / longest as f64;
    if len_a.abs_diff(len_b) <= LENGTH_BONUS_MAX_DELTA {
        score += LENGTH_BONUS;
    }
    score.min(1.0)
}
