//! Human-readable magnitude strings such as `"60k"`, `"200k"`, `"1M"`.
//!
//! Ranks are expressed in thousands: `"60k"` ranks 60 and `"1M"` ranks 1000.
//! `"-"` marks an absent value and always ranks lowest.

use std::cmp::Ordering;

/// Placeholder shown for an absent magnitude.
pub const ABSENT: &str = "-";

/// Returns the numeric rank of a magnitude string.
///
/// All non-digit characters are stripped and the remaining digits are read
/// as one number, which is scaled by 1000 when the string contains `M`.
/// Strings without digits (including `"-"`) rank 0. Parsing never fails;
/// oversized values saturate at `u64::MAX`.
pub fn rank(value: &str) -> u64 {
    if value == ABSENT {
        return 0;
    }

    let digits = value
        .chars()
        .filter_map(|c| c.to_digit(10))
        .fold(0u64, |acc, d| acc.saturating_mul(10).saturating_add(d as u64));

    if value.contains('M') {
        digits.saturating_mul(1000)
    } else {
        digits
    }
}

/// Orders two magnitude strings by rank.
pub fn compare(a: &str, b: &str) -> Ordering {
    rank(a).cmp(&rank(b))
}

/// Returns true if the value denotes an absent magnitude.
pub fn is_absent(value: &str) -> bool {
    value.trim() == ABSENT
}
