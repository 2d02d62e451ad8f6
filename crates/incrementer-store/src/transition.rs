//! The increment-with-wraparound rule.

use crate::Settings;

/// Compute the counter value that follows `value` under the given settings.
///
/// The maximum is inclusive. A sum past the maximum, including one that does
/// not fit into `i64`, resets the counter to zero.
pub fn next_value(value: i64, settings: Settings) -> i64 {
    match value.checked_add(settings.step) {
        Some(next) if next <= settings.maximum => next,
        _ => 0,
    }
}
