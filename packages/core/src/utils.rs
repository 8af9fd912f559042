// ABOUTME: Shared utility functions for Bayline
// ABOUTME: Time math, money rounding, and number sanitization helpers

use chrono::{DateTime, Utc};

/// Fractional hours elapsed between two instants. Negative when `end` is
/// before `start`.
pub fn hours_between(start: DateTime<Utc>, end: DateTime<Utc>) -> f64 {
    (end - start).num_milliseconds() as f64 / 3_600_000.0
}

/// Format an hour count with one decimal place, e.g. `3.5`.
pub fn format_hours(hours: f64) -> String {
    format!("{:.1}", hours)
}

/// Calendar-day key for an instant, `yyyy-MM-dd`. Calendar cache entries are
/// bucketed by this string.
pub fn day_key(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%d").to_string()
}

/// Round a money amount to cents.
pub fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// Clamp a numeric input to a usable non-negative value. Non-finite inputs
/// (NaN, infinities) collapse to zero.
pub fn non_negative(value: f64) -> f64 {
    if value.is_finite() {
        value.max(0.0)
    } else {
        0.0
    }
}
