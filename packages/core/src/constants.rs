use std::env;
use std::path::PathBuf;

/// Warranty claims must receive a first response within this many hours.
pub const SLA_LIMIT_HOURS: f64 = 48.0;

/// Claims open longer than this (without a response) are flagged as at risk.
pub const SLA_AT_RISK_HOURS: f64 = 36.0;

/// Claims within this many hours of the SLA limit count as "upcoming" breaches.
pub const SLA_UPCOMING_WINDOW_HOURS: f64 = 6.0;

/// Default timeout for backend requests, in seconds.
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Get the path to the Bayline directory (~/.bayline)
pub fn bayline_dir() -> PathBuf {
    // First try HOME environment variable (useful for tests)
    if let Ok(home) = env::var("HOME") {
        PathBuf::from(home).join(".bayline")
    } else {
        // Fall back to dirs crate for normal usage
        dirs::home_dir()
            .expect("Unable to get home directory")
            .join(".bayline")
    }
}
