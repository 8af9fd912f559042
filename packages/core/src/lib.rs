// ABOUTME: Core constants, utilities, and the shared state store for Bayline
// ABOUTME: Foundational package used by every other Bayline package

pub mod constants;
pub mod store;
pub mod utils;

// Re-export constants
pub use constants::{
    bayline_dir, DEFAULT_HTTP_TIMEOUT_SECS, SLA_AT_RISK_HOURS, SLA_LIMIT_HOURS,
    SLA_UPCOMING_WINDOW_HOURS,
};

// Re-export utilities
pub use utils::{day_key, format_hours, hours_between, non_negative, round_cents};

// Re-export the store
pub use store::{Store, Subscription};
