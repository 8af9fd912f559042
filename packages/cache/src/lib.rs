//! Bayline query cache
//!
//! Short-lived, keyed storage for data fetched from the backend. Views read
//! from the cache; mutations patch it optimistically and reconcile or roll
//! back based on request outcome. Entries are grouped by namespace so a
//! mutation can visit every cached variant of a list (filtered calendar
//! views, per-location part lists) in one pass.

pub mod cache;
pub mod error;
pub mod key;

pub use cache::{CacheEvent, FetchGuard, QueryCache};
pub use error::{CacheError, CacheResult};
pub use key::QueryKey;
