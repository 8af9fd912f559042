//! Warranty claims: first-response SLA tracking, comment-thread merging,
//! status transition rules, and the backend service.

pub mod service;
pub mod sla;
pub mod thread;
pub mod types;

pub use service::{ClaimListFilter, WarrantyService};
pub use sla::{compute_sla_badge, sla_summary};
pub use thread::{merge_claim_comments, next_claim_status};
pub use types::{ClaimComment, ClaimStatus, SlaBadge, SlaSummary, Tone, WarrantyClaim};
