//! Estimates: line-item cost math, status transitions, and the backend
//! service.
//!
//! Costs are always derived from drafts, never stored independently; the
//! status transition function is total over all (state, action) pairs and
//! performs no server call itself.

pub mod calc;
pub mod service;
pub mod types;

pub use calc::{
    calculate_draft_cost, calculate_estimate_totals, draft_to_estimate_item,
    transition_estimate_status,
};
pub use service::EstimatesService;
pub use types::{Estimate, EstimateItem, EstimateItemDraft, EstimateStatus, EstimateTotals};
