//! Comment-thread merging and the claim status transition rule.

use crate::types::{ClaimComment, ClaimStatus};

/// Merge freshly fetched comments into an existing thread. Comments are
/// deduplicated by id with the existing copy winning, and the merged list
/// is re-sorted ascending by creation time. An empty incoming batch
/// returns the existing thread unchanged.
pub fn merge_claim_comments(
    existing: Vec<ClaimComment>,
    incoming: Vec<ClaimComment>,
) -> Vec<ClaimComment> {
    if incoming.is_empty() {
        return existing;
    }

    let mut merged = existing;
    for comment in incoming {
        if !merged.iter().any(|c| c.id == comment.id) {
            merged.push(comment);
        }
    }
    merged.sort_by_key(|c| c.created_at);
    merged
}

/// Resolve a requested status change. Unknown statuses and reversals
/// between the settled states leave the claim where it is; everything
/// else, self-transitions included, goes through.
pub fn next_claim_status(current: ClaimStatus, desired: &str) -> ClaimStatus {
    let Some(desired) = ClaimStatus::parse(desired) else {
        return current;
    };
    match (current, desired) {
        (ClaimStatus::Approved, ClaimStatus::Denied) => current,
        (ClaimStatus::Denied, ClaimStatus::Approved) => current,
        _ => desired,
    }
}
