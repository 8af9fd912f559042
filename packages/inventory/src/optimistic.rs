//! Optimistic cache patches applied after confirmed stock mutations.

use bayline_cache::QueryCache;

use crate::types::{Part, PurchaseOrder, RestockSuggestion};

/// Decrement the matching part's quantity (floored at zero) in every cached
/// part list, regardless of which filtered variant holds it. Runs after a
/// transfer or consumption succeeds, from the client-known request payload.
pub fn apply_quantity_decrement(cache: &QueryCache, part_id: &str, amount: i64) {
    cache.update_namespace::<Vec<Part>>("inventory/parts", |_, mut parts| {
        for part in &mut parts {
            if part.id == part_id {
                part.quantity = (part.quantity - amount).max(0);
            }
        }
        parts
    });
}

/// Merge freshly created purchase orders into a cached list. The new batch
/// comes first; previously cached orders survive only when their id is not
/// in the new batch.
pub fn merge_purchase_orders(
    new_batch: Vec<PurchaseOrder>,
    cached: Vec<PurchaseOrder>,
) -> Vec<PurchaseOrder> {
    let mut merged = new_batch;
    let new_ids: Vec<String> = merged.iter().map(|po| po.id.clone()).collect();
    merged.extend(
        cached
            .into_iter()
            .filter(|po| !new_ids.contains(&po.id)),
    );
    merged
}

/// Parts below their reorder threshold, with the order quantity the backend
/// would cut: restock to twice the threshold.
pub fn restock_suggestions(parts: &[Part]) -> Vec<RestockSuggestion> {
    parts
        .iter()
        .filter_map(|part| {
            let reorder_min = part.reorder_min?;
            if part.quantity < reorder_min {
                Some(RestockSuggestion {
                    sku: part.sku.clone(),
                    name: part.name.clone(),
                    vendor: part.vendor.clone(),
                    quantity_to_order: reorder_min * 2 - part.quantity,
                })
            } else {
                None
            }
        })
        .collect()
}
