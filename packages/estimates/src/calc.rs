//! Pure estimate math and the status transition function.

use bayline_core::non_negative;

use crate::types::{EstimateItem, EstimateItemDraft, EstimateStatus, EstimateTotals};

/// Cost of a single draft. Negative inputs clamp to zero rather than error;
/// non-finite inputs yield 0.
pub fn calculate_draft_cost(item: &EstimateItemDraft) -> f64 {
    match item {
        EstimateItemDraft::Labor { hours, rate, .. } => {
            non_negative(*hours) * non_negative(*rate)
        }
        EstimateItemDraft::Part {
            unit_price,
            quantity,
            ..
        } => non_negative(*unit_price) * non_negative(*quantity),
    }
}

/// Fold a list of drafts into labor/parts/grand totals. Order-independent;
/// `total` is always `labor_total + parts_total`.
pub fn calculate_estimate_totals(items: &[EstimateItemDraft]) -> EstimateTotals {
    let mut labor_total = 0.0;
    let mut parts_total = 0.0;
    for item in items {
        let cost = calculate_draft_cost(item);
        match item {
            EstimateItemDraft::Labor { .. } => labor_total += cost,
            EstimateItemDraft::Part { .. } => parts_total += cost,
        }
    }
    EstimateTotals {
        labor_total,
        parts_total,
        total: labor_total + parts_total,
    }
}

/// Map a draft to its wire form. A part draft with a blank part number
/// omits `part_id` entirely.
pub fn draft_to_estimate_item(item: &EstimateItemDraft) -> EstimateItem {
    let cost = calculate_draft_cost(item);
    match item {
        EstimateItemDraft::Labor { description, .. } => EstimateItem {
            description: description.clone(),
            cost,
            part_id: None,
            qty: None,
        },
        EstimateItemDraft::Part {
            description,
            quantity,
            part_number,
            ..
        } => {
            let part_id = part_number
                .as_deref()
                .map(str::trim)
                .filter(|trimmed| !trimmed.is_empty())
                .map(str::to_string);
            EstimateItem {
                description: description.clone(),
                cost,
                part_id,
                qty: Some(non_negative(*quantity) as i64),
            }
        }
    }
}

/// Status transition. Total over all (state, action) pairs: the recognized
/// actions move to their target from any state, anything else returns the
/// current status unchanged.
pub fn transition_estimate_status(current: EstimateStatus, action: &str) -> EstimateStatus {
    match action {
        "approve" => EstimateStatus::Approved,
        "reject" => EstimateStatus::Rejected,
        "request_customer_approval" => EstimateStatus::PendingCustomerApproval,
        "reset" => EstimateStatus::Draft,
        _ => current,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn labor(hours: f64, rate: f64) -> EstimateItemDraft {
        EstimateItemDraft::Labor {
            description: "Labor".to_string(),
            hours,
            rate,
        }
    }

    fn part(unit_price: f64, quantity: f64, part_number: Option<&str>) -> EstimateItemDraft {
        EstimateItemDraft::Part {
            description: "Part".to_string(),
            unit_price,
            quantity,
            part_number: part_number.map(str::to_string),
        }
    }

    #[test]
    fn test_labor_cost_clamps_negative_inputs() {
        assert_eq!(calculate_draft_cost(&labor(1.5, 120.0)), 180.0);
        assert_eq!(calculate_draft_cost(&labor(-2.0, 100.0)), 0.0);
        assert_eq!(calculate_draft_cost(&labor(2.0, -100.0)), 0.0);
    }

    #[test]
    fn test_part_cost() {
        assert_eq!(calculate_draft_cost(&part(45.0, 2.0, None)), 90.0);
        assert_eq!(calculate_draft_cost(&part(-45.0, 2.0, None)), 0.0);
    }

    #[test]
    fn test_non_finite_inputs_yield_zero() {
        assert_eq!(calculate_draft_cost(&labor(f64::NAN, 100.0)), 0.0);
        assert_eq!(calculate_draft_cost(&part(f64::INFINITY, 1.0, None)), 0.0);
    }

    #[test]
    fn test_totals_are_order_independent() {
        let forward = vec![labor(1.5, 120.0), part(80.0, 1.0, None)];
        let reversed = vec![part(80.0, 1.0, None), labor(1.5, 120.0)];

        let expected = EstimateTotals {
            labor_total: 180.0,
            parts_total: 80.0,
            total: 260.0,
        };
        assert_eq!(calculate_estimate_totals(&forward), expected);
        assert_eq!(calculate_estimate_totals(&reversed), expected);
    }

    #[test]
    fn test_draft_to_item_omits_blank_part_number() {
        let with_number = draft_to_estimate_item(&part(10.0, 3.0, Some(" BRK-100 ")));
        assert_eq!(with_number.part_id.as_deref(), Some("BRK-100"));
        assert_eq!(with_number.qty, Some(3));
        assert_eq!(with_number.cost, 30.0);

        let blank = draft_to_estimate_item(&part(10.0, 3.0, Some("   ")));
        assert_eq!(blank.part_id, None);

        let missing = draft_to_estimate_item(&part(10.0, 3.0, None));
        assert_eq!(missing.part_id, None);

        let from_labor = draft_to_estimate_item(&labor(2.0, 90.0));
        assert_eq!(from_labor.part_id, None);
        assert_eq!(from_labor.qty, None);
        assert_eq!(from_labor.cost, 180.0);
    }

    #[test]
    fn test_transitions_from_any_state() {
        use EstimateStatus::*;
        for current in [Draft, PendingCustomerApproval, Approved, Rejected] {
            assert_eq!(transition_estimate_status(current, "approve"), Approved);
            assert_eq!(transition_estimate_status(current, "reject"), Rejected);
            assert_eq!(
                transition_estimate_status(current, "request_customer_approval"),
                PendingCustomerApproval
            );
            assert_eq!(transition_estimate_status(current, "reset"), Draft);
        }
    }

    #[test]
    fn test_unknown_action_returns_current() {
        use EstimateStatus::*;
        for current in [Draft, PendingCustomerApproval, Approved, Rejected] {
            assert_eq!(transition_estimate_status(current, "bogus"), current);
        }
        assert_eq!(transition_estimate_status(Approved, "unknown"), Approved);
    }
}
