//! SLA math for warranty claims: the per-claim badge and the dashboard
//! roll-up, both against the 48-hour first-response limit.

use bayline_core::{
    format_hours, hours_between, SLA_AT_RISK_HOURS, SLA_LIMIT_HOURS, SLA_UPCOMING_WINDOW_HOURS,
};
use chrono::{DateTime, Utc};

use crate::types::{ClaimStatus, SlaBadge, SlaSummary, Tone, WarrantyClaim};

/// Badge describing where a claim stands against the first-response SLA,
/// evaluated at `reference`. Claims with no creation timestamp get none.
pub fn compute_sla_badge(claim: &WarrantyClaim, reference: DateTime<Utc>) -> Option<SlaBadge> {
    let created_at = claim.created_at?;

    if let Some(first_response_at) = claim.first_response_at {
        let diff = hours_between(created_at, first_response_at);
        if diff > SLA_LIMIT_HOURS {
            return Some(SlaBadge {
                label: format!("First response after SLA ({}h)", format_hours(diff)),
                tone: Tone::Destructive,
            });
        }
        if diff >= 0.0 {
            return Some(SlaBadge {
                label: format!("Responded in {}h", format_hours(diff)),
                tone: Tone::Success,
            });
        }
        // Response timestamp before creation; treat as unanswered.
    }

    let open_hours = hours_between(created_at, reference);
    let badge = if open_hours > SLA_LIMIT_HOURS {
        SlaBadge {
            label: "SLA breached".to_string(),
            tone: Tone::Destructive,
        }
    } else if open_hours > SLA_AT_RISK_HOURS {
        SlaBadge {
            label: "At risk".to_string(),
            tone: Tone::Warning,
        }
    } else {
        SlaBadge {
            label: "Within SLA".to_string(),
            tone: Tone::Muted,
        }
    };
    Some(badge)
}

/// Dashboard roll-up over OPEN claims. Every open claim counts toward
/// the total, answered or not; only the unanswered ones are bucketed
/// into breached / about-to-breach.
pub fn sla_summary(claims: &[WarrantyClaim], reference: DateTime<Utc>) -> SlaSummary {
    let mut summary = SlaSummary::default();
    for claim in claims {
        if claim.status != ClaimStatus::Open {
            continue;
        }
        summary.total_open += 1;
        if claim.first_response_at.is_some() {
            continue;
        }
        let Some(created_at) = claim.created_at else {
            continue;
        };
        let open_hours = hours_between(created_at, reference);
        if open_hours > SLA_LIMIT_HOURS {
            summary.breached += 1;
        } else if SLA_LIMIT_HOURS - open_hours <= SLA_UPCOMING_WINDOW_HOURS {
            summary.upcoming += 1;
        }
    }
    summary
}
