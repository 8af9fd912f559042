use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Estimate lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EstimateStatus {
    Draft,
    PendingCustomerApproval,
    Approved,
    Rejected,
}

/// A line item being composed in the estimate builder. Cost is derived,
/// never entered directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EstimateItemDraft {
    Labor {
        description: String,
        hours: f64,
        rate: f64,
    },
    Part {
        description: String,
        unit_price: f64,
        quantity: f64,
        #[serde(default)]
        part_number: Option<String>,
    },
}

/// Wire form of a line item, as the backend stores it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimateItem {
    pub description: String,
    pub cost: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub part_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qty: Option<i64>,
}

/// Totals derived from a list of drafts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EstimateTotals {
    pub labor_total: f64,
    pub parts_total: f64,
    pub total: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Estimate {
    pub id: String,
    #[serde(rename = "customerId", default)]
    pub customer_id: Option<String>,
    #[serde(rename = "vehicleId", default)]
    pub vehicle_id: Option<String>,
    #[serde(default = "default_status")]
    pub status: EstimateStatus,
    #[serde(default)]
    pub total: f64,
    #[serde(default)]
    pub items: Vec<EstimateItem>,
    #[serde(rename = "expiresAt", default)]
    pub expires_at: Option<DateTime<Utc>>,
}

fn default_status() -> EstimateStatus {
    EstimateStatus::Draft
}

/// Repair order created when an approved estimate is converted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepairOrder {
    pub id: String,
    #[serde(rename = "customerId", default)]
    pub customer_id: Option<String>,
    #[serde(rename = "vehicleId", default)]
    pub vehicle_id: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}
