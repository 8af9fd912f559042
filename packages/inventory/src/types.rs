use serde::{Deserialize, Serialize};

/// A stocked part at one location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Part {
    pub id: String,
    pub sku: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub quantity: i64,
    #[serde(rename = "reorderMin", default)]
    pub reorder_min: Option<i64>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub vendor: Option<String>,
    #[serde(default)]
    pub cost: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct StockTransferRequest {
    #[serde(rename = "partId")]
    pub part_id: String,
    #[serde(rename = "fromLocation")]
    pub from_location: String,
    #[serde(rename = "toLocation")]
    pub to_location: String,
    pub quantity: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PartUsageRequest {
    #[serde(rename = "jobId")]
    pub job_id: String,
    #[serde(rename = "partId")]
    pub part_id: String,
    pub quantity: i64,
}

/// Recorded consumption of a part against a job.
#[derive(Debug, Clone, Deserialize)]
pub struct PartUsage {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(rename = "jobId")]
    pub job_id: String,
    #[serde(rename = "partId")]
    pub part_id: String,
    pub quantity: i64,
    #[serde(default)]
    pub cost: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseOrderItem {
    #[serde(rename = "partId")]
    pub part_id: String,
    pub quantity: i64,
    #[serde(default)]
    pub cost: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseOrder {
    pub id: String,
    pub vendor: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub items: Vec<PurchaseOrderItem>,
}

/// One row of the restock preview shown before purchase orders are cut.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestockSuggestion {
    pub sku: String,
    pub name: Option<String>,
    pub vendor: Option<String>,
    pub quantity_to_order: i64,
}
