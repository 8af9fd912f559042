//! Estimates API service.

use bayline_client::{ApiClient, ApiResult};
use serde::{Deserialize, Serialize};

use crate::calc::draft_to_estimate_item;
use crate::types::{Estimate, EstimateItem, EstimateItemDraft, RepairOrder};

#[derive(Debug, Serialize)]
struct EstimateCreateRequest {
    vehicle_id: String,
    items: Vec<EstimateItem>,
}

#[derive(Debug, Deserialize)]
pub struct EstimateStatusResponse {
    pub message: String,
    pub estimate: Estimate,
}

#[derive(Debug, Deserialize)]
pub struct EstimateConvertResponse {
    pub message: String,
    pub repair_order: RepairOrder,
}

#[derive(Debug, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Estimate operations over the shared client.
#[derive(Clone)]
pub struct EstimatesService {
    client: ApiClient,
}

impl EstimatesService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Create an estimate from drafts. The server stores the summed total.
    pub async fn create(
        &self,
        vehicle_id: &str,
        items: &[EstimateItemDraft],
    ) -> ApiResult<Estimate> {
        let body = EstimateCreateRequest {
            vehicle_id: vehicle_id.to_string(),
            items: items.iter().map(draft_to_estimate_item).collect(),
        };
        tracing::info!("Creating estimate with {} items", body.items.len());
        self.client.post("/estimates", &body).await
    }

    pub async fn get(&self, estimate_id: &str) -> ApiResult<Estimate> {
        self.client
            .get(&format!("/estimates/{}", estimate_id))
            .await
    }

    /// Append a draft to an existing estimate; the server bumps the stored
    /// total by the item cost.
    pub async fn add_item(
        &self,
        estimate_id: &str,
        item: &EstimateItemDraft,
    ) -> ApiResult<EstimateItem> {
        let wire_item = draft_to_estimate_item(item);
        self.client
            .post(&format!("/estimates/{}/items", estimate_id), &wire_item)
            .await
    }

    /// Ask the server to move the estimate to a new status.
    pub async fn update_status(
        &self,
        estimate_id: &str,
        status: &str,
    ) -> ApiResult<EstimateStatusResponse> {
        self.client
            .put_with_query(
                &format!("/estimates/{}/status", estimate_id),
                &[("status", status)],
            )
            .await
    }

    /// Duplicate an estimate into a fresh DRAFT with copied items.
    pub async fn duplicate(&self, estimate_id: &str) -> ApiResult<EstimateStatusResponse> {
        self.client
            .post_empty(&format!("/estimates/{}/duplicate", estimate_id))
            .await
    }

    /// Convert an approved estimate into a repair order.
    pub async fn convert(&self, estimate_id: &str) -> ApiResult<EstimateConvertResponse> {
        self.client
            .post_empty(&format!("/estimates/{}/convert", estimate_id))
            .await
    }

    pub async fn set_expiry(&self, estimate_id: &str, days: u32) -> ApiResult<MessageResponse> {
        self.client
            .put_with_query(
                &format!("/estimates/{}/set-expiry", estimate_id),
                &[("days", days)],
            )
            .await
    }
}
