//! Invoices API service.

use bayline_client::{ApiClient, ApiResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{Invoice, MarginAnalytics};

#[derive(Debug, Serialize)]
struct PaymentCreateRequest {
    amount: f64,
    method: String,
}

#[derive(Debug, Deserialize)]
pub struct FinalizeResponse {
    pub message: String,
    pub status: String,
    pub finalized_at: DateTime<Utc>,
}

/// Per-invoice margin report from `GET /invoice/{id}/margin`.
#[derive(Debug, Deserialize)]
pub struct InvoiceMarginResponse {
    #[serde(rename = "invoiceId")]
    pub invoice_id: String,
    pub total_cost: f64,
    pub total_price: f64,
    pub gross_margin_percent: f64,
    pub threshold: f64,
    pub is_below_threshold: bool,
}

/// Invoice operations over the shared client.
#[derive(Clone)]
pub struct InvoicesService {
    client: ApiClient,
}

impl InvoicesService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> ApiResult<Vec<Invoice>> {
        self.client.get("/invoice").await
    }

    pub async fn get(&self, invoice_id: &str) -> ApiResult<Invoice> {
        self.client.get(&format!("/invoice/{}", invoice_id)).await
    }

    /// Record a manual payment; the server recomputes status
    /// (PAID/PARTIALLY_PAID) and returns the refreshed invoice.
    pub async fn pay(&self, invoice_id: &str, amount: f64, method: &str) -> ApiResult<Invoice> {
        let body = PaymentCreateRequest {
            amount,
            method: method.to_string(),
        };
        tracing::info!("Recording {} payment on invoice {}", method, invoice_id);
        self.client
            .post(&format!("/invoice/{}/pay", invoice_id), &body)
            .await
    }

    pub async fn finalize(&self, invoice_id: &str) -> ApiResult<FinalizeResponse> {
        self.client
            .post_empty(&format!("/invoice/{}/finalize", invoice_id))
            .await
    }

    pub async fn margin(&self, invoice_id: &str) -> ApiResult<InvoiceMarginResponse> {
        self.client
            .get(&format!("/invoice/{}/margin", invoice_id))
            .await
    }

    pub async fn margin_analytics(&self) -> ApiResult<MarginAnalytics> {
        self.client.get("/invoice/analytics/margin").await
    }

    /// Raw PDF bytes for download.
    pub async fn pdf(&self, invoice_id: &str) -> ApiResult<Vec<u8>> {
        self.client
            .get_bytes(&format!("/invoice/{}/pdf", invoice_id))
            .await
    }
}
