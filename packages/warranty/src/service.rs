//! Warranty API service, including the multipart claim submission.

use bayline_client::{ApiClient, ApiResult};
use chrono::{DateTime, Utc};
use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};

use crate::types::{ClaimComment, WarrantyClaim};

/// Server-side list filters. All default to off, which returns every
/// claim. Serialized as snake_case query parameters.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct ClaimListFilter {
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub assigned_to_me: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub unassigned: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub awaiting_response: bool,
}

#[derive(Debug, Serialize)]
struct StatusUpdateRequest<'a> {
    status: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    resolution_notes: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct CommentRequest<'a> {
    message: &'a str,
}

/// Claim mutations come back wrapped in a `{message, claim}` envelope;
/// list and detail reads return claims bare.
#[derive(Debug, Deserialize)]
struct ClaimMutationResponse {
    message: String,
    claim: WarrantyClaim,
}

#[derive(Debug, Deserialize)]
struct CommentCreatedResponse {
    message: String,
    comment: ClaimComment,
}

/// Warranty operations over the shared client.
#[derive(Clone)]
pub struct WarrantyService {
    client: ApiClient,
}

impl WarrantyService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Submit a new claim with its attachment as a multipart form. The
    /// backend expects the `work_order_id`, `description`, and `file`
    /// fields by those names.
    pub async fn submit(
        &self,
        work_order_id: &str,
        description: &str,
        file_name: &str,
        file_bytes: Vec<u8>,
    ) -> ApiResult<WarrantyClaim> {
        let form = Form::new()
            .text("work_order_id", work_order_id.to_string())
            .text("description", description.to_string())
            .part("file", Part::bytes(file_bytes).file_name(file_name.to_string()));
        tracing::info!(work_order_id, "Submitting warranty claim");
        let response: ClaimMutationResponse =
            self.client.post_multipart("/warranty/warranty", form).await?;
        tracing::debug!("{}", response.message);
        Ok(response.claim)
    }

    pub async fn list(&self, filter: &ClaimListFilter) -> ApiResult<Vec<WarrantyClaim>> {
        self.client
            .get_with_query("/warranty/warranty", filter)
            .await
    }

    pub async fn detail(&self, claim_id: &str) -> ApiResult<WarrantyClaim> {
        self.client
            .get(&format!("/warranty/warranty/{}", claim_id))
            .await
    }

    /// Ask the server to change a claim's status, optionally attaching
    /// resolution notes. The server applies the same transition rule as
    /// [`crate::thread::next_claim_status`].
    pub async fn update_status(
        &self,
        claim_id: &str,
        status: &str,
        resolution_notes: Option<&str>,
    ) -> ApiResult<WarrantyClaim> {
        let response: ClaimMutationResponse = self
            .client
            .put(
                &format!("/warranty/warranty/{}/status", claim_id),
                &StatusUpdateRequest {
                    status,
                    resolution_notes,
                },
            )
            .await?;
        tracing::debug!("{}", response.message);
        Ok(response.claim)
    }

    pub async fn add_comment(&self, claim_id: &str, message: &str) -> ApiResult<ClaimComment> {
        let response: CommentCreatedResponse = self
            .client
            .post(
                &format!("/warranty/warranty/{}/comment", claim_id),
                &CommentRequest { message },
            )
            .await?;
        tracing::debug!("{}", response.message);
        Ok(response.comment)
    }

    /// Comments created after a point in time, for incremental thread
    /// refresh. Results feed [`crate::thread::merge_claim_comments`].
    pub async fn comments_after(
        &self,
        claim_id: &str,
        after: DateTime<Utc>,
    ) -> ApiResult<Vec<ClaimComment>> {
        self.client
            .get_with_query(
                &format!("/warranty/warranty/{}/comments/after", claim_id),
                &[("since", after.to_rfc3339())],
            )
            .await
    }
}
