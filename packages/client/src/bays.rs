//! Bay endpoints.

use serde::{Deserialize, Serialize};

use crate::client::ApiClient;
use crate::error::ApiResult;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bay {
    pub id: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(rename = "isOccupied", default)]
    pub is_occupied: bool,
}

#[derive(Debug, Deserialize)]
pub struct BayUpdateResponse {
    pub message: String,
    pub bay: Bay,
}

pub struct BaysApi<'a> {
    client: &'a ApiClient,
}

impl<'a> BaysApi<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> ApiResult<Vec<Bay>> {
        self.client.get("/bays").await
    }

    pub async fn set_occupied(&self, bay_id: &str, occupied: bool) -> ApiResult<BayUpdateResponse> {
        self.client
            .put_with_query(
                &format!("/bays/{}/status", bay_id),
                &[("isOccupied", occupied)],
            )
            .await
    }
}
