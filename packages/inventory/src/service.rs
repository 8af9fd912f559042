//! Inventory API service: cached parts lists and stock mutations.

use std::sync::Arc;

use bayline_cache::{QueryCache, QueryKey};
use bayline_client::ApiClient;

use crate::error::{InventoryError, InventoryResult};
use crate::optimistic::{apply_quantity_decrement, merge_purchase_orders};
use crate::types::{Part, PartUsage, PartUsageRequest, PurchaseOrder, StockTransferRequest};
use crate::validate::{validate_consumption_quantity, validate_transfer_quantity};

#[derive(serde::Deserialize)]
struct PurchaseOrderBatch {
    created: Vec<PurchaseOrder>,
}

/// Inventory operations against the backend, with the shared query cache
/// kept in sync after each confirmed mutation.
#[derive(Clone)]
pub struct InventoryService {
    client: ApiClient,
    cache: Arc<QueryCache>,
}

impl InventoryService {
    pub fn new(client: ApiClient, cache: Arc<QueryCache>) -> Self {
        Self { client, cache }
    }

    /// Fetch the parts list, optionally filtered by location, and commit it
    /// into the cache unless the key was cancelled while the fetch ran.
    pub async fn list_parts(&self, location: Option<&str>) -> InventoryResult<Vec<Part>> {
        let key = QueryKey::inventory_parts(location);
        let guard = self.cache.begin_fetch(&key);
        let parts: Vec<Part> = match location {
            Some(location) => {
                self.client
                    .get_with_query("/inventory/parts", &[("location", location)])
                    .await?
            }
            None => self.client.get("/inventory/parts").await?,
        };
        if let Err(e) = self.cache.commit_fetch(guard, &parts) {
            tracing::warn!("Failed to cache parts list: {}", e);
        }
        Ok(parts)
    }

    /// Availability of a part at a location, read from whatever cached list
    /// holds it. `None` when the part has never been fetched.
    fn cached_availability(&self, part_id: &str, location: &str) -> Option<i64> {
        for key in self.cache.keys_in_namespace("inventory/parts") {
            if let Some(parts) = self.cache.get::<Vec<Part>>(&key) {
                if let Some(part) = parts.iter().find(|p| {
                    p.id == part_id && p.location.as_deref().map_or(true, |l| l == location)
                }) {
                    return Some(part.quantity);
                }
            }
        }
        None
    }

    /// Move stock between locations. The quantity is validated against the
    /// cached availability at the source before anything is sent; on
    /// success the cached quantity is decremented everywhere the part
    /// appears.
    pub async fn transfer(&self, request: StockTransferRequest) -> InventoryResult<()> {
        let available = self
            .cached_availability(&request.part_id, &request.from_location)
            .unwrap_or(i64::MAX);
        if let Some(message) = validate_transfer_quantity(request.quantity as f64, available) {
            return Err(InventoryError::Validation(message));
        }

        let _: serde_json::Value = self.client.post("/inventory/stock/transfer", &request).await?;
        apply_quantity_decrement(&self.cache, &request.part_id, request.quantity);
        tracing::info!(
            part_id = %request.part_id,
            quantity = request.quantity,
            from = %request.from_location,
            to = %request.to_location,
            "Stock transfer recorded"
        );
        Ok(())
    }

    /// Record part consumption against a job, decrementing cached stock on
    /// success.
    pub async fn consume(&self, request: PartUsageRequest) -> InventoryResult<PartUsage> {
        let available = self
            .cached_availability_any_location(&request.part_id)
            .unwrap_or(i64::MAX);
        if let Some(message) = validate_consumption_quantity(request.quantity as f64, available) {
            return Err(InventoryError::Validation(message));
        }

        let usage: PartUsage = self.client.post("/inventory/consume", &request).await?;
        apply_quantity_decrement(&self.cache, &request.part_id, request.quantity);
        Ok(usage)
    }

    fn cached_availability_any_location(&self, part_id: &str) -> Option<i64> {
        for key in self.cache.keys_in_namespace("inventory/parts") {
            if let Some(parts) = self.cache.get::<Vec<Part>>(&key) {
                if let Some(part) = parts.iter().find(|p| p.id == part_id) {
                    return Some(part.quantity);
                }
            }
        }
        None
    }

    /// Ask the backend to cut purchase orders for everything below its
    /// reorder threshold. The returned batch is merged ahead of any cached
    /// orders, dropping cached entries the batch superseded.
    pub async fn generate_purchase_orders(&self) -> InventoryResult<Vec<PurchaseOrder>> {
        let batch: PurchaseOrderBatch = self
            .client
            .post_empty("/inventory/purchase-orders/create")
            .await?;

        let key = QueryKey::purchase_orders();
        let cached: Vec<PurchaseOrder> = self.cache.get(&key).unwrap_or_default();
        let merged = merge_purchase_orders(batch.created.clone(), cached);
        if let Err(e) = self.cache.set(key, &merged) {
            tracing::warn!("Failed to cache merged purchase orders: {}", e);
        }
        Ok(batch.created)
    }

    /// Fetch the purchase-order list and cache it.
    pub async fn list_purchase_orders(&self) -> InventoryResult<Vec<PurchaseOrder>> {
        let key = QueryKey::purchase_orders();
        let guard = self.cache.begin_fetch(&key);
        let orders: Vec<PurchaseOrder> =
            self.client.get("/inventory/purchase-orders").await?;
        if let Err(e) = self.cache.commit_fetch(guard, &orders) {
            tracing::warn!("Failed to cache purchase orders: {}", e);
        }
        Ok(orders)
    }
}
