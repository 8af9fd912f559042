//! Inventory: quantity guard rails, optimistic cached-stock updates, and
//! the backend service.
//!
//! Stock quantities in the cache are mutated only from client-known request
//! payloads after the server confirms a transfer or consumption; there is
//! no rollback path because nothing is written before success.

pub mod error;
pub mod optimistic;
pub mod service;
pub mod types;
pub mod validate;

pub use error::{InventoryError, InventoryResult};
pub use optimistic::{apply_quantity_decrement, merge_purchase_orders, restock_suggestions};
pub use service::InventoryService;
pub use types::{Part, PartUsage, PurchaseOrder, PurchaseOrderItem, RestockSuggestion, StockTransferRequest};
pub use validate::{normalize_quantity, validate_consumption_quantity, validate_transfer_quantity};
