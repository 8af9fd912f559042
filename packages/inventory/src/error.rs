//! Inventory error types

use bayline_client::ApiError;
use thiserror::Error;

pub type InventoryResult<T> = Result<T, InventoryError>;

#[derive(Debug, Error)]
pub enum InventoryError {
    /// Caught client-side before any request is sent.
    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Api(#[from] ApiError),
}

impl InventoryError {
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}
