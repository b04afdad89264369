pub mod client;

pub use client::LookupClient;

use crate::domain::error::InventoryResult;
use crate::domain::model::ExternalProduct;
use async_trait::async_trait;

/// Source of product data for barcodes that are not stocked locally.
#[async_trait]
pub trait ProductLookup: Send + Sync {
    /// Fails with `NotFound` when the service has no usable record for `barcode` and with
    /// `Upstream` when the service itself could not be reached or understood.
    async fn lookup(&self, barcode: &str) -> InventoryResult<ExternalProduct>;
}
