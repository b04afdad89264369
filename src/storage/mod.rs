//! Persistence for categories and products.
//!
//! `InventoryStore` is the seam between the service and the backing store. Backends
//! enforce the unique constraints on `categories.name` and `products.barcode`
//! themselves, so concurrent duplicate inserts surface as `InventoryError::Conflict`.

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PostgresStore;

use crate::domain::error::{InventoryError, InventoryResult};
use crate::domain::model::{Category, Product};
use crate::infra::config::{AppConfig, StoreBackend};
use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

/// Opens the store selected by `STORE_BACKEND`.
pub async fn connect(config: &AppConfig) -> InventoryResult<Arc<dyn InventoryStore>> {
    match config.store_backend {
        StoreBackend::Memory => Ok(Arc::new(MemoryStore::new())),
        StoreBackend::Postgres => {
            let url = config.database_url.as_deref().ok_or_else(|| {
                InventoryError::Internal("DATABASE_URL must be set".to_string())
            })?;
            let store = PostgresStore::connect(url, config.database_max_connections).await?;
            Ok(Arc::new(store))
        }
    }
}

#[async_trait]
pub trait InventoryStore: Send + Sync {
    /// Cheap connectivity check used by `/health`.
    async fn ping(&self) -> InventoryResult<()>;

    // --- categories ---

    /// All categories ordered by (`order` asc, `name` asc).
    async fn list_categories(&self) -> InventoryResult<Vec<Category>>;

    async fn find_category(&self, id: Uuid) -> InventoryResult<Option<Category>>;

    async fn find_category_by_name(&self, name: &str) -> InventoryResult<Option<Category>>;

    /// Highest `order` in use, `None` when the store holds no categories.
    async fn max_category_order(&self) -> InventoryResult<Option<i32>>;

    /// Fails with `Conflict` if the name is already taken.
    async fn insert_category(&self, category: &Category) -> InventoryResult<()>;

    /// Inserts unless a category with the same name exists. Returns whether a row was written.
    async fn insert_category_if_absent(&self, category: &Category) -> InventoryResult<bool>;

    /// Persists a renamed category. Fails with `Conflict` if the name is already taken.
    /// Returns false if the row is gone.
    async fn update_category(&self, category: &Category) -> InventoryResult<bool>;

    /// Moves every product in `category` to `fallback`, then removes `category`.
    ///
    /// Returns the number of reassigned products. The reassignment always runs first.
    async fn delete_category_cascade(
        &self,
        category: &Category,
        fallback: &str,
    ) -> InventoryResult<u64>;

    async fn count_categories(&self) -> InventoryResult<u64>;

    // --- products ---

    /// Products ordered by creation time descending, optionally restricted to one category.
    async fn list_products(&self, category: Option<&str>) -> InventoryResult<Vec<Product>>;

    async fn find_product(&self, id: Uuid) -> InventoryResult<Option<Product>>;

    async fn find_product_by_barcode(&self, barcode: &str) -> InventoryResult<Option<Product>>;

    /// Fails with `Conflict` if the barcode is already taken.
    async fn insert_product(&self, product: &Product) -> InventoryResult<()>;

    /// Writes the mutable fields (`category`, `updated_at`). Returns false if the row is gone.
    async fn update_product(&self, product: &Product) -> InventoryResult<bool>;

    /// Returns false if no product had this id.
    async fn delete_product(&self, id: Uuid) -> InventoryResult<bool>;

    async fn count_products(&self) -> InventoryResult<u64>;
}
