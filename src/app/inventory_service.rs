//! The inventory service.
//!
//! This module sits between the HTTP layer and the store. It is responsible for:
//! 1.  Validating input and enforcing the uniqueness rules with readable errors.
//! 2.  Protecting the default "Uncategorized" category and running the
//!     reassign-then-delete cascade when any other category is removed.
//! 3.  Resolving barcodes locally first, then through the external lookup service.

use crate::domain::error::{InventoryError, InventoryResult};
use crate::domain::model::{
    normalize_category_name, Category, NewProduct, Product, ResolvedProduct, DEFAULT_CATEGORY,
};
use crate::infra::lookup::ProductLookup;
use crate::storage::InventoryStore;
use chrono::Utc;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

/// Cheap to clone; every clone shares the same store and lookup client.
#[derive(Clone)]
pub struct InventoryService {
    store: Arc<dyn InventoryStore>,
    lookup: Arc<dyn ProductLookup>,
}

/// Store statistics reported by `/health` and the preflight tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreSummary {
    pub categories: u64,
    pub products: u64,
    pub has_default_category: bool,
}

impl InventoryService {
    pub fn new(store: Arc<dyn InventoryStore>, lookup: Arc<dyn ProductLookup>) -> Self {
        Self { store, lookup }
    }

    pub async fn ping(&self) -> InventoryResult<()> {
        self.store.ping().await
    }

    /// Creates the default category if it is missing. Safe to call on every start.
    ///
    /// Returns true when the category was created by this call.
    pub async fn ensure_default_category(&self) -> InventoryResult<bool> {
        let created = self
            .store
            .insert_category_if_absent(&Category::default_category())
            .await?;
        if created {
            info!(name = DEFAULT_CATEGORY, "Default category created");
        }
        Ok(created)
    }

    pub async fn summary(&self) -> InventoryResult<StoreSummary> {
        Ok(StoreSummary {
            categories: self.store.count_categories().await?,
            products: self.store.count_products().await?,
            has_default_category: self
                .store
                .find_category_by_name(DEFAULT_CATEGORY)
                .await?
                .is_some(),
        })
    }

    // ----------------------------------------------------------------------------------
    // Categories
    // ----------------------------------------------------------------------------------

    pub async fn list_categories(&self) -> InventoryResult<Vec<Category>> {
        self.store.list_categories().await
    }

    /// Creates a category at the end of the display order.
    pub async fn create_category(&self, name: Option<&str>) -> InventoryResult<Category> {
        let name = normalize_category_name(name)?;

        if self.store.find_category_by_name(&name).await?.is_some() {
            return Err(InventoryError::category_exists());
        }

        let order = match self.store.max_category_order().await? {
            Some(max) => max.saturating_add(1),
            None => 1,
        };
        let category = Category::new(name, order);
        self.store.insert_category(&category).await?;

        info!(id = %category.id, name = %category.name, order, "Category created");
        Ok(category)
    }

    pub async fn rename_category(&self, id: &str, name: Option<&str>) -> InventoryResult<Category> {
        let name = normalize_category_name(name)?;
        let mut category = self.category_by_id(id).await?;

        if category.is_default() {
            return Err(InventoryError::Forbidden(
                "Cannot update the default Uncategorized category".to_string(),
            ));
        }

        if let Some(other) = self.store.find_category_by_name(&name).await? {
            if other.id != category.id {
                return Err(InventoryError::category_name_taken());
            }
        }

        let previous = std::mem::replace(&mut category.name, name);
        category.updated_at = Utc::now();
        if !self.store.update_category(&category).await? {
            return Err(InventoryError::category_not_found());
        }

        // Products keep pointing at `previous`; only delete cascades.
        info!(id = %category.id, from = %previous, to = %category.name, "Category renamed");
        Ok(category)
    }

    /// Deletes a category after moving its products to the default category.
    pub async fn delete_category(&self, id: &str) -> InventoryResult<u64> {
        let category = self.category_by_id(id).await?;

        if category.is_default() {
            return Err(InventoryError::Forbidden(
                "Cannot delete the default Uncategorized category".to_string(),
            ));
        }

        let reassigned = self
            .store
            .delete_category_cascade(&category, DEFAULT_CATEGORY)
            .await?;

        info!(
            id = %category.id,
            name = %category.name,
            reassigned,
            "Category removed and products moved to {}",
            DEFAULT_CATEGORY
        );
        Ok(reassigned)
    }

    async fn category_by_id(&self, id: &str) -> InventoryResult<Category> {
        let id = parse_id(id).ok_or_else(InventoryError::category_not_found)?;
        self.store
            .find_category(id)
            .await?
            .ok_or_else(InventoryError::category_not_found)
    }

    // ----------------------------------------------------------------------------------
    // Products
    // ----------------------------------------------------------------------------------

    /// Lists products, newest first. A blank filter means no filter.
    pub async fn list_products(&self, category: Option<&str>) -> InventoryResult<Vec<Product>> {
        let filter = category.filter(|c| !c.is_empty());
        self.store.list_products(filter).await
    }

    pub async fn get_product(&self, id: &str) -> InventoryResult<Product> {
        let id = parse_id(id).ok_or_else(InventoryError::product_not_found)?;
        self.store
            .find_product(id)
            .await?
            .ok_or_else(InventoryError::product_not_found)
    }

    pub async fn get_product_by_barcode(&self, barcode: &str) -> InventoryResult<Product> {
        self.store
            .find_product_by_barcode(barcode)
            .await?
            .ok_or_else(InventoryError::product_not_found)
    }

    pub async fn create_product(&self, input: NewProduct) -> InventoryResult<Product> {
        let product = input.into_product()?;

        if self
            .store
            .find_product_by_barcode(&product.barcode)
            .await?
            .is_some()
        {
            return Err(InventoryError::barcode_exists());
        }
        self.store.insert_product(&product).await?;

        info!(
            id = %product.id,
            barcode = %product.barcode,
            category = %product.category,
            "Product created"
        );
        Ok(product)
    }

    /// Reassigns a product's category. Blank or missing input leaves the record as is.
    pub async fn update_product(&self, id: &str, category: Option<&str>) -> InventoryResult<Product> {
        let mut product = self.get_product(id).await?;

        if let Some(category) = category.map(str::trim).filter(|c| !c.is_empty()) {
            product.category = category.to_string();
        }
        product.updated_at = Utc::now();

        if !self.store.update_product(&product).await? {
            return Err(InventoryError::product_not_found());
        }
        Ok(product)
    }

    pub async fn delete_product(&self, id: &str) -> InventoryResult<()> {
        let id = parse_id(id).ok_or_else(InventoryError::product_not_found)?;
        if !self.store.delete_product(id).await? {
            return Err(InventoryError::product_not_found());
        }
        info!(%id, "Product removed");
        Ok(())
    }

    /// Finds a product by barcode, locally first and then through the lookup service.
    ///
    /// External results are returned as-is and never written to the store. A failing
    /// lookup service is reported as "not found".
    pub async fn resolve_barcode(&self, barcode: &str) -> InventoryResult<ResolvedProduct> {
        if let Some(product) = self.store.find_product_by_barcode(barcode).await? {
            return Ok(ResolvedProduct::Local(product));
        }

        match self.lookup.lookup(barcode).await {
            Ok(external) => Ok(ResolvedProduct::External(external)),
            Err(InventoryError::Upstream(reason)) => {
                warn!(%barcode, %reason, "External lookup failed");
                Err(InventoryError::product_not_found())
            }
            Err(e) => {
                if e.is_not_found() {
                    info!(%barcode, "Barcode unknown locally and externally");
                }
                Err(e)
            }
        }
    }
}

fn parse_id(raw: &str) -> Option<Uuid> {
    Uuid::parse_str(raw.trim()).ok()
}
