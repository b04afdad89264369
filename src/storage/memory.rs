//! Process-local inventory store.
//!
//! Holds both collections behind one `RwLock`, which gives the cascade on category
//! delete the same all-or-nothing shape the postgres transaction has.

use crate::domain::error::{InventoryError, InventoryResult};
use crate::domain::model::{Category, Product};
use crate::storage::InventoryStore;
use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Default)]
struct MemoryState {
    categories: Vec<Category>,
    /// Insertion order.
    products: Vec<Product>,
}

#[derive(Clone, Default)]
pub struct MemoryStore {
    state: Arc<RwLock<MemoryState>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl InventoryStore for MemoryStore {
    async fn ping(&self) -> InventoryResult<()> {
        Ok(())
    }

    async fn list_categories(&self) -> InventoryResult<Vec<Category>> {
        let state = self.state.read().await;
        let mut categories = state.categories.clone();
        categories.sort_by(Category::display_cmp);
        Ok(categories)
    }

    async fn find_category(&self, id: Uuid) -> InventoryResult<Option<Category>> {
        let state = self.state.read().await;
        Ok(state.categories.iter().find(|c| c.id == id).cloned())
    }

    async fn find_category_by_name(&self, name: &str) -> InventoryResult<Option<Category>> {
        let state = self.state.read().await;
        Ok(state.categories.iter().find(|c| c.name == name).cloned())
    }

    async fn max_category_order(&self) -> InventoryResult<Option<i32>> {
        let state = self.state.read().await;
        Ok(state.categories.iter().map(|c| c.order).max())
    }

    async fn insert_category(&self, category: &Category) -> InventoryResult<()> {
        let mut state = self.state.write().await;
        if state.categories.iter().any(|c| c.name == category.name) {
            return Err(InventoryError::category_exists());
        }
        state.categories.push(category.clone());
        Ok(())
    }

    async fn insert_category_if_absent(&self, category: &Category) -> InventoryResult<bool> {
        let mut state = self.state.write().await;
        if state.categories.iter().any(|c| c.name == category.name) {
            return Ok(false);
        }
        state.categories.push(category.clone());
        Ok(true)
    }

    async fn update_category(&self, category: &Category) -> InventoryResult<bool> {
        let mut state = self.state.write().await;
        if state
            .categories
            .iter()
            .any(|c| c.name == category.name && c.id != category.id)
        {
            return Err(InventoryError::category_name_taken());
        }
        match state.categories.iter_mut().find(|c| c.id == category.id) {
            Some(existing) => {
                existing.name = category.name.clone();
                existing.updated_at = category.updated_at;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_category_cascade(
        &self,
        category: &Category,
        fallback: &str,
    ) -> InventoryResult<u64> {
        let mut state = self.state.write().await;
        let now = Utc::now();
        let mut reassigned = 0u64;
        for product in state.products.iter_mut().filter(|p| p.category == category.name) {
            product.category = fallback.to_string();
            product.updated_at = now;
            reassigned += 1;
        }
        state.categories.retain(|c| c.id != category.id);
        Ok(reassigned)
    }

    async fn count_categories(&self) -> InventoryResult<u64> {
        Ok(self.state.read().await.categories.len() as u64)
    }

    async fn list_products(&self, category: Option<&str>) -> InventoryResult<Vec<Product>> {
        let state = self.state.read().await;
        // Newest insert first; the stable sort keeps that for equal timestamps.
        let mut products: Vec<Product> = state
            .products
            .iter()
            .rev()
            .filter(|p| category.map_or(true, |name| p.category == name))
            .cloned()
            .collect();
        products.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(products)
    }

    async fn find_product(&self, id: Uuid) -> InventoryResult<Option<Product>> {
        let state = self.state.read().await;
        Ok(state.products.iter().find(|p| p.id == id).cloned())
    }

    async fn find_product_by_barcode(&self, barcode: &str) -> InventoryResult<Option<Product>> {
        let state = self.state.read().await;
        Ok(state.products.iter().find(|p| p.barcode == barcode).cloned())
    }

    async fn insert_product(&self, product: &Product) -> InventoryResult<()> {
        let mut state = self.state.write().await;
        if state.products.iter().any(|p| p.barcode == product.barcode) {
            return Err(InventoryError::barcode_exists());
        }
        state.products.push(product.clone());
        Ok(())
    }

    async fn update_product(&self, product: &Product) -> InventoryResult<bool> {
        let mut state = self.state.write().await;
        match state.products.iter_mut().find(|p| p.id == product.id) {
            Some(existing) => {
                existing.category = product.category.clone();
                existing.updated_at = product.updated_at;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_product(&self, id: Uuid) -> InventoryResult<bool> {
        let mut state = self.state.write().await;
        let before = state.products.len();
        state.products.retain(|p| p.id != id);
        Ok(state.products.len() != before)
    }

    async fn count_products(&self) -> InventoryResult<u64> {
        Ok(self.state.read().await.products.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{NewProduct, DEFAULT_CATEGORY};

    fn product(barcode: &str, category: &str) -> Product {
        NewProduct {
            barcode: Some(barcode.to_string()),
            material: Some(1),
            description: Some(format!("item {}", barcode)),
            category: Some(category.to_string()),
        }
        .into_product()
        .unwrap()
    }

    #[tokio::test]
    async fn duplicate_barcode_is_a_conflict() {
        let store = MemoryStore::new();
        store.insert_product(&product("123", "Shoes")).await.unwrap();
        let err = store.insert_product(&product("123", "Hats")).await.unwrap_err();
        assert!(matches!(err, InventoryError::Conflict(_)));
        assert_eq!(store.count_products().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn insert_if_absent_is_idempotent() {
        let store = MemoryStore::new();
        assert!(store
            .insert_category_if_absent(&Category::default_category())
            .await
            .unwrap());
        assert!(!store
            .insert_category_if_absent(&Category::default_category())
            .await
            .unwrap());
        assert_eq!(store.count_categories().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn cascade_only_touches_matching_products() {
        let store = MemoryStore::new();
        let shoes = Category::new("Shoes", 1);
        store.insert_category(&shoes).await.unwrap();
        store.insert_product(&product("1", "Shoes")).await.unwrap();
        store.insert_product(&product("2", "Hats")).await.unwrap();
        store.insert_product(&product("3", "Shoes")).await.unwrap();

        let moved = store
            .delete_category_cascade(&shoes, DEFAULT_CATEGORY)
            .await
            .unwrap();
        assert_eq!(moved, 2);
        assert!(store.find_category(shoes.id).await.unwrap().is_none());
        assert_eq!(
            store.list_products(Some(DEFAULT_CATEGORY)).await.unwrap().len(),
            2
        );
        assert_eq!(store.list_products(Some("Hats")).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn products_list_newest_first() {
        let store = MemoryStore::new();
        for barcode in ["a", "b", "c"] {
            store.insert_product(&product(barcode, "X")).await.unwrap();
        }
        let barcodes: Vec<_> = store
            .list_products(None)
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.barcode)
            .collect();
        assert_eq!(barcodes, vec!["c", "b", "a"]);
    }

    #[tokio::test]
    async fn update_of_a_deleted_category_reports_missing() {
        let store = MemoryStore::new();
        let mut shoes = Category::new("Shoes", 1);
        store.insert_category(&shoes).await.unwrap();
        store
            .delete_category_cascade(&shoes, DEFAULT_CATEGORY)
            .await
            .unwrap();

        shoes.name = "Boots".to_string();
        assert!(!store.update_category(&shoes).await.unwrap());
        assert!(store.find_category_by_name("Boots").await.unwrap().is_none());
    }
}
