//! PostgreSQL-backed inventory store.

use crate::domain::error::{is_unique_violation, InventoryError, InventoryResult};
use crate::domain::model::{stored_models, Category, Product};
use crate::storage::InventoryStore;
use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

const CATEGORY_COLUMNS: &str = "id, name, sort_order, created_at, updated_at";
const PRODUCT_COLUMNS: &str = "id, barcode, material, description, category, created_at, updated_at";

/// Inventory store over a `PgPool`.
#[derive(Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Connects to `database_url` and creates the inventory tables if they are missing.
    pub async fn connect(database_url: &str, max_connections: u32) -> InventoryResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;
        Self::new_with_pool(pool).await
    }

    pub async fn new_with_pool(pool: PgPool) -> InventoryResult<Self> {
        for model in stored_models() {
            sqlx::query(model.get_create_table_sql())
                .execute(&pool)
                .await?;
            for stmt in model.get_index_sql() {
                sqlx::query(stmt).execute(&pool).await?;
            }
            debug!(table = model.table_name(), "Table ready");
        }
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl InventoryStore for PostgresStore {
    async fn ping(&self) -> InventoryResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn list_categories(&self) -> InventoryResult<Vec<Category>> {
        let sql = format!(
            "SELECT {} FROM categories ORDER BY sort_order ASC, name ASC",
            CATEGORY_COLUMNS
        );
        Ok(sqlx::query_as::<_, Category>(&sql)
            .fetch_all(&self.pool)
            .await?)
    }

    async fn find_category(&self, id: Uuid) -> InventoryResult<Option<Category>> {
        let sql = format!("SELECT {} FROM categories WHERE id = $1", CATEGORY_COLUMNS);
        Ok(sqlx::query_as::<_, Category>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn find_category_by_name(&self, name: &str) -> InventoryResult<Option<Category>> {
        let sql = format!("SELECT {} FROM categories WHERE name = $1", CATEGORY_COLUMNS);
        Ok(sqlx::query_as::<_, Category>(&sql)
            .bind(name)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn max_category_order(&self) -> InventoryResult<Option<i32>> {
        let max: Option<i32> = sqlx::query_scalar("SELECT MAX(sort_order) FROM categories")
            .fetch_one(&self.pool)
            .await?;
        Ok(max)
    }

    async fn insert_category(&self, category: &Category) -> InventoryResult<()> {
        sqlx::query(
            "INSERT INTO categories (id, name, sort_order, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(category.id)
        .bind(&category.name)
        .bind(category.order)
        .bind(category.created_at)
        .bind(category.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                InventoryError::category_exists()
            } else {
                e.into()
            }
        })?;
        Ok(())
    }

    async fn insert_category_if_absent(&self, category: &Category) -> InventoryResult<bool> {
        let result = sqlx::query(
            "INSERT INTO categories (id, name, sort_order, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5)
             ON CONFLICT (name) DO NOTHING",
        )
        .bind(category.id)
        .bind(&category.name)
        .bind(category.order)
        .bind(category.created_at)
        .bind(category.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() == 1)
    }

    async fn update_category(&self, category: &Category) -> InventoryResult<bool> {
        let result = sqlx::query("UPDATE categories SET name = $2, updated_at = $3 WHERE id = $1")
            .bind(category.id)
            .bind(&category.name)
            .bind(category.updated_at)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    InventoryError::category_name_taken()
                } else {
                    e.into()
                }
            })?;
        Ok(result.rows_affected() == 1)
    }

    async fn delete_category_cascade(
        &self,
        category: &Category,
        fallback: &str,
    ) -> InventoryResult<u64> {
        let mut tx = self.pool.begin().await?;

        let reassigned = sqlx::query(
            "UPDATE products SET category = $2, updated_at = now() WHERE category = $1",
        )
        .bind(&category.name)
        .bind(fallback)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(category.id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(reassigned)
    }

    async fn count_categories(&self) -> InventoryResult<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM categories")
            .fetch_one(&self.pool)
            .await?;
        Ok(count as u64)
    }

    async fn list_products(&self, category: Option<&str>) -> InventoryResult<Vec<Product>> {
        let products = match category {
            Some(name) => {
                let sql = format!(
                    "SELECT {} FROM products WHERE category = $1 ORDER BY created_at DESC",
                    PRODUCT_COLUMNS
                );
                sqlx::query_as::<_, Product>(&sql)
                    .bind(name)
                    .fetch_all(&self.pool)
                    .await?
            }
            None => {
                let sql = format!(
                    "SELECT {} FROM products ORDER BY created_at DESC",
                    PRODUCT_COLUMNS
                );
                sqlx::query_as::<_, Product>(&sql)
                    .fetch_all(&self.pool)
                    .await?
            }
        };
        Ok(products)
    }

    async fn find_product(&self, id: Uuid) -> InventoryResult<Option<Product>> {
        let sql = format!("SELECT {} FROM products WHERE id = $1", PRODUCT_COLUMNS);
        Ok(sqlx::query_as::<_, Product>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn find_product_by_barcode(&self, barcode: &str) -> InventoryResult<Option<Product>> {
        let sql = format!("SELECT {} FROM products WHERE barcode = $1", PRODUCT_COLUMNS);
        Ok(sqlx::query_as::<_, Product>(&sql)
            .bind(barcode)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn insert_product(&self, product: &Product) -> InventoryResult<()> {
        sqlx::query(
            "INSERT INTO products (id, barcode, material, description, category, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(product.id)
        .bind(&product.barcode)
        .bind(product.material)
        .bind(&product.description)
        .bind(&product.category)
        .bind(product.created_at)
        .bind(product.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                InventoryError::barcode_exists()
            } else {
                e.into()
            }
        })?;
        Ok(())
    }

    async fn update_product(&self, product: &Product) -> InventoryResult<bool> {
        let result = sqlx::query("UPDATE products SET category = $2, updated_at = $3 WHERE id = $1")
            .bind(product.id)
            .bind(&product.category)
            .bind(product.updated_at)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() == 1)
    }

    async fn delete_product(&self, id: Uuid) -> InventoryResult<bool> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() == 1)
    }

    async fn count_products(&self) -> InventoryResult<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;
        Ok(count as u64)
    }
}
