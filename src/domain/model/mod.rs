//! Domain records for the inventory: categories, products and external lookup results.

pub mod category;
pub mod product;
pub mod schema;

pub use category::{normalize_category_name, Category, DEFAULT_CATEGORY};
pub use product::{ExternalProduct, NewProduct, Product, ResolvedProduct, Source};
pub use schema::{stored_models, CategoryModel, ProductModel};

/// Contract for a record type persisted in its own SQL table.
///
/// The postgres store walks `stored_models()` at connect time and runs every
/// statement; each one must be idempotent.
pub trait StoredModel: Send + Sync {
    /// Returns the name of the database table for this model.
    fn table_name(&self) -> &str;

    /// Returns the `CREATE TABLE IF NOT EXISTS` statement for this model.
    fn get_create_table_sql(&self) -> &str;

    /// Additional `CREATE INDEX IF NOT EXISTS` statements.
    fn get_index_sql(&self) -> &[&str] {
        &[]
    }
}
