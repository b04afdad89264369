use super::StoredModel;

/// Table definition for `Category`.
pub struct CategoryModel;

impl StoredModel for CategoryModel {
    fn table_name(&self) -> &str {
        "categories"
    }

    // `order` is reserved in SQL, hence `sort_order`.
    fn get_create_table_sql(&self) -> &str {
        "CREATE TABLE IF NOT EXISTS categories (
            id UUID PRIMARY KEY,
            name TEXT NOT NULL UNIQUE,
            sort_order INTEGER NOT NULL DEFAULT 0,
            created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
        )"
    }
}

/// Table definition for `Product`.
///
/// `category` is a soft reference to `categories.name` with no foreign key. Only the
/// cascade on category delete keeps the two in line.
pub struct ProductModel;

impl StoredModel for ProductModel {
    fn table_name(&self) -> &str {
        "products"
    }

    fn get_create_table_sql(&self) -> &str {
        "CREATE TABLE IF NOT EXISTS products (
            id UUID PRIMARY KEY,
            barcode TEXT NOT NULL UNIQUE,
            material BIGINT NOT NULL,
            description TEXT NOT NULL,
            category TEXT NOT NULL DEFAULT 'Uncategorized',
            created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
        )"
    }

    fn get_index_sql(&self) -> &[&str] {
        &[
            "CREATE INDEX IF NOT EXISTS products_category_idx ON products (category)",
            "CREATE INDEX IF NOT EXISTS products_created_at_idx ON products (created_at DESC)",
        ]
    }
}

/// Every stored model, in creation order.
pub fn stored_models() -> Vec<Box<dyn StoredModel>> {
    vec![Box::new(CategoryModel), Box::new(ProductModel)]
}
