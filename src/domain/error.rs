//! Error taxonomy shared by the stores, the service and the HTTP layer.

use thiserror::Error;

/// Errors produced by inventory operations.
///
/// Every variant maps to exactly one HTTP status in `transport::http::error`.
#[derive(Debug, Error)]
pub enum InventoryError {
    /// Bad input shape (missing field, blank name, non-numeric material).
    #[error("{0}")]
    Validation(String),

    /// Uniqueness violation on category name or product barcode.
    #[error("{0}")]
    Conflict(String),

    /// Operation attempted on the protected default category.
    #[error("{0}")]
    Forbidden(String),

    /// Unknown id, barcode or category.
    #[error("{entity} not found")]
    NotFound { entity: &'static str },

    /// The external lookup service failed (network, non-JSON body, 5xx).
    #[error("External lookup failed: {0}")]
    Upstream(String),

    /// Unexpected store failure.
    #[error("Internal error: {0}")]
    Internal(String),
}

pub type InventoryResult<T> = Result<T, InventoryError>;

impl InventoryError {
    pub fn validation(message: impl Into<String>) -> Self {
        InventoryError::Validation(message.into())
    }

    pub fn category_not_found() -> Self {
        InventoryError::NotFound { entity: "Category" }
    }

    pub fn product_not_found() -> Self {
        InventoryError::NotFound { entity: "Product" }
    }

    pub fn category_exists() -> Self {
        InventoryError::Conflict("Category already exists".to_string())
    }

    pub fn category_name_taken() -> Self {
        InventoryError::Conflict("Another category with this name already exists".to_string())
    }

    pub fn barcode_exists() -> Self {
        InventoryError::Conflict("Product with this barcode already exists".to_string())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, InventoryError::NotFound { .. })
    }
}

impl From<sqlx::Error> for InventoryError {
    fn from(err: sqlx::Error) -> Self {
        InventoryError::Internal(err.to_string())
    }
}

/// True when `err` is a unique-index violation reported by the database.
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db) => db.is_unique_violation(),
        _ => false,
    }
}
