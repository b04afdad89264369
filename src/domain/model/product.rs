use crate::domain::error::{InventoryError, InventoryResult};
use crate::domain::model::DEFAULT_CATEGORY;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// A locally stocked product, keyed by its unique barcode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: Uuid,
    pub barcode: String,
    /// Numeric material code.
    pub material: i64,
    pub description: String,
    /// Name of the owning category (soft reference).
    pub category: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for product creation, before validation.
#[derive(Debug, Clone, Default)]
pub struct NewProduct {
    pub barcode: Option<String>,
    pub material: Option<i64>,
    pub description: Option<String>,
    pub category: Option<String>,
}

impl NewProduct {
    /// Validates the input and builds the record to insert.
    ///
    /// Barcode and description are trimmed; a blank or missing category falls back to
    /// `DEFAULT_CATEGORY`.
    pub fn into_product(self) -> InventoryResult<Product> {
        let barcode = non_blank(self.barcode)
            .ok_or_else(|| InventoryError::validation("Barcode is required"))?;
        let description = non_blank(self.description)
            .ok_or_else(|| InventoryError::validation("Description is required"))?;
        let material = self
            .material
            .ok_or_else(|| InventoryError::validation("Material must be a number"))?;
        let category = non_blank(self.category).unwrap_or_else(|| DEFAULT_CATEGORY.to_string());

        let now = Utc::now();
        Ok(Product {
            id: Uuid::new_v4(),
            barcode,
            material,
            description,
            category,
            created_at: now,
            updated_at: now,
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Product data returned by the external lookup service. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExternalProduct {
    pub barcode: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// Which data source answered a barcode query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Local,
    External,
}

/// Outcome of barcode resolution.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedProduct {
    Local(Product),
    External(ExternalProduct),
}

impl ResolvedProduct {
    pub fn source(&self) -> Source {
        match self {
            ResolvedProduct::Local(_) => Source::Local,
            ResolvedProduct::External(_) => Source::External,
        }
    }
}
