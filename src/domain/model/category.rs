use crate::domain::error::{InventoryError, InventoryResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use utoipa::ToSchema;
use uuid::Uuid;

/// Name of the protected fallback category.
pub const DEFAULT_CATEGORY: &str = "Uncategorized";

/// A product category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    /// Display position; ties are broken by name.
    #[sqlx(rename = "sort_order")]
    pub order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Category {
    pub fn new(name: impl Into<String>, order: i32) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            order,
            created_at: now,
            updated_at: now,
        }
    }

    /// The record every orphaned product falls back to.
    pub fn default_category() -> Self {
        Self::new(DEFAULT_CATEGORY, 0)
    }

    pub fn is_default(&self) -> bool {
        self.name == DEFAULT_CATEGORY
    }

    /// Listing order: `order` ascending, then `name` ascending.
    pub fn display_cmp(&self, other: &Self) -> Ordering {
        self.order
            .cmp(&other.order)
            .then_with(|| self.name.cmp(&other.name))
    }
}

/// Trims a requested category name, rejecting missing or blank input.
///
/// Uniqueness is checked on the trimmed value and is case-sensitive.
pub fn normalize_category_name(raw: Option<&str>) -> InventoryResult<String> {
    match raw.map(str::trim) {
        Some(name) if !name.is_empty() => Ok(name.to_string()),
        _ => Err(InventoryError::validation("Category name is required")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_trimmed() {
        assert_eq!(normalize_category_name(Some("  Shoes  ")).unwrap(), "Shoes");
    }

    #[test]
    fn blank_names_are_rejected() {
        for raw in [None, Some(""), Some("   "), Some("\t\n")] {
            let err = normalize_category_name(raw).unwrap_err();
            assert!(matches!(err, InventoryError::Validation(_)));
            assert_eq!(err.to_string(), "Category name is required");
        }
    }

    #[test]
    fn display_order_breaks_ties_by_name() {
        let mut cats = vec![
            Category::new("Toys", 2),
            Category::new("Books", 2),
            Category::default_category(),
            Category::new("Apparel", 5),
        ];
        cats.sort_by(Category::display_cmp);
        let names: Vec<_> = cats.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec![DEFAULT_CATEGORY, "Books", "Toys", "Apparel"]);
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let cat = Category::new("Shoes", 1);
        let json = serde_json::to_value(&cat).unwrap();
        assert_eq!(json["name"], "Shoes");
        assert_eq!(json["order"], 1);
        assert!(json.get("createdAt").is_some());
        assert!(json.get("created_at").is_none());
    }
}
