use crate::app::InventoryService;
use crate::domain::model::Source;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use utoipa::{IntoParams, ToSchema};

#[derive(Clone)]
pub struct AppState {
    pub service: InventoryService,
}

/// Uniform response envelope for every endpoint.
#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct ApiResponse {
    pub status: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Object)]
    pub data: Option<JsonValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Only set by barcode resolution.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<Source>,
}

impl ApiResponse {
    pub fn success(data: JsonValue) -> Self {
        Self {
            status: true,
            data: Some(data),
            error: None,
            source: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            status: false,
            data: None,
            error: Some(error.into()),
            source: None,
        }
    }

    pub fn with_source(mut self, source: Source) -> Self {
        self.source = Some(source);
        self
    }
}

#[derive(Deserialize, Debug, ToSchema)]
pub struct CategoryRequest {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Deserialize, Debug, ToSchema)]
pub struct CreateProductRequest {
    /// String, or a number that is stringified.
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub barcode: Option<JsonValue>,
    /// Numeric material code. Numeric strings such as `"1440"` are accepted.
    #[serde(default)]
    #[schema(value_type = Option<i64>)]
    pub material: Option<JsonValue>,
    #[serde(default)]
    pub description: Option<String>,
    /// Defaults to "Uncategorized".
    #[serde(default)]
    pub category: Option<String>,
}

#[derive(Deserialize, Debug, ToSchema)]
pub struct UpdateProductRequest {
    #[serde(default)]
    pub category: Option<String>,
}

#[derive(Deserialize, Debug, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ProductListQuery {
    /// Exact category name to filter by.
    pub category: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
