//! Maps `InventoryError` onto HTTP status codes and the response envelope.

use crate::domain::error::InventoryError;
use crate::transport::http::types::ApiResponse;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::error;

pub fn status_for(err: &InventoryError) -> StatusCode {
    match err {
        InventoryError::Validation(_)
        | InventoryError::Conflict(_)
        | InventoryError::Forbidden(_) => StatusCode::BAD_REQUEST,
        InventoryError::NotFound { .. } => StatusCode::NOT_FOUND,
        InventoryError::Upstream(_) | InventoryError::Internal(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl IntoResponse for InventoryError {
    fn into_response(self) -> Response {
        let status = status_for(&self);
        // Store and upstream details stay in the log.
        let message = match &self {
            InventoryError::Internal(detail) | InventoryError::Upstream(detail) => {
                error!(error = %detail, "Request failed");
                "Server error".to_string()
            }
            other => other.to_string(),
        };
        (status, Json(ApiResponse::failure(message))).into_response()
    }
}
