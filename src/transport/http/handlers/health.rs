use crate::transport::http::types::{ApiResponse, AppState, MessageResponse};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use tracing::error;

#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "API banner", body = MessageResponse)
    )
)]
pub async fn root_handler() -> impl IntoResponse {
    Json(MessageResponse::new("Inventory Management API is running"))
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy (store reachable)", body = ApiResponse),
        (status = 503, description = "Service is unhealthy (store unreachable)", body = ApiResponse)
    )
)]
pub async fn healthcheck_handler(State(state): State<AppState>) -> impl IntoResponse {
    match state.service.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(ApiResponse::success(serde_json::json!({ "status": "ok" }))),
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "Store ping failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ApiResponse {
                    status: false,
                    data: Some(serde_json::json!({ "status": "unhealthy" })),
                    error: Some("Server error".to_string()),
                    source: None,
                }),
            )
                .into_response()
        }
    }
}

/// Fallback for unmatched routes.
pub async fn not_found_handler() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(ApiResponse::failure("Endpoint not found")),
    )
}
