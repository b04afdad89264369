use crate::domain::error::InventoryError;
use crate::transport::http::handlers::common::{json_body, path_param, respond};
use crate::transport::http::types::{ApiResponse, AppState, CategoryRequest, MessageResponse};
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

#[utoipa::path(
    get,
    path = "/categories",
    responses(
        (status = 200, description = "Categories ordered by (order, name)", body = ApiResponse),
        (status = 500, description = "Internal server error", body = ApiResponse)
    )
)]
pub async fn list_categories_handler(State(state): State<AppState>) -> Response {
    match state.service.list_categories().await {
        Ok(categories) => respond(StatusCode::OK, &categories),
        Err(e) => e.into_response(),
    }
}

#[utoipa::path(
    post,
    path = "/categories",
    request_body = CategoryRequest,
    responses(
        (status = 201, description = "Category created", body = ApiResponse),
        (status = 400, description = "Missing name or name already taken", body = ApiResponse),
        (status = 500, description = "Internal server error", body = ApiResponse)
    )
)]
pub async fn create_category_handler(
    State(state): State<AppState>,
    request: Result<Json<CategoryRequest>, JsonRejection>,
) -> Response {
    let request = match json_body(request, "{\"name\": \"...\"}") {
        Ok(r) => r,
        Err(resp) => return resp,
    };

    match state.service.create_category(request.name.as_deref()).await {
        Ok(category) => respond(StatusCode::CREATED, &category),
        Err(e) => e.into_response(),
    }
}

#[utoipa::path(
    patch,
    path = "/categories/{id}",
    params(
        ("id" = String, Path, description = "Category id")
    ),
    request_body = CategoryRequest,
    responses(
        (status = 200, description = "Category renamed", body = ApiResponse),
        (status = 400, description = "Missing name, name taken, or default category", body = ApiResponse),
        (status = 404, description = "Category not found", body = ApiResponse),
        (status = 500, description = "Internal server error", body = ApiResponse)
    )
)]
pub async fn rename_category_handler(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
    request: Result<Json<CategoryRequest>, JsonRejection>,
) -> Response {
    let id = match path_param(id, InventoryError::category_not_found) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let request = match json_body(request, "{\"name\": \"...\"}") {
        Ok(r) => r,
        Err(resp) => return resp,
    };

    match state
        .service
        .rename_category(&id, request.name.as_deref())
        .await
    {
        Ok(category) => respond(StatusCode::OK, &category),
        Err(e) => e.into_response(),
    }
}

#[utoipa::path(
    delete,
    path = "/categories/{id}",
    params(
        ("id" = String, Path, description = "Category id")
    ),
    responses(
        (status = 200, description = "Category removed, its products moved to Uncategorized", body = ApiResponse),
        (status = 400, description = "Default category cannot be deleted", body = ApiResponse),
        (status = 404, description = "Category not found", body = ApiResponse),
        (status = 500, description = "Internal server error", body = ApiResponse)
    )
)]
pub async fn delete_category_handler(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
) -> Response {
    let id = match path_param(id, InventoryError::category_not_found) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    match state.service.delete_category(&id).await {
        Ok(_) => respond(
            StatusCode::OK,
            &MessageResponse::new("Category removed and products moved to Uncategorized"),
        ),
        Err(e) => e.into_response(),
    }
}
