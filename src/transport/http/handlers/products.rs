use crate::domain::error::InventoryError;
use crate::domain::model::{NewProduct, ResolvedProduct};
use crate::transport::http::handlers::common::{
    coerce_material, coerce_text, json_body, path_param, query_params, respond,
};
use crate::transport::http::types::{
    ApiResponse, AppState, CreateProductRequest, MessageResponse, ProductListQuery,
    UpdateProductRequest,
};
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

#[utoipa::path(
    get,
    path = "/products",
    params(ProductListQuery),
    responses(
        (status = 200, description = "Products, newest first", body = ApiResponse),
        (status = 500, description = "Internal server error", body = ApiResponse)
    )
)]
pub async fn list_products_handler(
    State(state): State<AppState>,
    query: Result<Query<ProductListQuery>, QueryRejection>,
) -> Response {
    let query = match query_params(query) {
        Ok(q) => q,
        Err(resp) => return resp,
    };
    match state.service.list_products(query.category.as_deref()).await {
        Ok(products) => respond(StatusCode::OK, &products),
        Err(e) => e.into_response(),
    }
}

#[utoipa::path(
    get,
    path = "/products/{id}",
    params(
        ("id" = String, Path, description = "Product id")
    ),
    responses(
        (status = 200, description = "Product", body = ApiResponse),
        (status = 404, description = "Product not found", body = ApiResponse),
        (status = 500, description = "Internal server error", body = ApiResponse)
    )
)]
pub async fn get_product_handler(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
) -> Response {
    let id = match path_param(id, InventoryError::product_not_found) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    match state.service.get_product(&id).await {
        Ok(product) => respond(StatusCode::OK, &product),
        Err(e) => e.into_response(),
    }
}

#[utoipa::path(
    post,
    path = "/products",
    request_body = CreateProductRequest,
    responses(
        (status = 201, description = "Product created", body = ApiResponse),
        (status = 400, description = "Invalid input or duplicate barcode", body = ApiResponse),
        (status = 500, description = "Internal server error", body = ApiResponse)
    )
)]
pub async fn create_product_handler(
    State(state): State<AppState>,
    request: Result<Json<CreateProductRequest>, JsonRejection>,
) -> Response {
    let request = match json_body(
        request,
        "{\"barcode\": \"...\", \"material\": 0, \"description\": \"...\", \"category\": \"...\"}",
    ) {
        Ok(r) => r,
        Err(resp) => return resp,
    };

    let material = match coerce_material(request.material.as_ref()) {
        Ok(m) => m,
        Err(e) => return e.into_response(),
    };
    let input = NewProduct {
        barcode: request.barcode.as_ref().and_then(coerce_text),
        material,
        description: request.description,
        category: request.category,
    };

    match state.service.create_product(input).await {
        Ok(product) => respond(StatusCode::CREATED, &product),
        Err(e) => e.into_response(),
    }
}

#[utoipa::path(
    patch,
    path = "/products/{id}",
    params(
        ("id" = String, Path, description = "Product id")
    ),
    request_body = UpdateProductRequest,
    responses(
        (status = 200, description = "Product updated", body = ApiResponse),
        (status = 404, description = "Product not found", body = ApiResponse),
        (status = 500, description = "Internal server error", body = ApiResponse)
    )
)]
pub async fn update_product_handler(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
    request: Result<Json<UpdateProductRequest>, JsonRejection>,
) -> Response {
    let id = match path_param(id, InventoryError::product_not_found) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let request = match json_body(request, "{\"category\": \"...\"}") {
        Ok(r) => r,
        Err(resp) => return resp,
    };

    match state
        .service
        .update_product(&id, request.category.as_deref())
        .await
    {
        Ok(product) => respond(StatusCode::OK, &product),
        Err(e) => e.into_response(),
    }
}

#[utoipa::path(
    delete,
    path = "/products/{id}",
    params(
        ("id" = String, Path, description = "Product id")
    ),
    responses(
        (status = 200, description = "Product removed", body = ApiResponse),
        (status = 404, description = "Product not found", body = ApiResponse),
        (status = 500, description = "Internal server error", body = ApiResponse)
    )
)]
pub async fn delete_product_handler(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
) -> Response {
    let id = match path_param(id, InventoryError::product_not_found) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    match state.service.delete_product(&id).await {
        Ok(()) => respond(StatusCode::OK, &MessageResponse::new("Product removed")),
        Err(e) => e.into_response(),
    }
}

#[utoipa::path(
    get,
    path = "/products/barcode/{barcode}",
    params(
        ("barcode" = String, Path, description = "Product barcode")
    ),
    responses(
        (status = 200, description = "Product found; `source` is `local` or `external`", body = ApiResponse),
        (status = 404, description = "Unknown locally and externally", body = ApiResponse),
        (status = 500, description = "Internal server error", body = ApiResponse)
    )
)]
pub async fn resolve_barcode_handler(
    State(state): State<AppState>,
    barcode: Result<Path<String>, PathRejection>,
) -> Response {
    let barcode = match path_param(barcode, InventoryError::product_not_found) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let resolved = match state.service.resolve_barcode(&barcode).await {
        Ok(r) => r,
        Err(e) => return e.into_response(),
    };

    let source = resolved.source();
    let data = match &resolved {
        ResolvedProduct::Local(product) => serde_json::to_value(product),
        ResolvedProduct::External(product) => serde_json::to_value(product),
    };
    match data {
        Ok(data) => (
            StatusCode::OK,
            Json(ApiResponse::success(data).with_source(source)),
        )
            .into_response(),
        Err(e) => InventoryError::Internal(e.to_string()).into_response(),
    }
}
