use crate::domain::model::{Category, ExternalProduct, Product, Source};
use crate::transport::http::handlers::{categories, health, products};
use crate::transport::http::types::{
    ApiResponse, AppState, CategoryRequest, CreateProductRequest, MessageResponse,
    UpdateProductRequest,
};
use axum::routing::{get, patch};
use axum::Router;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::root_handler,
        health::healthcheck_handler,
        categories::list_categories_handler,
        categories::create_category_handler,
        categories::rename_category_handler,
        categories::delete_category_handler,
        products::list_products_handler,
        products::get_product_handler,
        products::create_product_handler,
        products::update_product_handler,
        products::delete_product_handler,
        products::resolve_barcode_handler
    ),
    components(schemas(
        ApiResponse,
        MessageResponse,
        CategoryRequest,
        CreateProductRequest,
        UpdateProductRequest,
        Category,
        Product,
        ExternalProduct,
        Source
    ))
)]
pub struct ApiDoc;

/// Every method router falls back to the 404 envelope, so a known path hit with an
/// unsupported method is answered like an unknown path.
pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(health::root_handler).fallback(health::not_found_handler))
        .route(
            "/health",
            get(health::healthcheck_handler).fallback(health::not_found_handler),
        )
        .route(
            "/categories",
            get(categories::list_categories_handler)
                .post(categories::create_category_handler)
                .fallback(health::not_found_handler),
        )
        .route(
            "/categories/:id",
            patch(categories::rename_category_handler)
                .delete(categories::delete_category_handler)
                .fallback(health::not_found_handler),
        )
        .route(
            "/products",
            get(products::list_products_handler)
                .post(products::create_product_handler)
                .fallback(health::not_found_handler),
        )
        .route(
            "/products/:id",
            get(products::get_product_handler)
                .patch(products::update_product_handler)
                .delete(products::delete_product_handler)
                .fallback(health::not_found_handler),
        )
        .route(
            "/products/barcode/:barcode",
            get(products::resolve_barcode_handler).fallback(health::not_found_handler),
        )
        .fallback(health::not_found_handler)
        .with_state(app_state)
}
