//! Shared fixtures: a fake lookup provider and an API server over the memory store.

#![allow(dead_code)]

use async_trait::async_trait;
use axum::extract::Path;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use inventory_api::{
    transport, Category, InventoryError, InventoryResult, InventoryService, InventoryStore,
    LookupClient, MemoryStore, Product, DEFAULT_CATEGORY,
};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

pub const KNOWN_BARCODE: &str = "5449000000996";
pub const FAILING_BARCODE: &str = "500500";
pub const GARBLED_BARCODE: &str = "777";

/// Serves `router` on an ephemeral local port and returns its base URL.
pub async fn spawn(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("server crashed");
    });
    format!("http://{}", addr)
}

async fn fake_product(Path(file): Path<String>) -> impl IntoResponse {
    let barcode = file.trim_end_matches(".json").to_string();
    match barcode.as_str() {
        KNOWN_BARCODE => (
            StatusCode::OK,
            Json(json!({
                "code": barcode,
                "status": 1,
                "status_verbose": "product found",
                "product": {
                    "product_name": "Coca-Cola",
                    "brands": "Coca-Cola",
                    "categories": "Beverages, Sodas"
                }
            })),
        )
            .into_response(),
        FAILING_BARCODE => (StatusCode::BAD_GATEWAY, "upstream exploded").into_response(),
        GARBLED_BARCODE => (StatusCode::OK, "<html>maintenance</html>").into_response(),
        _ => (
            StatusCode::NOT_FOUND,
            Json(json!({ "code": barcode, "status": 0, "status_verbose": "product not found" })),
        )
            .into_response(),
    }
}

/// A stand-in for the Open Food Facts product API.
pub async fn spawn_fake_lookup() -> String {
    spawn(Router::new().route("/api/v0/product/:file", get(fake_product))).await
}

pub struct TestApp {
    pub base_url: String,
    pub client: reqwest::Client,
    pub service: InventoryService,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Starts the full API over a fresh memory store, with the default category in place.
pub async fn spawn_app() -> TestApp {
    spawn_app_over(Arc::new(MemoryStore::new())).await
}

/// Starts the full API over `store`, with the default category in place.
pub async fn spawn_app_over(store: Arc<dyn InventoryStore>) -> TestApp {
    let lookup_url = spawn_fake_lookup().await;
    let lookup = LookupClient::new(&lookup_url, Some(Duration::from_secs(5))).expect("lookup client");
    let service = InventoryService::new(store, Arc::new(lookup));
    service
        .ensure_default_category()
        .await
        .expect("default category");

    let router = transport::http::create_router(transport::http::AppState {
        service: service.clone(),
    });
    let base_url = spawn(router).await;
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(10))
        .build()
        .expect("http client");

    TestApp {
        base_url,
        client,
        service,
    }
}

/// A memory store with injectable faults.
#[derive(Clone, Default)]
pub struct FaultyStore {
    pub inner: MemoryStore,
    /// Returned by `ping` when set.
    pub ping_error: Option<String>,
    /// Deletes the category just before a rename is written, as a concurrent delete would.
    pub delete_before_rename: bool,
}

#[async_trait]
impl InventoryStore for FaultyStore {
    async fn ping(&self) -> InventoryResult<()> {
        match &self.ping_error {
            Some(reason) => Err(InventoryError::Internal(reason.clone())),
            None => self.inner.ping().await,
        }
    }

    async fn list_categories(&self) -> InventoryResult<Vec<Category>> {
        self.inner.list_categories().await
    }

    async fn find_category(&self, id: Uuid) -> InventoryResult<Option<Category>> {
        self.inner.find_category(id).await
    }

    async fn find_category_by_name(&self, name: &str) -> InventoryResult<Option<Category>> {
        self.inner.find_category_by_name(name).await
    }

    async fn max_category_order(&self) -> InventoryResult<Option<i32>> {
        self.inner.max_category_order().await
    }

    async fn insert_category(&self, category: &Category) -> InventoryResult<()> {
        self.inner.insert_category(category).await
    }

    async fn insert_category_if_absent(&self, category: &Category) -> InventoryResult<bool> {
        self.inner.insert_category_if_absent(category).await
    }

    async fn update_category(&self, category: &Category) -> InventoryResult<bool> {
        if self.delete_before_rename {
            if let Some(current) = self.inner.find_category(category.id).await? {
                self.inner
                    .delete_category_cascade(&current, DEFAULT_CATEGORY)
                    .await?;
            }
        }
        self.inner.update_category(category).await
    }

    async fn delete_category_cascade(
        &self,
        category: &Category,
        fallback: &str,
    ) -> InventoryResult<u64> {
        self.inner.delete_category_cascade(category, fallback).await
    }

    async fn count_categories(&self) -> InventoryResult<u64> {
        self.inner.count_categories().await
    }

    async fn list_products(&self, category: Option<&str>) -> InventoryResult<Vec<Product>> {
        self.inner.list_products(category).await
    }

    async fn find_product(&self, id: Uuid) -> InventoryResult<Option<Product>> {
        self.inner.find_product(id).await
    }

    async fn find_product_by_barcode(&self, barcode: &str) -> InventoryResult<Option<Product>> {
        self.inner.find_product_by_barcode(barcode).await
    }

    async fn insert_product(&self, product: &Product) -> InventoryResult<()> {
        self.inner.insert_product(product).await
    }

    async fn update_product(&self, product: &Product) -> InventoryResult<bool> {
        self.inner.update_product(product).await
    }

    async fn delete_product(&self, id: Uuid) -> InventoryResult<bool> {
        self.inner.delete_product(id).await
    }

    async fn count_products(&self) -> InventoryResult<u64> {
        self.inner.count_products().await
    }
}
