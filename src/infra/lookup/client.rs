// Responsible for all communication with the external product-lookup service.
//
// The wire format is the Open Food Facts v0 product API:
//   GET {base}/api/v0/product/{barcode}.json
//   -> {"status": 1, "product": {"product_name": "...", "brands": "...", ...}}
// `status: 0` means the barcode is unknown.

use crate::domain::error::{InventoryError, InventoryResult};
use crate::domain::model::ExternalProduct;
use crate::infra::lookup::ProductLookup;
use async_trait::async_trait;
use reqwest::{StatusCode, Url};
use serde::Deserialize;
use serde_json::Value as JsonValue;
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Deserialize)]
struct LookupResponse {
    #[serde(default)]
    status: Option<i64>,
    #[serde(default)]
    product: Option<LookupProduct>,
}

#[derive(Debug, Deserialize)]
struct LookupProduct {
    #[serde(default)]
    product_name: Option<String>,
    #[serde(default)]
    generic_name: Option<String>,
    #[serde(default)]
    brands: Option<String>,
    #[serde(default)]
    categories: Option<String>,
    #[serde(default)]
    image_url: Option<String>,
}

/// HTTP client for the lookup service. One attempt per call, no caching.
#[derive(Clone)]
pub struct LookupClient {
    http: reqwest::Client,
    base_url: Url,
}

impl LookupClient {
    pub fn new(base_url: &str, timeout: Option<Duration>) -> InventoryResult<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| InventoryError::Internal(format!("invalid lookup base url: {}", e)))?;
        if base_url.cannot_be_a_base() {
            return Err(InventoryError::Internal(format!(
                "lookup base url cannot be a base: {}",
                base_url
            )));
        }

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| InventoryError::Internal(format!("failed to build http client: {}", e)))?;

        Ok(Self { http, base_url })
    }

    /// URL of the product document for `barcode`. The barcode is encoded as a single
    /// path segment.
    pub fn product_url(&self, barcode: &str) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(["api", "v0", "product", &format!("{}.json", barcode)]);
        }
        url
    }
}

#[async_trait]
impl ProductLookup for LookupClient {
    async fn lookup(&self, barcode: &str) -> InventoryResult<ExternalProduct> {
        let url = self.product_url(barcode);
        debug!(%url, "External product lookup");

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| InventoryError::Upstream(e.to_string()))?;

        let status = response.status();
        if status.is_server_error() {
            return Err(InventoryError::Upstream(format!(
                "lookup service returned {}",
                status
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| InventoryError::Upstream(e.to_string()))?;

        let json: JsonValue = match serde_json::from_str(&body) {
            Ok(v) => v,
            Err(_) if status == StatusCode::NOT_FOUND => {
                return Err(InventoryError::product_not_found())
            }
            Err(e) => {
                return Err(InventoryError::Upstream(format!(
                    "invalid JSON from lookup service: {}",
                    e
                )))
            }
        };

        product_from_payload(barcode, json)
    }
}

/// Maps a decoded lookup payload to an `ExternalProduct`.
///
/// A negative status, a missing `product` object or a product without a usable name all
/// count as "no match".
fn product_from_payload(barcode: &str, payload: JsonValue) -> InventoryResult<ExternalProduct> {
    let response: LookupResponse =
        serde_json::from_value(payload).map_err(|_| InventoryError::product_not_found())?;

    if response.status != Some(1) {
        return Err(InventoryError::product_not_found());
    }
    let product = response
        .product
        .ok_or_else(InventoryError::product_not_found)?;

    let description = first_non_blank([product.product_name, product.generic_name])
        .ok_or_else(InventoryError::product_not_found)?;

    Ok(ExternalProduct {
        barcode: barcode.to_string(),
        description,
        brand: product.brands.as_deref().and_then(first_label),
        category: product.categories.as_deref().and_then(first_label),
        image_url: first_non_blank([product.image_url]),
    })
}

fn first_non_blank<const N: usize>(candidates: [Option<String>; N]) -> Option<String> {
    candidates
        .into_iter()
        .flatten()
        .map(|s| s.trim().to_string())
        .find(|s| !s.is_empty())
}

/// First entry of a comma separated label list ("Beverages, Sodas" -> "Beverages").
fn first_label(list: &str) -> Option<String> {
    list.split(',')
        .map(str::trim)
        .find(|s| !s.is_empty())
        .map(str::to_string)
}
