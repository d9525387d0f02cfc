//! # API Client
//!
//! Thin reqwest client for the catalog and stock services.
//!
//! ## URL Building
//! ```text
//! base_url = http://localhost:3333          base_url = https://shop.example/api/
//!      │                                         │
//!      ▼  endpoint(["stock", "1"])              ▼  endpoint(["stock", "1"])
//! http://localhost:3333/stock/1              https://shop.example/api/stock/1
//! ```
//! Segments are appended, never joined with `Url::join`, so a base path
//! without a trailing slash is kept.

use std::time::Duration;

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

use rocketshoes_core::{CatalogProduct, ProductId, Stock};

use crate::error::{ApiError, ApiResult};

/// Where the storefront's json-server listens by default.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3333";

/// Per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP client for `/stock` and `/products`.
///
/// Cheap to clone: clones share the connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    /// Creates a client for `base_url` (e.g. `http://localhost:3333`).
    ///
    /// ## Returns
    /// - `Err(InvalidUrl)` if `base_url` does not parse or is not http(s)
    pub fn new(base_url: &str, timeout: Duration) -> ApiResult<Self> {
        let base_url = Url::parse(base_url)?;

        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(ApiError::InvalidUrl(format!(
                "unsupported scheme '{}' in {}",
                base_url.scheme(),
                base_url
            )));
        }
        if base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidUrl(base_url.to_string()));
        }

        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(ApiClient { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // =========================================================================
    // Routes
    // =========================================================================

    /// `GET /stock/{id}`
    pub async fn get_stock(&self, id: ProductId) -> ApiResult<Stock> {
        let url = self.endpoint(&["stock", &id.to_string()])?;
        self.get_json(url).await
    }

    /// `GET /products/{id}`
    pub async fn get_product(&self, id: ProductId) -> ApiResult<CatalogProduct> {
        let url = self.endpoint(&["products", &id.to_string()])?;
        self.get_json(url).await
    }

    /// `GET /stock`
    pub async fn list_stock(&self) -> ApiResult<Vec<Stock>> {
        let url = self.endpoint(&["stock"])?;
        self.get_json(url).await
    }

    /// `GET /products`
    pub async fn list_products(&self) -> ApiResult<Vec<CatalogProduct>> {
        let url = self.endpoint(&["products"])?;
        self.get_json(url).await
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    fn endpoint(&self, segments: &[&str]) -> ApiResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> ApiResult<T> {
        debug!(url = %url, "GET");

        let response = self.client.get(url.clone()).send().await.map_err(|e| {
            warn!(url = %url, error = %e, "Request failed");
            ApiError::from(e)
        })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound(url.to_string()));
        }
        if !status.is_success() {
            warn!(url = %url, status = status.as_u16(), "Unexpected status");
            return Err(ApiError::Http {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| ApiError::Decode(format!("{}: {}", url, e)))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::{Fixture, FixtureHandle};
    use axum::{http::StatusCode as AxumStatus, routing::get, Router};

    const DB_JSON: &str = r#"{
        "products": [
            {"id": 1, "title": "Tênis de Caminhada", "price": 179.9, "image": "1.jpg"},
            {"id": 2, "title": "Tênis VR Caminhada", "price": 139.9, "image": "2.jpg"}
        ],
        "stock": [
            {"id": 1, "amount": 3},
            {"id": 2, "amount": 5}
        ]
    }"#;

    async fn fixture_server() -> (FixtureHandle, ApiClient) {
        let fixture = Fixture::from_json(DB_JSON).unwrap();
        let handle = FixtureHandle::spawn(fixture, "127.0.0.1:0").await.unwrap();
        let client = ApiClient::new(&handle.base_url(), DEFAULT_TIMEOUT).unwrap();
        (handle, client)
    }

    /// Serves `router` on an ephemeral port and returns its base URL.
    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.ok();
        });
        format!("http://{}", addr)
    }

    #[test]
    fn test_endpoint_building() {
        let client = ApiClient::new("http://localhost:3333", DEFAULT_TIMEOUT).unwrap();
        assert_eq!(
            client.endpoint(&["stock", "1"]).unwrap().as_str(),
            "http://localhost:3333/stock/1"
        );

        let client = ApiClient::new("https://shop.example/api/", DEFAULT_TIMEOUT).unwrap();
        assert_eq!(
            client.endpoint(&["products", "7"]).unwrap().as_str(),
            "https://shop.example/api/products/7"
        );

        let client = ApiClient::new("https://shop.example/api", DEFAULT_TIMEOUT).unwrap();
        assert_eq!(
            client.endpoint(&["stock"]).unwrap().as_str(),
            "https://shop.example/api/stock"
        );
    }

    #[test]
    fn test_rejects_bad_base_urls() {
        assert!(matches!(
            ApiClient::new("localhost:3333", DEFAULT_TIMEOUT),
            Err(ApiError::InvalidUrl(_))
        ));
        assert!(matches!(
            ApiClient::new("ftp://files.example", DEFAULT_TIMEOUT),
            Err(ApiError::InvalidUrl(_))
        ));
    }

    #[tokio::test]
    async fn test_get_stock_and_product() {
        let (handle, client) = fixture_server().await;

        let stock = client.get_stock(ProductId::new(2)).await.unwrap();
        assert_eq!(stock.amount, 5);

        let product = client.get_product(ProductId::new(1)).await.unwrap();
        assert_eq!(product.title, "Tênis de Caminhada");
        assert_eq!(product.price.cents(), 17990);

        handle.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_lists() {
        let (handle, client) = fixture_server().await;

        assert_eq!(client.list_products().await.unwrap().len(), 2);
        assert_eq!(client.list_stock().await.unwrap().len(), 2);

        handle.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_unknown_product_is_not_found() {
        let (handle, client) = fixture_server().await;

        assert!(matches!(
            client.get_stock(ProductId::new(99)).await,
            Err(ApiError::NotFound(_))
        ));
        assert!(matches!(
            client.get_product(ProductId::new(99)).await,
            Err(ApiError::NotFound(_))
        ));

        handle.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_stock_changes_are_visible() {
        let (handle, client) = fixture_server().await;

        handle.set_stock(ProductId::new(1), 0).await;
        assert_eq!(client.get_stock(ProductId::new(1)).await.unwrap().amount, 0);

        handle.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_server_error_maps_to_http() {
        let base = serve(Router::new().route(
            "/stock/{id}",
            get(|| async { AxumStatus::INTERNAL_SERVER_ERROR }),
        ))
        .await;
        let client = ApiClient::new(&base, DEFAULT_TIMEOUT).unwrap();

        let err = client.get_stock(ProductId::new(1)).await.unwrap_err();
        assert!(matches!(err, ApiError::Http { status: 500, .. }));
    }

    #[tokio::test]
    async fn test_bad_body_maps_to_decode() {
        let base = serve(Router::new().route(
            "/stock/{id}",
            get(|| async { r#"{"id": 1, "amount": "lots"}"# }),
        ))
        .await;
        let client = ApiClient::new(&base, DEFAULT_TIMEOUT).unwrap();

        assert!(matches!(
            client.get_stock(ProductId::new(1)).await,
            Err(ApiError::Decode(_))
        ));
    }

    #[tokio::test]
    async fn test_unreachable_service_is_connection_error() {
        // Bind then drop to get a port nothing listens on
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = ApiClient::new(&format!("http://{}", addr), DEFAULT_TIMEOUT).unwrap();
        let err = client.get_stock(ProductId::new(1)).await.unwrap_err();

        assert!(matches!(err, ApiError::Connection(_)));
    }
}
