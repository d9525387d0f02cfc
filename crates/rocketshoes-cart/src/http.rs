//! # HTTP Inventory
//!
//! [`Inventory`] backed by the catalog/stock HTTP services.
//!
//! ## Error Mapping
//! ```text
//! ApiError::NotFound      → InventoryError::NotFound(id)
//! ApiError::Decode        → InventoryError::InvalidResponse
//! everything else         → InventoryError::Unavailable
//! ```

use async_trait::async_trait;
use tracing::error;

use rocketshoes_api::{ApiClient, ApiError};
use rocketshoes_core::{CatalogProduct, InventoryError, ProductId, Stock};

use crate::ports::Inventory;

/// Maps a client error for a lookup of `id`.
pub fn inventory_error(id: ProductId, err: ApiError) -> InventoryError {
    match err {
        ApiError::NotFound(_) => InventoryError::NotFound(id),
        ApiError::Decode(msg) => InventoryError::InvalidResponse(msg),
        other => InventoryError::Unavailable(other.to_string()),
    }
}

#[async_trait]
impl Inventory for ApiClient {
    async fn get_stock(&self, id: ProductId) -> Result<Stock, InventoryError> {
        ApiClient::get_stock(self, id).await.map_err(|e| {
            error!(product_id = %id, error = %e, "Stock lookup failed");
            inventory_error(id, e)
        })
    }

    async fn get_product(&self, id: ProductId) -> Result<CatalogProduct, InventoryError> {
        ApiClient::get_product(self, id).await.map_err(|e| {
            error!(product_id = %id, error = %e, "Catalog lookup failed");
            inventory_error(id, e)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rocketshoes_api::{Fixture, FixtureHandle, DEFAULT_TIMEOUT};

    #[test]
    fn test_error_mapping() {
        let id = ProductId::new(4);

        assert!(matches!(
            inventory_error(id, ApiError::NotFound("/stock/4".into())),
            InventoryError::NotFound(p) if p == id
        ));
        assert!(matches!(
            inventory_error(id, ApiError::Decode("eof".into())),
            InventoryError::InvalidResponse(_)
        ));
        assert!(matches!(
            inventory_error(id, ApiError::Connection("refused".into())),
            InventoryError::Unavailable(_)
        ));
        assert!(matches!(
            inventory_error(
                id,
                ApiError::Http {
                    status: 502,
                    url: "/stock/4".into()
                }
            ),
            InventoryError::Unavailable(_)
        ));
    }

    #[tokio::test]
    async fn test_inventory_over_fixture_server() {
        let fixture = Fixture::from_json(
            r#"{
                "products": [{"id": 1, "title": "Tênis", "price": 179.9, "image": "1.jpg"}],
                "stock": [{"id": 1, "amount": 3}]
            }"#,
        )
        .unwrap();
        let handle = FixtureHandle::spawn(fixture, "127.0.0.1:0").await.unwrap();
        let client = ApiClient::new(&handle.base_url(), DEFAULT_TIMEOUT).unwrap();
        let inventory: &dyn Inventory = &client;

        assert_eq!(inventory.get_stock(ProductId::new(1)).await.unwrap().amount, 3);
        assert_eq!(
            inventory.get_product(ProductId::new(1)).await.unwrap().title,
            "Tênis"
        );
        assert!(matches!(
            inventory.get_stock(ProductId::new(2)).await,
            Err(InventoryError::NotFound(_))
        ));

        handle.shutdown().await.unwrap();
    }
}
