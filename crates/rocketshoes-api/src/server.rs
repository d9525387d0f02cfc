//! # Fixture Server
//!
//! A small axum server that answers the catalog and stock routes from a
//! `db.json` document, in the layout json-server uses:
//!
//! ```text
//! {
//!   "products": [ {"id": 1, "title": "...", "price": 179.9, "image": "..."} ],
//!   "stock":    [ {"id": 1, "amount": 3} ]
//! }
//! ```
//!
//! ## Lifecycle
//! ```text
//! FixtureHandle::spawn(fixture, "127.0.0.1:0")
//!      │
//!      ├── bind TcpListener (port 0 → ephemeral)
//!      ├── tokio::spawn(axum::serve(...).with_graceful_shutdown(rx))
//!      │
//!      ▼
//! FixtureHandle { local_addr, state, shutdown_tx }
//!      │
//!      ├── set_stock(id, n)   ← tests change inventory between calls
//!      └── shutdown().await   ← stops accepting, waits for the task
//! ```

use std::net::SocketAddr;
use std::path::Path as FsPath;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tokio::sync::{oneshot, RwLock};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use rocketshoes_core::{CatalogProduct, ProductId, Stock};

use crate::error::{ApiError, ApiResult};

// =============================================================================
// Constants
// =============================================================================

/// Port the storefront expects the catalog service on.
pub const DEFAULT_FIXTURE_PORT: u16 = 3333;

// =============================================================================
// Fixture Data
// =============================================================================

/// The catalog and stock tables served by the fixture.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Fixture {
    #[serde(default)]
    pub products: Vec<CatalogProduct>,
    #[serde(default)]
    pub stock: Vec<Stock>,
}

impl Fixture {
    /// Parses a `db.json` document.
    pub fn from_json(json: &str) -> ApiResult<Self> {
        serde_json::from_str(json).map_err(|e| ApiError::Fixture(e.to_string()))
    }

    /// Reads and parses a `db.json` file.
    pub fn load(path: impl AsRef<FsPath>) -> ApiResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| ApiError::Fixture(format!("{}: {}", path.display(), e)))?;

        let fixture = Self::from_json(&json)?;
        info!(
            path = %path.display(),
            products = fixture.products.len(),
            stock = fixture.stock.len(),
            "Fixture loaded"
        );
        Ok(fixture)
    }

    pub fn product(&self, id: ProductId) -> Option<&CatalogProduct> {
        self.products.iter().find(|p| p.id == id)
    }

    pub fn stock(&self, id: ProductId) -> Option<&Stock> {
        self.stock.iter().find(|s| s.id == id)
    }

    /// Sets the stock level of `id`, adding a row if needed.
    pub fn set_stock(&mut self, id: ProductId, amount: i64) {
        match self.stock.iter_mut().find(|s| s.id == id) {
            Some(row) => row.amount = amount,
            None => self.stock.push(Stock { id, amount }),
        }
    }
}

type SharedFixture = Arc<RwLock<Fixture>>;

// =============================================================================
// Router
// =============================================================================

/// Builds the fixture router over shared state.
pub fn router(state: Arc<RwLock<Fixture>>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/products", get(list_products))
        .route("/products/{id}", get(get_product))
        .route("/stock", get(list_stock))
        .route("/stock/{id}", get(get_stock))
        .with_state(state)
}

async fn health_handler() -> impl IntoResponse {
    "OK"
}

async fn list_products(State(state): State<SharedFixture>) -> Json<Vec<CatalogProduct>> {
    Json(state.read().await.products.clone())
}

async fn get_product(
    State(state): State<SharedFixture>,
    Path(id): Path<u64>,
) -> Result<Json<CatalogProduct>, StatusCode> {
    debug!(product_id = id, "Fixture product lookup");
    state
        .read()
        .await
        .product(ProductId::new(id))
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn list_stock(State(state): State<SharedFixture>) -> Json<Vec<Stock>> {
    Json(state.read().await.stock.clone())
}

async fn get_stock(
    State(state): State<SharedFixture>,
    Path(id): Path<u64>,
) -> Result<Json<Stock>, StatusCode> {
    debug!(product_id = id, "Fixture stock lookup");
    state
        .read()
        .await
        .stock(ProductId::new(id))
        .copied()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

// =============================================================================
// Server Handle
// =============================================================================

/// A running fixture server.
pub struct FixtureHandle {
    local_addr: SocketAddr,
    state: SharedFixture,
    shutdown_tx: oneshot::Sender<()>,
    task: JoinHandle<()>,
}

impl FixtureHandle {
    /// Binds `bind_addr` and serves `fixture` on a background task.
    ///
    /// Use port `0` to let the OS pick a free port; read it back with
    /// [`FixtureHandle::local_addr`].
    pub async fn spawn(fixture: Fixture, bind_addr: &str) -> ApiResult<Self> {
        let listener = TcpListener::bind(bind_addr)
            .await
            .map_err(|e| ApiError::Server(format!("Failed to bind to {}: {}", bind_addr, e)))?;

        let local_addr = listener
            .local_addr()
            .map_err(|e| ApiError::Server(e.to_string()))?;

        let state = Arc::new(RwLock::new(fixture));
        let app = router(state.clone());
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        info!(addr = %local_addr, "Fixture server started");

        let task = tokio::spawn(async move {
            let result = axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    let _ = shutdown_rx.await;
                    info!("Fixture server shutting down");
                })
                .await;

            if let Err(e) = result {
                warn!(error = %e, "Fixture server stopped with an error");
            }
        });

        Ok(FixtureHandle {
            local_addr,
            state,
            shutdown_tx,
            task,
        })
    }

    /// The address the server is listening on.
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// `http://<local_addr>`, ready for [`ApiClient::new`](crate::ApiClient::new).
    pub fn base_url(&self) -> String {
        format!("http://{}", self.local_addr)
    }

    /// Changes a stock level while the server runs.
    pub async fn set_stock(&self, id: ProductId, amount: i64) {
        self.state.write().await.set_stock(id, amount);
    }

    /// Stops the server and waits for it to finish.
    pub async fn shutdown(self) -> ApiResult<()> {
        let _ = self.shutdown_tx.send(());
        self.task
            .await
            .map_err(|e| ApiError::Server(format!("Fixture server task failed: {}", e)))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

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

    #[test]
    fn test_fixture_from_json() {
        let fixture = Fixture::from_json(DB_JSON).unwrap();

        assert_eq!(fixture.products.len(), 2);
        assert_eq!(fixture.stock(ProductId::new(2)).unwrap().amount, 5);
        assert_eq!(
            fixture.product(ProductId::new(1)).unwrap().price.cents(),
            17990
        );
        assert!(fixture.product(ProductId::new(9)).is_none());
    }

    #[test]
    fn test_fixture_missing_tables_default_to_empty() {
        let fixture = Fixture::from_json(r#"{"products": []}"#).unwrap();
        assert!(fixture.stock.is_empty());

        assert!(matches!(
            Fixture::from_json("{"),
            Err(ApiError::Fixture(_))
        ));
    }

    #[test]
    fn test_fixture_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("db.json");
        std::fs::write(&path, DB_JSON).unwrap();

        assert_eq!(Fixture::load(&path).unwrap().stock.len(), 2);
        assert!(Fixture::load(dir.path().join("missing.json")).is_err());
    }

    #[test]
    fn test_set_stock_updates_or_inserts() {
        let mut fixture = Fixture::from_json(DB_JSON).unwrap();

        fixture.set_stock(ProductId::new(1), 0);
        fixture.set_stock(ProductId::new(7), 2);

        assert_eq!(fixture.stock(ProductId::new(1)).unwrap().amount, 0);
        assert_eq!(fixture.stock(ProductId::new(7)).unwrap().amount, 2);
    }

    #[tokio::test]
    async fn test_spawn_and_shutdown() {
        let handle = FixtureHandle::spawn(Fixture::default(), "127.0.0.1:0")
            .await
            .unwrap();

        assert_ne!(handle.local_addr().port(), 0);
        assert!(handle.base_url().starts_with("http://127.0.0.1:"));

        handle.shutdown().await.unwrap();
    }
}
