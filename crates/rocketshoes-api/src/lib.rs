//! # rocketshoes-api: Catalog & Stock Services over HTTP
//!
//! The cart consults two remote collaborators before it changes anything:
//! the **stock** service (how many units exist) and the **catalog** service
//! (what a product looks like). Both are plain JSON over HTTP.
//!
//! ## Request Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   ApiClient                              Service (or FixtureServer)     │
//! │   ─────────                              ──────────────────────────     │
//! │   get_stock(1)     ── GET /stock/1 ────► {"id":1,"amount":3}            │
//! │   get_product(1)   ── GET /products/1 ─► {"id":1,"title":..,"price":..} │
//! │   list_stock()     ── GET /stock ──────► [ ... ]                        │
//! │   list_products()  ── GET /products ───► [ ... ]                        │
//! │                                                                         │
//! │   404 → ApiError::NotFound     other non-2xx → ApiError::Http           │
//! │   unreachable → Connection     bad body → Decode                        │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`client`] - `ApiClient`, the reqwest-based HTTP client
//! - [`server`] - An axum fixture server that serves a `db.json` file
//! - [`error`] - `ApiError`

pub mod client;
pub mod error;
pub mod server;

pub use client::{ApiClient, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
pub use error::{ApiError, ApiResult};
pub use server::{Fixture, FixtureHandle, DEFAULT_FIXTURE_PORT};
