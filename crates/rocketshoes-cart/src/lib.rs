//! # rocketshoes-cart: The Cart Store
//!
//! The cart store owns the shopper's cart. Every mutation is checked
//! against the stock service and persisted to a durable slot before the
//! in-memory cart changes.
//!
//! ## Operation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    add_product(id)                                      │
//! │                                                                         │
//! │   Inventory::get_stock(id)     ── stock < wanted ──► OutOfStock         │
//! │        │                                                                │
//! │        ▼  (absent only)                                                 │
//! │   Inventory::get_product(id)   ── error ───────────► Inventory          │
//! │        │                                                                │
//! │        ▼                                                                │
//! │   acquire commit lock ───────────────────────────────┐                  │
//! │        │                                             │ no remote        │
//! │        ▼                                             │ calls here       │
//! │   re-read cart, re-check stock ── stock < wanted ──► OutOfStock         │
//! │        │                                             │                  │
//! │        ▼                                             │                  │
//! │   SnapshotStorage::write(key)  ── error ───────────► Storage            │
//! │        │                                             │                  │
//! │        ▼                                             │                  │
//! │   swap in-memory cart ◄──────────────────────────────┘                  │
//! │                                                                         │
//! │   Any error → Notifier::notify(op, user_message) ; cart unchanged       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`store`] - `CartStore` and its operations
//! - [`ports`] - `Inventory`, `SnapshotStorage`, `Notifier` traits
//! - [`storage`] - Memory, file and SQLite slot backends
//! - [`notify`] - Notifier implementations
//! - [`http`] - `Inventory` over the HTTP `ApiClient`
//! - [`config`] - `CartConfig` loading and validation
//! - [`error`] - `ConfigError`

pub mod config;
pub mod error;
pub mod http;
pub mod notify;
pub mod ports;
pub mod storage;
pub mod store;

pub use config::{ApiSettings, CartConfig, DisplaySettings, StorageBackend, StorageSettings};
pub use error::{ConfigError, ConfigResult};
pub use notify::{CollectingNotifier, Notification, NoOpNotifier, TracingNotifier};
pub use ports::{Inventory, Notifier, SnapshotStorage};
pub use storage::{FileStorage, MemoryStorage, SqliteStorage};
pub use store::CartStore;
