//! # Ports
//!
//! The three collaborators the cart store talks to, as traits.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                           CartStore                                     │
//! │                                                                         │
//! │   Inventory             SnapshotStorage            Notifier             │
//! │   ─────────             ───────────────            ────────             │
//! │   get_stock(id)         read(key)                  notify(op, msg)      │
//! │   get_product(id)       write(key, value)                               │
//! │        │                     │                          │               │
//! │        ▼                     ▼                          ▼               │
//! │   ApiClient (http.rs)   Memory / File / Sqlite     Tracing / Collecting │
//! │   fakes in tests        (storage.rs)               / NoOp (notify.rs)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use async_trait::async_trait;

use rocketshoes_core::{CartOperation, CatalogProduct, InventoryError, ProductId, Stock, StorageError};

// =============================================================================
// Inventory
// =============================================================================

/// Stock and catalog lookups.
#[async_trait]
pub trait Inventory: Send + Sync {
    /// Available stock for `id`.
    async fn get_stock(&self, id: ProductId) -> Result<Stock, InventoryError>;

    /// Catalog attributes for `id`.
    async fn get_product(&self, id: ProductId) -> Result<CatalogProduct, InventoryError>;
}

#[async_trait]
impl<T: Inventory + ?Sized> Inventory for Arc<T> {
    async fn get_stock(&self, id: ProductId) -> Result<Stock, InventoryError> {
        (**self).get_stock(id).await
    }

    async fn get_product(&self, id: ProductId) -> Result<CatalogProduct, InventoryError> {
        (**self).get_product(id).await
    }
}

// =============================================================================
// Snapshot Storage
// =============================================================================

/// A durable key-value slot store holding string blobs.
///
/// A `write` either fully replaces the slot or fails and leaves the
/// previous value in place.
#[async_trait]
pub trait SnapshotStorage: Send + Sync {
    /// Reads the slot. `Ok(None)` means the slot was never written.
    async fn read(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replaces the slot's value.
    async fn write(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

#[async_trait]
impl<T: SnapshotStorage + ?Sized> SnapshotStorage for Arc<T> {
    async fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).read(key).await
    }

    async fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).write(key, value).await
    }
}

// =============================================================================
// Notifier
// =============================================================================

/// Fire-and-forget user notifications. Only failures are reported.
pub trait Notifier: Send + Sync {
    /// Shows `message` to the shopper after `operation` failed.
    fn notify(&self, operation: CartOperation, message: &str);
}
