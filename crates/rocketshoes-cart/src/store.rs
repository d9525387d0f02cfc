//! # Cart Store
//!
//! Owns the in-memory cart and its persisted snapshot.
//!
//! ## Locking
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Two Locks                                       │
//! │                                                                         │
//! │  commit: tokio::sync::Mutex<()>                                         │
//! │    Held only while a mutation re-reads the cart, re-checks it, writes  │
//! │    the snapshot and swaps the cart in. Never held across a remote      │
//! │    call, so remove_product never waits on a slow stock lookup.         │
//! │                                                                         │
//! │  cart: std::sync::Mutex<Cart>                                           │
//! │    Held only to clone or swap the cart, never across an .await.        │
//! │    Readers (cart(), summary()) never wait for a mutation in flight.    │
//! │                                                                         │
//! │  add / update:                                                          │
//! │    clone cart → remote lookups (no lock)                               │
//! │    → lock commit → re-read cart → re-check against the fetched stock   │
//! │    → write snapshot → swap cart → release commit                       │
//! │                                                                         │
//! │  Two overlapping add_product(1) calls both commit against the latest   │
//! │  cart: the second sees the first's result (amount 2, not a lost        │
//! │  update) and is re-checked against the stock it fetched.              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Two Flavours of Every Operation
//! - `try_add_product` etc. return the typed [`CartError`]
//! - `add_product` etc. never fail: they notify the shopper instead
//!
//! Either way a failed operation leaves the cart and the snapshot untouched.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, error, info, warn};

use rocketshoes_core::validation;
use rocketshoes_core::{
    Cart, CartError, CartOperation, CartResult, CartSummary, InventoryError, ProductId,
    UpdateProductAmount, CART_STORAGE_KEY,
};

use crate::ports::{Inventory, Notifier, SnapshotStorage};

/// The cart store.
///
/// Share it by handle: `Arc<CartStore<..>>`.
pub struct CartStore<I, S> {
    inventory: I,
    storage: S,
    notifier: Arc<dyn Notifier>,
    key: String,
    cart: Mutex<Cart>,
    commit: tokio::sync::Mutex<()>,
}

impl<I: Inventory, S: SnapshotStorage> CartStore<I, S> {
    /// Opens the store on the `@RocketShoes:cart` slot.
    pub async fn open(inventory: I, storage: S, notifier: Arc<dyn Notifier>) -> CartResult<Self> {
        Self::open_with_key(inventory, storage, notifier, CART_STORAGE_KEY).await
    }

    /// Opens the store on a custom slot key.
    ///
    /// ## Hydration
    /// - Slot never written → empty cart
    /// - Slot unparseable → warning, empty cart (overwritten on the next mutation)
    /// - Slot read fails → `Err(Storage)`
    pub async fn open_with_key(
        inventory: I,
        storage: S,
        notifier: Arc<dyn Notifier>,
        key: impl Into<String>,
    ) -> CartResult<Self> {
        let key = key.into();
        let cart = hydrate(&storage, &key).await?;

        info!(key = %key, entries = cart.len(), "Cart store opened");

        Ok(CartStore {
            inventory,
            storage,
            notifier,
            key,
            cart: Mutex::new(cart),
            commit: tokio::sync::Mutex::new(()),
        })
    }

    // =========================================================================
    // Read Access
    // =========================================================================

    /// A copy of the current cart.
    pub fn cart(&self) -> Cart {
        self.lock_cart().clone()
    }

    /// Runs `f` with read access to the current cart.
    pub fn with_cart<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Cart) -> R,
    {
        f(&self.lock_cart())
    }

    /// Totals of the current cart.
    pub fn summary(&self) -> CartSummary {
        self.with_cart(Cart::summary)
    }

    /// The slot key the snapshot is written to.
    pub fn key(&self) -> &str {
        &self.key
    }

    // =========================================================================
    // Add
    // =========================================================================

    /// Adds one unit of `id`, notifying the shopper on failure.
    pub async fn add_product(&self, id: ProductId) {
        if let Err(e) = self.try_add_product(id).await {
            self.report(CartOperation::Add, &e);
        }
    }

    /// Adds one unit of `id`.
    ///
    /// ## Flow
    /// ```text
    /// present:  get_stock → stock >= amount + 1 ?                 → commit(amount + 1)
    /// absent:   get_stock → stock >= 1 ?          → get_product → commit(append 1)
    /// ```
    /// The stock check is repeated at commit time against the cart as it is
    /// then. An entry removed meanwhile is appended again from the data it had.
    ///
    /// ## Returns
    /// The entry's new amount.
    pub async fn try_add_product(&self, id: ProductId) -> CartResult<u32> {
        debug!(product_id = %id, "add_product");

        let current = self.cart();
        let stock = self.inventory.get_stock(id).await?;
        validation::ensure_stock(&stock, validation::next_amount(current.amount_of(id))?)?;

        let product = match current.get(id) {
            Some(entry) => entry.catalog(),
            None => {
                let product = self.inventory.get_product(id).await?;
                if product.id != id {
                    return Err(InventoryError::InvalidResponse(format!(
                        "asked for product {} but catalog returned {}",
                        id, product.id
                    ))
                    .into());
                }
                product
            }
        };

        let _commit = self.commit.lock().await;

        let mut next = self.cart();
        let requested = validation::next_amount(next.amount_of(id))?;
        validation::ensure_stock(&stock, requested)?;

        if next.contains(id) {
            next.increment(id)?;
        } else {
            next.push_new(product)?;
        }

        self.persist(next).await?;
        debug!(product_id = %id, amount = requested, "Product added");
        Ok(requested)
    }

    // =========================================================================
    // Remove
    // =========================================================================

    /// Removes the entry for `id`, notifying the shopper on failure.
    pub async fn remove_product(&self, id: ProductId) {
        if let Err(e) = self.try_remove_product(id).await {
            self.report(CartOperation::Remove, &e);
        }
    }

    /// Removes the entry for `id`.
    ///
    /// No remote call: it only waits for another mutation's commit, never
    /// for a lookup in flight.
    pub async fn try_remove_product(&self, id: ProductId) -> CartResult<()> {
        debug!(product_id = %id, "remove_product");
        let _commit = self.commit.lock().await;

        let mut next = self.cart();
        next.remove(id)?;

        self.persist(next).await?;
        debug!(product_id = %id, "Product removed");
        Ok(())
    }

    // =========================================================================
    // Update Amount
    // =========================================================================

    /// Sets an entry's amount, notifying the shopper on failure.
    pub async fn update_product_amount(&self, update: UpdateProductAmount) {
        if let Err(e) = self.try_update_product_amount(update).await {
            self.report(CartOperation::UpdateAmount, &e);
        }
    }

    /// Sets an entry's amount to exactly `update.amount`.
    ///
    /// ## Returns
    /// - `Ok(false)` for `amount <= 0`: ignored without a remote call
    /// - `Ok(true)` when the amount was replaced
    pub async fn try_update_product_amount(&self, update: UpdateProductAmount) -> CartResult<bool> {
        let UpdateProductAmount { product_id: id, amount } = update;
        debug!(product_id = %id, amount, "update_product_amount");

        let Some(amount) = validation::target_amount(amount)? else {
            debug!(product_id = %id, amount, "Non-positive amount ignored");
            return Ok(false);
        };

        if !self.with_cart(|c| c.contains(id)) {
            return Err(CartError::NotInCart(id));
        }

        let stock = self.inventory.get_stock(id).await?;
        validation::ensure_stock(&stock, amount)?;

        let _commit = self.commit.lock().await;

        let mut next = self.cart();
        next.set_amount(id, amount)?;

        self.persist(next).await?;
        debug!(product_id = %id, amount, "Product amount updated");
        Ok(true)
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    /// Persists `next`, then makes it the current cart.
    ///
    /// Must be called with the commit lock held.
    async fn persist(&self, next: Cart) -> CartResult<()> {
        let snapshot = next.encode_snapshot()?;

        if let Err(e) = self.storage.write(&self.key, &snapshot).await {
            error!(key = %self.key, error = %e, "Failed to persist cart snapshot");
            return Err(e.into());
        }

        *self.lock_cart() = next;
        Ok(())
    }

    fn report(&self, operation: CartOperation, err: &CartError) {
        match err {
            CartError::Inventory(_) | CartError::Storage(_) => {
                error!(operation = %operation, error = %err, "Cart operation failed")
            }
            _ => warn!(operation = %operation, error = %err, "Cart operation rejected"),
        }

        self.notifier.notify(operation, err.user_message(operation));
    }

    fn lock_cart(&self) -> MutexGuard<'_, Cart> {
        self.cart.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Reads the starting cart from the slot.
async fn hydrate<S: SnapshotStorage>(storage: &S, key: &str) -> CartResult<Cart> {
    let Some(json) = storage.read(key).await? else {
        debug!(key = %key, "No cart snapshot, starting empty");
        return Ok(Cart::new());
    };

    match Cart::decode_snapshot(&json) {
        Ok(cart) => Ok(cart),
        Err(e) => {
            warn!(key = %key, error = %e, "Unreadable cart snapshot, starting empty");
            Ok(Cart::new())
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
