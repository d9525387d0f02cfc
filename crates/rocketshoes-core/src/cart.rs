//! # Cart
//!
//! The ordered list of cart entries and the rules every mutation obeys.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart List Operations                                 │
//! │                                                                         │
//! │  Store Operation          Cart Method             List Change           │
//! │  ───────────────          ───────────             ───────────           │
//! │                                                                         │
//! │  add (absent) ───────────► push_new() ──────────► entries.push(p, 1)   │
//! │                                                                         │
//! │  add (present) ──────────► increment() ─────────► entries[i].amount+1  │
//! │                                                                         │
//! │  update amount ──────────► set_amount() ────────► entries[i].amount=n  │
//! │                                                                         │
//! │  remove ─────────────────► remove() ────────────► entries.remove(i)    │
//! │                                                                         │
//! │  NOTE: the store mutates a CLONE, persists it, then swaps it in.       │
//! │        A failed persist leaves the live cart untouched.                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashSet;
use ts_rs::TS;

use crate::error::{CartError, CartResult, StorageError, ValidationError};
use crate::money::Money;
use crate::types::{CatalogProduct, Product, ProductId};
use crate::validation;

/// The shopping cart.
///
/// ## Invariants
/// - Entries are unique by `id` (adding the same product increments it)
/// - Every entry has `amount >= 1`
/// - Insertion order is preserved
///
/// ## Snapshot Format
/// Serializes as a bare JSON array of [`Product`] objects, the exact shape
/// the storefront persisted under [`CART_STORAGE_KEY`](crate::CART_STORAGE_KEY).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Cart {
    entries: Vec<Product>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart {
            entries: Vec::new(),
        }
    }

    /// Builds a cart from raw entries, enforcing the invariants.
    ///
    /// ## Normalization
    /// - Entries with `amount == 0` are dropped
    /// - For duplicate ids the first entry wins
    pub fn from_entries(entries: Vec<Product>) -> Self {
        let mut seen = HashSet::new();
        let entries = entries
            .into_iter()
            .filter(|p| p.amount > 0)
            .filter(|p| seen.insert(p.id))
            .collect();

        Cart { entries }
    }

    /// Decodes a persisted snapshot.
    ///
    /// The decoded list is normalized with [`Cart::from_entries`].
    pub fn decode_snapshot(json: &str) -> Result<Self, StorageError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Encodes the cart as a snapshot (a JSON array).
    pub fn encode_snapshot(&self) -> Result<String, StorageError> {
        Ok(serde_json::to_string(&self.entries)?)
    }

    // =========================================================================
    // Read Access
    // =========================================================================

    /// Entries in insertion order.
    pub fn entries(&self) -> &[Product] {
        &self.entries
    }

    /// Returns the entry for `id`, if present.
    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.entries.iter().find(|p| p.id == id)
    }

    pub fn contains(&self, id: ProductId) -> bool {
        self.get(id).is_some()
    }

    /// Current cart quantity of `id`, if present.
    pub fn amount_of(&self, id: ProductId) -> Option<u32> {
        self.get(id).map(|p| p.amount)
    }

    /// Number of distinct products (the header badge count).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Appends a new entry with `amount = 1`.
    ///
    /// ## Returns
    /// - `Err(AlreadyInCart)` if an entry for this id exists
    pub fn push_new(&mut self, product: CatalogProduct) -> CartResult<()> {
        if self.contains(product.id) {
            return Err(CartError::AlreadyInCart(product.id));
        }

        self.entries.push(Product::from_catalog(product, 1));
        Ok(())
    }

    /// Increases the amount of an existing entry by one.
    ///
    /// ## Returns
    /// The new amount, or `Err(NotInCart)`.
    pub fn increment(&mut self, id: ProductId) -> CartResult<u32> {
        let entry = self.get_mut(id)?;
        let next = validation::next_amount(Some(entry.amount))?;
        entry.amount = next;
        Ok(next)
    }

    /// Replaces the amount of an existing entry (absolute, not additive).
    ///
    /// ## Returns
    /// - `Err(Validation)` for `amount == 0` (use [`Cart::remove`] instead)
    /// - `Err(NotInCart)` if the product is absent
    pub fn set_amount(&mut self, id: ProductId, amount: u32) -> CartResult<()> {
        if amount == 0 {
            return Err(ValidationError::MustBePositive {
                field: "amount".to_string(),
            }
            .into());
        }

        self.get_mut(id)?.amount = amount;
        Ok(())
    }

    /// Removes the entry for `id` and returns it.
    pub fn remove(&mut self, id: ProductId) -> CartResult<Product> {
        let index = self
            .entries
            .iter()
            .position(|p| p.id == id)
            .ok_or(CartError::NotInCart(id))?;

        Ok(self.entries.remove(index))
    }

    fn get_mut(&mut self, id: ProductId) -> CartResult<&mut Product> {
        self.entries
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(CartError::NotInCart(id))
    }

    // =========================================================================
    // Totals
    // =========================================================================

    /// Total quantity across all entries.
    pub fn total_quantity(&self) -> u64 {
        self.entries.iter().map(|p| u64::from(p.amount)).sum()
    }

    /// Sum of every entry's `price × amount`.
    pub fn total(&self) -> Money {
        self.entries.iter().map(Product::subtotal).sum()
    }

    /// Display-ready totals.
    pub fn summary(&self) -> CartSummary {
        CartSummary::from(self)
    }
}

/// Deserializing goes through [`Cart::from_entries`], so a decoded cart
/// always satisfies the invariants.
impl<'de> Deserialize<'de> for Cart {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Vec::<Product>::deserialize(deserializer).map(Cart::from_entries)
    }
}

// =============================================================================
// Summary
// =============================================================================

/// Per-entry line of a [`CartSummary`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct EntrySummary {
    pub id: ProductId,
    pub title: String,
    pub price: Money,
    pub amount: u32,
    pub subtotal: Money,
}

/// Cart totals for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartSummary {
    /// Distinct products in the cart
    #[ts(type = "number")]
    pub item_count: usize,
    #[ts(type = "number")]
    pub total_quantity: u64,
    pub entries: Vec<EntrySummary>,
    pub total: Money,
}

impl From<&Cart> for CartSummary {
    fn from(cart: &Cart) -> Self {
        CartSummary {
            item_count: cart.len(),
            total_quantity: cart.total_quantity(),
            entries: cart
                .entries()
                .iter()
                .map(|p| EntrySummary {
                    id: p.id,
                    title: p.title.clone(),
                    price: p.price,
                    amount: p.amount,
                    subtotal: p.subtotal(),
                })
                .collect(),
            total: cart.total(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog(id: u64, price_cents: i64) -> CatalogProduct {
        CatalogProduct::new(
            id,
            format!("Tênis {}", id),
            Money::from_cents(price_cents),
            format!("https://example.com/tenis{}.jpg", id),
        )
    }

    fn entry(id: u64, amount: u32) -> Product {
        Product::from_catalog(catalog(id, 10000), amount)
    }

    #[test]
    fn test_push_new_starts_at_one() {
        let mut cart = Cart::new();
        cart.push_new(catalog(1, 17990)).unwrap();

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.amount_of(ProductId::new(1)), Some(1));
    }

    #[test]
    fn test_push_new_rejects_duplicates() {
        let mut cart = Cart::new();
        cart.push_new(catalog(1, 17990)).unwrap();

        let err = cart.push_new(catalog(1, 17990)).unwrap_err();
        assert!(matches!(err, CartError::AlreadyInCart(_)));
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_increment() {
        let mut cart = Cart::from_entries(vec![entry(1, 4)]);

        assert_eq!(cart.increment(ProductId::new(1)).unwrap(), 5);
        assert!(matches!(
            cart.increment(ProductId::new(2)),
            Err(CartError::NotInCart(_))
        ));
    }

    #[test]
    fn test_set_amount_is_absolute() {
        let mut cart = Cart::from_entries(vec![entry(2, 3)]);

        cart.set_amount(ProductId::new(2), 2).unwrap();
        assert_eq!(cart.amount_of(ProductId::new(2)), Some(2));

        assert!(cart.set_amount(ProductId::new(2), 0).is_err());
        assert_eq!(cart.amount_of(ProductId::new(2)), Some(2));

        assert!(matches!(
            cart.set_amount(ProductId::new(7), 1),
            Err(CartError::NotInCart(_))
        ));
    }

    #[test]
    fn test_remove_keeps_order() {
        let mut cart = Cart::from_entries(vec![entry(1, 1), entry(2, 2), entry(3, 3)]);

        let removed = cart.remove(ProductId::new(2)).unwrap();
        assert_eq!(removed.amount, 2);

        let ids: Vec<u64> = cart.entries().iter().map(|p| p.id.get()).collect();
        assert_eq!(ids, vec![1, 3]);

        assert!(matches!(
            cart.remove(ProductId::new(2)),
            Err(CartError::NotInCart(_))
        ));
    }

    #[test]
    fn test_from_entries_normalizes() {
        let cart = Cart::from_entries(vec![entry(1, 2), entry(2, 0), entry(1, 9), entry(3, 1)]);

        let ids: Vec<u64> = cart.entries().iter().map(|p| p.id.get()).collect();
        assert_eq!(ids, vec![1, 3]);
        assert_eq!(cart.amount_of(ProductId::new(1)), Some(2));
    }

    #[test]
    fn test_snapshot_round_trip_preserves_order() {
        let cart = Cart::from_entries(vec![entry(3, 1), entry(1, 4), entry(2, 2)]);

        let json = cart.encode_snapshot().unwrap();
        let restored = Cart::decode_snapshot(&json).unwrap();

        assert_eq!(restored, cart);
    }

    #[test]
    fn test_decodes_storefront_snapshot() {
        let json = r#"[
            {"id":1,"title":"Tenis de Caminhada","price":179.9,"image":"a.jpg","amount":2},
            {"id":3,"title":"Tenis Adidas","price":219.9,"image":"b.jpg","amount":1}
        ]"#;

        let cart = Cart::decode_snapshot(json).unwrap();
        assert_eq!(cart.len(), 2);
        assert_eq!(cart.total().cents(), 17990 * 2 + 21990);
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(Cart::decode_snapshot("not json").is_err());
        assert!(Cart::decode_snapshot(r#"[{"id":1,"amount":-1}]"#).is_err());
    }

    #[test]
    fn test_summary() {
        let mut cart = Cart::new();
        cart.push_new(catalog(1, 17990)).unwrap();
        cart.increment(ProductId::new(1)).unwrap();
        cart.push_new(catalog(2, 13990)).unwrap();

        let summary = cart.summary();
        assert_eq!(summary.item_count, 2);
        assert_eq!(summary.total_quantity, 3);
        assert_eq!(summary.entries[0].subtotal.cents(), 35980);
        assert_eq!(summary.total.cents(), 35980 + 13990);
    }
}
