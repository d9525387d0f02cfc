//! # Domain Types
//!
//! Core domain types used throughout the RocketShoes cart.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │ CatalogProduct  │   │    Product      │   │     Stock       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │──►│  id             │   │  id             │       │
//! │  │  title          │   │  title          │   │  amount         │       │
//! │  │  price          │   │  price          │   │  (available)    │       │
//! │  │  image          │   │  image          │   │                 │       │
//! │  │                 │   │  amount (cart)  │   │                 │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │   from the catalog      one cart entry        from the stock API       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Compatibility
//! Field names match the catalog JSON (`id`, `title`, `price`, `image`,
//! `amount`), so the same types decode API responses and cart snapshots.
//! Any other catalog attribute lands in `extra` and is written back
//! unchanged; a missing `title` or `image` decodes as an empty string.

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Product Identifier
// =============================================================================

/// Catalog-wide unique product identifier.
///
/// Serialized as a bare JSON number (`{"id": 1}`).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub struct ProductId(#[ts(type = "number")] u64);

impl ProductId {
    /// Wraps a raw identifier.
    #[inline]
    pub const fn new(id: u64) -> Self {
        ProductId(id)
    }

    /// Returns the raw identifier.
    #[inline]
    pub const fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ProductId {
    fn from(id: u64) -> Self {
        ProductId(id)
    }
}

impl std::str::FromStr for ProductId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<u64>().map(ProductId)
    }
}

// =============================================================================
// Catalog Product
// =============================================================================

/// A product as the catalog service describes it.
///
/// The display attributes are opaque to the cart logic: they are copied
/// into the cart entry when the product is first added and never
/// refreshed afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CatalogProduct {
    pub id: ProductId,
    #[serde(default)]
    pub title: String,
    pub price: Money,
    #[serde(default)]
    pub image: String,
    /// Attributes the cart does not interpret (brand, sizes, ...)
    #[serde(flatten)]
    #[ts(skip)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl CatalogProduct {
    /// Builds a catalog product with no extra attributes.
    pub fn new(
        id: impl Into<ProductId>,
        title: impl Into<String>,
        price: Money,
        image: impl Into<String>,
    ) -> Self {
        CatalogProduct {
            id: id.into(),
            title: title.into(),
            price,
            image: image.into(),
            extra: serde_json::Map::new(),
        }
    }
}

// =============================================================================
// Product (cart entry)
// =============================================================================

/// One entry of the cart: the catalog attributes plus the chosen quantity.
///
/// ## Invariant
/// `amount` is always >= 1 while the entry is in a [`Cart`](crate::Cart).
/// The cart removes an entry instead of letting it reach zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Product {
    pub id: ProductId,
    #[serde(default)]
    pub title: String,
    pub price: Money,
    #[serde(default)]
    pub image: String,
    /// Quantity currently in the cart
    pub amount: u32,
    #[serde(flatten)]
    #[ts(skip)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Product {
    /// Builds a cart entry from catalog data with the given quantity.
    pub fn from_catalog(product: CatalogProduct, amount: u32) -> Self {
        Product {
            id: product.id,
            title: product.title,
            price: product.price,
            image: product.image,
            amount,
            extra: product.extra,
        }
    }

    /// The catalog attributes of this entry, without the quantity.
    pub fn catalog(&self) -> CatalogProduct {
        CatalogProduct {
            id: self.id,
            title: self.title.clone(),
            price: self.price,
            image: self.image.clone(),
            extra: self.extra.clone(),
        }
    }

    /// Price × amount for this entry.
    pub fn subtotal(&self) -> Money {
        self.price.multiply_quantity(i64::from(self.amount))
    }
}

// =============================================================================
// Stock
// =============================================================================

/// Available inventory for one product, as reported by the stock service.
///
/// `amount` is signed: the service is an opaque collaborator and a
/// negative reading simply means "nothing available".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Stock {
    pub id: ProductId,
    #[ts(type = "number")]
    pub amount: i64,
}

// =============================================================================
// Update Request
// =============================================================================

/// Request to set an entry's quantity to an absolute value.
///
/// `amount` is signed on purpose: zero and negative requests are legal
/// inputs and are ignored by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct UpdateProductAmount {
    pub product_id: ProductId,
    #[ts(type = "number")]
    pub amount: i64,
}

impl UpdateProductAmount {
    pub fn new(product_id: impl Into<ProductId>, amount: i64) -> Self {
        UpdateProductAmount {
            product_id: product_id.into(),
            amount,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
