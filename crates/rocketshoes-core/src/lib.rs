//! # rocketshoes-core: Pure Cart Rules
//!
//! This crate is the **heart** of the RocketShoes cart. It contains the cart
//! rules as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     RocketShoes Cart Architecture                       │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 UI surface (CLI / storefront)                   │   │
//! │  │     Product list ──► Cart page ──► Header badge                 │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              Cart Store (rocketshoes-cart)                      │   │
//! │  │   add_product, remove_product, update_product_amount            │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │            ★ rocketshoes-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   cart    │  │ validation│  │   │
//! │  │   │  Product  │  │   Money   │  │   Cart    │  │   stock   │  │   │
//! │  │   │   Stock   │  │  (cents)  │  │  Summary  │  │  amounts  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO STORAGE • NO NETWORK • PURE FUNCTIONS            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (ProductId, Product, CatalogProduct, Stock)
//! - [`money`] - Money type with integer arithmetic
//! - [`cart`] - The ordered cart list and its entry rules
//! - [`error`] - Domain error types and user-facing messages
//! - [`validation`] - Stock and amount checks
//!
//! ## Example Usage
//!
//! ```rust
//! use rocketshoes_core::{Cart, CatalogProduct, Money, ProductId};
//!
//! let sneaker = CatalogProduct::new(
//!     1,
//!     "Tênis de Caminhada Leve Confortável",
//!     Money::from_cents(17990),
//!     "https://example.com/1.jpg",
//! );
//!
//! let mut cart = Cart::new();
//! cart.push_new(sneaker).unwrap();
//! cart.increment(ProductId::new(1)).unwrap();
//!
//! assert_eq!(cart.amount_of(ProductId::new(1)), Some(2));
//! assert_eq!(cart.summary().total.cents(), 35980);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartSummary, EntrySummary};
pub use error::{CartError, CartOperation, CartResult, InventoryError, StorageError, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Key of the persisted cart snapshot in the durable slot store.
///
/// Kept byte-identical to the key the storefront front-end already writes,
/// so an existing browser snapshot can be imported as-is.
pub const CART_STORAGE_KEY: &str = "@RocketShoes:cart";

/// Notification shown when the requested quantity exceeds available stock.
pub const MSG_OUT_OF_STOCK: &str = "Quantidade solicitada fora de estoque";

/// Notification shown when adding a product fails for any other reason.
pub const MSG_ADD_FAILED: &str = "Erro na adição do produto";

/// Notification shown when removing a product fails.
pub const MSG_REMOVE_FAILED: &str = "Erro na remoção do produto";

/// Notification shown when changing a product quantity fails.
pub const MSG_UPDATE_FAILED: &str = "Erro na alteração de quantidade do produto";
