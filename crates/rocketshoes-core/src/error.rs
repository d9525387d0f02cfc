//! # Error Types
//!
//! Domain-specific error types for the RocketShoes cart.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  rocketshoes-core errors (this file)                                   │
//! │  ├── CartError        - Why a cart mutation was rejected               │
//! │  ├── InventoryError   - Stock/catalog collaborator failures            │
//! │  ├── StorageError     - Snapshot slot failures                         │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  rocketshoes-db   → DbError   (mapped into StorageError)               │
//! │  rocketshoes-api  → ApiError  (mapped into InventoryError)             │
//! │                                                                         │
//! │  Flow: DbError/ApiError → CartError → user_message() → Notifier        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (product id, amounts)
//! 3. Every error maps to exactly one user-facing message per operation

use thiserror::Error;

use crate::types::ProductId;
use crate::{MSG_ADD_FAILED, MSG_OUT_OF_STOCK, MSG_REMOVE_FAILED, MSG_UPDATE_FAILED};

// =============================================================================
// Cart Error
// =============================================================================

/// Why a cart mutation did not apply.
///
/// A rejected mutation never changes the cart or its snapshot.
#[derive(Debug, Error)]
pub enum CartError {
    /// Requested quantity exceeds available stock.
    ///
    /// ## User Workflow
    /// ```text
    /// add_product(1)  (cart has 5, stock is 5)
    ///      │
    ///      ▼
    /// requested = 6, available = 5
    ///      │
    ///      ▼
    /// OutOfStock { id: 1, available: 5, requested: 6 }
    ///      │
    ///      ▼
    /// UI shows: "Quantidade solicitada fora de estoque"
    /// ```
    #[error("Insufficient stock for product {id}: available {available}, requested {requested}")]
    OutOfStock {
        id: ProductId,
        available: i64,
        requested: i64,
    },

    /// The operation targets a product that is not in the cart.
    #[error("Product {0} is not in the cart")]
    NotInCart(ProductId),

    /// An entry for this product already exists (adds must increment it).
    #[error("Product {0} is already in the cart")]
    AlreadyInCart(ProductId),

    /// Stock or catalog lookup failed.
    #[error("Inventory lookup failed: {0}")]
    Inventory(#[from] InventoryError),

    /// Reading or writing the cart snapshot failed.
    #[error("Cart storage failed: {0}")]
    Storage(#[from] StorageError),

    /// Input outside the representable range.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl CartError {
    /// Returns true for the stock-insufficiency category.
    pub fn is_out_of_stock(&self) -> bool {
        matches!(self, CartError::OutOfStock { .. })
    }

    /// The message shown to the shopper when `operation` fails with this error.
    ///
    /// Stock insufficiency has its own text; everything else collapses into
    /// the operation's generic failure message.
    pub fn user_message(&self, operation: CartOperation) -> &'static str {
        if self.is_out_of_stock() {
            MSG_OUT_OF_STOCK
        } else {
            operation.failure_message()
        }
    }
}

/// The three public cart mutations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartOperation {
    Add,
    Remove,
    UpdateAmount,
}

impl CartOperation {
    /// Generic failure text for this operation.
    pub fn failure_message(&self) -> &'static str {
        match self {
            CartOperation::Add => MSG_ADD_FAILED,
            CartOperation::Remove => MSG_REMOVE_FAILED,
            CartOperation::UpdateAmount => MSG_UPDATE_FAILED,
        }
    }
}

impl std::fmt::Display for CartOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CartOperation::Add => write!(f, "add_product"),
            CartOperation::Remove => write!(f, "remove_product"),
            CartOperation::UpdateAmount => write!(f, "update_product_amount"),
        }
    }
}

// =============================================================================
// Collaborator Errors
// =============================================================================

/// Failures of the stock/catalog collaborator.
#[derive(Debug, Error)]
pub enum InventoryError {
    /// The collaborator does not know this product.
    #[error("Product {0} not found")]
    NotFound(ProductId),

    /// The collaborator could not be reached or answered with an error.
    #[error("Inventory service unavailable: {0}")]
    Unavailable(String),

    /// The collaborator answered with data we cannot use.
    #[error("Invalid inventory response: {0}")]
    InvalidResponse(String),
}

/// Failures of the snapshot slot.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backing store failed to read or write.
    #[error("Storage backend error: {0}")]
    Backend(String),

    /// The cart could not be encoded or the stored blob decoded.
    #[error("Snapshot serialization failed: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        StorageError::Serialization(err.to_string())
    }
}

impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        StorageError::Backend(err.to_string())
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CartError.
pub type CartResult<T> = Result<T, CartError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CartError::OutOfStock {
            id: ProductId::new(1),
            available: 5,
            requested: 6,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient stock for product 1: available 5, requested 6"
        );

        let err = CartError::NotInCart(ProductId::new(9));
        assert_eq!(err.to_string(), "Product 9 is not in the cart");
    }

    #[test]
    fn test_out_of_stock_has_its_own_message() {
        let err = CartError::OutOfStock {
            id: ProductId::new(1),
            available: 0,
            requested: 1,
        };
        assert_eq!(err.user_message(CartOperation::Add), MSG_OUT_OF_STOCK);
        assert_eq!(err.user_message(CartOperation::UpdateAmount), MSG_OUT_OF_STOCK);
    }

    #[test]
    fn test_notification_texts_match_storefront() {
        let out_of_stock = CartError::OutOfStock {
            id: ProductId::new(1),
            available: 0,
            requested: 1,
        };
        assert_eq!(
            out_of_stock.user_message(CartOperation::Add),
            "Quantidade solicitada fora de estoque"
        );

        let remote: CartError = InventoryError::Unavailable("timeout".into()).into();
        assert_eq!(remote.user_message(CartOperation::Add), "Erro na adição do produto");

        let missing = CartError::NotInCart(ProductId::new(3));
        assert_eq!(missing.user_message(CartOperation::Remove), "Erro na remoção do produto");
        assert_eq!(
            missing.user_message(CartOperation::UpdateAmount),
            "Erro na alteração de quantidade do produto"
        );
    }

    #[test]
    fn test_other_errors_use_operation_message() {
        let remote: CartError = InventoryError::Unavailable("timeout".into()).into();
        assert_eq!(remote.user_message(CartOperation::Add), MSG_ADD_FAILED);

        let missing = CartError::NotInCart(ProductId::new(3));
        assert_eq!(missing.user_message(CartOperation::Remove), MSG_REMOVE_FAILED);
        assert_eq!(missing.user_message(CartOperation::UpdateAmount), MSG_UPDATE_FAILED);

        let storage: CartError = StorageError::Backend("disk full".into()).into();
        assert_eq!(storage.user_message(CartOperation::Remove), MSG_REMOVE_FAILED);
    }

    #[test]
    fn test_validation_converts_to_cart_error() {
        let validation_err = ValidationError::MustBePositive {
            field: "amount".to_string(),
        };
        let cart_err: CartError = validation_err.into();
        assert!(matches!(cart_err, CartError::Validation(_)));
    }
}
