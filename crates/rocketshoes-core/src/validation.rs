//! # Validation Module
//!
//! Stock and quantity checks shared by every cart mutation.
//!
//! ## Where Checks Happen
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Mutation Checks                                    │
//! │                                                                         │
//! │  add_product(id)                                                        │
//! │  └── ensure_stock(stock, current + 1)                                  │
//! │                                                                         │
//! │  update_product_amount(id, amount)                                      │
//! │  ├── target_amount(amount)      ← None for 0 / negative (silent no-op) │
//! │  └── ensure_stock(stock, amount)                                        │
//! │                                                                         │
//! │  remove_product(id)                                                     │
//! │  └── (no stock check)                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::{CartError, CartResult, ValidationError};
use crate::types::Stock;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Interprets a requested absolute quantity.
///
/// ## Rules
/// - `amount <= 0` → `Ok(None)`: the request is ignored, never an error
/// - `amount > u32::MAX` → `Err(OutOfRange)`
/// - otherwise → `Ok(Some(amount))`
///
/// ## Example
/// ```rust
/// use rocketshoes_core::validation::target_amount;
///
/// assert_eq!(target_amount(3).unwrap(), Some(3));
/// assert_eq!(target_amount(0).unwrap(), None);
/// assert_eq!(target_amount(-2).unwrap(), None);
/// assert!(target_amount(i64::MAX).is_err());
/// ```
pub fn target_amount(amount: i64) -> ValidationResult<Option<u32>> {
    if amount <= 0 {
        return Ok(None);
    }

    u32::try_from(amount)
        .map(Some)
        .map_err(|_| ValidationError::OutOfRange {
            field: "amount".to_string(),
            min: 1,
            max: i64::from(u32::MAX),
        })
}

/// Checks that `stock` covers a cart quantity of `requested`.
///
/// `stock.amount == requested` is allowed: the shopper may take the last unit.
///
/// ## Example
/// ```rust
/// use rocketshoes_core::validation::ensure_stock;
/// use rocketshoes_core::{ProductId, Stock};
///
/// let stock = Stock { id: ProductId::new(1), amount: 5 };
/// assert!(ensure_stock(&stock, 5).is_ok());
/// assert!(ensure_stock(&stock, 6).is_err());
/// ```
pub fn ensure_stock(stock: &Stock, requested: u32) -> CartResult<()> {
    let requested = i64::from(requested);

    if stock.amount < requested {
        return Err(CartError::OutOfStock {
            id: stock.id,
            available: stock.amount,
            requested,
        });
    }

    Ok(())
}

/// Quantity an entry would have after one more add.
///
/// `None` for an absent entry yields 1.
pub fn next_amount(current: Option<u32>) -> ValidationResult<u32> {
    match current {
        None => Ok(1),
        Some(amount) => amount.checked_add(1).ok_or(ValidationError::OutOfRange {
            field: "amount".to_string(),
            min: 1,
            max: i64::from(u32::MAX),
        }),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ProductId;

    fn stock(amount: i64) -> Stock {
        Stock {
            id: ProductId::new(1),
            amount,
        }
    }

    #[test]
    fn test_target_amount() {
        assert_eq!(target_amount(1).unwrap(), Some(1));
        assert_eq!(target_amount(999).unwrap(), Some(999));
        assert_eq!(target_amount(0).unwrap(), None);
        assert_eq!(target_amount(-10).unwrap(), None);
        assert!(target_amount(i64::from(u32::MAX) + 1).is_err());
    }

    #[test]
    fn test_ensure_stock_boundaries() {
        assert!(ensure_stock(&stock(5), 4).is_ok());
        assert!(ensure_stock(&stock(5), 5).is_ok());

        let err = ensure_stock(&stock(5), 6).unwrap_err();
        assert!(matches!(
            err,
            CartError::OutOfStock {
                available: 5,
                requested: 6,
                ..
            }
        ));
    }

    #[test]
    fn test_ensure_stock_zero_and_negative_stock() {
        assert!(ensure_stock(&stock(0), 1).is_err());
        assert!(ensure_stock(&stock(-3), 1).is_err());
    }

    #[test]
    fn test_next_amount() {
        assert_eq!(next_amount(None).unwrap(), 1);
        assert_eq!(next_amount(Some(4)).unwrap(), 5);
        assert!(next_amount(Some(u32::MAX)).is_err());
    }
}
