//! # Money Module
//!
//! Provides the `Money` type for prices and cart totals.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  The catalog sends prices as JSON numbers:  "price": 179.9              │
//! │                                                                         │
//! │  Summing floats for a cart total drifts:                                │
//! │    0.1 + 0.2 = 0.30000000000000004                                      │
//! │                                                                         │
//! │  OUR SOLUTION: decode once into integer cents, do all math on i64,     │
//! │  encode back to a decimal number only at the wire boundary.            │
//! │    179.9 ──► 17990 cents ──► × amount ──► Σ ──► 359.8                  │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use rocketshoes_core::money::Money;
//!
//! let price = Money::from_cents(17990); // 179.90
//! let total = price * 2 + Money::from_cents(10);
//! assert_eq!(total.cents(), 35990);
//! ```

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents).
///
/// ## Wire Format
/// Serialized as a decimal number of major units (`179.9`), because that
/// is what the catalog service and existing cart snapshots contain.
/// Internally it is always an `i64` of cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, TS)]
#[ts(export)]
pub struct Money(#[ts(type = "number")] i64);

impl Money {
    /// Creates a Money value from cents.
    ///
    /// ## Example
    /// ```rust
    /// use rocketshoes_core::money::Money;
    ///
    /// let price = Money::from_cents(1099);
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Converts a decimal major-unit amount (as found on the wire) to cents.
    ///
    /// Rounds to the nearest cent. Returns `None` for NaN, infinities and
    /// values outside the `i64` cents range.
    ///
    /// ## Example
    /// ```rust
    /// use rocketshoes_core::money::Money;
    ///
    /// assert_eq!(Money::from_major(179.9).unwrap().cents(), 17990);
    /// assert!(Money::from_major(f64::NAN).is_none());
    /// ```
    pub fn from_major(major: f64) -> Option<Self> {
        if !major.is_finite() {
            return None;
        }
        let cents = (major * 100.0).round();
        if cents < i64::MIN as f64 || cents > i64::MAX as f64 {
            return None;
        }
        Some(Money(cents as i64))
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the value as decimal major units (for the wire only).
    #[inline]
    pub fn as_major(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Multiplies money by a quantity, saturating at the `i64` bounds.
    ///
    /// ## Example
    /// ```rust
    /// use rocketshoes_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(13990);
    /// assert_eq!(unit_price.multiply_quantity(3).cents(), 41970);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }

    /// Formats the value with a currency symbol and a fixed number of decimals.
    ///
    /// ## Example
    /// ```rust
    /// use rocketshoes_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(17990).format("R$", 2), "R$179.90");
    /// assert_eq!(Money::from_cents(-550).format("$", 2), "-$5.50");
    /// assert_eq!(Money::from_cents(17995).format("R$", 1), "R$180.0");
    /// ```
    ///
    /// Prints exactly `decimals` fraction digits. Fewer than two rounds
    /// half away from zero; more than two pads with zeros.
    pub fn format(&self, symbol: &str, decimals: u8) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        let cents = self.0.unsigned_abs();

        match decimals {
            0 => format!("{}{}{}", sign, symbol, (cents / 100) + u64::from(cents % 100 >= 50)),
            1 => {
                let tenths = (cents / 10) + u64::from(cents % 10 >= 5);
                format!("{}{}{}.{}", sign, symbol, tenths / 10, tenths % 10)
            }
            _ => {
                let padding = "0".repeat(usize::from(decimals - 2));
                format!(
                    "{}{}{}.{:02}{}",
                    sign,
                    symbol,
                    cents / 100,
                    cents % 100,
                    padding
                )
            }
        }
    }
}

// =============================================================================
// Serde (decimal major units on the wire)
// =============================================================================

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_major())
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let major = f64::deserialize(deserializer)?;
        Money::from_major(major)
            .ok_or_else(|| de::Error::custom(format!("price out of range: {major}")))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

// Arithmetic saturates: a cart total past i64::MAX cents reads as the
// maximum instead of aborting the read.

/// Debug-oriented display without a currency symbol.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format("", 2))
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        self.multiply_quantity(qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_major_rounds_to_cents() {
        assert_eq!(Money::from_major(179.9).unwrap().cents(), 17990);
        assert_eq!(Money::from_major(139.9).unwrap().cents(), 13990);
        assert_eq!(Money::from_major(0.1 + 0.2).unwrap().cents(), 30);
        assert_eq!(Money::from_major(100.0).unwrap().cents(), 10000);
        assert!(Money::from_major(f64::INFINITY).is_none());
        assert!(Money::from_major(1e300).is_none());
    }

    #[test]
    fn test_wire_format() {
        let price = Money::from_cents(17990);
        assert_eq!(serde_json::to_string(&price).unwrap(), "179.9");

        let decoded: Money = serde_json::from_str("179.9").unwrap();
        assert_eq!(decoded, price);

        // Integers on the wire are accepted too
        let whole: Money = serde_json::from_str("200").unwrap();
        assert_eq!(whole.cents(), 20000);
    }

    #[test]
    fn test_format() {
        let price = Money::from_cents(17990);
        assert_eq!(price.format("R$", 2), "R$179.90");
        assert_eq!(price.format("$", 0), "$180");
        assert_eq!(Money::from_cents(5).format("$", 2), "$0.05");
        assert_eq!(Money::from_cents(-550).format("$", 2), "-$5.50");
        assert_eq!(format!("{}", Money::from_cents(1099)), "10.99");
    }

    #[test]
    fn test_format_uses_requested_decimals() {
        assert_eq!(Money::from_cents(17990).format("R$", 1), "R$179.9");
        assert_eq!(Money::from_cents(17995).format("R$", 1), "R$180.0");
        assert_eq!(Money::from_cents(-17994).format("R$", 1), "-R$179.9");
        assert_eq!(Money::from_cents(17990).format("R$", 3), "R$179.900");
        assert_eq!(Money::from_cents(i64::MAX).format("", 0), "92233720368547758");
        assert_eq!(Money::from_cents(i64::MAX).format("", 1), "92233720368547758.1");
    }

    #[test]
    fn test_arithmetic_and_sum() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        assert_eq!((a * 3).cents(), 3000);

        let total: Money = vec![a, b, b].into_iter().sum();
        assert_eq!(total.cents(), 2000);
    }

    #[test]
    fn test_arithmetic_saturates_instead_of_overflowing() {
        let huge = Money::from_cents(5_000_000_000_000_000_000);

        assert_eq!(huge.multiply_quantity(2).cents(), i64::MAX);
        assert_eq!((huge * 3).cents(), i64::MAX);
        assert_eq!((huge + huge).cents(), i64::MAX);
        assert_eq!((Money::from_cents(i64::MIN) - huge).cents(), i64::MIN);

        let mut acc = huge;
        acc += huge;
        assert_eq!(acc.cents(), i64::MAX);

        let total: Money = vec![huge, huge, huge].into_iter().sum();
        assert_eq!(total.cents(), i64::MAX);
    }
}
