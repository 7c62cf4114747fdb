//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In floating point:                                                     │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  A till that counts physical coins cannot "almost" balance:             │
//! │    ₱10.00 / 3 = ₱3.33 (×3 = ₱9.99)  → Lost ₱0.01!                      │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Centavos                                         │
//! │    1000 centavos / 3 = 333 centavos (×3 = 999 centavos)                │
//! │    We KNOW we lost 1 centavo, and handle it explicitly                 │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use vendo_core::money::Money;
//!
//! // Create from centavos (preferred)
//! let price = Money::from_cents(1550); // ₱15.50
//!
//! // Or from whole pesos, the unit denominations are expressed in
//! let bill = Money::from_pesos(100); // ₱100.00
//!
//! // Arithmetic operations
//! let total = price + bill; // ₱115.50
//!
//! // NEVER do this:
//! // let bad = Money::from_float(15.50); // NO SUCH METHOD EXISTS!
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (centavos).
///
/// ## Design Decisions
/// - **i64 (signed)**: Allows negative values for refunds and shortfalls
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Derives**: Full serde support for report snapshots
///
/// ## Where Money Flows
/// ```text
/// Product.price_cents ──► Order.total ──► Tender ──► change due
///                                  │
///                                  └──► LineItem.line_total ──► collections
///
/// EVERY monetary value in the system flows through this type
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from centavos (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use vendo_core::money::Money;
    ///
    /// let price = Money::from_cents(1550); // Represents ₱15.50
    /// assert_eq!(price.cents(), 1550);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from whole pesos.
    ///
    /// Denominations, prices entered by operators, and tendered bills are all
    /// whole-peso amounts, so this is the most common constructor.
    ///
    /// ## Example
    /// ```rust
    /// use vendo_core::money::Money;
    ///
    /// let bill = Money::from_pesos(500);
    /// assert_eq!(bill.cents(), 50_000);
    /// ```
    #[inline]
    pub const fn from_pesos(pesos: i64) -> Self {
        Money(pesos * 100)
    }

    /// Returns the value in centavos (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the whole-peso portion.
    ///
    /// ## Example
    /// ```rust
    /// use vendo_core::money::Money;
    ///
    /// let price = Money::from_cents(1550);
    /// assert_eq!(price.pesos(), 15);
    /// ```
    #[inline]
    pub const fn pesos(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the centavo portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies money by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use vendo_core::money::Money;
    ///
    /// let unit_price = Money::from_pesos(15); // ₱15.00
    /// let line_total = unit_price.multiply_quantity(3);
    /// assert_eq!(line_total.cents(), 4500); // ₱45.00
    /// ```
    ///
    /// ## User Workflow
    /// ```text
    /// Product: Juice ₱15.00
    /// Quantity: 3
    ///      │
    ///      ▼
    /// multiply_quantity(3) ← THIS FUNCTION
    ///      │
    ///      ▼
    /// Line Total: ₱45.00
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money in a human-readable format.
///
/// ## Note
/// This is for reports and logs. A presentation layer should do its own
/// formatting to handle localization properly.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}₱{}.{:02}", sign, self.pesos().abs(), self.cents_part())
    }
}

/// Addition of two Money values.
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

/// Addition assignment (+=).
impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

/// Subtraction of two Money values.
impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

/// Subtraction assignment (-=).
impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by integer (for quantity calculations).
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

/// Summation over iterators of Money (journal totals).
impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1550);
        assert_eq!(money.cents(), 1550);
        assert_eq!(money.pesos(), 15);
        assert_eq!(money.cents_part(), 50);
    }

    #[test]
    fn test_from_pesos() {
        let money = Money::from_pesos(1000);
        assert_eq!(money.cents(), 100_000);
        assert_eq!(money.pesos(), 1000);
        assert_eq!(money.cents_part(), 0);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1550)), "₱15.50");
        assert_eq!(format!("{}", Money::from_pesos(5)), "₱5.00");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-₱5.50");
        assert_eq!(format!("{}", Money::zero()), "₱0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_pesos(10);
        let b = Money::from_pesos(5);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        let result: Money = a * 3;
        assert_eq!(result.cents(), 3000);

        let mut acc = Money::zero();
        acc += a;
        acc -= b;
        assert_eq!(acc, b);
    }

    #[test]
    fn test_multiply_quantity() {
        let unit_price = Money::from_pesos(15);
        let line_total = unit_price.multiply_quantity(3);
        assert_eq!(line_total.cents(), 4500);
    }

    #[test]
    fn test_zero_and_checks() {
        let zero = Money::zero();
        assert!(zero.is_zero());
        assert!(!zero.is_positive());
        assert!(!zero.is_negative());

        let positive = Money::from_pesos(1);
        assert!(!positive.is_zero());
        assert!(positive.is_positive());
        assert!(!positive.is_negative());

        let negative = Money::from_cents(-100);
        assert!(!negative.is_zero());
        assert!(!negative.is_positive());
        assert!(negative.is_negative());
    }

    #[test]
    fn test_sum() {
        let total: Money = [Money::from_pesos(20), Money::from_pesos(50), Money::from_cents(75)]
            .into_iter()
            .sum();
        assert_eq!(total.cents(), 7075);
    }

    /// Critical test: Verify that ₱10.00 / 3 × 3 behaves as expected
    /// This documents the intentional precision loss
    #[test]
    fn test_division_precision_loss_documented() {
        let ten_pesos = Money::from_pesos(10);
        // If we split ₱10.00 three ways: ₱3.33 each
        let one_third = Money::from_cents(1000 / 3); // 333 centavos
        let reconstructed: Money = one_third * 3; // 999 centavos

        // We intentionally lose 1 centavo - this is documented behavior
        assert_eq!(reconstructed.cents(), 999);
        assert_ne!(reconstructed.cents(), ten_pesos.cents());
    }
}
