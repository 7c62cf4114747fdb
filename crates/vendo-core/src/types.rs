//! # Domain Types
//!
//! Core domain types shared by every catalog variant.

use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Product
// =============================================================================

/// A product that can occupy a vending slot.
///
/// The name/price/calories triple is everything the machine knows about what
/// it sells; stock levels belong to the slot holding the product, not the
/// product itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Display name shown to the customer and on receipts.
    pub name: String,

    /// Price in centavos (smallest currency unit).
    pub price_cents: i64,

    /// Calorie count shown alongside the product.
    pub calories: i64,
}

impl Product {
    /// Creates a product from a name, price and calorie count.
    pub fn new(name: impl Into<String>, price: Money, calories: i64) -> Self {
        Product {
            name: name.into(),
            price_cents: price.cents(),
            calories,
        }
    }

    /// Returns the price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
