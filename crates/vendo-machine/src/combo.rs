//! # Combo Product
//!
//! The special machine's assembled product: a fruit salad mixed to order
//! from ingredient slots plus pantry staples.
//!
//! ## Assembly Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Fruit Salad Combo                                │
//! │                                                                         │
//! │  Ingredients:  exactly 3 DISTINCT picks from the fruit slots (0-5),    │
//! │                each with stock on the shelf                            │
//! │  Staples:      condensed milk, evaporated milk, paper cup, spoon       │
//! │  Add-on:       cheese, for a flat ₱25 fee                              │
//! │                                                                         │
//! │  Availability: the combo disappears from the catalog when              │
//! │                • 4 or more fruit slots are sold out, OR                │
//! │                • any pantry staple is depleted                         │
//! │                                                                         │
//! │  Calories:     sum of the 3 highest-calorie fruits on the shelf        │
//! │                (worst case shown to the customer before picking)       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};

use vendo_core::Money;

use crate::error::{MachineError, MachineResult};
use crate::pantry::Pantry;
use crate::slots::SlotBank;

/// Slots 0 through 5 hold the combo's candidate ingredients.
pub const FRUIT_SLOT_COUNT: usize = 6;

/// Fruit slots with stock at zero before the combo becomes unavailable.
const MAX_SOLD_OUT_FRUIT_SLOTS: usize = 3;

// =============================================================================
// Combo Spec
// =============================================================================

/// The priced recipe of an assembled combo product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComboSpec {
    /// Display name shown in the catalog and on receipts.
    pub name: String,

    /// Price of the base combo, in centavos.
    pub base_price_cents: i64,

    /// How many distinct ingredient picks an order must name.
    pub picks_required: usize,

    /// Flat fee for the cheese add-on, in centavos.
    pub cheese_fee_cents: i64,
}

impl ComboSpec {
    /// The standard fruit salad recipe: 3 picks, ₱25 cheese fee.
    pub fn fruit_salad(base_price: Money) -> Self {
        ComboSpec {
            name: "Fruit Salad".to_string(),
            base_price_cents: base_price.cents(),
            picks_required: 3,
            cheese_fee_cents: Money::from_pesos(25).cents(),
        }
    }

    /// Price of the base combo.
    #[inline]
    pub fn base_price(&self) -> Money {
        Money::from_cents(self.base_price_cents)
    }

    /// The cheese add-on fee.
    #[inline]
    pub fn cheese_fee(&self) -> Money {
        Money::from_cents(self.cheese_fee_cents)
    }

    /// Total order price, with or without the cheese add-on.
    pub fn total_price(&self, with_cheese: bool) -> Money {
        if with_cheese {
            self.base_price() + self.cheese_fee()
        } else {
            self.base_price()
        }
    }

    /// Whether the combo can currently be assembled at all.
    ///
    /// Unavailable when too many ingredient slots are sold out to leave a
    /// full set of picks, or when any pantry staple is depleted.
    pub fn is_available(&self, slots: &SlotBank, pantry: &Pantry) -> bool {
        let sold_out = (0..FRUIT_SLOT_COUNT.min(slots.len()))
            .filter(|&slot| !slots.is_sellable(slot))
            .count();
        sold_out <= MAX_SOLD_OUT_FRUIT_SLOTS && !pantry.any_depleted()
    }

    /// Advertised calorie count: the worst case over the fruits currently on
    /// the shelf (sum of the three highest).
    pub fn calories(&self, slots: &SlotBank) -> i64 {
        let mut calories: Vec<i64> = (0..FRUIT_SLOT_COUNT.min(slots.len()))
            .filter_map(|slot| slots.product(slot).ok())
            .map(|product| product.calories)
            .collect();
        calories.sort_unstable_by(|a, b| b.cmp(a));
        calories.iter().take(self.picks_required).sum()
    }

    /// Validates an order's ingredient picks: the right number of them, all
    /// distinct, all fruit slots with stock.
    pub fn validate_picks(&self, slots: &SlotBank, picks: &[usize]) -> MachineResult<()> {
        if picks.len() != self.picks_required {
            return Err(MachineError::WrongPickCount {
                expected: self.picks_required,
                got: picks.len(),
            });
        }

        for (i, &pick) in picks.iter().enumerate() {
            if picks[..i].contains(&pick) {
                return Err(MachineError::DuplicatePick { slot: pick });
            }
            if pick >= FRUIT_SLOT_COUNT || !slots.is_sellable(pick) {
                return Err(MachineError::PickUnavailable { slot: pick });
            }
        }
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pantry::STANDARD_STAPLES;
    use vendo_core::Product;

    const FRUITS: [(&str, i64, i64); 6] = [
        ("Banana", 35, 105),
        ("Grapes", 60, 62),
        ("Apple", 25, 95),
        ("Melon", 45, 64),
        ("Pear", 30, 101),
        ("Watermelon", 50, 86),
    ];

    fn fruit_shelf() -> SlotBank {
        let mut bank = SlotBank::new(8, 10);
        for (slot, (name, price, calories)) in FRUITS.into_iter().enumerate() {
            bank.install(slot, Product::new(name, Money::from_pesos(price), calories), 5)
                .unwrap();
        }
        bank
    }

    fn stocked_pantry() -> Pantry {
        let mut pantry = Pantry::standard(10);
        for staple in STANDARD_STAPLES {
            pantry.replenish(staple, 10).unwrap();
        }
        pantry
    }

    fn salad() -> ComboSpec {
        ComboSpec::fruit_salad(Money::from_pesos(95))
    }

    #[test]
    fn test_total_price() {
        let combo = salad();
        assert_eq!(combo.total_price(false), Money::from_pesos(95));
        assert_eq!(combo.total_price(true), Money::from_pesos(120));
    }

    #[test]
    fn test_available_when_stocked() {
        assert!(salad().is_available(&fruit_shelf(), &stocked_pantry()));
    }

    #[test]
    fn test_unavailable_when_a_staple_is_depleted() {
        let mut pantry = stocked_pantry();
        for _ in 0..10 {
            pantry.consume("Plastic Spoon").unwrap();
        }
        assert!(!salad().is_available(&fruit_shelf(), &pantry));
    }

    #[test]
    fn test_availability_tracks_sold_out_fruit_slots() {
        let mut shelf = fruit_shelf();
        // Three sold-out fruit slots still leave three pickable fruits.
        for slot in 0..3 {
            shelf.dispense(slot, 5).unwrap();
        }
        assert!(salad().is_available(&shelf, &stocked_pantry()));

        // A fourth sold-out slot kills the combo.
        shelf.dispense(3, 5).unwrap();
        assert!(!salad().is_available(&shelf, &stocked_pantry()));
    }

    #[test]
    fn test_calories_sums_three_highest() {
        // Banana 105 + Pear 101 + Apple 95
        assert_eq!(salad().calories(&fruit_shelf()), 301);
    }

    #[test]
    fn test_validate_picks() {
        let shelf = fruit_shelf();
        let combo = salad();

        assert!(combo.validate_picks(&shelf, &[0, 2, 4]).is_ok());

        assert!(matches!(
            combo.validate_picks(&shelf, &[0, 1]).unwrap_err(),
            MachineError::WrongPickCount { expected: 3, got: 2 }
        ));
        assert!(matches!(
            combo.validate_picks(&shelf, &[0, 0, 1]).unwrap_err(),
            MachineError::DuplicatePick { slot: 0 }
        ));
        // Slot 6 is not a fruit slot even though the shelf has 8 slots.
        assert!(matches!(
            combo.validate_picks(&shelf, &[0, 1, 6]).unwrap_err(),
            MachineError::PickUnavailable { slot: 6 }
        ));
    }

    #[test]
    fn test_validate_picks_rejects_sold_out_fruit() {
        let mut shelf = fruit_shelf();
        shelf.dispense(2, 5).unwrap();
        assert!(matches!(
            salad().validate_picks(&shelf, &[0, 1, 2]).unwrap_err(),
            MachineError::PickUnavailable { slot: 2 }
        ));
    }
}
