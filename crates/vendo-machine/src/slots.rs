//! # Slot Catalog
//!
//! The product shelf: a fixed bank of slots, each holding up to a capacity
//! of one product.
//!
//! ## Slot Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Slot Lifecycle                                   │
//! │                                                                         │
//! │  VACANT ──install(product, n)──► STOCKED                               │
//! │                                    │  ▲                                 │
//! │                     dispense(qty)  │  │  replenish(n) (clamped)        │
//! │                                    ▼  │                                 │
//! │                                 SOLD OUT (product stays installed)     │
//! │                                    │                                    │
//! │                      remove() ─────┴──► VACANT                         │
//! │                                                                         │
//! │  update() edits price/calories in place at any stocked state           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A sold-out slot keeps its product installed at zero stock so the catalog
//! still knows what it sells; only an explicit `remove` vacates a slot.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use vendo_core::validation::{validate_calories, validate_price, validate_product_name};
use vendo_core::{CoreError, Money, Product};

use crate::error::{MachineError, MachineResult};

// =============================================================================
// Slot
// =============================================================================

/// One shelf position: an optional product plus its stock counts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
struct Slot {
    product: Option<Product>,
    count: i64,
    /// Stock at install time, kept for the starting-inventory report.
    initial_count: i64,
}

// =============================================================================
// Slot View
// =============================================================================

/// Read-only view of one slot for display and reporting collaborators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotView {
    /// Zero-based slot index.
    pub slot: usize,
    pub product: Option<Product>,
    pub count: i64,
}

// =============================================================================
// Slot Bank
// =============================================================================

/// The full product shelf of one machine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotBank {
    slots: Vec<Slot>,
    /// Per-slot stock cap enforced on install and replenish.
    capacity: i64,
}

impl SlotBank {
    /// Creates a bank of `count` vacant slots with the given per-slot cap.
    pub fn new(count: usize, capacity: i64) -> Self {
        SlotBank {
            slots: vec![Slot::default(); count],
            capacity,
        }
    }

    /// Number of slots in the bank.
    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// True for a zero-slot bank (never built in practice).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// The per-slot stock cap.
    #[inline]
    pub fn capacity(&self) -> i64 {
        self.capacity
    }

    fn check_slot(&self, slot: usize) -> MachineResult<()> {
        if slot >= self.slots.len() {
            return Err(MachineError::InvalidSlot {
                slot,
                max: self.slots.len(),
            });
        }
        Ok(())
    }

    /// The product installed in a slot.
    pub fn product(&self, slot: usize) -> MachineResult<&Product> {
        self.check_slot(slot)?;
        self.slots[slot]
            .product
            .as_ref()
            .ok_or(MachineError::SlotVacant { slot })
    }

    /// Current stock of a slot (zero when vacant or sold out).
    pub fn stock(&self, slot: usize) -> MachineResult<i64> {
        self.check_slot(slot)?;
        Ok(self.slots[slot].count)
    }

    /// True when a slot holds a product with at least one unit in stock.
    pub fn is_sellable(&self, slot: usize) -> bool {
        slot < self.slots.len()
            && self.slots[slot].product.is_some()
            && self.slots[slot].count > 0
    }

    // =========================================================================
    // Catalog Maintenance
    // =========================================================================

    /// Installs a product into a vacant slot.
    ///
    /// The requested stock is clamped to the per-slot capacity; the accepted
    /// count is returned so the operator knows how many units to take back.
    pub fn install(&mut self, slot: usize, product: Product, count: i64) -> MachineResult<i64> {
        self.check_slot(slot)?;
        if let Some(existing) = &self.slots[slot].product {
            return Err(MachineError::SlotOccupied {
                slot,
                name: existing.name.clone(),
            });
        }

        validate_product_name(&product.name).map_err(CoreError::from)?;
        validate_price(product.price()).map_err(CoreError::from)?;
        validate_calories(product.calories).map_err(CoreError::from)?;
        if count <= 0 {
            return Err(CoreError::from(
                vendo_core::ValidationError::MustBePositive {
                    field: "stock".to_string(),
                },
            )
            .into());
        }

        let accepted = count.min(self.capacity);
        if accepted < count {
            warn!(slot, requested = count, accepted, "install stock clamped at slot capacity");
        }

        debug!(slot, name = %product.name, accepted, "installed product");
        self.slots[slot] = Slot {
            product: Some(product),
            count: accepted,
            initial_count: accepted,
        };
        Ok(accepted)
    }

    /// Vacates a slot, returning the product that occupied it.
    pub fn remove(&mut self, slot: usize) -> MachineResult<Product> {
        self.check_slot(slot)?;
        let removed = self.slots[slot]
            .product
            .take()
            .ok_or(MachineError::SlotVacant { slot })?;

        debug!(slot, name = %removed.name, "removed product");
        self.slots[slot] = Slot::default();
        Ok(removed)
    }

    /// Edits a slot's product in place. `None` keeps the current value.
    pub fn update(
        &mut self,
        slot: usize,
        new_price: Option<Money>,
        new_calories: Option<i64>,
    ) -> MachineResult<()> {
        self.check_slot(slot)?;
        let product = self.slots[slot]
            .product
            .as_mut()
            .ok_or(MachineError::SlotVacant { slot })?;

        if let Some(price) = new_price {
            validate_price(price).map_err(CoreError::from)?;
            product.price_cents = price.cents();
        }
        if let Some(calories) = new_calories {
            validate_calories(calories).map_err(CoreError::from)?;
            product.calories = calories;
        }
        Ok(())
    }

    /// Adds stock to an occupied slot, clamped at capacity.
    ///
    /// Returns the number of units actually accepted:
    /// `min(requested, capacity − current)`.
    pub fn replenish(&mut self, slot: usize, requested: i64) -> MachineResult<i64> {
        self.check_slot(slot)?;
        if self.slots[slot].product.is_none() {
            return Err(MachineError::SlotVacant { slot });
        }

        let current = self.slots[slot].count;
        let accepted = requested.max(0).min(self.capacity - current);
        self.slots[slot].count = current + accepted;

        if accepted < requested {
            warn!(
                slot,
                requested,
                accepted,
                capacity = self.capacity,
                "slot replenishment clamped at capacity"
            );
        }
        Ok(accepted)
    }

    // =========================================================================
    // Vending
    // =========================================================================

    /// Removes `quantity` units from a slot after a committed sale.
    ///
    /// The product stays installed when stock reaches zero.
    pub fn dispense(&mut self, slot: usize, quantity: i64) -> MachineResult<()> {
        self.check_slot(slot)?;
        let name = match &self.slots[slot].product {
            Some(product) => product.name.clone(),
            None => return Err(MachineError::SlotVacant { slot }),
        };

        let available = self.slots[slot].count;
        if quantity > available {
            return Err(CoreError::OutOfStock {
                name,
                available,
                requested: quantity,
            }
            .into());
        }

        self.slots[slot].count -= quantity;
        debug!(slot, name = %name, quantity, remaining = self.slots[slot].count, "dispensed");
        Ok(())
    }

    // =========================================================================
    // Reporting
    // =========================================================================

    /// Current shelf contents for display.
    pub fn snapshot(&self) -> Vec<SlotView> {
        self.slots
            .iter()
            .enumerate()
            .map(|(slot, s)| SlotView {
                slot,
                product: s.product.clone(),
                count: s.count,
            })
            .collect()
    }

    /// Shelf contents as of install time, for the sales summary's
    /// starting-inventory section.
    pub fn starting_inventory(&self) -> Vec<SlotView> {
        self.slots
            .iter()
            .enumerate()
            .map(|(slot, s)| SlotView {
                slot,
                product: s.product.clone(),
                count: s.initial_count,
            })
            .collect()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn juice() -> Product {
        Product::new("Juice", Money::from_pesos(15), 120)
    }

    #[test]
    fn test_install_and_lookup() {
        let mut bank = SlotBank::new(8, 10);
        assert_eq!(bank.install(0, juice(), 5).unwrap(), 5);

        assert_eq!(bank.product(0).unwrap().name, "Juice");
        assert_eq!(bank.stock(0).unwrap(), 5);
        assert!(bank.is_sellable(0));
        assert!(!bank.is_sellable(1));
    }

    #[test]
    fn test_install_clamps_to_capacity() {
        let mut bank = SlotBank::new(8, 10);
        assert_eq!(bank.install(0, juice(), 25).unwrap(), 10);
        assert_eq!(bank.stock(0).unwrap(), 10);
    }

    #[test]
    fn test_install_rejects_occupied_slot() {
        let mut bank = SlotBank::new(8, 10);
        bank.install(0, juice(), 5).unwrap();
        let err = bank.install(0, juice(), 5).unwrap_err();
        assert!(matches!(err, MachineError::SlotOccupied { slot: 0, .. }));
    }

    #[test]
    fn test_install_rejects_invalid_product() {
        let mut bank = SlotBank::new(8, 10);
        let blank = Product::new("  ", Money::from_pesos(15), 120);
        assert!(bank.install(0, blank, 5).is_err());

        let free = Product::new("Air", Money::zero(), 0);
        assert!(bank.install(0, free, 5).is_err());

        assert!(bank.install(0, juice(), 0).is_err());
    }

    #[test]
    fn test_invalid_slot_index() {
        let mut bank = SlotBank::new(8, 10);
        assert!(matches!(
            bank.install(8, juice(), 1).unwrap_err(),
            MachineError::InvalidSlot { slot: 8, max: 8 }
        ));
        assert!(bank.product(100).is_err());
    }

    #[test]
    fn test_remove_vacates_slot() {
        let mut bank = SlotBank::new(8, 10);
        bank.install(3, juice(), 5).unwrap();

        let removed = bank.remove(3).unwrap();
        assert_eq!(removed.name, "Juice");
        assert!(bank.product(3).is_err());
        assert_eq!(bank.stock(3).unwrap(), 0);

        assert!(matches!(bank.remove(3).unwrap_err(), MachineError::SlotVacant { slot: 3 }));
    }

    #[test]
    fn test_update_edits_in_place() {
        let mut bank = SlotBank::new(8, 10);
        bank.install(0, juice(), 5).unwrap();

        bank.update(0, Some(Money::from_pesos(18)), None).unwrap();
        assert_eq!(bank.product(0).unwrap().price(), Money::from_pesos(18));
        assert_eq!(bank.product(0).unwrap().calories, 120);

        bank.update(0, None, Some(90)).unwrap();
        assert_eq!(bank.product(0).unwrap().calories, 90);

        assert!(bank.update(0, Some(Money::zero()), None).is_err());
        assert!(bank.update(1, Some(Money::from_pesos(5)), None).is_err());
    }

    #[test]
    fn test_replenish_clamps() {
        let mut bank = SlotBank::new(8, 10);
        bank.install(0, juice(), 4).unwrap();

        assert_eq!(bank.replenish(0, 4).unwrap(), 4);
        assert_eq!(bank.replenish(0, 5).unwrap(), 2);
        assert_eq!(bank.stock(0).unwrap(), 10);

        assert!(bank.replenish(1, 5).is_err());
    }

    #[test]
    fn test_dispense_and_sold_out_keeps_product() {
        let mut bank = SlotBank::new(8, 10);
        bank.install(0, juice(), 3).unwrap();

        bank.dispense(0, 3).unwrap();
        assert_eq!(bank.stock(0).unwrap(), 0);
        // Product stays installed at zero stock.
        assert_eq!(bank.product(0).unwrap().name, "Juice");
        assert!(!bank.is_sellable(0));

        let err = bank.dispense(0, 1).unwrap_err();
        assert!(matches!(
            err,
            MachineError::Core(CoreError::OutOfStock { available: 0, requested: 1, .. })
        ));
    }

    #[test]
    fn test_starting_inventory_survives_sales_and_replenishment() {
        let mut bank = SlotBank::new(2, 10);
        bank.install(0, juice(), 6).unwrap();
        bank.dispense(0, 2).unwrap();
        bank.replenish(0, 1).unwrap();

        let start = bank.starting_inventory();
        assert_eq!(start[0].count, 6);
        let now = bank.snapshot();
        assert_eq!(now[0].count, 5);
        assert_eq!(now[1].product, None);
    }
}
