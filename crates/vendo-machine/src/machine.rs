//! # Vending Machine
//!
//! One machine session: the slot catalog, the cash till and the sales
//! journal, wired together behind the purchase workflow.
//!
//! ## Commit Protocol
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     commit(order, tender)                               │
//! │                                                                         │
//! │  1. tender covers total?          no ──► InsufficientPayment  (pure)   │
//! │  2. till can make change?         no ──► ChangeUnavailable    (pure)   │
//! │  3. catalog still has the goods?  no ──► OutOfStock / picks   (pure)   │
//! │  ──────────────── nothing mutated above this line ────────────────     │
//! │  4. settle the till (dispense change, absorb tender)                   │
//! │  5. record the sale in the journal                                     │
//! │  6. pull the goods (slots, pantry staples)                             │
//! │  7. issue the receipt                                                  │
//! │                                                                         │
//! │  Every failure happens before step 4, so an aborted purchase leaves    │
//! │  the machine exactly as it was and the caller refunds the tender.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Catalog Variants
//! A regular machine sells shelf products only. A special machine adds a
//! combo product assembled to order. Cash handling is byte-for-byte the
//! same core in both; the variants differ only in catalog composition.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::info;

use vendo_core::validation::validate_quantity;
use vendo_core::{
    Collection, CoreError, DenominationLedger, JournalSummary, Money, SalesJournal,
};

use crate::combo::ComboSpec;
use crate::config::MachineConfig;
use crate::error::{MachineError, MachineResult};
use crate::pantry::Pantry;
use crate::purchase::{Order, OrderKind, Receipt, Tender};
use crate::slots::{SlotBank, SlotView};

// =============================================================================
// Special Catalog
// =============================================================================

/// What a special machine carries on top of the shelf: the combo recipe and
/// the pantry it draws staples from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecialCatalog {
    pub combo: ComboSpec,
    pub pantry: Pantry,
}

// =============================================================================
// Sales Summary
// =============================================================================

/// The operator's end-of-period report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesSummary {
    /// Shelf contents as of install time.
    pub starting_inventory: Vec<SlotView>,

    /// Shelf contents now.
    pub current_inventory: Vec<SlotView>,

    /// Sold lines and running totals.
    pub journal: JournalSummary,
}

// =============================================================================
// Vending Machine
// =============================================================================

/// One vending machine session.
///
/// Explicitly constructed and exclusively owned: no statics, no ambient
/// state. The ledger and journal are reachable only through this struct,
/// so all mutation funnels through the methods below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VendingMachine {
    slots: SlotBank,
    till: DenominationLedger,
    journal: SalesJournal,
    special: Option<SpecialCatalog>,
}

impl VendingMachine {
    /// Builds a regular machine: shelf products only.
    pub fn regular(config: &MachineConfig) -> Self {
        VendingMachine {
            slots: SlotBank::new(config.slots.count, config.slots.capacity),
            till: DenominationLedger::with_capacity(config.till.denomination_capacity),
            journal: SalesJournal::new(),
            special: None,
        }
    }

    /// Builds a special machine: the same shelf plus a combo product
    /// assembled from fruit slots and pantry staples.
    pub fn special(config: &MachineConfig, combo_base_price: Money) -> Self {
        let combo = ComboSpec {
            name: "Fruit Salad".to_string(),
            base_price_cents: combo_base_price.cents(),
            picks_required: config.combo.picks,
            cheese_fee_cents: config.combo.cheese_fee_cents,
        };
        VendingMachine {
            slots: SlotBank::new(config.slots.count, config.slots.capacity),
            till: DenominationLedger::with_capacity(config.till.denomination_capacity),
            journal: SalesJournal::new(),
            special: Some(SpecialCatalog {
                combo,
                pantry: Pantry::standard(config.slots.capacity),
            }),
        }
    }

    // =========================================================================
    // Component Access
    // =========================================================================

    /// The product shelf.
    pub fn slots(&self) -> &SlotBank {
        &self.slots
    }

    /// Mutable shelf access for maintenance (install/remove/edit/replenish).
    pub fn slots_mut(&mut self) -> &mut SlotBank {
        &mut self.slots
    }

    /// The cash till.
    pub fn till(&self) -> &DenominationLedger {
        &self.till
    }

    /// Mutable till access for maintenance (float seeding, replenishment).
    pub fn till_mut(&mut self) -> &mut DenominationLedger {
        &mut self.till
    }

    /// The sales journal.
    pub fn journal(&self) -> &SalesJournal {
        &self.journal
    }

    /// The combo recipe, if this is a special machine.
    pub fn combo(&self) -> Option<&ComboSpec> {
        self.special.as_ref().map(|s| &s.combo)
    }

    /// The staple pantry, if this is a special machine.
    pub fn pantry(&self) -> Option<&Pantry> {
        self.special.as_ref().map(|s| &s.pantry)
    }

    /// Mutable pantry access for maintenance.
    pub fn pantry_mut(&mut self) -> Option<&mut Pantry> {
        self.special.as_mut().map(|s| &mut s.pantry)
    }

    /// Per-denomination till snapshot for display (face value → count).
    pub fn till_snapshot(&self) -> BTreeMap<i64, u32> {
        self.till.snapshot()
    }

    // =========================================================================
    // Quoting
    // =========================================================================

    /// Prices a shelf purchase without touching any state.
    pub fn quote(&self, slot: usize, quantity: i64) -> MachineResult<Order> {
        let product = self.slots.product(slot)?;
        validate_quantity(quantity, self.slots.stock(slot)?).map_err(CoreError::from)?;

        Ok(Order {
            product_name: product.name.clone(),
            unit_price: product.price(),
            quantity,
            kind: OrderKind::Shelf { slot },
        })
    }

    /// Prices a combo purchase without touching any state.
    ///
    /// Combos are assembled one at a time; the quantity is always 1.
    pub fn quote_combo(&self, picks: &[usize], with_cheese: bool) -> MachineResult<Order> {
        let special = self.special.as_ref().ok_or(MachineError::ComboUnavailable)?;
        if !special.combo.is_available(&self.slots, &special.pantry) {
            return Err(MachineError::ComboUnavailable);
        }
        special.combo.validate_picks(&self.slots, picks)?;

        Ok(Order {
            product_name: special.combo.name.clone(),
            unit_price: special.combo.total_price(with_cheese),
            quantity: 1,
            kind: OrderKind::Combo {
                picks: picks.to_vec(),
                with_cheese,
            },
        })
    }

    // =========================================================================
    // Committing
    // =========================================================================

    /// Commits a purchase: settles the till, records the sale, pulls the
    /// goods and issues a receipt.
    ///
    /// Every check runs before the first mutation, so any error leaves the
    /// machine untouched and the caller returns the tendered coins to the
    /// customer. In particular, change feasibility is probed here, so the till
    /// is never asked to settle a transaction it cannot make change for.
    pub fn commit(&mut self, order: &Order, tender: &Tender) -> MachineResult<Receipt> {
        let total = order.total();
        let tendered = tender.total();

        if tendered < total {
            return Err(CoreError::InsufficientPayment {
                required: total,
                tendered,
            }
            .into());
        }

        let change_due = tendered - total;
        if !self.till.can_make_change(change_due) {
            return Err(CoreError::ChangeUnavailable { change_due }.into());
        }

        // The shelf may have moved since the quote; re-verify before mutating.
        match &order.kind {
            OrderKind::Shelf { slot } => {
                let available = self.slots.stock(*slot)?;
                if order.quantity > available {
                    return Err(CoreError::OutOfStock {
                        name: order.product_name.clone(),
                        available,
                        requested: order.quantity,
                    }
                    .into());
                }
            }
            OrderKind::Combo { picks, .. } => {
                let special = self.special.as_ref().ok_or(MachineError::ComboUnavailable)?;
                if !special.combo.is_available(&self.slots, &special.pantry) {
                    return Err(MachineError::ComboUnavailable);
                }
                special.combo.validate_picks(&self.slots, picks)?;
            }
        }

        // Point of no return: plain arithmetic from here on.
        let change_breakdown = self.till.change_breakdown(change_due);
        self.till.settle(change_due, tendered);
        self.journal
            .record(&order.product_name, order.unit_price, order.quantity);

        match &order.kind {
            OrderKind::Shelf { slot } => {
                self.slots.dispense(*slot, order.quantity)?;
            }
            OrderKind::Combo { picks, with_cheese } => {
                for &pick in picks {
                    self.slots.dispense(pick, 1)?;
                }
                let special = self.special.as_mut().ok_or(MachineError::ComboUnavailable)?;
                special.pantry.consume("Condensed Milk")?;
                special.pantry.consume("Evaporated Milk")?;
                special.pantry.consume("Paper Cup")?;
                special.pantry.consume("Plastic Spoon")?;
                if *with_cheese {
                    special.pantry.consume("Cheese")?;
                }
            }
        }

        let receipt = Receipt::issue(order, tendered, change_breakdown);
        info!(
            receipt = %receipt.number,
            product = %receipt.product_name,
            total = %receipt.total,
            change = %receipt.change,
            "purchase committed"
        );
        Ok(receipt)
    }

    // =========================================================================
    // Operator Features
    // =========================================================================

    /// Collects pending sales out of the till.
    pub fn collect_sales(&mut self) -> Collection {
        self.journal.collect(&mut self.till)
    }

    /// The end-of-period report: starting vs current inventory plus the
    /// journal snapshot.
    pub fn sales_summary(&self) -> SalesSummary {
        SalesSummary {
            starting_inventory: self.slots.starting_inventory(),
            current_inventory: self.slots.snapshot(),
            journal: self.journal.summary(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pantry::STANDARD_STAPLES;
    use vendo_core::{Denomination, Product};

    fn config() -> MachineConfig {
        MachineConfig::default()
    }

    /// Regular machine with juice in slot 0 and a float of small bills.
    fn juice_machine() -> VendingMachine {
        let mut machine = VendingMachine::regular(&config());
        machine
            .slots_mut()
            .install(0, Product::new("Juice", Money::from_pesos(15), 120), 10)
            .unwrap();
        machine.till_mut().replenish(Denomination::Ten, 10);
        machine.till_mut().replenish(Denomination::Five, 10);
        machine
    }

    fn paid(pesos: &[i64]) -> Tender {
        let mut tender = Tender::new();
        for &p in pesos {
            tender.insert_pesos(p).unwrap();
        }
        tender
    }

    #[test]
    fn test_shelf_purchase_happy_path() {
        let mut machine = juice_machine();

        let order = machine.quote(0, 3).unwrap();
        assert_eq!(order.total(), Money::from_pesos(45));

        let tender = paid(&[50]);
        let receipt = machine.commit(&order, &tender).unwrap();

        assert_eq!(receipt.total, Money::from_pesos(45));
        assert_eq!(receipt.tendered, Money::from_pesos(50));
        assert_eq!(receipt.change, Money::from_pesos(5));
        assert_eq!(receipt.change_breakdown.count_of(Denomination::Five), 1);

        // Shelf, journal and till all moved together.
        assert_eq!(machine.slots().stock(0).unwrap(), 7);
        assert_eq!(machine.journal().pending_collection(), Money::from_pesos(45));
        assert_eq!(machine.till().count(Denomination::Fifty), 1);
        assert_eq!(machine.till().count(Denomination::Five), 9);
    }

    #[test]
    fn test_exact_payment_dispenses_no_change() {
        let mut machine = juice_machine();
        let order = machine.quote(0, 1).unwrap();
        let receipt = machine.commit(&order, &paid(&[10, 5])).unwrap();

        assert_eq!(receipt.change, Money::zero());
        assert!(receipt.change_breakdown.is_empty());
    }

    #[test]
    fn test_quote_validates_stock_and_slot() {
        let machine = juice_machine();
        assert!(machine.quote(0, 11).is_err());
        assert!(machine.quote(0, 0).is_err());
        assert!(matches!(
            machine.quote(1, 1).unwrap_err(),
            MachineError::SlotVacant { slot: 1 }
        ));
        assert!(matches!(
            machine.quote(99, 1).unwrap_err(),
            MachineError::InvalidSlot { .. }
        ));
    }

    #[test]
    fn test_commit_rejects_insufficient_payment() {
        let mut machine = juice_machine();
        let order = machine.quote(0, 3).unwrap(); // ₱45

        let err = machine.commit(&order, &paid(&[20, 20])).unwrap_err();
        assert!(matches!(
            err,
            MachineError::Core(CoreError::InsufficientPayment { .. })
        ));
        assert_eq!(machine.slots().stock(0).unwrap(), 10);
    }

    #[test]
    fn test_commit_aborts_before_mutation_when_change_infeasible() {
        let mut machine = VendingMachine::regular(&config());
        machine
            .slots_mut()
            .install(0, Product::new("Juice", Money::from_pesos(15), 120), 10)
            .unwrap();
        // Empty till: a ₱20 over ₱15 leaves ₱5 of undispensable change.
        let order = machine.quote(0, 1).unwrap();
        let before_till = machine.till().clone();

        let err = machine.commit(&order, &paid(&[20])).unwrap_err();
        assert!(matches!(
            err,
            MachineError::Core(CoreError::ChangeUnavailable { .. })
        ));

        // Aborted purchase: nothing dispensed, nothing recorded, till intact.
        assert_eq!(machine.slots().stock(0).unwrap(), 10);
        assert!(machine.journal().entries().is_empty());
        assert_eq!(*machine.till(), before_till);
    }

    #[test]
    fn test_commit_reverifies_stock_after_quote() {
        let mut machine = juice_machine();
        let order = machine.quote(0, 10).unwrap();
        machine.slots_mut().dispense(0, 5).unwrap();

        // Exact payment, so the stock re-check is what trips.
        let err = machine.commit(&order, &paid(&[100, 50])).unwrap_err();
        assert!(matches!(
            err,
            MachineError::Core(CoreError::OutOfStock { available: 5, requested: 10, .. })
        ));
    }

    #[test]
    fn test_regular_machine_has_no_combo() {
        let machine = juice_machine();
        assert!(machine.combo().is_none());
        assert!(machine.pantry().is_none());
        assert!(matches!(
            machine.quote_combo(&[0, 1, 2], false).unwrap_err(),
            MachineError::ComboUnavailable
        ));
    }

    /// Special machine with six stocked fruits, a full pantry and a float.
    fn salad_machine() -> VendingMachine {
        let mut machine = VendingMachine::special(&config(), Money::from_pesos(95));
        let fruits = [
            ("Banana", 35, 105),
            ("Grapes", 60, 62),
            ("Apple", 25, 95),
            ("Melon", 45, 64),
            ("Pear", 30, 101),
            ("Watermelon", 50, 86),
        ];
        for (slot, (name, price, calories)) in fruits.into_iter().enumerate() {
            machine
                .slots_mut()
                .install(slot, Product::new(name, Money::from_pesos(price), calories), 5)
                .unwrap();
        }
        let pantry = machine.pantry_mut().unwrap();
        for staple in STANDARD_STAPLES {
            pantry.replenish(staple, 10).unwrap();
        }
        machine.till_mut().replenish(Denomination::Fifty, 5);
        machine.till_mut().replenish(Denomination::Twenty, 5);
        machine.till_mut().replenish(Denomination::Ten, 5);
        machine.till_mut().replenish(Denomination::Five, 5);
        machine
    }

    #[test]
    fn test_combo_purchase_consumes_picks_and_staples() {
        let mut machine = salad_machine();

        let order = machine.quote_combo(&[0, 2, 4], true).unwrap();
        assert_eq!(order.total(), Money::from_pesos(120)); // ₱95 + ₱25 cheese

        let receipt = machine.commit(&order, &paid(&[200])).unwrap();
        assert_eq!(receipt.change, Money::from_pesos(80));

        // One of each picked fruit is gone.
        assert_eq!(machine.slots().stock(0).unwrap(), 4);
        assert_eq!(machine.slots().stock(2).unwrap(), 4);
        assert_eq!(machine.slots().stock(4).unwrap(), 4);
        assert_eq!(machine.slots().stock(1).unwrap(), 5);

        // Staples consumed, cheese included.
        let pantry = machine.pantry().unwrap();
        assert_eq!(pantry.count("Paper Cup").unwrap(), 9);
        assert_eq!(pantry.count("Cheese").unwrap(), 9);

        assert_eq!(machine.journal().lifetime_total(), Money::from_pesos(120));
    }

    #[test]
    fn test_combo_without_cheese_keeps_cheese_stock() {
        let mut machine = salad_machine();
        let order = machine.quote_combo(&[0, 1, 2], false).unwrap();
        machine.commit(&order, &paid(&[100])).unwrap(); // ₱95, ₱5 change

        assert_eq!(machine.pantry().unwrap().count("Cheese").unwrap(), 10);
        assert_eq!(machine.pantry().unwrap().count("Plastic Spoon").unwrap(), 9);
    }

    #[test]
    fn test_combo_unavailable_when_pantry_depleted() {
        let mut machine = salad_machine();
        let pantry = machine.pantry_mut().unwrap();
        for _ in 0..10 {
            pantry.consume("Paper Cup").unwrap();
        }
        assert!(matches!(
            machine.quote_combo(&[0, 1, 2], false).unwrap_err(),
            MachineError::ComboUnavailable
        ));
    }

    #[test]
    fn test_collect_sales_drains_till() {
        let mut machine = juice_machine();
        let order = machine.quote(0, 2).unwrap(); // ₱30
        machine.commit(&order, &paid(&[20, 10])).unwrap();

        let outcome = machine.collect_sales();
        assert_eq!(outcome.amount, Money::from_pesos(30));
        assert_eq!(outcome.shortfall, Money::zero());
        assert_eq!(machine.journal().pending_collection(), Money::zero());
        assert_eq!(machine.journal().lifetime_total(), Money::from_pesos(30));

        // Nothing pending: collecting again moves no money.
        assert_eq!(machine.collect_sales(), Collection::empty());
    }

    #[test]
    fn test_sales_summary() {
        let mut machine = juice_machine();
        let order = machine.quote(0, 4).unwrap();
        machine.commit(&order, &paid(&[100])).unwrap();

        let summary = machine.sales_summary();
        assert_eq!(summary.starting_inventory[0].count, 10);
        assert_eq!(summary.current_inventory[0].count, 6);
        assert_eq!(summary.journal.entries.len(), 1);
        assert_eq!(summary.journal.lifetime_total, Money::from_pesos(60));
    }
}
