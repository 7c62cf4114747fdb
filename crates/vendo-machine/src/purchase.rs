//! # Purchase Types
//!
//! The pieces of one transaction: the priced order, the cash the customer
//! has inserted, and the receipt issued on commit.
//!
//! ## Transaction Shape
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      One Purchase, Start to Finish                      │
//! │                                                                         │
//! │  quote(slot, qty) ────────► Order { name, unit price, qty, total }     │
//! │                                  │                                      │
//! │  Tender::insert(coin) × N ──────┤  (each coin validated against the    │
//! │                                  │   fixed denomination set)           │
//! │                                  ▼                                      │
//! │  machine.commit(order, tender) ──► Receipt  (or a typed error with     │
//! │                                    nothing mutated; the caller         │
//! │                                    refunds the tender)                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use vendo_core::{Breakdown, CoreError, Denomination, Money};

use crate::error::MachineResult;

// =============================================================================
// Tender
// =============================================================================

/// The coins and bills a customer has inserted so far.
///
/// Accumulating a tender touches no machine state: until commit, the coins
/// sit in the acceptor's escrow and cancelling simply hands them back.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tender {
    inserted: Vec<Denomination>,
}

impl Tender {
    /// An empty tender.
    pub fn new() -> Self {
        Self::default()
    }

    /// Accepts one already-validated coin/bill.
    pub fn insert(&mut self, denomination: Denomination) {
        self.inserted.push(denomination);
    }

    /// Accepts a raw whole-peso value, validating it against the fixed
    /// denomination set first.
    ///
    /// ## Example
    /// ```rust
    /// use vendo_machine::purchase::Tender;
    ///
    /// let mut tender = Tender::new();
    /// tender.insert_pesos(20).unwrap();
    /// assert!(tender.insert_pesos(25).is_err()); // no ₱25 coin exists
    /// ```
    pub fn insert_pesos(&mut self, pesos: i64) -> MachineResult<Denomination> {
        let denomination = Denomination::from_pesos(pesos)
            .ok_or(CoreError::InvalidDenomination { value: pesos })?;
        self.insert(denomination);
        Ok(denomination)
    }

    /// Everything inserted so far, in insertion order.
    pub fn denominations(&self) -> &[Denomination] {
        &self.inserted
    }

    /// Number of coins/bills inserted.
    pub fn count(&self) -> usize {
        self.inserted.len()
    }

    /// True before the first coin goes in.
    pub fn is_empty(&self) -> bool {
        self.inserted.is_empty()
    }

    /// Total value inserted.
    pub fn total(&self) -> Money {
        self.inserted.iter().map(|d| d.value()).sum()
    }

    /// How much is still owed against `total_due` (never negative).
    pub fn balance_due(&self, total_due: Money) -> Money {
        let remaining = total_due - self.total();
        if remaining.is_negative() {
            Money::zero()
        } else {
            remaining
        }
    }

    /// True once the inserted value covers `total_due`.
    pub fn covers(&self, total_due: Money) -> bool {
        self.total() >= total_due
    }
}

// =============================================================================
// Order
// =============================================================================

/// What a committed purchase will dispense.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderKind {
    /// A shelf product taken straight from one slot.
    Shelf { slot: usize },

    /// A combo assembled from ingredient slots and pantry staples.
    Combo { picks: Vec<usize>, with_cheese: bool },
}

/// A priced, stock-checked quote for one purchase.
///
/// Built by the machine's `quote`/`quote_combo`; quoting never mutates. The
/// shelf may change between quote and commit within a session, so commit
/// re-verifies stock before touching anything.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Product name as it will appear in the journal and on the receipt.
    pub product_name: String,

    /// Per-unit price (for a combo: the assembled price including add-ons).
    pub unit_price: Money,

    /// Units to dispense. Always 1 for a combo.
    pub quantity: i64,

    /// What commit must pull from the catalog.
    pub kind: OrderKind,
}

impl Order {
    /// The amount the customer owes.
    pub fn total(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Receipt
// =============================================================================

/// Proof of a committed purchase, including the exact change handed back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Receipt {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Human-readable receipt number, e.g. `20260807-0042`.
    pub number: String,

    pub product_name: String,
    pub unit_price: Money,
    pub quantity: i64,
    pub total: Money,

    /// Cash inserted by the customer.
    pub tendered: Money,

    /// Change returned.
    pub change: Money,

    /// The exact coins/bills the change was dispensed as.
    pub change_breakdown: Breakdown,

    pub issued_at: DateTime<Utc>,
}

impl Receipt {
    pub(crate) fn issue(order: &Order, tendered: Money, change_breakdown: Breakdown) -> Self {
        let now = Utc::now();
        Receipt {
            id: Uuid::new_v4().to_string(),
            number: generate_receipt_number(now),
            product_name: order.product_name.clone(),
            unit_price: order.unit_price,
            quantity: order.quantity,
            total: order.total(),
            tendered,
            change: tendered - order.total(),
            change_breakdown,
            issued_at: now,
        }
    }
}

/// Generates a date-coded receipt number.
///
/// ## Format
/// `{YYYYMMDD}-{SEQ}` where SEQ is derived from the timestamp milliseconds.
/// Good enough for a single-till session; a multi-register deployment would
/// need a proper daily counter.
fn generate_receipt_number(now: DateTime<Utc>) -> String {
    let date_part = now.format("%Y%m%d");
    let seq = (now.timestamp_millis() % 10000) as u32;
    format!("{}-{:04}", date_part, seq)
}

// =============================================================================
// Unit Tests
// =============================================================================
