//! # Denomination Ledger
//!
//! The cash till: a finite, mutable stock of coin/bill instances and the
//! change-making engine that decides what can be dispensed from it.
//!
//! ## Transaction Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      How a Purchase Touches the Till                    │
//! │                                                                         │
//! │  1. PROBE (pure)                                                        │
//! │     └── can_make_change(change_due) ── false? abort, refund tender     │
//! │                                                                         │
//! │  2. QUOTE (pure)                                                        │
//! │     └── change_breakdown(change_due) ── the coins the customer gets    │
//! │                                                                         │
//! │  3. SETTLE (mutating)                                                   │
//! │     └── settle(change_due, amount_tendered)                            │
//! │         ├── stock -= breakdown of change_due   (coins dispensed)       │
//! │         └── stock += decomposition of tendered (coins inserted)        │
//! │                                                                         │
//! │  Periodically:                                                          │
//! │     └── withdraw(pending_sales) ── operator collection                 │
//! │     └── replenish(denom, n)     ── operator float top-up (clamped)     │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - Stock counts never go negative: every decrement is clamped to stock.
//! - Every operation walks the denominations in the same largest-to-smallest
//!   order, so a `can_make_change` probe and the `settle` that follows it
//!   always agree on which coins get used.
//! - `replenish` clamps at the per-denomination capacity and reports the
//!   accepted amount; it never rejects.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, warn};

use crate::denomination::{Breakdown, Denomination};
use crate::money::Money;
use crate::DEFAULT_DENOMINATION_CAPACITY;

// =============================================================================
// Denomination Ledger
// =============================================================================

/// Owns the counts of each supported denomination and the greedy
/// change-making algorithms over them.
///
/// One ledger exists per running machine session. It is created empty (or
/// seeded through [`DenominationLedger::replenish`]) and mutated only through
/// the methods below; no caller touches the underlying counts directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DenominationLedger {
    /// Instance counts, indexed by [`Denomination::ASCENDING`] position.
    stock: [u32; Denomination::COUNT],

    /// Per-denomination cap enforced on replenishment.
    capacity: u32,
}

impl DenominationLedger {
    /// Creates an empty ledger with the default per-denomination capacity.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_DENOMINATION_CAPACITY)
    }

    /// Creates an empty ledger with a custom per-denomination capacity.
    pub fn with_capacity(capacity: u32) -> Self {
        DenominationLedger {
            stock: [0; Denomination::COUNT],
            capacity,
        }
    }

    /// The per-denomination capacity enforced on replenishment.
    #[inline]
    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Current instance count for one denomination.
    #[inline]
    pub fn count(&self, denomination: Denomination) -> u32 {
        self.stock[denomination.index()]
    }

    /// Read-only stock snapshot, face value (whole pesos) → instance count.
    ///
    /// For display collaborators only; mutating the returned map has no
    /// effect on the ledger.
    pub fn snapshot(&self) -> BTreeMap<i64, u32> {
        Denomination::ASCENDING
            .into_iter()
            .map(|d| (d.pesos(), self.count(d)))
            .collect()
    }

    /// Total monetary value currently held in the till.
    pub fn total_value(&self) -> Money {
        Denomination::ASCENDING
            .into_iter()
            .map(|d| d.value() * self.count(d) as i64)
            .sum()
    }

    // =========================================================================
    // Change Feasibility & Breakdown
    // =========================================================================

    /// Checks whether exact change for `amount` can be dispensed from the
    /// current stock.
    ///
    /// Walks the denominations largest-to-smallest; for each, uses
    /// `min(remaining / face, available)` instances and continues with the
    /// remainder. True iff the remainder is zero after the smallest
    /// denomination.
    ///
    /// This is a pure probe: it simulates dispensing without mutating state,
    /// and calling it any number of times never changes the ledger.
    ///
    /// ## Example
    /// ```rust
    /// use vendo_core::denomination::Denomination;
    /// use vendo_core::ledger::DenominationLedger;
    /// use vendo_core::money::Money;
    ///
    /// let mut till = DenominationLedger::new();
    /// till.replenish(Denomination::FiveHundred, 1);
    /// till.replenish(Denomination::OneHundred, 2);
    ///
    /// assert!(till.can_make_change(Money::from_pesos(700)));
    /// assert!(!till.can_make_change(Money::from_pesos(750)));
    /// ```
    pub fn can_make_change(&self, amount: Money) -> bool {
        self.greedy_walk(amount).1 == 0
    }

    /// Computes the denomination breakdown that change for `amount` would be
    /// dispensed as, limited to available stock.
    ///
    /// ## Caller Contract
    /// Only meaningful after [`DenominationLedger::can_make_change`] returned
    /// true for the same amount with no intervening mutation. On an
    /// infeasible amount the returned breakdown is partial (its total is
    /// less than `amount`) and treating it as complete is a caller defect.
    pub fn change_breakdown(&self, amount: Money) -> Breakdown {
        Breakdown::from_lines(self.greedy_walk(amount).0)
    }

    /// The shared greedy walk: returns the per-denomination counts that would
    /// be used and the centavo remainder that stock could not cover.
    ///
    /// Every feasibility check and every mutation below derives from this
    /// one traversal so they cannot disagree.
    fn greedy_walk(&self, amount: Money) -> (Vec<(Denomination, u32)>, i64) {
        let mut remaining = amount.cents();
        let mut used = Vec::new();
        for denomination in Denomination::DESCENDING {
            let face = denomination.value().cents();
            let needed = remaining / face;
            let usable = needed.min(self.count(denomination) as i64);
            if usable > 0 {
                used.push((denomination, usable as u32));
                remaining -= usable * face;
            }
        }
        (used, remaining)
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Applies a completed transaction to the till: dispenses `change_due`
    /// and absorbs the coins/bills behind `amount_tendered`.
    ///
    /// Two independent greedy passes in the canonical order:
    /// 1. stock is decremented by the stock-limited breakdown of `change_due`
    ///    (the change handed to the customer);
    /// 2. stock is incremented by the unconstrained greedy decomposition of
    ///    `amount_tendered` (the physical coins the customer inserted; they
    ///    exist regardless of capacity, so this pass does not clamp).
    ///
    /// ## Precondition
    /// `can_make_change(change_due)` held immediately before this call. Both
    /// passes run unconditionally and nothing is rolled back; a caller that
    /// skipped the probe has already lost the coins it failed to dispense.
    ///
    /// ## Caller Contract
    /// `amount_tendered` must be a sum actually built from valid denomination
    /// insertions; a fractional or otherwise unrepresentable tender silently
    /// drops its remainder on the absorb pass.
    pub fn settle(&mut self, change_due: Money, amount_tendered: Money) {
        for (denomination, count) in self.greedy_walk(change_due).0 {
            self.stock[denomination.index()] -= count;
        }

        let mut remaining = amount_tendered.cents();
        for denomination in Denomination::DESCENDING {
            let face = denomination.value().cents();
            let inserted = remaining / face;
            if inserted > 0 {
                self.stock[denomination.index()] += inserted as u32;
                remaining -= inserted * face;
            }
        }

        debug!(
            change_due = %change_due,
            amount_tendered = %amount_tendered,
            till_total = %self.total_value(),
            "settled transaction"
        );
    }

    /// Withdraws up to `amount` from the till, largest denominations first,
    /// clamped per denomination to available stock.
    ///
    /// Returns the unrepresentable remainder: the portion of `amount` the
    /// physical stock could not cover. Zero means the withdrawal was exact.
    /// Insufficient stock is a reporting condition, never a failure; the
    /// caller decides whether a non-zero leftover is an error.
    pub fn withdraw(&mut self, amount: Money) -> Money {
        let (used, remaining) = self.greedy_walk(amount);
        for (denomination, count) in used {
            self.stock[denomination.index()] -= count;
        }

        debug!(amount = %amount, leftover = remaining, "withdrew from till");
        Money::from_cents(remaining)
    }

    /// Adds instances of one denomination, clamped so the count never
    /// exceeds capacity.
    ///
    /// Returns the number of instances actually accepted:
    /// `min(requested, capacity − current)`. Excess is clamped, not
    /// rejected, so the operator learns how many coins to take back.
    ///
    /// ## Example
    /// ```rust
    /// use vendo_core::denomination::Denomination;
    /// use vendo_core::ledger::DenominationLedger;
    ///
    /// let mut till = DenominationLedger::new(); // capacity 20
    /// assert_eq!(till.replenish(Denomination::Ten, 15), 15);
    /// assert_eq!(till.replenish(Denomination::Ten, 15), 5);
    /// assert_eq!(till.count(Denomination::Ten), 20);
    /// ```
    pub fn replenish(&mut self, denomination: Denomination, requested: u32) -> u32 {
        // Saturating: the absorb pass of `settle` can leave a count above
        // capacity, and a full tube accepts nothing.
        let current = self.count(denomination);
        let accepted = requested.min(self.capacity.saturating_sub(current));
        self.stock[denomination.index()] = current + accepted;

        if accepted < requested {
            warn!(
                %denomination,
                requested,
                accepted,
                capacity = self.capacity,
                "replenishment clamped at capacity"
            );
        }
        accepted
    }
}

impl Default for DenominationLedger {
    fn default() -> Self {
        DenominationLedger::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
