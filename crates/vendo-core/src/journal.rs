//! # Sales Journal
//!
//! Records completed sales and tracks what the operator has yet to collect.
//!
//! ## Accounting Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Two Running Totals                               │
//! │                                                                         │
//! │  lifetime_total       Every line total ever recorded. Monotonic;       │
//! │                       survives collections. The "total sales" figure.  │
//! │                                                                         │
//! │  pending_collection   Line totals recorded since the last collection.  │
//! │                       Zeroed when the operator collects.               │
//! │                                                                         │
//! │  Invariant: 0 ≤ pending_collection ≤ lifetime_total                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Collection withdraws `pending_collection` from the till. When the till
//! cannot physically represent the full amount the shortfall is reported,
//! and pending still clears. The books say the money was collected even if
//! some of it was never in the till as withdrawable denominations; blocking
//! collection on a representational gap would strand revenue forever.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::ledger::DenominationLedger;
use crate::money::Money;

// =============================================================================
// Line Item
// =============================================================================

/// One recorded sale line: a product, its unit price, and how many were sold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display name of the product sold.
    pub product_name: String,

    /// Price of a single unit at the time of sale.
    pub unit_price: Money,

    /// Units sold in this transaction.
    pub quantity: i64,

    /// `unit_price × quantity`.
    pub line_total: Money,

    /// When the sale was recorded.
    pub recorded_at: DateTime<Utc>,
}

// =============================================================================
// Collection Outcome
// =============================================================================

/// The outcome of an operator collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collection {
    /// Amount conceptually collected (pending sales before the reset).
    pub amount: Money,

    /// Portion the till could not physically represent. Non-zero is a
    /// warning condition for the operator, not a failure.
    pub shortfall: Money,
}

impl Collection {
    /// A collection that moved no money (nothing was pending).
    pub const fn empty() -> Self {
        Collection {
            amount: Money::zero(),
            shortfall: Money::zero(),
        }
    }
}

// =============================================================================
// Journal Summary
// =============================================================================

/// Read-only snapshot of the journal for reporting collaborators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalSummary {
    pub entries: Vec<LineItem>,
    pub lifetime_total: Money,
    pub pending_collection: Money,
}

// =============================================================================
// Sales Journal
// =============================================================================

/// Append-only record of completed sales plus the two running totals.
///
/// One journal exists per machine session, exclusively owned next to the
/// ledger. Entries survive collections; only an explicit
/// [`SalesJournal::reset`] (session re-initialization) clears them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SalesJournal {
    entries: Vec<LineItem>,
    lifetime_total: Money,
    pending_collection: Money,
}

impl SalesJournal {
    /// Creates an empty journal.
    pub fn new() -> Self {
        Self::default()
    }

    /// Total of every sale ever recorded in this session.
    #[inline]
    pub fn lifetime_total(&self) -> Money {
        self.lifetime_total
    }

    /// Total recorded since the last collection.
    #[inline]
    pub fn pending_collection(&self) -> Money {
        self.pending_collection
    }

    /// Recorded sale lines, oldest first.
    #[inline]
    pub fn entries(&self) -> &[LineItem] {
        &self.entries
    }

    /// Records a completed sale.
    ///
    /// Appends a line with `line_total = unit_price × quantity` and adds that
    /// total to both running sums.
    ///
    /// ## Caller Contract
    /// Inputs are pre-validated: non-empty name, positive price, quantity
    /// within the stock that was actually dispensed. The journal performs no
    /// validation of its own.
    pub fn record(&mut self, product_name: &str, unit_price: Money, quantity: i64) -> &LineItem {
        let line_total = unit_price.multiply_quantity(quantity);
        self.lifetime_total += line_total;
        self.pending_collection += line_total;

        debug!(
            product_name,
            %unit_price,
            quantity,
            %line_total,
            "recorded sale"
        );

        self.entries.push(LineItem {
            id: Uuid::new_v4().to_string(),
            product_name: product_name.to_string(),
            unit_price,
            quantity,
            line_total,
            recorded_at: Utc::now(),
        });
        self.entries.last().expect("entry just pushed")
    }

    /// Collects pending sales, withdrawing them from the till.
    ///
    /// No-op returning [`Collection::empty`] when nothing is pending.
    /// Otherwise withdraws `pending_collection` from `ledger`; any leftover
    /// the stock could not represent is surfaced as
    /// [`Collection::shortfall`]. Pending is reset to zero either way, and
    /// `lifetime_total` is untouched.
    pub fn collect(&mut self, ledger: &mut DenominationLedger) -> Collection {
        if self.pending_collection.is_zero() {
            return Collection::empty();
        }

        let amount = self.pending_collection;
        let shortfall = ledger.withdraw(amount);
        self.pending_collection = Money::zero();

        if shortfall.is_positive() {
            warn!(
                %amount,
                %shortfall,
                "till stock could not represent the full collection"
            );
        }
        info!(%amount, "collected sales");

        Collection { amount, shortfall }
    }

    /// Read-only snapshot for reporting.
    pub fn summary(&self) -> JournalSummary {
        JournalSummary {
            entries: self.entries.clone(),
            lifetime_total: self.lifetime_total,
            pending_collection: self.pending_collection,
        }
    }

    /// Clears entries and totals. Session re-initialization only, never
    /// part of the collection path.
    pub fn reset(&mut self) {
        self.entries.clear();
        self.lifetime_total = Money::zero();
        self.pending_collection = Money::zero();
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::denomination::Denomination;

    #[test]
    fn test_record_updates_both_totals() {
        let mut journal = SalesJournal::new();
        let entry = journal.record("Juice", Money::from_pesos(15), 3);

        assert_eq!(entry.line_total, Money::from_pesos(45));
        assert_eq!(journal.lifetime_total(), Money::from_pesos(45));
        assert_eq!(journal.pending_collection(), Money::from_pesos(45));

        journal.record("Water", Money::from_pesos(10), 2);
        assert_eq!(journal.lifetime_total(), Money::from_pesos(65));
        assert_eq!(journal.pending_collection(), Money::from_pesos(65));
    }

    #[test]
    fn test_summary_snapshot() {
        let mut journal = SalesJournal::new();
        journal.record("Juice", Money::from_pesos(15), 3);

        let summary = journal.summary();
        assert_eq!(summary.entries.len(), 1);
        assert_eq!(summary.entries[0].product_name, "Juice");
        assert_eq!(summary.entries[0].unit_price, Money::from_pesos(15));
        assert_eq!(summary.entries[0].quantity, 3);
        assert_eq!(summary.entries[0].line_total, Money::from_pesos(45));
        assert_eq!(summary.lifetime_total, Money::from_pesos(45));
        assert_eq!(summary.pending_collection, Money::from_pesos(45));
    }

    #[test]
    fn test_collect_with_nothing_pending_is_a_noop() {
        let mut journal = SalesJournal::new();
        let mut till = DenominationLedger::new();
        till.replenish(Denomination::OneHundred, 5);

        let outcome = journal.collect(&mut till);
        assert_eq!(outcome, Collection::empty());
        assert_eq!(till.total_value(), Money::from_pesos(500));
    }

    #[test]
    fn test_collect_resets_pending_and_keeps_lifetime() {
        let mut journal = SalesJournal::new();
        let mut till = DenominationLedger::new();
        till.replenish(Denomination::OneHundred, 5);

        journal.record("Chips", Money::from_pesos(50), 4); // ₱200

        let outcome = journal.collect(&mut till);
        assert_eq!(outcome.amount, Money::from_pesos(200));
        assert_eq!(outcome.shortfall, Money::zero());
        assert_eq!(journal.pending_collection(), Money::zero());
        assert_eq!(journal.lifetime_total(), Money::from_pesos(200));
        assert_eq!(journal.entries().len(), 1);
        assert_eq!(till.total_value(), Money::from_pesos(300));
    }

    #[test]
    fn test_collect_reports_shortfall_and_clears_pending_anyway() {
        let mut journal = SalesJournal::new();
        let mut till = DenominationLedger::new();
        till.replenish(Denomination::OneHundred, 1);

        journal.record("Soda", Money::from_pesos(150), 1);

        let outcome = journal.collect(&mut till);
        assert_eq!(outcome.amount, Money::from_pesos(150));
        assert_eq!(outcome.shortfall, Money::from_pesos(50));
        // The documented accounting choice: pending clears regardless.
        assert_eq!(journal.pending_collection(), Money::zero());
        assert_eq!(journal.lifetime_total(), Money::from_pesos(150));
    }

    #[test]
    fn test_second_collection_only_sees_new_sales() {
        let mut journal = SalesJournal::new();
        let mut till = DenominationLedger::new();
        till.replenish(Denomination::OneHundred, 10);

        journal.record("Candy", Money::from_pesos(100), 2);
        journal.collect(&mut till);

        journal.record("Candy", Money::from_pesos(100), 1);
        assert_eq!(journal.pending_collection(), Money::from_pesos(100));
        assert_eq!(journal.lifetime_total(), Money::from_pesos(300));

        let outcome = journal.collect(&mut till);
        assert_eq!(outcome.amount, Money::from_pesos(100));
    }

    #[test]
    fn test_summary_serializes_for_reporting() {
        let mut journal = SalesJournal::new();
        journal.record("Juice", Money::from_pesos(15), 3);

        let json = serde_json::to_string(&journal.summary()).expect("summary serializes");
        assert!(json.contains("\"product_name\":\"Juice\""));

        let parsed: JournalSummary = serde_json::from_str(&json).expect("summary parses back");
        assert_eq!(parsed, journal.summary());
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut journal = SalesJournal::new();
        journal.record("Juice", Money::from_pesos(15), 3);
        journal.reset();

        assert!(journal.entries().is_empty());
        assert_eq!(journal.lifetime_total(), Money::zero());
        assert_eq!(journal.pending_collection(), Money::zero());
    }
}
