//! # Denomination Module
//!
//! The fixed set of coin and bill face values the machine accepts, and the
//! greedy decomposition of an amount into those face values.
//!
//! ## The Denomination Set
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │              Accepted Coins & Bills (whole pesos)                       │
//! │                                                                         │
//! │   Coins:  ₱1   ₱5   ₱10   ₱20                                          │
//! │   Bills:  ₱50  ₱100 ₱200  ₱500  ₱1000                                  │
//! │                                                                         │
//! │   Order is significant: every greedy walk over the set MUST use the    │
//! │   same largest-to-smallest traversal so that a feasibility probe and   │
//! │   the settlement that follows it agree.                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Why Greedy Works Here
//! Largest-first greedy change-making is not optimal for arbitrary currency
//! systems, but this set is canonical (each face value is a clean step of the
//! next), so greedy always finds a representation when one exists from
//! unlimited stock. With finite stock the walk clamps to what is available
//! and reports the remainder.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::money::Money;

// =============================================================================
// Denomination
// =============================================================================

/// One discrete face value of currency accepted by the machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Denomination {
    One,
    Five,
    Ten,
    Twenty,
    Fifty,
    OneHundred,
    TwoHundred,
    FiveHundred,
    OneThousand,
}

impl Denomination {
    /// Number of distinct face values.
    pub const COUNT: usize = 9;

    /// All denominations, smallest first. Used for display and iteration.
    pub const ASCENDING: [Denomination; Self::COUNT] = [
        Denomination::One,
        Denomination::Five,
        Denomination::Ten,
        Denomination::Twenty,
        Denomination::Fifty,
        Denomination::OneHundred,
        Denomination::TwoHundred,
        Denomination::FiveHundred,
        Denomination::OneThousand,
    ];

    /// All denominations, largest first. The canonical greedy walk order.
    pub const DESCENDING: [Denomination; Self::COUNT] = [
        Denomination::OneThousand,
        Denomination::FiveHundred,
        Denomination::TwoHundred,
        Denomination::OneHundred,
        Denomination::Fifty,
        Denomination::Twenty,
        Denomination::Ten,
        Denomination::Five,
        Denomination::One,
    ];

    /// The face value in whole pesos.
    #[inline]
    pub const fn pesos(self) -> i64 {
        match self {
            Denomination::One => 1,
            Denomination::Five => 5,
            Denomination::Ten => 10,
            Denomination::Twenty => 20,
            Denomination::Fifty => 50,
            Denomination::OneHundred => 100,
            Denomination::TwoHundred => 200,
            Denomination::FiveHundred => 500,
            Denomination::OneThousand => 1000,
        }
    }

    /// The face value as Money.
    #[inline]
    pub const fn value(self) -> Money {
        Money::from_pesos(self.pesos())
    }

    /// Position in [`Denomination::ASCENDING`]. Used as a stock array index.
    #[inline]
    pub(crate) const fn index(self) -> usize {
        self as usize
    }

    /// Looks up a denomination by its whole-peso face value.
    ///
    /// This is the pure set-membership check a payment collector uses before
    /// accepting a tendered coin or bill.
    ///
    /// ## Example
    /// ```rust
    /// use vendo_core::denomination::Denomination;
    ///
    /// assert_eq!(Denomination::from_pesos(500), Some(Denomination::FiveHundred));
    /// assert_eq!(Denomination::from_pesos(300), None);
    /// ```
    pub fn from_pesos(pesos: i64) -> Option<Denomination> {
        Self::ASCENDING.into_iter().find(|d| d.pesos() == pesos)
    }
}

/// Checks if the given whole-peso value is an accepted coin/bill face value.
///
/// ## Example
/// ```rust
/// use vendo_core::denomination::is_valid_denomination;
///
/// assert!(is_valid_denomination(20));
/// assert!(!is_valid_denomination(25));
/// assert!(!is_valid_denomination(-5));
/// ```
#[inline]
pub fn is_valid_denomination(pesos: i64) -> bool {
    Denomination::from_pesos(pesos).is_some()
}

impl fmt::Display for Denomination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "₱{}", self.pesos())
    }
}

// =============================================================================
// Breakdown
// =============================================================================

/// The count of each denomination instance used to represent an amount.
///
/// Entries are ordered largest denomination first and only carry non-zero
/// counts, so an empty breakdown means "no coins at all" (a zero amount).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Breakdown(Vec<(Denomination, u32)>);

impl Breakdown {
    /// Greedy decomposition of an amount from *unlimited* stock.
    ///
    /// Used on the payment side (the coins a customer physically inserted
    /// always exist) and for displaying collected-sales amounts. Amounts with
    /// a fractional-peso component leave the centavo remainder undecomposed;
    /// callers that care check `breakdown.total() == amount`.
    pub fn decompose(amount: Money) -> Breakdown {
        let mut remaining = amount.cents();
        let mut used = Vec::new();
        for denomination in Denomination::DESCENDING {
            let face = denomination.value().cents();
            let count = remaining / face;
            if count > 0 {
                used.push((denomination, count as u32));
                remaining -= count * face;
            }
        }
        Breakdown(used)
    }

    /// Builds a breakdown from pre-counted lines. Zero counts are dropped.
    pub(crate) fn from_lines(lines: Vec<(Denomination, u32)>) -> Breakdown {
        Breakdown(lines.into_iter().filter(|(_, n)| *n > 0).collect())
    }

    /// The monetary sum of every line.
    pub fn total(&self) -> Money {
        self.0
            .iter()
            .map(|(d, n)| d.value() * *n as i64)
            .sum()
    }

    /// Count used of one denomination (zero if absent).
    pub fn count_of(&self, denomination: Denomination) -> u32 {
        self.0
            .iter()
            .find(|(d, _)| *d == denomination)
            .map(|(_, n)| *n)
            .unwrap_or(0)
    }

    /// Iterates `(denomination, count)` lines, largest denomination first.
    pub fn iter(&self) -> impl Iterator<Item = &(Denomination, u32)> {
        self.0.iter()
    }

    /// True when no denominations are used at all.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of distinct denominations used.
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

/// Renders one line per denomination, e.g. `2 x ₱100`.
impl fmt::Display for Breakdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (denomination, count)) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{} x {}", count, denomination)?;
        }
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
