//! # vendo-core: Pure Business Logic for Vendo
//!
//! This crate is the **heart** of Vendo. It contains the cash-handling and
//! sales-accounting logic of a coin-operated vending machine as pure
//! functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Vendo Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │            Presentation / input collection (out of scope)      │   │
//! │  │    product selection ──► payment prompts ──► receipts          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ pre-validated values                  │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 vendo-machine (machine layer)                   │   │
//! │  │    slots, purchase orchestration, combo catalog, config        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ vendo-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐ ┌──────────────┐ ┌─────────┐ ┌────────────┐    │   │
//! │  │   │  money   │ │ denomination │ │ ledger  │ │  journal   │    │   │
//! │  │   │  Money   │ │ Denomination │ │  Till   │ │   Sales    │    │   │
//! │  │   │          │ │  Breakdown   │ │  Stock  │ │  Totals    │    │   │
//! │  │   └──────────┘ └──────────────┘ └─────────┘ └────────────┘    │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO PERSISTENCE • NO PROMPTS • PURE FUNCTIONS        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`denomination`] - The fixed coin/bill set and greedy decomposition
//! - [`ledger`] - The denomination ledger (cash till + change engine)
//! - [`journal`] - Sales journal and operator collection
//! - [`types`] - Shared domain types (Product)
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Feasibility probes are side-effect free and
//!    idempotent; mutations are plain arithmetic that cannot fail mid-way
//! 2. **No I/O**: File system, network and prompts are FORBIDDEN here
//! 3. **Integer Money**: All monetary values are centavos (i64)
//! 4. **Explicit Outcomes**: Business conditions are return values
//!    (infeasible change, clamped replenishment, collection shortfall),
//!    never panics
//!
//! ## Example Usage
//!
//! ```rust
//! use vendo_core::denomination::Denomination;
//! use vendo_core::ledger::DenominationLedger;
//! use vendo_core::journal::SalesJournal;
//! use vendo_core::money::Money;
//!
//! let mut till = DenominationLedger::new();
//! till.replenish(Denomination::Ten, 10);
//!
//! // ₱15 item paid with a ₱20 coin and a ₱10 coin: ₱15 change due.
//! let change = Money::from_pesos(15);
//! assert!(!till.can_make_change(change)); // only ₱10 coins in the till
//!
//! till.replenish(Denomination::Five, 1);
//! assert!(till.can_make_change(change));
//!
//! till.settle(change, Money::from_pesos(30));
//!
//! let mut journal = SalesJournal::new();
//! journal.record("Juice", Money::from_pesos(15), 1);
//! let outcome = journal.collect(&mut till);
//! assert_eq!(outcome.amount, Money::from_pesos(15));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod denomination;
pub mod error;
pub mod journal;
pub mod ledger;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use vendo_core::Money` instead of
// `use vendo_core::money::Money`

pub use denomination::{is_valid_denomination, Breakdown, Denomination};
pub use error::{CoreError, CoreResult, ValidationError};
pub use journal::{Collection, JournalSummary, LineItem, SalesJournal};
pub use ledger::DenominationLedger;
pub use money::Money;
pub use types::Product;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Default per-denomination instance cap enforced on replenishment.
///
/// ## Business Reason
/// A physical coin tube / bill stacker holds a bounded number of instances;
/// replenishment beyond the cap is clamped so the operator can take the
/// excess back.
pub const DEFAULT_DENOMINATION_CAPACITY: u32 = 20;

/// Maximum length of a product name.
pub const MAX_PRODUCT_NAME_LEN: usize = 100;
