//! # Error Types
//!
//! Domain-specific error types for vendo-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  vendo-core errors (this file)                                         │
//! │  ├── CoreError        - Cash-handling business conditions              │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  vendo-machine errors (separate crate)                                 │
//! │  └── MachineError     - Slot/catalog/purchase failures                 │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → MachineError → Caller             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The ledger and journal themselves never return errors: infeasible change,
//! clamped replenishment and collection shortfalls are expected business
//! outcomes surfaced through return values. These types exist for the
//! validation boundary in front of the core and for the machine layer.
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (product name, amounts)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to a user-facing message

use thiserror::Error;

use crate::money::Money;

// =============================================================================
// Core Error
// =============================================================================

/// Cash-handling business rule violations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Not enough product left to sell the requested quantity.
    #[error("Insufficient stock for {name}: available {available}, requested {requested}")]
    OutOfStock {
        name: String,
        available: i64,
        requested: i64,
    },

    /// Tendered cash does not cover the purchase total.
    #[error("Insufficient payment: {required} required, {tendered} tendered")]
    InsufficientPayment { required: Money, tendered: Money },

    /// The till cannot dispense exact change for the transaction.
    ///
    /// Raised by callers that probed `can_make_change` and must abort:
    /// the tendered amount is returned to the customer and nothing is
    /// dispensed or mutated.
    #[error("Cannot dispense exact change of {change_due}")]
    ChangeUnavailable { change_due: Money },

    /// A tendered value is not one of the accepted coin/bill face values.
    #[error("₱{value} is not an accepted coin or bill")]
    InvalidDenomination { value: i64 },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These occur at the boundary in front of the core, before any business
/// logic runs; the ledger and journal assume inputs already passed here.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    MustNotBeNegative { field: String },

    /// Value is not in the fixed denomination set.
    #[error("₱{value} is not in the accepted denomination set")]
    NotADenomination { value: i64 },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
