//! # Machine Error Types
//!
//! Errors raised by the catalog and purchase layer. Cash-handling business
//! conditions live in [`vendo_core::error`]; everything here is about slots,
//! combo assembly and configuration.

use thiserror::Error;

use vendo_core::CoreError;

// =============================================================================
// Machine Error
// =============================================================================

/// Failures of catalog, purchase and configuration operations.
///
/// Slot indices are zero-based throughout the machine layer; a presentation
/// layer that numbers slots from 1 translates before calling in.
#[derive(Debug, Error)]
pub enum MachineError {
    /// Slot index outside the configured slot count.
    #[error("Slot {slot} does not exist (machine has {max} slots)")]
    InvalidSlot { slot: usize, max: usize },

    /// Operation requires a product in the slot, but the slot is vacant.
    #[error("Slot {slot} is vacant")]
    SlotVacant { slot: usize },

    /// Install requires a vacant slot, but one is occupied.
    #[error("Slot {slot} is already occupied by {name}")]
    SlotOccupied { slot: usize, name: String },

    /// The combo product cannot currently be assembled.
    ///
    /// Raised when too many ingredient slots are sold out or a pantry
    /// staple is depleted, and when a regular machine (no combo catalog)
    /// is asked for a combo.
    #[error("The combo product is not available right now")]
    ComboUnavailable,

    /// A combo order named the wrong number of ingredient picks.
    #[error("Combo requires exactly {expected} picks, got {got}")]
    WrongPickCount { expected: usize, got: usize },

    /// The same ingredient slot was picked more than once.
    #[error("Slot {slot} was picked more than once")]
    DuplicatePick { slot: usize },

    /// A picked ingredient slot is vacant, sold out, or not an
    /// ingredient slot at all.
    #[error("Slot {slot} cannot be picked as a combo ingredient")]
    PickUnavailable { slot: usize },

    /// A pantry item name is not stocked by this machine.
    #[error("Unknown pantry staple: {name}")]
    UnknownStaple { name: String },

    /// A pantry staple ran out mid-operation.
    #[error("Pantry staple {name} is depleted")]
    StapleDepleted { name: String },

    /// Configuration failed validation.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Core business error (wraps CoreError).
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Config file I/O failure.
    #[error("Config I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Config file parse failure.
    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Config serialization failure.
    #[error("Config write error: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with MachineError.
pub type MachineResult<T> = Result<T, MachineError>;

// =============================================================================
// Unit Tests
// =============================================================================
