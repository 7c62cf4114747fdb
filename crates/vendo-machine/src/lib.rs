//! # vendo-machine: Machine Layer for Vendo
//!
//! Composes the pure cash core (`vendo-core`) into a whole vending machine
//! session: a product shelf, a purchase workflow, operator maintenance and
//! reporting, and (for the special variant) a combo product assembled to
//! order.
//!
//! ## Module Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         vendo-machine                                   │
//! │                                                                         │
//! │  ┌───────────┐  ┌───────────┐  ┌────────────────────────────────────┐  │
//! │  │  machine  │  │ purchase  │  │ slots                              │  │
//! │  │ (session) │◄─│ Order/    │  │ install / remove / edit /          │  │
//! │  │ quote,    │  │ Tender/   │  │ replenish / dispense               │  │
//! │  │ commit    │  │ Receipt   │  └────────────────────────────────────┘  │
//! │  └─────┬─────┘  └───────────┘  ┌───────────┐  ┌─────────────────────┐  │
//! │        │                       │  combo    │  │ pantry              │  │
//! │        │ owns the core         │ recipe &  │  │ non-sellable        │  │
//! │        ▼                       │ rules     │  │ staples             │  │
//! │  DenominationLedger            └───────────┘  └─────────────────────┘  │
//! │  SalesJournal                  ┌───────────┐  ┌─────────────────────┐  │
//! │  (vendo-core)                  │  config   │  │ error               │  │
//! │                                │ TOML+env  │  │ MachineError        │  │
//! │                                └───────────┘  └─────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The layer never prompts or retries: it takes pre-validated values and
//! returns typed outcomes, leaving all interaction loops to a presentation
//! layer outside this workspace.

// =============================================================================
// Module Declarations
// =============================================================================

pub mod combo;
pub mod config;
pub mod error;
pub mod machine;
pub mod pantry;
pub mod purchase;
pub mod slots;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use combo::{ComboSpec, FRUIT_SLOT_COUNT};
pub use config::{ComboSettings, MachineConfig, SlotSettings, TillSettings};
pub use error::{MachineError, MachineResult};
pub use machine::{SalesSummary, SpecialCatalog, VendingMachine};
pub use pantry::{Pantry, STANDARD_STAPLES};
pub use purchase::{Order, OrderKind, Receipt, Tender};
pub use slots::{SlotBank, SlotView};
