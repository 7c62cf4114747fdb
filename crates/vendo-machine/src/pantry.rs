//! # Pantry
//!
//! Non-sellable staples the special machine consumes while assembling its
//! combo product: the cups, spoons, milks and cheese that never appear on
//! the shelf but without which nothing can be mixed.
//!
//! Staples behave like a small slot bank keyed by name: bounded stock,
//! clamped replenishment, one unit consumed per use.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, warn};

use crate::error::{MachineError, MachineResult};

/// The staples a fruit-salad combo draws on.
pub const STANDARD_STAPLES: [&str; 5] = [
    "Condensed Milk",
    "Evaporated Milk",
    "Paper Cup",
    "Plastic Spoon",
    "Cheese",
];

// =============================================================================
// Pantry
// =============================================================================

/// Named staple stock with a shared per-item capacity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pantry {
    items: BTreeMap<String, i64>,
    capacity: i64,
}

impl Pantry {
    /// Creates a pantry stocked with zero of each standard staple.
    pub fn standard(capacity: i64) -> Self {
        Pantry {
            items: STANDARD_STAPLES
                .iter()
                .map(|name| (name.to_string(), 0))
                .collect(),
            capacity,
        }
    }

    /// The per-item stock cap.
    #[inline]
    pub fn capacity(&self) -> i64 {
        self.capacity
    }

    /// Current count of one staple.
    pub fn count(&self, name: &str) -> MachineResult<i64> {
        self.items
            .get(name)
            .copied()
            .ok_or_else(|| MachineError::UnknownStaple {
                name: name.to_string(),
            })
    }

    /// True when any staple is at zero, meaning the combo cannot be assembled.
    pub fn any_depleted(&self) -> bool {
        self.items.values().any(|count| *count == 0)
    }

    /// Adds stock of one staple, clamped at capacity. Returns the accepted
    /// amount, mirroring slot and till replenishment.
    pub fn replenish(&mut self, name: &str, requested: i64) -> MachineResult<i64> {
        let current = self.count(name)?;
        let accepted = requested.max(0).min(self.capacity - current);
        self.items.insert(name.to_string(), current + accepted);

        if accepted < requested {
            warn!(
                staple = name,
                requested,
                accepted,
                capacity = self.capacity,
                "pantry replenishment clamped at capacity"
            );
        }
        Ok(accepted)
    }

    /// Consumes one unit of a staple during combo assembly.
    pub fn consume(&mut self, name: &str) -> MachineResult<()> {
        let current = self.count(name)?;
        if current == 0 {
            return Err(MachineError::StapleDepleted {
                name: name.to_string(),
            });
        }
        self.items.insert(name.to_string(), current - 1);
        debug!(staple = name, remaining = current - 1, "consumed staple");
        Ok(())
    }

    /// Read-only staple counts for display.
    pub fn snapshot(&self) -> BTreeMap<String, i64> {
        self.items.clone()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_pantry_starts_empty() {
        let pantry = Pantry::standard(10);
        assert!(pantry.any_depleted());
        for staple in STANDARD_STAPLES {
            assert_eq!(pantry.count(staple).unwrap(), 0);
        }
    }

    #[test]
    fn test_unknown_staple() {
        let pantry = Pantry::standard(10);
        assert!(matches!(
            pantry.count("Caramel").unwrap_err(),
            MachineError::UnknownStaple { .. }
        ));
    }

    #[test]
    fn test_replenish_clamps() {
        let mut pantry = Pantry::standard(10);
        assert_eq!(pantry.replenish("Cheese", 7).unwrap(), 7);
        assert_eq!(pantry.replenish("Cheese", 7).unwrap(), 3);
        assert_eq!(pantry.count("Cheese").unwrap(), 10);
    }

    #[test]
    fn test_consume() {
        let mut pantry = Pantry::standard(10);
        pantry.replenish("Paper Cup", 1).unwrap();

        pantry.consume("Paper Cup").unwrap();
        assert_eq!(pantry.count("Paper Cup").unwrap(), 0);
        assert!(matches!(
            pantry.consume("Paper Cup").unwrap_err(),
            MachineError::StapleDepleted { .. }
        ));
    }

    #[test]
    fn test_any_depleted_clears_once_all_stocked() {
        let mut pantry = Pantry::standard(10);
        for staple in STANDARD_STAPLES {
            pantry.replenish(staple, 5).unwrap();
        }
        assert!(!pantry.any_depleted());

        for _ in 0..5 {
            pantry.consume("Cheese").unwrap();
        }
        assert!(pantry.any_depleted());
    }
}
