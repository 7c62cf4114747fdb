//! # Validation Module
//!
//! The validation boundary in front of the core.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Presentation (out of scope for this workspace)               │
//! │  ├── Parsing, re-prompting, immediate user feedback                    │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE - business rule validation                       │
//! │  ├── Called by the machine layer before touching ledger/journal        │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Core contracts                                               │
//! │  └── Ledger/journal assume pre-validated, non-negative inputs          │
//! │                                                                         │
//! │  The core never re-prompts: it accepts validated values or reports a   │
//! │  structured outcome.                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::denomination::Denomination;
use crate::error::ValidationError;
use crate::money::Money;
use crate::MAX_PRODUCT_NAME_LEN;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product name.
///
/// ## Rules
/// - Must not be empty (after trimming)
/// - Must be at most 100 characters
///
/// ## Example
/// ```rust
/// use vendo_core::validation::validate_product_name;
///
/// assert!(validate_product_name("Fruit Salad").is_ok());
/// assert!(validate_product_name("   ").is_err());
/// ```
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "product name".to_string(),
        });
    }

    if name.len() > MAX_PRODUCT_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "product name".to_string(),
            max: MAX_PRODUCT_NAME_LEN,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a product price.
///
/// Prices must be strictly positive; the machine does not vend free items.
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if !price.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: "price".to_string(),
        });
    }

    Ok(())
}

/// Validates a purchase quantity against available stock.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed what is actually on the shelf
pub fn validate_quantity(quantity: i64, available: i64) -> ValidationResult<()> {
    if quantity <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if quantity > available {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: available,
        });
    }

    Ok(())
}

/// Validates a calorie count. Zero is allowed (water exists).
pub fn validate_calories(calories: i64) -> ValidationResult<()> {
    if calories < 0 {
        return Err(ValidationError::MustNotBeNegative {
            field: "calories".to_string(),
        });
    }

    Ok(())
}

/// Validates a replenishment count (denominations or products).
pub fn validate_replenish_count(count: i64) -> ValidationResult<()> {
    if count <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "replenish count".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Denomination Validators
// =============================================================================

/// Validates a tendered coin/bill value against the fixed denomination set.
///
/// Returns the resolved [`Denomination`] so callers accumulate typed tenders
/// rather than raw integers.
///
/// ## Example
/// ```rust
/// use vendo_core::denomination::Denomination;
/// use vendo_core::validation::validate_denomination;
///
/// assert_eq!(validate_denomination(50).unwrap(), Denomination::Fifty);
/// assert!(validate_denomination(25).is_err());
/// ```
pub fn validate_denomination(pesos: i64) -> ValidationResult<Denomination> {
    Denomination::from_pesos(pesos).ok_or(ValidationError::NotADenomination { value: pesos })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_product_name() {
        assert!(validate_product_name("Juice").is_ok());
        assert!(validate_product_name("Fruit Salad").is_ok());

        assert!(validate_product_name("").is_err());
        assert!(validate_product_name("   ").is_err());
        assert!(validate_product_name(&"A".repeat(200)).is_err());
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price(Money::from_pesos(15)).is_ok());
        assert!(validate_price(Money::from_cents(1)).is_ok());

        assert!(validate_price(Money::zero()).is_err());
        assert!(validate_price(Money::from_cents(-100)).is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1, 10).is_ok());
        assert!(validate_quantity(10, 10).is_ok());

        assert!(validate_quantity(0, 10).is_err());
        assert!(validate_quantity(-1, 10).is_err());
        assert!(validate_quantity(11, 10).is_err());
    }

    #[test]
    fn test_validate_calories() {
        assert!(validate_calories(0).is_ok());
        assert!(validate_calories(250).is_ok());
        assert!(validate_calories(-1).is_err());
    }

    #[test]
    fn test_validate_replenish_count() {
        assert!(validate_replenish_count(1).is_ok());
        assert!(validate_replenish_count(0).is_err());
        assert!(validate_replenish_count(-3).is_err());
    }

    #[test]
    fn test_validate_denomination() {
        assert_eq!(validate_denomination(1).unwrap(), Denomination::One);
        assert_eq!(validate_denomination(1000).unwrap(), Denomination::OneThousand);

        assert!(validate_denomination(0).is_err());
        assert!(validate_denomination(25).is_err());
        assert!(validate_denomination(-5).is_err());
    }
}
