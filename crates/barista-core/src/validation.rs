//! # Validation Module
//!
//! Input validation for operator-entered and persisted values.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Validation Layers                                   │
//! │                                                                         │
//! │  Layer 1: Console Input                                                 │
//! │  └── Raw text: "8.5", "60.50", "Milk"                                   │
//! │                                                                         │
//! │  Layer 2: Commands (apps/terminal)                                      │
//! │  └── parse_price / parse_quantity turn text into typed values          │
//! │                                                                         │
//! │  Layer 3: Core (THIS MODULE)                                            │
//! │  └── Names, prices, quantities, cart size                              │
//! │                                                                         │
//! │  Layer 4: Domain operations                                             │
//! │  └── Ledger, catalog, shift rules (existence, state machine)            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::{MAX_CART_LINES, MAX_NAME_LENGTH, MAX_PRICE_CENTS};

/// Convenience type alias for validation results.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Name Validators
// =============================================================================

/// Validates a display name (ingredient, product, size or category).
///
/// ## Rules
/// - Must not be empty (after trimming whitespace)
/// - Must be at most 100 characters
///
/// Names are case-sensitive identifiers and are never normalised.
pub fn validate_name(field: &str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.chars().count() > MAX_NAME_LENGTH {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_NAME_LENGTH,
        });
    }

    Ok(())
}

/// Validates an ingredient name.
pub fn validate_ingredient_name(name: &str) -> ValidationResult<()> {
    validate_name("ingredient", name)
}

/// Validates a unit size (bulk display unit in raw units).
///
/// Must be finite and strictly positive, otherwise conversion would divide
/// by zero or flip signs.
pub fn validate_unit_size(ingredient: &str, size: f64) -> ValidationResult<()> {
    if !size.is_finite() || size <= 0.0 {
        return Err(ValidationError::MustBePositive {
            field: format!("unit size of {ingredient}"),
        });
    }
    Ok(())
}

// =============================================================================
// Price Validators
// =============================================================================

/// Validates a menu price. Zero is allowed (free items); negative is not.
///
/// ## Rules
/// - Must not be negative
/// - Must not exceed `MAX_PRICE_CENTS`
pub fn validate_price(price: Money) -> CoreResult<()> {
    if price.is_negative() {
        return Err(CoreError::invalid_price(format!(
            "{price} is negative"
        )));
    }
    if price.cents() > MAX_PRICE_CENTS {
        return Err(CoreError::invalid_price(format!(
            "{price} is above the maximum of {}",
            Money::from_cents(MAX_PRICE_CENTS)
        )));
    }
    Ok(())
}

/// Parses operator input into a validated price.
///
/// ## Example
/// ```rust
/// use barista_core::validation::parse_price;
///
/// assert_eq!(parse_price("85").unwrap().cents(), 8500);
/// assert!(parse_price("-1").is_err());
/// assert!(parse_price("eighty").is_err());
/// ```
pub fn parse_price(text: &str) -> CoreResult<Money> {
    let price: Money = text
        .parse()
        .map_err(|e: ValidationError| CoreError::invalid_price(e.to_string()))?;
    validate_price(price)?;
    Ok(price)
}

// =============================================================================
// Quantity Validators
// =============================================================================

/// Validates a stock quantity.
///
/// Only finiteness is enforced. Negative quantities are accepted so that an
/// operator correction is never blocked by the terminal.
pub fn validate_quantity(field: &str, value: f64) -> CoreResult<()> {
    if !value.is_finite() {
        return Err(CoreError::invalid_quantity(field, "must be a finite number"));
    }
    Ok(())
}

/// Parses a counted quantity typed by the operator.
pub fn parse_quantity(field: &str, text: &str) -> CoreResult<f64> {
    let value: f64 = text
        .trim()
        .parse()
        .map_err(|_| CoreError::invalid_quantity(field, format!("'{}' is not a number", text.trim())))?;
    validate_quantity(field, value)?;
    Ok(value)
}

// =============================================================================
// Cart Validators
// =============================================================================

/// Checks that one more line fits in the cart.
pub fn validate_cart_size(current_lines: usize) -> CoreResult<()> {
    if current_lines >= MAX_CART_LINES {
        return Err(CoreError::CartTooLarge {
            max: MAX_CART_LINES,
        });
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
