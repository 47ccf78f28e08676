//! # Error Types
//!
//! Domain-specific error types for barista-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  barista-core errors (this file)                                       │
//! │  ├── CoreError         - Business rule violations                       │
//! │  ├── ValidationError   - Malformed names and sizes                      │
//! │  └── PersistenceError  - Injected save/load failed (persistence.rs)     │
//! │                                                                         │
//! │  barista-store errors (separate crate)                                 │
//! │  └── StoreError        - File system failures                           │
//! │                                                                         │
//! │  Terminal errors (in app)                                              │
//! │  └── ApiError          - What the operator sees                        │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → Console                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Recoverability
//! Every variant is recoverable at the caller boundary. `InsufficientStock`,
//! `InvalidPrice` and `InvalidQuantity` are raised before any state changes.
//! `Persistence` is raised after the in-memory change has committed.

use std::collections::BTreeSet;

use thiserror::Error;

use crate::persistence::PersistenceError;
use crate::types::Shortage;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Unknown category, product, size, ingredient or cart line.
    #[error("{entity} not found: {key}")]
    NotFound { entity: String, key: String },

    /// Price is negative or could not be parsed.
    #[error("Invalid price: {reason}")]
    InvalidPrice { reason: String },

    /// Checkout or removal attempted on an empty cart.
    #[error("Cart is empty")]
    EmptyCart,

    /// One or more ingredients cannot cover the order's total demand.
    ///
    /// ## User Workflow
    /// ```text
    /// Cart: 300 × Americano 12oz
    ///      │
    ///      ▼
    /// Demand: Beans 5400, Water 60000, ...
    ///      │
    ///      ▼
    /// Stock:  Beans 5000  ──► shortfall
    ///      │
    ///      ▼
    /// InsufficientStock([Beans: available 5000, required 5400])
    ///      │
    ///      ▼
    /// Ledger untouched, cart kept for the operator to adjust
    /// ```
    #[error("Insufficient stock: {}", shortage_names(.0))]
    InsufficientStock(Vec<Shortage>),

    /// No recipe is registered for the product key.
    ///
    /// Recoverable: the product simply consumes no tracked stock.
    #[error("No recipe for {0}")]
    NoRecipe(String),

    /// `start_shift` called while a shift is open.
    #[error("A shift is already open")]
    ShiftAlreadyOpen,

    /// Shift-only operation called while the shift is closed.
    #[error("No shift is open")]
    ShiftNotOpen,

    /// Non-numeric, non-finite or otherwise malformed quantity.
    #[error("Invalid quantity for {field}: {reason}")]
    InvalidQuantity { field: String, reason: String },

    /// Cart has exceeded the maximum number of lines.
    #[error("Cart cannot have more than {max} lines")]
    CartTooLarge { max: usize },

    /// The report could not be rendered.
    #[error("Report rendering failed: {reason}")]
    Report { reason: String },

    /// The injected persistence collaborator failed.
    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl CoreError {
    /// Creates a NotFound error for a given entity type and key.
    pub fn not_found(entity: impl Into<String>, key: impl Into<String>) -> Self {
        CoreError::NotFound {
            entity: entity.into(),
            key: key.into(),
        }
    }

    /// Creates an InvalidQuantity error.
    pub fn invalid_quantity(field: impl Into<String>, reason: impl Into<String>) -> Self {
        CoreError::InvalidQuantity {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Creates an InvalidPrice error.
    pub fn invalid_price(reason: impl Into<String>) -> Self {
        CoreError::InvalidPrice {
            reason: reason.into(),
        }
    }

    /// Names of the ingredients that blocked a checkout, if this is an
    /// `InsufficientStock` error.
    pub fn insufficient_ingredients(&self) -> Option<BTreeSet<&str>> {
        match self {
            CoreError::InsufficientStock(shortages) => Some(
                shortages
                    .iter()
                    .map(|s| s.ingredient.as_str())
                    .collect(),
            ),
            _ => None,
        }
    }
}

fn shortage_names(shortages: &[Shortage]) -> String {
    shortages
        .iter()
        .map(|s| s.ingredient.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when names or static table values don't meet
/// requirements. Used for early validation before business logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be strictly positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., a price with three decimals).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::not_found("Category", "DESSERTS");
        assert_eq!(err.to_string(), "Category not found: DESSERTS");

        let err = CoreError::InsufficientStock(vec![
            Shortage {
                ingredient: "Beans".to_string(),
                available: 5000.0,
                required: 5400.0,
            },
            Shortage {
                ingredient: "Milk".to_string(),
                available: 0.0,
                required: 180.0,
            },
        ]);
        assert_eq!(err.to_string(), "Insufficient stock: Beans, Milk");
    }

    #[test]
    fn test_insufficient_ingredients() {
        let err = CoreError::InsufficientStock(vec![Shortage {
            ingredient: "Beans".to_string(),
            available: 1.0,
            required: 2.0,
        }]);
        let names = err.insufficient_ingredients().unwrap();
        assert_eq!(names.into_iter().collect::<Vec<_>>(), vec!["Beans"]);

        assert!(CoreError::EmptyCart.insufficient_ingredients().is_none());
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "ingredient".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
        assert_eq!(
            core_err.to_string(),
            "Validation error: ingredient is required"
        );
    }
}
