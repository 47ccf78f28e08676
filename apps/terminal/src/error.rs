//! # Terminal Error Types
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Terminal                           │
//! │                                                                         │
//! │  Console line                                                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Command function ─── Result<T, ApiError>                               │
//! │       │                                                                 │
//! │       ├── CoreError::InsufficientStock ──► INSUFFICIENT_STOCK           │
//! │       ├── CoreError::ShiftNotOpen ───────► SHIFT_ERROR                  │
//! │       ├── PersistenceError ──────────────► PERSISTENCE_ERROR (+ log)    │
//! │       ├── StoreError::Io ────────────────► STORAGE_ERROR (+ log)        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  "[INSUFFICIENT_STOCK] Insufficient stock: Beans"                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `ConfigError` is separate: it only happens at startup, before any
//! command runs.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use barista_core::{CoreError, PersistenceError};
use barista_store::StoreError;
use serde::Serialize;
use thiserror::Error;

// =============================================================================
// ApiError
// =============================================================================

/// Error returned from terminal commands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    NotFound,
    ValidationError,
    CartError,
    InsufficientStock,
    /// No recipe registered for a product
    RecipeError,
    /// Operation not allowed in the current shift state
    ShiftError,
    /// A document save or load failed; memory and disk may disagree
    PersistenceError,
    /// Report or data directory could not be written
    StorageError,
    Internal,
}

impl ErrorCode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::ValidationError => "VALIDATION_ERROR",
            ErrorCode::CartError => "CART_ERROR",
            ErrorCode::InsufficientStock => "INSUFFICIENT_STOCK",
            ErrorCode::RecipeError => "RECIPE_ERROR",
            ErrorCode::ShiftError => "SHIFT_ERROR",
            ErrorCode::PersistenceError => "PERSISTENCE_ERROR",
            ErrorCode::StorageError => "STORAGE_ERROR",
            ErrorCode::Internal => "INTERNAL",
        }
    }
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::NotFound { entity, key } => ApiError::not_found(&entity, &key),
            err @ CoreError::InsufficientStock(_) => {
                ApiError::new(ErrorCode::InsufficientStock, err.to_string())
            }
            err @ (CoreError::EmptyCart | CoreError::CartTooLarge { .. }) => {
                ApiError::new(ErrorCode::CartError, err.to_string())
            }
            err @ CoreError::NoRecipe(_) => ApiError::new(ErrorCode::RecipeError, err.to_string()),
            err @ (CoreError::ShiftAlreadyOpen | CoreError::ShiftNotOpen) => {
                ApiError::new(ErrorCode::ShiftError, err.to_string())
            }
            err @ (CoreError::InvalidPrice { .. }
            | CoreError::InvalidQuantity { .. }
            | CoreError::Validation(_)) => ApiError::validation(err.to_string()),
            CoreError::Report { reason } => {
                tracing::error!("Report rendering failed: {}", reason);
                ApiError::internal(format!("Report rendering failed: {}", reason))
            }
            CoreError::Persistence(e) => ApiError::from(e),
        }
    }
}

impl From<PersistenceError> for ApiError {
    fn from(err: PersistenceError) -> Self {
        tracing::error!(document = %err.document, error = %err, "Persistence failed");
        ApiError::new(
            ErrorCode::PersistenceError,
            format!("Change applied but not saved: {}", err),
        )
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Persistence(e) => ApiError::from(e),
            other => {
                tracing::error!("Storage failed: {}", other);
                ApiError::new(ErrorCode::StorageError, other.to_string())
            }
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code.as_str(), self.message)
    }
}

impl std::error::Error for ApiError {}

// =============================================================================
// ConfigError
// =============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Config parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

impl ConfigError {
    pub fn io(path: impl AsRef<Path>, source: io::Error) -> Self {
        ConfigError::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}

pub type ConfigResult<T> = Result<T, ConfigError>;

// =============================================================================
// Startup Error
// =============================================================================

/// Anything that stops the terminal from starting.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Console I/O failed: {0}")]
    Console(#[from] io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use barista_core::{DocumentKind, Shortage};

    #[test]
    fn test_insufficient_stock_code() {
        let err = ApiError::from(CoreError::InsufficientStock(vec![Shortage {
            ingredient: "Beans".into(),
            available: 10.0,
            required: 18.0,
        }]));
        assert_eq!(err.code, ErrorCode::InsufficientStock);
        assert!(err.message.contains("Beans"));
    }

    #[test]
    fn test_persistence_failure_is_visible() {
        let err = ApiError::from(CoreError::Persistence(PersistenceError::new(
            DocumentKind::Inventory,
            "disk full",
        )));
        assert_eq!(err.code, ErrorCode::PersistenceError);
        assert_eq!(
            err.to_string(),
            "[PERSISTENCE_ERROR] Change applied but not saved: inventory persistence failed: disk full"
        );
    }

    #[test]
    fn test_shift_errors() {
        assert_eq!(ApiError::from(CoreError::ShiftNotOpen).code, ErrorCode::ShiftError);
        assert_eq!(
            ApiError::from(CoreError::ShiftAlreadyOpen).code,
            ErrorCode::ShiftError
        );
    }

    #[test]
    fn test_store_error_codes() {
        let exists = ApiError::from(StoreError::ReportExists {
            path: PathBuf::from("Report.csv"),
        });
        assert_eq!(exists.code, ErrorCode::StorageError);

        let wrapped = ApiError::from(StoreError::Persistence(PersistenceError::new(
            DocumentKind::Receipts,
            "gone",
        )));
        assert_eq!(wrapped.code, ErrorCode::PersistenceError);
    }

    #[test]
    fn test_not_found_message() {
        let err = ApiError::from(CoreError::not_found("Product", "HOT COFFEE/Mocha"));
        assert_eq!(err.to_string(), "[NOT_FOUND] Product not found: HOT COFFEE/Mocha");
    }
}
