//! # barista-core: Back-Office Logic for the Barista Terminal
//!
//! Stock tracking, recipe-driven stock consumption at checkout, and the
//! shift start/end reconciliation that produces the end-of-day report.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Barista Terminal Architecture                      │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Operator Console                             │   │
//! │  │    start ──► add ──► pay ──► count ──► end                      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 Terminal Commands (apps/terminal)               │   │
//! │  │    start_shift, add_to_cart, checkout, count_stock, etc.        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ barista-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌─────────┐  │   │
//! │  │   │  units  │ │ catalog │ │ recipe  │ │ ledger  │ │  order  │  │   │
//! │  │   └─────────┘ └─────────┘ └─────────┘ └─────────┘ └─────────┘  │   │
//! │  │   ┌─────────┐ ┌─────────┐ ┌─────────────┐                      │   │
//! │  │   │  shift  │ │ report  │ │ persistence │ (trait only)         │   │
//! │  │   └─────────┘ └─────────┘ └─────────────┘                      │   │
//! │  │                                                                 │   │
//! │  │   NO FILE SYSTEM • NO NETWORK • NO GLOBAL STATE                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 barista-store (Storage Layer)                   │   │
//! │  │        JSON documents, report files, first-run seeding          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`units`] - Raw ↔ bulk display unit conversion
//! - [`catalog`] - Menu categories, products and prices
//! - [`recipe`] - Ingredient cost per product size
//! - [`ledger`] - Stock levels and atomic recipe fulfilment
//! - [`order`] - Cart building and checkout
//! - [`shift`] - Shift lifecycle, stock counts, closing report
//! - [`report`] - CSV rendering of the closing report
//! - [`persistence`] - Storage seam implemented by barista-store
//! - [`defaults`] - First-run tables
//!
//! ## Example Usage
//!
//! ```rust
//! use barista_core::{Catalog, InventoryLedger, OrderSession, RecipeBook, ShiftManager};
//!
//! let catalog = Catalog::defaults();
//! let recipes = RecipeBook::defaults();
//! let mut ledger = InventoryLedger::defaults();
//! let mut shift = ShiftManager::new();
//! let mut order = OrderSession::new();
//!
//! shift.start_shift(&ledger).unwrap();
//! order.add_from_catalog(&catalog, "HOT COFFEE", "Americano", "12oz").unwrap();
//!
//! let receipt = order.checkout(&mut ledger, &recipes).unwrap();
//! assert_eq!(ledger.get("Beans"), Some(4982.0));
//!
//! shift.record_receipt(receipt).unwrap();
//! let report = shift.end_shift(&ledger).unwrap();
//! assert_eq!(report.inventory["Beans"].delta, -18.0);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod defaults;
pub mod error;
pub mod ledger;
pub mod money;
pub mod order;
pub mod persistence;
pub mod recipe;
pub mod report;
pub mod shift;
pub mod types;
pub mod units;
pub mod validation;

#[cfg(test)]
pub(crate) mod testing;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use catalog::{Catalog, Category, Product};
pub use error::{CoreError, CoreResult, ValidationError};
pub use ledger::{FulfillmentSummary, InventoryLedger, ShiftSnapshot};
pub use money::Money;
pub use order::{OrderSession, OrderState};
pub use persistence::{DocumentKind, PersistResult, Persistence, PersistenceError};
pub use recipe::{recipe_key, Recipe, RecipeBook};
pub use report::ReportExporter;
pub use shift::{InventoryRow, ShiftManager, ShiftReport, ShiftState};
pub use types::*;
pub use units::UnitConverter;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum lines allowed in a single cart.
///
/// ## Business Reason
/// Prevents runaway carts from a stuck key or repeated taps.
pub const MAX_CART_LINES: usize = 100;

/// Highest price a menu item may carry: 1,000,000.00 in centavos.
///
/// ## Business Reason
/// Keeps every cart total and shift sales total far inside `i64`, so no
/// sum of accepted prices can overflow.
pub const MAX_PRICE_CENTS: i64 = 100_000_000;

/// Maximum length of any ingredient, product, size or category name.
pub const MAX_NAME_LENGTH: usize = 100;

/// Raw units per display unit for ingredients without a unit size entry.
pub const DEFAULT_UNIT_SIZE: f64 = 1.0;

/// Absolute tolerance for stock comparisons.
///
/// Recipe quantities are summed in binary floating point; an order that
/// uses exactly the remaining stock must not be rejected by a rounding
/// error in the last bit.
pub const STOCK_TOLERANCE: f64 = 1e-9;

/// Receipt summaries on the receipts screen are cut to this many characters.
pub const RECEIPT_SUMMARY_CHARS: usize = 40;
