//! # Domain Types
//!
//! Value types shared by the order, ledger, shift and report modules.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    CartLine     │   │     Receipt     │   │   StockDelta    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  product        │   │  id (u64)       │   │  start          │       │
//! │  │  size           │   │  timestamp      │   │  end            │       │
//! │  │  unit_price     │   │  total          │   │  delta          │       │
//! │  └─────────────────┘   │  lines[]        │   └─────────────────┘       │
//! │                        └─────────────────┘                              │
//! │  ┌─────────────────┐                                                    │
//! │  │    Shortage     │   Raised inside InsufficientStock                  │
//! │  └─────────────────┘                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::money::Money;
use crate::recipe::recipe_key;

// =============================================================================
// Cart Line
// =============================================================================

/// One sold unit of one product size.
///
/// The price is frozen at the moment the line is added; later catalog
/// changes do not affect lines already in a cart or receipt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub product: String,
    pub size: String,
    pub unit_price: Money,
}

impl CartLine {
    pub fn new(product: impl Into<String>, size: impl Into<String>, unit_price: Money) -> Self {
        CartLine {
            product: product.into(),
            size: size.into(),
            unit_price,
        }
    }

    /// Product key used for recipe lookup and receipt item names
    /// (`"Americano 12oz"`).
    pub fn key(&self) -> String {
        recipe_key(&self.product, &self.size)
    }
}

// =============================================================================
// Receipt
// =============================================================================

/// Immutable record of a completed checkout.
///
/// Fields are private: a receipt is only ever built by `Receipt::new`,
/// which derives the total from the lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ReceiptRecord")]
pub struct Receipt {
    id: u64,
    timestamp: DateTime<Utc>,
    total: Money,
    lines: Vec<CartLine>,
}

impl Receipt {
    pub fn new(id: u64, timestamp: DateTime<Utc>, lines: Vec<CartLine>) -> Self {
        let total = lines.iter().map(|l| l.unit_price).sum();
        Receipt {
            id,
            timestamp,
            total,
            lines,
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn total(&self) -> Money {
        self.total
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Item names in sale order, one per line.
    pub fn item_names(&self) -> Vec<String> {
        self.lines.iter().map(CartLine::key).collect()
    }

    /// Comma-joined item names, cut to `max_chars` characters with a
    /// trailing `...` when longer.
    pub fn summary(&self, max_chars: usize) -> String {
        let joined = self.item_names().join(", ");
        if joined.chars().count() > max_chars {
            let cut: String = joined.chars().take(max_chars).collect();
            format!("{cut}...")
        } else {
            joined
        }
    }
}

/// On-disk shape of a receipt. The stored total is checked against the
/// lines and the line sum wins.
#[derive(Deserialize)]
struct ReceiptRecord {
    id: u64,
    timestamp: DateTime<Utc>,
    total: Money,
    lines: Vec<CartLine>,
}

impl From<ReceiptRecord> for Receipt {
    fn from(record: ReceiptRecord) -> Self {
        let receipt = Receipt::new(record.id, record.timestamp, record.lines);
        if receipt.total != record.total {
            warn!(
                receipt_id = receipt.id,
                stored = %record.total,
                computed = %receipt.total,
                "Stored receipt total disagrees with its lines"
            );
        }
        receipt
    }
}

// =============================================================================
// Stock Delta
// =============================================================================

/// Start/end/delta triple for one ingredient, in raw units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StockDelta {
    pub start: f64,
    pub end: f64,
    pub delta: f64,
}

impl StockDelta {
    pub fn new(start: f64, end: f64) -> Self {
        StockDelta {
            start,
            end,
            delta: end - start,
        }
    }
}

// =============================================================================
// Shortage
// =============================================================================

/// An ingredient whose stock cannot cover a checkout's demand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shortage {
    pub ingredient: String,
    pub available: f64,
    pub required: f64,
}

impl Shortage {
    /// How much more stock the order would have needed.
    pub fn missing(&self) -> f64 {
        self.required - self.available
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
