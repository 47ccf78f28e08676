//! # Inventory Ledger
//!
//! Current stock per ingredient, in raw units, and the atomic recipe
//! fulfilment that turns a cart into stock deductions.
//!
//! ## Checkout Fulfilment
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    fulfill(lines, recipes)                              │
//! │                                                                         │
//! │  1. Demand    Σ recipe[line] over every line (recipe-less lines skip)  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  2. Verify    every ingredient: stock + 1e-9 ≥ demand                   │
//! │       │       (missing ingredient = 0 stock)                            │
//! │       │                                                                 │
//! │       ├── any short ──► InsufficientStock(shortages), ledger untouched │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  3. Commit    subtract all demand, snap |x| < 1e-9 to 0                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `fulfill` takes `&mut self`, so steps 1 to 3 form one critical section
//! for whoever holds the ledger.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::defaults::DEFAULT_INVENTORY;
use crate::error::{CoreError, CoreResult};
use crate::recipe::RecipeBook;
use crate::types::{CartLine, Shortage, StockDelta};
use crate::validation::{validate_ingredient_name, validate_quantity};
use crate::STOCK_TOLERANCE;

// =============================================================================
// Shift Snapshot
// =============================================================================

/// Value copy of the ledger taken at shift start.
///
/// Independent of the ledger it was taken from: later stock changes never
/// show through. Only a stock count during the shift may overwrite an entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShiftSnapshot {
    quantities: BTreeMap<String, f64>,
}

impl ShiftSnapshot {
    pub fn get(&self, ingredient: &str) -> Option<f64> {
        self.quantities.get(ingredient).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.quantities.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.quantities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quantities.is_empty()
    }

    pub(crate) fn rebaseline(&mut self, ingredient: &str, raw: f64) {
        self.quantities.insert(ingredient.to_string(), raw);
    }
}

// =============================================================================
// Fulfilment Summary
// =============================================================================

/// Aggregate demand of a set of cart lines.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FulfillmentSummary {
    /// Ingredient → total raw units required (or deducted, after commit).
    pub consumed: BTreeMap<String, f64>,
    /// Product keys of lines that have no recipe.
    pub untracked: Vec<String>,
}

// =============================================================================
// Inventory Ledger
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InventoryLedger {
    stock: BTreeMap<String, f64>,
}

impl InventoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a ledger from `(ingredient, raw quantity)` pairs.
    pub fn from_quantities<I, S>(entries: I) -> CoreResult<Self>
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        let mut ledger = Self::new();
        for (name, qty) in entries {
            let name: String = name.into();
            ledger.set_stock(&name, qty)?;
        }
        Ok(ledger)
    }

    /// The café's first-run stock levels.
    pub fn defaults() -> Self {
        InventoryLedger {
            stock: DEFAULT_INVENTORY
                .iter()
                .map(|(name, qty)| (name.to_string(), *qty))
                .collect(),
        }
    }

    pub fn get(&self, ingredient: &str) -> Option<f64> {
        self.stock.get(ingredient).copied()
    }

    /// Stock of an ingredient, treating untracked ones as zero.
    pub fn quantity(&self, ingredient: &str) -> f64 {
        self.get(ingredient).unwrap_or(0.0)
    }

    pub fn contains(&self, ingredient: &str) -> bool {
        self.stock.contains_key(ingredient)
    }

    /// Ingredients in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.stock.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.stock.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stock.is_empty()
    }

    /// Independent copy of the current stock.
    pub fn snapshot(&self) -> ShiftSnapshot {
        ShiftSnapshot {
            quantities: self.stock.clone(),
        }
    }

    /// Overwrites (or creates) an ingredient's stock level.
    ///
    /// No lower bound is enforced: a physical count may legitimately come
    /// in below zero after an earlier mis-entry, and the operator's number
    /// is taken as-is. Returns the previous level.
    pub fn set_stock(&mut self, ingredient: &str, raw: f64) -> CoreResult<Option<f64>> {
        validate_ingredient_name(ingredient)?;
        validate_quantity(ingredient, raw)?;

        let previous = self.stock.insert(ingredient.to_string(), raw);
        debug!(ingredient, ?previous, raw, "Stock level set");
        Ok(previous)
    }

    /// Total demand of `lines` without touching stock.
    pub fn demand(lines: &[CartLine], recipes: &RecipeBook) -> FulfillmentSummary {
        let mut summary = FulfillmentSummary::default();

        for line in lines {
            match recipes.resolve(&line.product, &line.size) {
                Ok(recipe) => {
                    for (ingredient, qty) in recipe {
                        *summary.consumed.entry(ingredient.clone()).or_insert(0.0) += qty;
                    }
                }
                Err(_) => summary.untracked.push(line.key()),
            }
        }

        summary
    }

    /// Deducts the recipe cost of every line, all or nothing.
    ///
    /// ## Errors
    /// `InsufficientStock` listing every short ingredient (sorted by name).
    /// The ledger is bit-identical to its state before the call.
    pub fn fulfill(
        &mut self,
        lines: &[CartLine],
        recipes: &RecipeBook,
    ) -> CoreResult<FulfillmentSummary> {
        let summary = Self::demand(lines, recipes);
        debug!(
            lines = lines.len(),
            ingredients = summary.consumed.len(),
            untracked = summary.untracked.len(),
            "Computed order demand"
        );

        let shortages: Vec<Shortage> = summary
            .consumed
            .iter()
            .filter_map(|(ingredient, &required)| {
                let available = self.quantity(ingredient);
                (available + STOCK_TOLERANCE < required).then(|| Shortage {
                    ingredient: ingredient.clone(),
                    available,
                    required,
                })
            })
            .collect();

        if !shortages.is_empty() {
            warn!(?shortages, "Checkout rejected: insufficient stock");
            return Err(CoreError::InsufficientStock(shortages));
        }

        for (ingredient, required) in &summary.consumed {
            // Zero-demand entries for untracked ingredients are not created.
            if let Some(level) = self.stock.get_mut(ingredient) {
                *level -= required;
                if level.abs() < STOCK_TOLERANCE {
                    *level = 0.0;
                }
            }
        }

        info!(
            lines = lines.len(),
            ingredients = summary.consumed.len(),
            "Order fulfilled"
        );
        Ok(summary)
    }

    /// Per-ingredient change since `snapshot`, over the union of both key
    /// sets. A side missing an ingredient counts as zero.
    pub fn diff(&self, snapshot: &ShiftSnapshot) -> BTreeMap<String, StockDelta> {
        let mut diff: BTreeMap<String, StockDelta> = snapshot
            .iter()
            .map(|(name, start)| (name.to_string(), StockDelta::new(start, self.quantity(name))))
            .collect();

        for (name, end) in self.iter() {
            diff.entry(name.to_string())
                .or_insert_with(|| StockDelta::new(0.0, end));
        }

        diff
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
