//! # Ledger State
//!
//! Stock levels plus the read-only tables needed to interpret them.
//!
//! Checkout and stock counts hold this lock for their whole duration, so a
//! count can never land between a checkout's availability check and its
//! deduction.

use std::sync::{Arc, Mutex, PoisonError};

use barista_core::{InventoryLedger, RecipeBook, UnitConverter};

#[derive(Debug, Clone)]
pub struct LedgerState {
    ledger: Arc<Mutex<InventoryLedger>>,
    units: Arc<UnitConverter>,
    recipes: Arc<RecipeBook>,
}

impl LedgerState {
    pub fn new(ledger: InventoryLedger, units: UnitConverter, recipes: RecipeBook) -> Self {
        let unknown = recipes.unknown_ingredients(&ledger);
        if !unknown.is_empty() {
            tracing::warn!(?unknown, "Recipes reference ingredients with no stock entry");
        }
        LedgerState {
            ledger: Arc::new(Mutex::new(ledger)),
            units: Arc::new(units),
            recipes: Arc::new(recipes),
        }
    }

    pub fn units(&self) -> &UnitConverter {
        &self.units
    }

    pub fn recipes(&self) -> &RecipeBook {
        &self.recipes
    }

    pub fn with_ledger<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&InventoryLedger) -> R,
    {
        let ledger = self.ledger.lock().unwrap_or_else(PoisonError::into_inner);
        f(&ledger)
    }

    pub fn with_ledger_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut InventoryLedger) -> R,
    {
        let mut ledger = self.ledger.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut ledger)
    }
}
