//! # Startup Loading
//!
//! Reads every document at startup and seeds the ones a fresh install does
//! not have yet.
//!
//! ```text
//! inventory.json   missing ──► DEFAULT_INVENTORY, saved
//! products.json    missing ──► DEFAULT_PRODUCTS, saved
//! receipts.json    missing ──► empty log (not saved)
//! shift_start.json missing ──► shift closed
//! ```
//!
//! A document that exists but cannot be decoded is an error. Seeding over
//! it would throw away the café's real stock levels.

use barista_core::{
    Catalog, DocumentKind, InventoryLedger, Persistence, Receipt, ShiftSnapshot,
};
use tracing::{info, warn};

use crate::error::StoreResult;

/// Everything the terminal needs to resume.
#[derive(Debug, Clone)]
pub struct LoadedState {
    pub ledger: InventoryLedger,
    pub catalog: Catalog,
    pub receipts: Vec<Receipt>,
    /// Present when the terminal stopped during a shift.
    pub baseline: Option<ShiftSnapshot>,
    /// Documents created from defaults during this load.
    pub seeded: Vec<DocumentKind>,
}

pub fn load_or_seed(store: &dyn Persistence) -> StoreResult<LoadedState> {
    let mut seeded = Vec::new();

    let ledger = match store.load_ledger()? {
        Some(ledger) => ledger,
        None => {
            let ledger = InventoryLedger::defaults();
            store.save_ledger(&ledger)?;
            seeded.push(DocumentKind::Inventory);
            ledger
        }
    };

    let catalog = match store.load_catalog()? {
        Some(catalog) => catalog,
        None => {
            let catalog = Catalog::defaults();
            store.save_catalog(&catalog)?;
            seeded.push(DocumentKind::Catalog);
            catalog
        }
    };

    let receipts = store.load_receipts()?.unwrap_or_default();
    let baseline = store.load_baseline()?;

    if baseline.is_none() && !receipts.is_empty() {
        warn!(
            receipts = receipts.len(),
            "Receipts stored without an open shift"
        );
    }

    info!(
        ingredients = ledger.len(),
        categories = catalog.categories().len(),
        receipts = receipts.len(),
        shift_open = baseline.is_some(),
        ?seeded,
        "State loaded"
    );

    Ok(LoadedState {
        ledger,
        catalog,
        receipts,
        baseline,
        seeded,
    })
}
