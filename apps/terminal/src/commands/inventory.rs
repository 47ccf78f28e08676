//! # Inventory Commands
//!
//! The stock screen and physical counts. Quantities on this screen are in
//! bulk display units (kg of beans, bottles of syrup); the ledger stores
//! raw units.

use barista_core::validation::parse_quantity;
use barista_core::InventoryRow;
use serde::Serialize;
use tracing::debug;

use crate::error::ApiError;
use crate::state::{LedgerState, ShiftLogState, StoreState};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StockCount {
    pub ingredient: String,
    pub counted_units: f64,
    pub raw: f64,
    /// True when the shift baseline moved with the count.
    pub rebaselined: bool,
}

/// Start and current level of every ingredient, in display units.
pub fn inventory_view(ledger: &LedgerState, shift: &ShiftLogState) -> Vec<InventoryRow> {
    debug!("inventory_view command");

    ledger.with_ledger(|stock| shift.with_shift(|shift| shift.inventory_rows(stock, ledger.units())))
}

/// Records a physical count typed by the operator.
///
/// Only ingredients already on the stock list can be counted. During a
/// shift the baseline is moved too, so the count itself is not reported
/// as usage.
pub fn count_stock(
    ledger: &LedgerState,
    shift: &ShiftLogState,
    store: &StoreState,
    ingredient: &str,
    input: &str,
) -> Result<StockCount, ApiError> {
    debug!(ingredient, input, "count_stock command");

    let counted = parse_quantity(ingredient, input)?;

    ledger.with_ledger_mut(|stock| {
        shift.with_shift_mut(|shift| -> Result<StockCount, ApiError> {
            if !stock.contains(ingredient) {
                return Err(ApiError::not_found("Ingredient", ingredient));
            }

            let raw = shift.adjust_stock(stock, ledger.units(), ingredient, counted)?;
            let rebaselined = shift.is_open();

            let ledger_saved = store.persistence().save_ledger(stock);
            let baseline_saved = if rebaselined {
                store.persistence().save_baseline(shift.baseline())
            } else {
                Ok(())
            };
            ledger_saved?;
            baseline_saved?;

            Ok(StockCount {
                ingredient: ingredient.to_string(),
                counted_units: counted,
                raw,
                rebaselined,
            })
        })
    })
}
