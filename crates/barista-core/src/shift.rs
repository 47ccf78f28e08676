//! # Shift Manager
//!
//! The operating period between `start_shift` and `end_shift`: baseline
//! snapshot, the receipts taken, and the stock-count override.
//!
//! ## Shift Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   ┌────────┐   start_shift(ledger)    ┌──────────────────────────┐      │
//! │   │ Closed │ ───────────────────────► │ Open { baseline }        │      │
//! │   └────────┘   snapshot, clear log    │                          │      │
//! │       ▲                               │  record_receipt          │      │
//! │       │                               │  adjust_stock ─► ledger  │      │
//! │       │                               │               + baseline │      │
//! │       │        end_shift(ledger)      └────────────┬─────────────┘      │
//! │       └─────────────────────────────────────────────┘                    │
//! │                ShiftReport { diff, receipts }                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Re-baseline
//! A stock count overwrites both the ledger and the baseline entry, so
//! the closing report measures drift from the count onward. Whatever went
//! missing before the count does not appear in the report.
//!
//! The state is an explicit enum that owns the baseline only while open.
//! Whether a shift is open is never inferred from stored documents.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::ledger::{InventoryLedger, ShiftSnapshot};
use crate::money::Money;
use crate::types::{Receipt, StockDelta};
use crate::units::UnitConverter;
use crate::validation::validate_quantity;

/// Whether a shift is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ShiftState {
    Closed,
    Open,
}

#[derive(Debug, Clone)]
enum Shift {
    Closed,
    Open {
        baseline: ShiftSnapshot,
        /// Unknown when the shift was restored from a stored baseline.
        opened_at: Option<DateTime<Utc>>,
    },
}

// =============================================================================
// Shift Report
// =============================================================================

/// Everything the end-of-shift export needs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShiftReport {
    pub id: Uuid,
    pub opened_at: Option<DateTime<Utc>>,
    pub closed_at: DateTime<Utc>,
    /// Ingredient → start/end/delta in raw units.
    pub inventory: BTreeMap<String, StockDelta>,
    /// Receipts in the order they were taken.
    pub receipts: Vec<Receipt>,
}

impl ShiftReport {
    pub fn sales_total(&self) -> Money {
        self.receipts.iter().map(Receipt::total).sum()
    }

    pub fn receipt_count(&self) -> usize {
        self.receipts.len()
    }
}

/// One line of the stock-count screen, in display units.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InventoryRow {
    pub name: String,
    pub start_units: f64,
    pub current_units: f64,
}

// =============================================================================
// Shift Manager
// =============================================================================

#[derive(Debug, Clone)]
pub struct ShiftManager {
    shift: Shift,
    receipts: Vec<Receipt>,
}

impl Default for ShiftManager {
    fn default() -> Self {
        ShiftManager {
            shift: Shift::Closed,
            receipts: Vec::new(),
        }
    }
}

impl ShiftManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds the manager from stored documents. A stored baseline means
    /// the terminal stopped mid-shift.
    pub fn restore(baseline: Option<ShiftSnapshot>, receipts: Vec<Receipt>) -> Self {
        let shift = match baseline {
            Some(baseline) => Shift::Open {
                baseline,
                opened_at: None,
            },
            None => Shift::Closed,
        };
        info!(
            open = matches!(shift, Shift::Open { .. }),
            receipts = receipts.len(),
            "Shift state restored"
        );
        ShiftManager { shift, receipts }
    }

    pub fn state(&self) -> ShiftState {
        match self.shift {
            Shift::Closed => ShiftState::Closed,
            Shift::Open { .. } => ShiftState::Open,
        }
    }

    pub fn is_open(&self) -> bool {
        self.state() == ShiftState::Open
    }

    pub fn baseline(&self) -> Option<&ShiftSnapshot> {
        match &self.shift {
            Shift::Open { baseline, .. } => Some(baseline),
            Shift::Closed => None,
        }
    }

    pub fn receipts(&self) -> &[Receipt] {
        &self.receipts
    }

    pub fn receipts_newest_first(&self) -> impl Iterator<Item = &Receipt> {
        self.receipts.iter().rev()
    }

    /// Highest receipt id in the log, for seeding the order session.
    pub fn last_receipt_id(&self) -> Option<u64> {
        self.receipts.iter().map(Receipt::id).max()
    }

    pub fn start_shift(&mut self, ledger: &InventoryLedger) -> CoreResult<()> {
        self.start_shift_at(ledger, Utc::now())
    }

    /// Opens a shift with the ledger's current stock as baseline and an
    /// empty receipt log. The new baseline is available from
    /// [`ShiftManager::baseline`].
    pub fn start_shift_at(&mut self, ledger: &InventoryLedger, now: DateTime<Utc>) -> CoreResult<()> {
        if self.is_open() {
            return Err(CoreError::ShiftAlreadyOpen);
        }
        if !self.receipts.is_empty() {
            warn!(
                discarded = self.receipts.len(),
                "Discarding receipts left over from a previous shift"
            );
        }

        self.receipts.clear();
        self.shift = Shift::Open {
            baseline: ledger.snapshot(),
            opened_at: Some(now),
        };
        info!(ingredients = ledger.len(), opened_at = %now, "Shift started");
        Ok(())
    }

    /// Appends a completed sale to the shift's log.
    pub fn record_receipt(&mut self, receipt: Receipt) -> CoreResult<()> {
        if !self.is_open() {
            return Err(CoreError::ShiftNotOpen);
        }
        debug!(receipt_id = receipt.id(), total = %receipt.total(), "Receipt recorded");
        self.receipts.push(receipt);
        Ok(())
    }

    /// Applies a physical stock count given in display units.
    ///
    /// Sets the ledger to the counted amount. While a shift is open the
    /// baseline entry is overwritten with the same raw value, so the
    /// ingredient shows zero drift right after the count. Returns the raw
    /// amount stored.
    pub fn adjust_stock(
        &mut self,
        ledger: &mut InventoryLedger,
        units: &UnitConverter,
        ingredient: &str,
        counted_display_qty: f64,
    ) -> CoreResult<f64> {
        validate_quantity(ingredient, counted_display_qty)?;
        let raw = units.to_raw(ingredient, counted_display_qty);
        let previous = ledger.set_stock(ingredient, raw)?;

        if let Shift::Open { baseline, .. } = &mut self.shift {
            baseline.rebaseline(ingredient, raw);
        }

        info!(
            ingredient,
            counted = counted_display_qty,
            raw,
            ?previous,
            rebaselined = self.is_open(),
            "Stock counted"
        );
        Ok(raw)
    }

    pub fn closing_report(&self, ledger: &InventoryLedger) -> CoreResult<ShiftReport> {
        self.closing_report_at(ledger, Utc::now())
    }

    /// Builds the end-of-shift report without closing the shift.
    pub fn closing_report_at(
        &self,
        ledger: &InventoryLedger,
        now: DateTime<Utc>,
    ) -> CoreResult<ShiftReport> {
        let Shift::Open {
            baseline,
            opened_at,
        } = &self.shift
        else {
            return Err(CoreError::ShiftNotOpen);
        };

        Ok(ShiftReport {
            id: Uuid::new_v4(),
            opened_at: *opened_at,
            closed_at: now,
            inventory: ledger.diff(baseline),
            receipts: self.receipts.clone(),
        })
    }

    /// Closes the shift without building a report. Used once the report
    /// from `closing_report` has been exported.
    pub fn close(&mut self) -> CoreResult<()> {
        if !self.is_open() {
            return Err(CoreError::ShiftNotOpen);
        }
        let receipts = self.receipts.len();
        self.shift = Shift::Closed;
        self.receipts.clear();
        info!(receipts, "Shift closed");
        Ok(())
    }

    pub fn end_shift(&mut self, ledger: &InventoryLedger) -> CoreResult<ShiftReport> {
        self.end_shift_at(ledger, Utc::now())
    }

    /// Produces the closing report and returns to Closed, dropping the
    /// baseline and the receipt log.
    pub fn end_shift_at(
        &mut self,
        ledger: &InventoryLedger,
        now: DateTime<Utc>,
    ) -> CoreResult<ShiftReport> {
        let report = self.closing_report_at(ledger, now)?;
        self.close()?;
        Ok(report)
    }

    /// Per-ingredient start and current levels in display units. Ingredients
    /// missing from the baseline start at zero.
    pub fn inventory_rows(&self, ledger: &InventoryLedger, units: &UnitConverter) -> Vec<InventoryRow> {
        let baseline = self.baseline();
        ledger
            .iter()
            .map(|(name, current)| {
                let start = baseline.and_then(|b| b.get(name)).unwrap_or(0.0);
                InventoryRow {
                    name: name.to_string(),
                    start_units: units.to_display(name, start),
                    current_units: units.to_display(name, current),
                }
            })
            .collect()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::OrderSession;
    use crate::recipe::{Recipe, RecipeBook};
    use chrono::TimeZone;

    fn milk_units() -> UnitConverter {
        UnitConverter::new([("Milk", 1000.0)]).unwrap()
    }

    fn latte_book() -> RecipeBook {
        let recipe: Recipe = [("Milk".to_string(), 200.0)].into_iter().collect();
        RecipeBook::new([("Iced Latte 16oz", recipe)]).unwrap()
    }

    fn at(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, h, m, 0).unwrap()
    }

    #[test]
    fn test_start_shift_twice_fails() {
        let ledger = InventoryLedger::defaults();
        let mut shift = ShiftManager::new();

        shift.start_shift(&ledger).unwrap();
        assert_eq!(shift.baseline(), Some(&ledger.snapshot()));
        assert!(matches!(
            shift.start_shift(&ledger),
            Err(CoreError::ShiftAlreadyOpen)
        ));
        assert_eq!(shift.state(), ShiftState::Open);
    }

    #[test]
    fn test_end_shift_when_closed_fails() {
        let ledger = InventoryLedger::defaults();
        let mut shift = ShiftManager::new();
        assert!(matches!(shift.end_shift(&ledger), Err(CoreError::ShiftNotOpen)));
        assert!(matches!(shift.close(), Err(CoreError::ShiftNotOpen)));
    }

    #[test]
    fn test_end_shift_clears_baseline() {
        let ledger = InventoryLedger::defaults();
        let mut shift = ShiftManager::new();
        shift.start_shift(&ledger).unwrap();

        shift.end_shift(&ledger).unwrap();

        assert_eq!(shift.state(), ShiftState::Closed);
        assert!(shift.baseline().is_none());
        assert!(matches!(
            shift.closing_report(&ledger),
            Err(CoreError::ShiftNotOpen)
        ));
    }

    #[test]
    fn test_record_receipt_requires_open_shift() {
        let mut shift = ShiftManager::new();
        let receipt = Receipt::new(1, at(9, 0), Vec::new());
        assert!(matches!(
            shift.record_receipt(receipt),
            Err(CoreError::ShiftNotOpen)
        ));
    }

    #[test]
    fn test_start_shift_clears_receipt_log() {
        let ledger = InventoryLedger::defaults();
        let leftover = Receipt::new(1, at(8, 0), Vec::new());
        let mut shift = ShiftManager::restore(None, vec![leftover]);

        shift.start_shift(&ledger).unwrap();
        assert!(shift.receipts().is_empty());
    }

    #[test]
    fn test_adjust_stock_rebaselines() {
        let mut ledger = InventoryLedger::from_quantities([("Milk", 10000.0)]).unwrap();
        let mut shift = ShiftManager::new();
        shift.start_shift(&ledger).unwrap();

        let raw = shift
            .adjust_stock(&mut ledger, &milk_units(), "Milk", 5.0)
            .unwrap();

        assert_eq!(raw, 5000.0);
        assert_eq!(ledger.get("Milk"), Some(5000.0));
        assert_eq!(shift.baseline().unwrap().get("Milk"), Some(5000.0));
        assert_eq!(ledger.diff(shift.baseline().unwrap())["Milk"].delta, 0.0);
    }

    #[test]
    fn test_adjust_stock_when_closed_only_touches_ledger() {
        let mut ledger = InventoryLedger::from_quantities([("Milk", 10000.0)]).unwrap();
        let mut shift = ShiftManager::new();

        shift
            .adjust_stock(&mut ledger, &milk_units(), "Milk", 2.0)
            .unwrap();

        assert_eq!(ledger.get("Milk"), Some(2000.0));
        assert_eq!(shift.state(), ShiftState::Closed);
    }

    #[test]
    fn test_adjust_stock_accepts_negative_count() {
        let mut ledger = InventoryLedger::from_quantities([("Milk", 10000.0)]).unwrap();
        let mut shift = ShiftManager::new();
        shift.start_shift(&ledger).unwrap();

        shift
            .adjust_stock(&mut ledger, &milk_units(), "Milk", -0.5)
            .unwrap();

        assert_eq!(ledger.get("Milk"), Some(-500.0));
    }

    #[test]
    fn test_adjust_stock_rejects_non_finite() {
        let mut ledger = InventoryLedger::from_quantities([("Milk", 10000.0)]).unwrap();
        let mut shift = ShiftManager::new();
        shift.start_shift(&ledger).unwrap();

        let err = shift
            .adjust_stock(&mut ledger, &milk_units(), "Milk", f64::NAN)
            .unwrap_err();

        assert!(matches!(err, CoreError::InvalidQuantity { .. }));
        assert_eq!(ledger.get("Milk"), Some(10000.0));
        assert_eq!(shift.baseline().unwrap().get("Milk"), Some(10000.0));
    }

    /// Milk counted at 8.5 bags after 1500 ml went unrecorded: the loss
    /// before the count does not show up at close.
    #[test]
    fn test_count_forgives_loss_before_count() {
        let mut ledger = InventoryLedger::from_quantities([("Milk", 10000.0)]).unwrap();
        let mut shift = ShiftManager::new();
        shift.start_shift_at(&ledger, at(8, 0)).unwrap();
        assert_eq!(shift.baseline().unwrap().get("Milk"), Some(10000.0));

        shift
            .adjust_stock(&mut ledger, &milk_units(), "Milk", 8.5)
            .unwrap();
        assert_eq!(ledger.get("Milk"), Some(8500.0));
        assert_eq!(shift.baseline().unwrap().get("Milk"), Some(8500.0));

        let report = shift.end_shift_at(&ledger, at(17, 0)).unwrap();
        assert_eq!(report.inventory["Milk"].delta, 0.0);
        assert_eq!(report.opened_at, Some(at(8, 0)));
    }

    #[test]
    fn test_full_shift_report() {
        let mut ledger = InventoryLedger::from_quantities([("Milk", 10000.0)]).unwrap();
        let book = latte_book();
        let mut shift = ShiftManager::new();
        let mut order = OrderSession::new();
        shift.start_shift_at(&ledger, at(8, 0)).unwrap();

        for minute in [5, 10] {
            order
                .add_line("Iced Latte", "16oz", Money::from_major(90))
                .unwrap();
            let receipt = order
                .checkout_at(&mut ledger, &book, at(9, minute))
                .unwrap();
            shift.record_receipt(receipt).unwrap();
        }

        let preview = shift.closing_report_at(&ledger, at(17, 0)).unwrap();
        assert!(shift.is_open());

        let report = shift.end_shift_at(&ledger, at(17, 0)).unwrap();
        assert_eq!(report.inventory, preview.inventory);
        assert_eq!(report.inventory["Milk"], StockDelta::new(10000.0, 9600.0));
        assert_eq!(report.receipt_count(), 2);
        assert_eq!(report.sales_total(), Money::from_major(180));
        assert!(shift.receipts().is_empty());
    }

    #[test]
    fn test_restore_with_baseline_is_open() {
        let ledger = InventoryLedger::from_quantities([("Milk", 10000.0)]).unwrap();
        let shift = ShiftManager::restore(Some(ledger.snapshot()), Vec::new());
        assert_eq!(shift.state(), ShiftState::Open);

        let shift = ShiftManager::restore(None, Vec::new());
        assert_eq!(shift.state(), ShiftState::Closed);
    }

    #[test]
    fn test_inventory_rows_in_display_units() {
        let mut ledger = InventoryLedger::from_quantities([("Milk", 10000.0), ("Sugar", 250.0)]).unwrap();
        let mut shift = ShiftManager::new();
        shift.start_shift(&ledger).unwrap();
        ledger.set_stock("Milk", 9500.0).unwrap();
        ledger.set_stock("Oat Milk", 1000.0).unwrap();

        let rows = shift.inventory_rows(&ledger, &milk_units());

        assert_eq!(
            rows,
            vec![
                InventoryRow {
                    name: "Milk".to_string(),
                    start_units: 10.0,
                    current_units: 9.5
                },
                InventoryRow {
                    name: "Oat Milk".to_string(),
                    start_units: 0.0,
                    current_units: 1000.0
                },
                InventoryRow {
                    name: "Sugar".to_string(),
                    start_units: 250.0,
                    current_units: 250.0
                },
            ]
        );
    }

    #[test]
    fn test_receipts_newest_first() {
        let ledger = InventoryLedger::defaults();
        let mut shift = ShiftManager::new();
        shift.start_shift(&ledger).unwrap();
        for id in 1..=3 {
            shift
                .record_receipt(Receipt::new(id, at(9, id as u32), Vec::new()))
                .unwrap();
        }

        let ids: Vec<u64> = shift.receipts_newest_first().map(Receipt::id).collect();
        assert_eq!(ids, vec![3, 2, 1]);
        assert_eq!(shift.last_receipt_id(), Some(3));
    }
}
