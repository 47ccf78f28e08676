//! # Shift Commands
//!
//! ## Shift Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   ┌────────┐   start_shift    ┌────────┐                                │
//! │   │ Closed │ ───────────────► │  Open  │ ◄── checkout, count_stock      │
//! │   └────────┘                  └───┬────┘                                │
//! │       ▲                           │ end_shift                           │
//! │       │                           ▼                                     │
//! │       │        ┌────────────────────────────────────┐                   │
//! │       │        │ 1. closing report (ledger − base)  │                   │
//! │       │        │ 2. render CSV, write Report_*.csv  │── fails ─► stays  │
//! │       │        │ 3. close, drop baseline + receipts │            Open   │
//! │       └────────┴────────────────────────────────────┘                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use barista_core::{Money, ReportExporter, ShiftState};
use serde::Serialize;
use tracing::{debug, info};

use crate::error::ApiError;
use crate::state::{LedgerState, ShiftLogState, StoreState};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShiftStarted {
    pub ingredients: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShiftClosed {
    pub report_id: String,
    pub report_path: PathBuf,
    pub receipt_count: usize,
    pub sales_total: Money,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShiftStatus {
    pub state: ShiftState,
    pub receipt_count: usize,
    pub sales_total: Money,
}

/// Opens a shift with the current stock as baseline.
pub fn start_shift(
    ledger: &LedgerState,
    shift: &ShiftLogState,
    store: &StoreState,
) -> Result<ShiftStarted, ApiError> {
    debug!("start_shift command");

    ledger.with_ledger(|ledger| {
        shift.with_shift_mut(|shift| -> Result<ShiftStarted, ApiError> {
            shift.start_shift(ledger)?;
            let baseline = shift.baseline();
            let response = ShiftStarted {
                ingredients: baseline.map_or(0, |b| b.len()),
            };

            let baseline_saved = store.persistence().save_baseline(baseline);
            let receipts_saved = store.persistence().save_receipts(shift.receipts());
            baseline_saved?;
            receipts_saved?;

            Ok(response)
        })
    })
}

/// Exports the closing report and closes the shift.
///
/// The shift is closed only after the report file is on disk. When the
/// export fails the shift stays open and the operator can retry.
pub fn end_shift(
    ledger: &LedgerState,
    shift: &ShiftLogState,
    store: &StoreState,
) -> Result<ShiftClosed, ApiError> {
    debug!("end_shift command");

    ledger.with_ledger(|current| {
        shift.with_shift_mut(|shift| -> Result<ShiftClosed, ApiError> {
            let report = shift.closing_report(current)?;

            let exporter =
                ReportExporter::new(ledger.units()).with_utc_offset(store.utc_offset());
            let contents = exporter.render_report(&report)?;
            let file_name = exporter.file_name(report.closed_at);
            let report_path = store.reports().write(&file_name, &contents)?;

            shift.close()?;
            info!(
                report_id = %report.id,
                path = %report_path.display(),
                receipts = report.receipt_count(),
                total = %report.sales_total(),
                "Shift ended"
            );

            let baseline_removed = store.persistence().save_baseline(None);
            let receipts_cleared = store.persistence().save_receipts(shift.receipts());
            baseline_removed?;
            receipts_cleared?;

            Ok(ShiftClosed {
                report_id: report.id.to_string(),
                report_path,
                receipt_count: report.receipt_count(),
                sales_total: report.sales_total(),
            })
        })
    })
}

pub fn shift_status(shift: &ShiftLogState) -> ShiftStatus {
    shift.with_shift(|shift| ShiftStatus {
        state: shift.state(),
        receipt_count: shift.receipts().len(),
        sales_total: shift.receipts().iter().map(|r| r.total()).sum(),
    })
}
