//! # Shift Report Export
//!
//! Renders a closing report as CSV text. Writing the file is the caller's
//! job; this module only produces the bytes.
//!
//! ## Layout
//! ```text
//! INVENTORY REPORT,2024-05-01_17-00
//! Item,Start (Units),End (Units),Diff (Units)
//! Beans,5.00,4.98,-0.02              ◄── display units, two decimals
//! Milk,10.00,9.60,-0.40
//!                                    ◄── blank separator line
//! SALES LOG
//! Order ID,Date,Total,Items
//! 1714554300,2024-05-01 09:05,150.00,Iced Latte 16oz; Americano 12oz
//! ```
//!
//! All timestamps are shown in the exporter's fixed UTC offset.

use std::collections::BTreeMap;

use chrono::{DateTime, FixedOffset, Offset, Utc};
use tracing::debug;

use crate::error::{CoreError, CoreResult};
use crate::shift::ShiftReport;
use crate::types::{Receipt, StockDelta};
use crate::units::UnitConverter;

const HEADER_TIMESTAMP: &str = "%Y-%m-%d_%H-%M";
const RECEIPT_TIMESTAMP: &str = "%Y-%m-%d %H:%M";

pub struct ReportExporter<'a> {
    units: &'a UnitConverter,
    offset: FixedOffset,
}

impl<'a> ReportExporter<'a> {
    /// An exporter showing times in UTC.
    pub fn new(units: &'a UnitConverter) -> Self {
        ReportExporter {
            units,
            offset: Utc.fix(),
        }
    }

    pub fn with_utc_offset(mut self, offset: FixedOffset) -> Self {
        self.offset = offset;
        self
    }

    /// `Report_<YYYY-MM-DD_HH-MM>.csv`
    pub fn file_name(&self, generated_at: DateTime<Utc>) -> String {
        format!("Report_{}.csv", self.stamp(generated_at, HEADER_TIMESTAMP))
    }

    pub fn render_report(&self, report: &ShiftReport) -> CoreResult<String> {
        self.render(&report.inventory, &report.receipts, report.closed_at)
    }

    /// Renders the inventory and sales sections.
    pub fn render(
        &self,
        inventory: &BTreeMap<String, StockDelta>,
        receipts: &[Receipt],
        generated_at: DateTime<Utc>,
    ) -> CoreResult<String> {
        let mut inventory_section = new_writer(Vec::new());
        inventory_section
            .write_record([
                "INVENTORY REPORT".to_string(),
                self.stamp(generated_at, HEADER_TIMESTAMP),
            ])
            .map_err(render_error)?;
        inventory_section
            .write_record(["Item", "Start (Units)", "End (Units)", "Diff (Units)"])
            .map_err(render_error)?;
        for (name, delta) in inventory {
            inventory_section
                .write_record([
                    name.clone(),
                    format_units(self.units.to_display(name, delta.start)),
                    format_units(self.units.to_display(name, delta.end)),
                    format_units(self.units.to_display(name, delta.delta)),
                ])
                .map_err(render_error)?;
        }
        let mut out = inventory_section
            .into_inner()
            .map_err(|e| render_error(e.into_error()))?;

        out.push(b'\n');

        let mut sales_section = new_writer(out);
        sales_section
            .write_record(["SALES LOG"])
            .map_err(render_error)?;
        sales_section
            .write_record(["Order ID", "Date", "Total", "Items"])
            .map_err(render_error)?;
        for receipt in receipts {
            sales_section
                .write_record([
                    receipt.id().to_string(),
                    self.stamp(receipt.timestamp(), RECEIPT_TIMESTAMP),
                    receipt.total().to_string(),
                    receipt.item_names().join("; "),
                ])
                .map_err(render_error)?;
        }
        let out = sales_section
            .into_inner()
            .map_err(|e| render_error(e.into_error()))?;

        debug!(
            ingredients = inventory.len(),
            receipts = receipts.len(),
            bytes = out.len(),
            "Report rendered"
        );
        String::from_utf8(out).map_err(render_error)
    }

    fn stamp(&self, at: DateTime<Utc>, format: &str) -> String {
        at.with_timezone(&self.offset).format(format).to_string()
    }
}

fn new_writer(buffer: Vec<u8>) -> csv::Writer<Vec<u8>> {
    csv::WriterBuilder::new()
        .flexible(true)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(buffer)
}

fn render_error(err: impl std::fmt::Display) -> CoreError {
    CoreError::Report {
        reason: err.to_string(),
    }
}

/// Two decimals, with `-0.00` shown as `0.00`.
pub fn format_units(value: f64) -> String {
    let text = format!("{value:.2}");
    if text == "-0.00" {
        "0.00".to_string()
    } else {
        text
    }
}
