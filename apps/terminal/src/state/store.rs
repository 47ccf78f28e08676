//! # Store State
//!
//! Persistence handle, report writer and report localisation. Read-only
//! after startup.

use std::sync::Arc;

use barista_core::Persistence;
use barista_store::ReportWriter;
use chrono::{FixedOffset, Offset, Utc};

#[derive(Clone)]
pub struct StoreState {
    persistence: Arc<dyn Persistence>,
    reports: ReportWriter,
    utc_offset: FixedOffset,
}

impl StoreState {
    pub fn new(persistence: Arc<dyn Persistence>, reports: ReportWriter) -> Self {
        StoreState {
            persistence,
            reports,
            utc_offset: Utc.fix(),
        }
    }

    pub fn with_utc_offset(mut self, offset: FixedOffset) -> Self {
        self.utc_offset = offset;
        self
    }

    pub fn persistence(&self) -> &dyn Persistence {
        self.persistence.as_ref()
    }

    pub fn reports(&self) -> &ReportWriter {
        &self.reports
    }

    pub fn utc_offset(&self) -> FixedOffset {
        self.utc_offset
    }
}

impl std::fmt::Debug for StoreState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreState")
            .field("report_dir", &self.reports.report_dir())
            .field("utc_offset", &self.utc_offset)
            .finish_non_exhaustive()
    }
}
