//! # Persistence Seam
//!
//! The core never touches the file system. Anything that must outlive the
//! process goes through the `Persistence` trait, implemented in
//! `barista-store`.
//!
//! ```text
//! ┌────────────────────┐      typed load/save       ┌────────────────────┐
//! │   barista-core     │ ─────────────────────────► │  Persistence impl  │
//! │                    │   (JSON encoding here)     │  (raw documents)   │
//! │  Catalog::set_price│                            │  JsonFileStore     │
//! │  terminal commands │ ◄───────────────────────── │  MemoryStore       │
//! └────────────────────┘      Option<document>      └────────────────────┘
//! ```
//!
//! Implementors only move document bodies. Encoding and decoding live in the
//! provided methods so every store reads and writes the same format.

use std::error::Error as StdError;
use std::fmt;

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use crate::catalog::Catalog;
use crate::ledger::{InventoryLedger, ShiftSnapshot};
use crate::types::Receipt;

// =============================================================================
// Documents
// =============================================================================

/// The persisted documents. Presence of `ShiftStart` means a shift is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DocumentKind {
    Inventory,
    Catalog,
    Receipts,
    ShiftStart,
}

impl DocumentKind {
    pub const ALL: [DocumentKind; 4] = [
        DocumentKind::Inventory,
        DocumentKind::Catalog,
        DocumentKind::Receipts,
        DocumentKind::ShiftStart,
    ];

    /// File name used by on-disk stores.
    pub const fn file_name(&self) -> &'static str {
        match self {
            DocumentKind::Inventory => "inventory.json",
            DocumentKind::Catalog => "products.json",
            DocumentKind::Receipts => "receipts.json",
            DocumentKind::ShiftStart => "shift_start.json",
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DocumentKind::Inventory => "inventory",
            DocumentKind::Catalog => "catalog",
            DocumentKind::Receipts => "receipts",
            DocumentKind::ShiftStart => "shift start",
        };
        f.write_str(name)
    }
}

// =============================================================================
// Error
// =============================================================================

/// A persistence collaborator failed to load or save a document.
#[derive(Debug, Error)]
#[error("{document} persistence failed: {source}")]
pub struct PersistenceError {
    pub document: DocumentKind,
    #[source]
    pub source: Box<dyn StdError + Send + Sync>,
}

impl PersistenceError {
    pub fn new(document: DocumentKind, source: impl Into<Box<dyn StdError + Send + Sync>>) -> Self {
        PersistenceError {
            document,
            source: source.into(),
        }
    }
}

pub type PersistResult<T> = Result<T, PersistenceError>;

// =============================================================================
// Trait
// =============================================================================

/// Injected storage capability.
///
/// Saves are synchronous; a returned `Ok` means the document is durable as
/// far as the implementation can tell.
pub trait Persistence: Send + Sync {
    /// Reads a document body, `None` when it has never been written.
    fn load_document(&self, kind: DocumentKind) -> PersistResult<Option<String>>;

    /// Replaces a document body.
    fn save_document(&self, kind: DocumentKind, body: &str) -> PersistResult<()>;

    /// Deletes a document. Removing a missing document is not an error.
    fn remove_document(&self, kind: DocumentKind) -> PersistResult<()>;

    fn load_ledger(&self) -> PersistResult<Option<InventoryLedger>> {
        load_json(self, DocumentKind::Inventory)
    }

    fn save_ledger(&self, ledger: &InventoryLedger) -> PersistResult<()> {
        save_json(self, DocumentKind::Inventory, ledger)
    }

    fn load_catalog(&self) -> PersistResult<Option<Catalog>> {
        load_json(self, DocumentKind::Catalog)
    }

    fn save_catalog(&self, catalog: &Catalog) -> PersistResult<()> {
        save_json(self, DocumentKind::Catalog, catalog)
    }

    fn load_receipts(&self) -> PersistResult<Option<Vec<Receipt>>> {
        load_json(self, DocumentKind::Receipts)
    }

    fn save_receipts(&self, receipts: &[Receipt]) -> PersistResult<()> {
        save_json(self, DocumentKind::Receipts, receipts)
    }

    fn load_baseline(&self) -> PersistResult<Option<ShiftSnapshot>> {
        load_json(self, DocumentKind::ShiftStart)
    }

    /// Writes the shift-start baseline, or removes it when the shift closes.
    fn save_baseline(&self, baseline: Option<&ShiftSnapshot>) -> PersistResult<()> {
        match baseline {
            Some(snapshot) => save_json(self, DocumentKind::ShiftStart, snapshot),
            None => self.remove_document(DocumentKind::ShiftStart),
        }
    }
}

fn load_json<P, T>(store: &P, kind: DocumentKind) -> PersistResult<Option<T>>
where
    P: Persistence + ?Sized,
    T: DeserializeOwned,
{
    match store.load_document(kind)? {
        Some(body) => serde_json::from_str(&body)
            .map(Some)
            .map_err(|e| PersistenceError::new(kind, e)),
        None => Ok(None),
    }
}

fn save_json<P, T>(store: &P, kind: DocumentKind, value: &T) -> PersistResult<()>
where
    P: Persistence + ?Sized,
    T: Serialize + ?Sized,
{
    let body = serde_json::to_string_pretty(value).map_err(|e| PersistenceError::new(kind, e))?;
    store.save_document(kind, &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::TestStore;

    #[test]
    fn test_file_names() {
        assert_eq!(DocumentKind::Inventory.file_name(), "inventory.json");
        assert_eq!(DocumentKind::Catalog.file_name(), "products.json");
        assert_eq!(DocumentKind::Receipts.file_name(), "receipts.json");
        assert_eq!(DocumentKind::ShiftStart.file_name(), "shift_start.json");
    }

    #[test]
    fn test_typed_round_trip() {
        let store = TestStore::default();
        assert!(store.load_ledger().unwrap().is_none());

        let ledger = InventoryLedger::defaults();
        store.save_ledger(&ledger).unwrap();
        assert_eq!(store.load_ledger().unwrap(), Some(ledger.clone()));

        store.save_baseline(Some(&ledger.snapshot())).unwrap();
        assert!(store.load_baseline().unwrap().is_some());
        store.save_baseline(None).unwrap();
        assert!(store.load_baseline().unwrap().is_none());
    }

    #[test]
    fn test_corrupt_document_names_the_document() {
        let store = TestStore::default();
        store
            .save_document(DocumentKind::Inventory, "{not json")
            .unwrap();

        let err = store.load_ledger().unwrap_err();
        assert_eq!(err.document, DocumentKind::Inventory);
        assert!(err.to_string().starts_with("inventory persistence failed"));
    }
}
