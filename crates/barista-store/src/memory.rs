//! # In-Memory Store
//!
//! Keeps documents in a map. Used by terminal tests and anywhere a throwaway
//! store is handy. Saves can be made to fail on demand so callers can check
//! how they surface a storage outage.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use barista_core::{DocumentKind, PersistResult, Persistence, PersistenceError};

#[derive(Debug, Default)]
pub struct MemoryStore {
    documents: Mutex<HashMap<DocumentKind, String>>,
    saves: AtomicUsize,
    fail_saves: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// When set, every save and remove fails and leaves documents untouched.
    pub fn fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }

    /// Raw body of a stored document.
    pub fn document(&self, kind: DocumentKind) -> Option<String> {
        self.documents().get(&kind).cloned()
    }

    /// Number of successful saves since creation.
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    fn documents(&self) -> MutexGuard<'_, HashMap<DocumentKind, String>> {
        self.documents.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn check_writable(&self, kind: DocumentKind) -> PersistResult<()> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(PersistenceError::new(kind, "store is read-only"));
        }
        Ok(())
    }
}

impl Persistence for MemoryStore {
    fn load_document(&self, kind: DocumentKind) -> PersistResult<Option<String>> {
        Ok(self.document(kind))
    }

    fn save_document(&self, kind: DocumentKind, body: &str) -> PersistResult<()> {
        self.check_writable(kind)?;
        self.documents().insert(kind, body.to_string());
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn remove_document(&self, kind: DocumentKind) -> PersistResult<()> {
        self.check_writable(kind)?;
        self.documents().remove(&kind);
        Ok(())
    }
}
