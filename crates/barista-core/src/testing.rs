//! In-memory `Persistence` for unit tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::persistence::{DocumentKind, PersistResult, Persistence, PersistenceError};

#[derive(Default)]
pub(crate) struct TestStore {
    docs: Mutex<HashMap<DocumentKind, String>>,
    saves: AtomicUsize,
    fail: AtomicBool,
}

impl TestStore {
    /// A store whose every save and remove fails.
    pub(crate) fn failing() -> Self {
        let store = Self::default();
        store.fail.store(true, Ordering::SeqCst);
        store
    }

    pub(crate) fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

impl Persistence for TestStore {
    fn load_document(&self, kind: DocumentKind) -> PersistResult<Option<String>> {
        Ok(self.docs.lock().unwrap().get(&kind).cloned())
    }

    fn save_document(&self, kind: DocumentKind, body: &str) -> PersistResult<()> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(PersistenceError::new(kind, "disk full"));
        }
        self.saves.fetch_add(1, Ordering::SeqCst);
        self.docs.lock().unwrap().insert(kind, body.to_string());
        Ok(())
    }

    fn remove_document(&self, kind: DocumentKind) -> PersistResult<()> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(PersistenceError::new(kind, "disk full"));
        }
        self.docs.lock().unwrap().remove(&kind);
        Ok(())
    }
}
