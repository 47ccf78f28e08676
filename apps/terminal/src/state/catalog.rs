//! # Catalog State

use std::sync::{Arc, Mutex, PoisonError};

use barista_core::Catalog;

#[derive(Debug, Clone, Default)]
pub struct CatalogState {
    catalog: Arc<Mutex<Catalog>>,
}

impl CatalogState {
    pub fn new(catalog: Catalog) -> Self {
        CatalogState {
            catalog: Arc::new(Mutex::new(catalog)),
        }
    }

    pub fn with_catalog<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Catalog) -> R,
    {
        let catalog = self.catalog.lock().unwrap_or_else(PoisonError::into_inner);
        f(&catalog)
    }

    pub fn with_catalog_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Catalog) -> R,
    {
        let mut catalog = self.catalog.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut catalog)
    }
}
