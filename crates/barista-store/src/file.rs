//! # JSON File Store
//!
//! One JSON file per document in a data directory.
//!
//! ```text
//! <data_dir>/
//! ├── inventory.json     ingredient → raw quantity
//! ├── products.json      categories → products → size prices
//! ├── receipts.json      receipts of the current shift
//! └── shift_start.json   baseline; only present while a shift is open
//! ```
//!
//! ## Atomic Replacement
//! A save writes `<name>.tmp`, syncs it, then renames it over the target.
//! A crash mid-save leaves either the old or the new document, never a
//! truncated one.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use barista_core::{DocumentKind, PersistResult, Persistence, PersistenceError};
use tracing::{debug, info};

use crate::error::{StoreError, StoreResult};

#[derive(Debug, Clone)]
pub struct JsonFileStore {
    data_dir: PathBuf,
}

impl JsonFileStore {
    /// Opens a store rooted at `data_dir`, creating the directory if needed.
    pub fn open(data_dir: impl Into<PathBuf>) -> StoreResult<Self> {
        let data_dir = data_dir.into();
        fs::create_dir_all(&data_dir).map_err(|e| StoreError::io(&data_dir, e))?;
        info!(path = %data_dir.display(), "Document store opened");
        Ok(JsonFileStore { data_dir })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Full path of a document.
    pub fn path(&self, kind: DocumentKind) -> PathBuf {
        self.data_dir.join(kind.file_name())
    }

    fn read(&self, kind: DocumentKind) -> StoreResult<Option<String>> {
        let path = self.path(kind);
        match fs::read_to_string(&path) {
            Ok(body) => {
                debug!(path = %path.display(), bytes = body.len(), "Document read");
                Ok(Some(body))
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::io(&path, e)),
        }
    }

    fn write(&self, kind: DocumentKind, body: &str) -> StoreResult<()> {
        fs::create_dir_all(&self.data_dir).map_err(|e| StoreError::io(&self.data_dir, e))?;

        let path = self.path(kind);
        let tmp = self.data_dir.join(format!("{}.tmp", kind.file_name()));

        let mut file = File::create(&tmp).map_err(|e| StoreError::io(&tmp, e))?;
        file.write_all(body.as_bytes())
            .and_then(|_| file.sync_all())
            .map_err(|e| StoreError::io(&tmp, e))?;
        fs::rename(&tmp, &path).map_err(|e| StoreError::io(&path, e))?;

        debug!(path = %path.display(), bytes = body.len(), "Document written");
        Ok(())
    }

    fn remove(&self, kind: DocumentKind) -> StoreResult<()> {
        let path = self.path(kind);
        match fs::remove_file(&path) {
            Ok(()) => {
                debug!(path = %path.display(), "Document removed");
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::io(&path, e)),
        }
    }
}

impl Persistence for JsonFileStore {
    fn load_document(&self, kind: DocumentKind) -> PersistResult<Option<String>> {
        self.read(kind).map_err(|e| PersistenceError::new(kind, e))
    }

    fn save_document(&self, kind: DocumentKind, body: &str) -> PersistResult<()> {
        self.write(kind, body)
            .map_err(|e| PersistenceError::new(kind, e))
    }

    fn remove_document(&self, kind: DocumentKind) -> PersistResult<()> {
        self.remove(kind).map_err(|e| PersistenceError::new(kind, e))
    }
}
