//! # Storage Error Types
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  std::io::Error                                                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module) ← Adds the path that failed                   │
//! │       │                                                                 │
//! │       ├──► PersistenceError (core trait boundary, names the document)   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ApiError (in terminal) ← What the operator sees                       │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::io;
use std::path::{Path, PathBuf};

use barista_core::PersistenceError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading, writing, renaming or creating a file or directory failed.
    ///
    /// ## When This Occurs
    /// - Data or report directory not writable
    /// - Disk full
    /// - File removed or locked by another process
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Every candidate report file name is already taken.
    #[error("Report already exists: {}", path.display())]
    ReportExists { path: PathBuf },

    /// A document could not be loaded, decoded or saved during startup.
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

impl StoreError {
    pub fn io(path: impl AsRef<Path>, source: io::Error) -> Self {
        StoreError::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}

/// Result type for storage operations.
pub type StoreResult<T> = Result<T, StoreError>;
