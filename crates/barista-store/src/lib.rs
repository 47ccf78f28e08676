//! # barista-store: Storage Layer for the Barista Terminal
//!
//! Implements the `Persistence` seam from barista-core and owns every file
//! the terminal reads or writes.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        barista-store Structure                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   bootstrap::load_or_seed                       │   │
//! │  │        Loads all documents, seeds defaults on first run         │   │
//! │  └──────────────────────────┬──────────────────────────────────────┘   │
//! │                             │ &dyn Persistence                          │
//! │          ┌──────────────────┴──────────────────┐                        │
//! │          ▼                                     ▼                        │
//! │  ┌────────────────┐                   ┌────────────────┐                │
//! │  │ JsonFileStore  │                   │  MemoryStore   │                │
//! │  │ one file per   │                   │  tests, fault  │                │
//! │  │ document       │                   │  injection     │                │
//! │  └────────────────┘                   └────────────────┘                │
//! │                                                                         │
//! │  ┌────────────────┐                                                     │
//! │  │ ReportWriter   │  Report_<date>.csv, never overwritten               │
//! │  └────────────────┘                                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust,no_run
//! use barista_store::{load_or_seed, JsonFileStore};
//!
//! let store = JsonFileStore::open("data")?;
//! let state = load_or_seed(&store)?;
//! println!("{} ingredients", state.ledger.len());
//! # Ok::<(), barista_store::StoreError>(())
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod bootstrap;
pub mod error;
pub mod file;
pub mod memory;
pub mod report;

// =============================================================================
// Re-exports
// =============================================================================

pub use bootstrap::{load_or_seed, LoadedState};
pub use error::{StoreError, StoreResult};
pub use file::JsonFileStore;
pub use memory::MemoryStore;
pub use report::ReportWriter;
