//! # State Module
//!
//! Terminal state, one handle per concern instead of a single app struct.
//! Commands take exactly the handles they need.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────┐ ┌──────────────┐ ┌──────────────┐ ┌──────────────┐   │
//! │  │  CartState   │ │ LedgerState  │ │ShiftLogState │ │ CatalogState │   │
//! │  │              │ │              │ │              │ │              │   │
//! │  │ Arc<Mutex<   │ │ Arc<Mutex<   │ │ Arc<Mutex<   │ │ Arc<Mutex<   │   │
//! │  │ OrderSession │ │ Inventory    │ │ ShiftManager │ │ Catalog      │   │
//! │  │ >>           │ │ Ledger>>     │ │ >>           │ │ >>           │   │
//! │  │              │ │ + units      │ │              │ │              │   │
//! │  │              │ │ + recipes    │ │              │ │              │   │
//! │  └──────────────┘ └──────────────┘ └──────────────┘ └──────────────┘   │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │ StoreState: Arc<dyn Persistence>, ReportWriter, UTC offset      │   │
//! │  │ (no lock; the store serialises its own writes)                  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                                                         │
//! │  LOCK ORDER: cart → ledger → shift → catalog                           │
//! │  A command that needs several locks takes them in this order.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A poisoned lock is recovered rather than propagated: every mutation in
//! the core either completes or leaves the value untouched, so the data
//! behind a poisoned lock is still consistent.

mod cart;
mod catalog;
mod ledger;
mod shift;
mod store;

pub use cart::CartState;
pub use catalog::CatalogState;
pub use ledger::LedgerState;
pub use shift::ShiftLogState;
pub use store::StoreState;
