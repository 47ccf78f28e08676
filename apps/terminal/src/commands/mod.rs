//! # Terminal Commands
//!
//! One function per operator action. Each takes the state handles it needs
//! and returns a serialisable response or an `ApiError`.
//!
//! ```text
//! commands/
//! ├── mod.rs        ◄─── You are here (exports)
//! ├── shift.rs      ◄─── start_shift, end_shift, shift_status
//! ├── cart.rs       ◄─── add_to_cart, remove_from_cart, cancel_order, get_cart
//! ├── sale.rs       ◄─── checkout, receipts_view
//! ├── inventory.rs  ◄─── count_stock, inventory_view
//! └── catalog.rs    ◄─── menu_view, set_price
//! ```
//!
//! ## Persist After Mutate
//! ```text
//! ┌──────────────┐     ┌──────────────────┐     ┌────────────────────────┐
//! │ core mutates │ ──► │ save document(s) │ ──► │ Ok(response)           │
//! │ (in memory)  │     │                  │ ──► │ Err(PERSISTENCE_ERROR) │
//! └──────────────┘     └──────────────────┘     └────────────────────────┘
//! ```
//! A failed save never rolls back memory. The operator sees the error and
//! the next successful save of that document catches the file up.

pub mod cart;
pub mod catalog;
pub mod inventory;
pub mod sale;
pub mod shift;

pub use cart::{add_to_cart, cancel_order, get_cart, remove_from_cart, CartLineDto, CartResponse};
pub use catalog::{menu_view, set_price, MenuCategory, MenuItem, PriceChange};
pub use inventory::{count_stock, inventory_view, StockCount};
pub use sale::{checkout, receipts_view, CheckoutResponse, ReceiptSummary};
pub use shift::{end_shift, shift_status, start_shift, ShiftClosed, ShiftStarted, ShiftStatus};
