//! # Sale Commands
//!
//! ## Checkout Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  lock cart → ledger → shift                                             │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  shift open? ── no ──► SHIFT_ERROR (nothing deducted)                   │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  order.checkout(ledger) ── short ──► INSUFFICIENT_STOCK (cart kept)     │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  shift.record_receipt                                                   │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  save inventory.json + receipts.json ── fails ──► PERSISTENCE_ERROR     │
//! │        │                                  (sale stands in memory)       │
//! │        ▼                                                                │
//! │  Ok(receipt)                                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use barista_core::{CoreError, Money, Receipt, RECEIPT_SUMMARY_CHARS};
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::ApiError;
use crate::state::{CartState, LedgerState, ShiftLogState, StoreState};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutResponse {
    pub receipt_id: u64,
    pub total: Money,
    pub items: Vec<String>,
}

/// One row of the receipts screen.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptSummary {
    pub id: u64,
    /// Local time, `YYYY-MM-DD HH:MM`
    pub date: String,
    pub total: Money,
    pub summary: String,
}

/// Sells the current cart.
pub fn checkout(
    cart: &CartState,
    ledger: &LedgerState,
    shift: &ShiftLogState,
    store: &StoreState,
) -> Result<CheckoutResponse, ApiError> {
    debug!("checkout command");

    cart.with_order_mut(|order| {
        ledger.with_ledger_mut(|stock| {
            shift.with_shift_mut(|shift| -> Result<CheckoutResponse, ApiError> {
                if !shift.is_open() {
                    return Err(CoreError::ShiftNotOpen.into());
                }

                let receipt = order.checkout(stock, ledger.recipes()).map_err(|e| {
                    if let Some(short) = e.insufficient_ingredients() {
                        warn!(?short, lines = order.len(), "Checkout rejected");
                    }
                    e
                })?;

                let response = CheckoutResponse {
                    receipt_id: receipt.id(),
                    total: receipt.total(),
                    items: receipt.item_names(),
                };
                shift.record_receipt(receipt)?;

                let ledger_saved = store.persistence().save_ledger(stock);
                let receipts_saved = store.persistence().save_receipts(shift.receipts());
                ledger_saved?;
                receipts_saved?;

                Ok(response)
            })
        })
    })
}

/// Receipts of the current shift, newest first.
pub fn receipts_view(shift: &ShiftLogState, store: &StoreState) -> Vec<ReceiptSummary> {
    debug!("receipts_view command");

    let offset = store.utc_offset();
    shift.with_shift(|shift| {
        shift
            .receipts_newest_first()
            .map(|receipt: &Receipt| ReceiptSummary {
                id: receipt.id(),
                date: receipt
                    .timestamp()
                    .with_timezone(&offset)
                    .format("%Y-%m-%d %H:%M")
                    .to_string(),
                total: receipt.total(),
                summary: receipt.summary(RECEIPT_SUMMARY_CHARS),
            })
            .collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::Fixture;
    use crate::commands::{add_to_cart, count_stock, get_cart, start_shift};
    use crate::error::ErrorCode;
    use barista_core::{DocumentKind, OrderState, Persistence};

    #[test]
    fn test_checkout_requires_open_shift() {
        let fx = Fixture::new();
        add_to_cart(&fx.cart, &fx.catalog, None, "Americano", "12oz").unwrap();

        let err = checkout(&fx.cart, &fx.ledger, &fx.shift, &fx.store).unwrap_err();

        assert_eq!(err.code, ErrorCode::ShiftError);
        assert_eq!(get_cart(&fx.cart).lines.len(), 1);
        assert_eq!(fx.ledger.with_ledger(|l| l.get("Beans")), Some(5000.0));
    }

    #[test]
    fn test_checkout_deducts_and_persists() {
        let fx = Fixture::new();
        start_shift(&fx.ledger, &fx.shift, &fx.store).unwrap();
        add_to_cart(&fx.cart, &fx.catalog, None, "Iced Latte", "16oz").unwrap();
        add_to_cart(&fx.cart, &fx.catalog, None, "Americano", "12oz").unwrap();

        let sold = checkout(&fx.cart, &fx.ledger, &fx.shift, &fx.store).unwrap();

        assert_eq!(sold.total, Money::from_major(150));
        assert_eq!(sold.items, vec!["Iced Latte 16oz", "Americano 12oz"]);
        assert_eq!(get_cart(&fx.cart).state, OrderState::Empty);

        let stored = fx.memory.load_ledger().unwrap().unwrap();
        assert_eq!(stored, fx.ledger.with_ledger(|l| l.clone()));
        let receipts = fx.memory.load_receipts().unwrap().unwrap();
        assert_eq!(receipts.len(), 1);
        assert_eq!(receipts[0].id(), sold.receipt_id);
    }

    #[test]
    fn test_short_stock_keeps_cart_and_ledger() {
        let fx = Fixture::new();
        start_shift(&fx.ledger, &fx.shift, &fx.store).unwrap();
        count_stock(&fx.ledger, &fx.shift, &fx.store, "Beans", "0.01").unwrap();
        let before = fx.ledger.with_ledger(|l| l.clone());
        let saves = fx.memory.save_count();
        add_to_cart(&fx.cart, &fx.catalog, None, "Americano", "12oz").unwrap();

        let err = checkout(&fx.cart, &fx.ledger, &fx.shift, &fx.store).unwrap_err();

        assert_eq!(err.code, ErrorCode::InsufficientStock);
        assert!(err.message.contains("Beans"));
        assert_eq!(fx.ledger.with_ledger(|l| l.clone()), before);
        assert_eq!(get_cart(&fx.cart).lines.len(), 1);
        assert_eq!(fx.memory.save_count(), saves);
    }

    #[test]
    fn test_save_failure_keeps_sale_in_memory() {
        let fx = Fixture::new();
        start_shift(&fx.ledger, &fx.shift, &fx.store).unwrap();
        add_to_cart(&fx.cart, &fx.catalog, None, "Americano", "12oz").unwrap();
        fx.memory.fail_saves(true);

        let err = checkout(&fx.cart, &fx.ledger, &fx.shift, &fx.store).unwrap_err();

        assert_eq!(err.code, ErrorCode::PersistenceError);
        assert_eq!(fx.ledger.with_ledger(|l| l.get("Beans")), Some(4982.0));
        assert_eq!(receipts_view(&fx.shift, &fx.store).len(), 1);
        assert!(fx.memory.document(DocumentKind::Inventory).is_none());
    }

    #[test]
    fn test_receipts_view_newest_first() {
        let fx = Fixture::new();
        start_shift(&fx.ledger, &fx.shift, &fx.store).unwrap();
        for product in ["Americano", "Cafe Latte"] {
            add_to_cart(&fx.cart, &fx.catalog, None, product, "12oz").unwrap();
            checkout(&fx.cart, &fx.ledger, &fx.shift, &fx.store).unwrap();
        }

        let rows = receipts_view(&fx.shift, &fx.store);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].summary, "Cafe Latte 12oz");
        assert_eq!(rows[1].summary, "Americano 12oz");
        assert!(rows[0].id > rows[1].id);
    }
}
