//! # Order Session
//!
//! The cart being built at the till and its checkout.
//!
//! ## Order Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   ┌───────┐  add_line   ┌──────────┐  checkout (stock ok)  ┌───────────┐ │
//! │   │ Empty │ ──────────► │ Building │ ────────────────────► │ Committed │ │
//! │   └───────┘             └──────────┘                       └─────┬─────┘ │
//! │       ▲                   │  │   ▲                               │       │
//! │       │                   │  │   └─ InsufficientStock            │       │
//! │       │                   │  │      (cart kept)                  │       │
//! │       │       cancel      │  ▼                                   │       │
//! │       │    ┌─────────┐ ◄──┘  remove_line (last line) ─► Empty    │       │
//! │       └────│ Aborted │                                           │       │
//! │            └─────────┘                                           │       │
//! │       ▲                                                          │       │
//! │       └──────────────────── receipt returned, cart cleared ◄─────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Committed and Aborted are momentary: the session is immediately Empty
//! again and ready for the next customer.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info};

use crate::catalog::Catalog;
use crate::error::{CoreError, CoreResult};
use crate::ledger::InventoryLedger;
use crate::money::Money;
use crate::recipe::RecipeBook;
use crate::types::{CartLine, Receipt};
use crate::validation::{validate_cart_size, validate_name, validate_price};

/// Observable state of a session between operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderState {
    Empty,
    Building,
}

#[derive(Debug, Clone, Default)]
pub struct OrderSession {
    lines: Vec<CartLine>,
    last_receipt_id: u64,
}

impl OrderSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Continues the receipt id sequence after `last_id`, so ids stay
    /// unique across restarts.
    pub fn with_last_receipt_id(last_id: u64) -> Self {
        OrderSession {
            lines: Vec::new(),
            last_receipt_id: last_id,
        }
    }

    pub fn state(&self) -> OrderState {
        if self.lines.is_empty() {
            OrderState::Empty
        } else {
            OrderState::Building
        }
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sum of line prices, recomputed on every call.
    pub fn total(&self) -> Money {
        self.lines.iter().map(|l| l.unit_price).sum()
    }

    /// Appends one unit of a product size at a fixed price.
    pub fn add_line(&mut self, product: &str, size: &str, unit_price: Money) -> CoreResult<&CartLine> {
        validate_name("product", product)?;
        validate_name("size", size)?;
        validate_price(unit_price)?;
        validate_cart_size(self.lines.len())?;

        self.lines.push(CartLine::new(product, size, unit_price));
        debug!(product, size, price = %unit_price, lines = self.lines.len(), "Line added");

        let index = self.lines.len() - 1;
        Ok(&self.lines[index])
    }

    /// Appends a line priced from the catalog as it is right now.
    pub fn add_from_catalog(
        &mut self,
        catalog: &Catalog,
        category: &str,
        product: &str,
        size: &str,
    ) -> CoreResult<&CartLine> {
        let price = catalog.price(category, product, size)?;
        self.add_line(product, size, price)
    }

    /// Removes the line at `index` (0-based, cart order).
    pub fn remove_line(&mut self, index: usize) -> CoreResult<CartLine> {
        if self.lines.is_empty() {
            return Err(CoreError::EmptyCart);
        }
        if index >= self.lines.len() {
            return Err(CoreError::not_found("Cart line", (index + 1).to_string()));
        }
        let removed = self.lines.remove(index);
        debug!(key = %removed.key(), lines = self.lines.len(), "Line removed");
        Ok(removed)
    }

    /// Removes the first line whose product key matches.
    pub fn remove_by_key(&mut self, key: &str) -> CoreResult<CartLine> {
        if self.lines.is_empty() {
            return Err(CoreError::EmptyCart);
        }
        let index = self
            .lines
            .iter()
            .position(|l| l.key() == key)
            .ok_or_else(|| CoreError::not_found("Cart line", key))?;
        self.remove_line(index)
    }

    /// Drops every line and returns them.
    pub fn cancel(&mut self) -> Vec<CartLine> {
        let dropped = std::mem::take(&mut self.lines);
        info!(lines = dropped.len(), "Order cancelled");
        dropped
    }

    /// Checks out at the current time.
    pub fn checkout(&mut self, ledger: &mut InventoryLedger, recipes: &RecipeBook) -> CoreResult<Receipt> {
        self.checkout_at(ledger, recipes, Utc::now())
    }

    /// Deducts stock for every line and turns the cart into a receipt.
    ///
    /// ## Errors
    /// - `EmptyCart` when there is nothing to sell
    /// - `InsufficientStock` when any ingredient is short; the cart and the
    ///   ledger are left exactly as they were
    pub fn checkout_at(
        &mut self,
        ledger: &mut InventoryLedger,
        recipes: &RecipeBook,
        now: DateTime<Utc>,
    ) -> CoreResult<Receipt> {
        if self.lines.is_empty() {
            return Err(CoreError::EmptyCart);
        }

        let summary = ledger.fulfill(&self.lines, recipes)?;

        let id = self.next_receipt_id(now);
        let receipt = Receipt::new(id, now, std::mem::take(&mut self.lines));
        info!(
            receipt_id = id,
            total = %receipt.total(),
            lines = receipt.lines().len(),
            untracked = summary.untracked.len(),
            "Checkout completed"
        );
        Ok(receipt)
    }

    /// Unix-second ids, bumped past the previous id when two checkouts land
    /// in the same second or the clock steps backwards.
    fn next_receipt_id(&mut self, now: DateTime<Utc>) -> u64 {
        let from_clock = u64::try_from(now.timestamp()).unwrap_or(0);
        let id = from_clock.max(self.last_receipt_id.saturating_add(1));
        self.last_receipt_id = id;
        id
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recipe::Recipe;
    use crate::testing::TestStore;
    use crate::MAX_CART_LINES;
    use chrono::TimeZone;

    fn americano_book() -> RecipeBook {
        let recipe: Recipe = [("Beans".to_string(), 18.0), ("Water".to_string(), 200.0)]
            .into_iter()
            .collect();
        RecipeBook::new([("Americano 12oz", recipe)]).unwrap()
    }

    fn sample_ledger() -> InventoryLedger {
        InventoryLedger::from_quantities([("Beans", 5000.0), ("Water", 5000.0)]).unwrap()
    }

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    #[test]
    fn test_add_and_total() {
        let catalog = Catalog::defaults();
        let mut order = OrderSession::new();
        assert_eq!(order.state(), OrderState::Empty);

        order
            .add_from_catalog(&catalog, "HOT COFFEE", "Americano", "12oz")
            .unwrap();
        order
            .add_from_catalog(&catalog, "HOT COFFEE", "Americano", "12oz")
            .unwrap();
        order
            .add_from_catalog(&catalog, "ICED COFFEE", "Iced Latte", "22oz")
            .unwrap();

        assert_eq!(order.state(), OrderState::Building);
        assert_eq!(order.len(), 3);
        assert_eq!(order.total(), Money::from_major(220));
    }

    #[test]
    fn test_line_price_is_frozen() {
        let mut catalog = Catalog::defaults();
        let store = TestStore::default();
        let mut order = OrderSession::new();
        order
            .add_from_catalog(&catalog, "HOT COFFEE", "Americano", "12oz")
            .unwrap();

        catalog
            .set_price("HOT COFFEE", "Americano", "12oz", Money::from_major(999), &store)
            .unwrap();

        assert_eq!(order.total(), Money::from_major(60));
    }

    #[test]
    fn test_add_rejects_negative_price() {
        let mut order = OrderSession::new();
        let err = order
            .add_line("Americano", "12oz", Money::from_cents(-1))
            .unwrap_err();
        assert!(matches!(err, CoreError::InvalidPrice { .. }));
        assert!(order.is_empty());
    }

    #[test]
    fn test_cart_line_limit() {
        let mut order = OrderSession::new();
        for _ in 0..MAX_CART_LINES {
            order.add_line("Americano", "12oz", Money::from_major(60)).unwrap();
        }
        let err = order
            .add_line("Americano", "12oz", Money::from_major(60))
            .unwrap_err();
        assert!(matches!(err, CoreError::CartTooLarge { .. }));
    }

    #[test]
    fn test_remove_line() {
        let mut order = OrderSession::new();
        assert!(matches!(order.remove_line(0), Err(CoreError::EmptyCart)));

        order.add_line("Americano", "12oz", Money::from_major(60)).unwrap();
        order.add_line("Cafe Latte", "16oz", Money::from_major(90)).unwrap();
        order.add_line("Americano", "12oz", Money::from_major(60)).unwrap();

        assert!(matches!(order.remove_line(5), Err(CoreError::NotFound { .. })));

        let removed = order.remove_by_key("Americano 12oz").unwrap();
        assert_eq!(removed.key(), "Americano 12oz");
        let keys: Vec<String> = order.lines().iter().map(CartLine::key).collect();
        assert_eq!(keys, vec!["Cafe Latte 16oz", "Americano 12oz"]);

        assert!(matches!(
            order.remove_by_key("Mocha 12oz"),
            Err(CoreError::NotFound { .. })
        ));

        order.remove_line(0).unwrap();
        order.remove_line(0).unwrap();
        assert_eq!(order.state(), OrderState::Empty);
    }

    #[test]
    fn test_cancel() {
        let mut order = OrderSession::new();
        order.add_line("Americano", "12oz", Money::from_major(60)).unwrap();
        let dropped = order.cancel();
        assert_eq!(dropped.len(), 1);
        assert_eq!(order.state(), OrderState::Empty);
    }

    #[test]
    fn test_checkout_empty_cart() {
        let mut order = OrderSession::new();
        let mut ledger = sample_ledger();
        assert!(matches!(
            order.checkout(&mut ledger, &americano_book()),
            Err(CoreError::EmptyCart)
        ));
    }

    /// One Americano 12oz against Beans 5000 / Water 5000.
    #[test]
    fn test_checkout_single_americano() {
        let catalog = Catalog::defaults();
        let mut ledger = sample_ledger();
        let mut order = OrderSession::new();
        order
            .add_from_catalog(&catalog, "HOT COFFEE", "Americano", "12oz")
            .unwrap();

        let receipt = order
            .checkout_at(&mut ledger, &americano_book(), at(1_714_555_800))
            .unwrap();

        assert_eq!(ledger.get("Beans"), Some(4982.0));
        assert_eq!(ledger.get("Water"), Some(4800.0));
        assert_eq!(receipt.total(), catalog.price("HOT COFFEE", "Americano", "12oz").unwrap());
        assert_eq!(receipt.lines().len(), 1);
        assert_eq!(receipt.id(), 1_714_555_800);
        assert_eq!(order.state(), OrderState::Empty);
    }

    #[test]
    fn test_checkout_insufficient_stock_keeps_everything() {
        let mut ledger = sample_ledger();
        let mut order = OrderSession::new();
        for _ in 0..MAX_CART_LINES {
            order.add_line("Americano", "12oz", Money::from_major(60)).unwrap();
        }
        // 100 lines need 1800 g of beans and 20000 ml of water
        ledger.set_stock("Beans", 1500.0).unwrap();
        ledger.set_stock("Water", 1.0e6).unwrap();
        let before = ledger.clone();

        let err = order.checkout(&mut ledger, &americano_book()).unwrap_err();

        let names = err.insufficient_ingredients().unwrap();
        assert_eq!(names.into_iter().collect::<Vec<_>>(), vec!["Beans"]);
        assert_eq!(ledger, before);
        assert_eq!(order.len(), MAX_CART_LINES);
    }

    #[test]
    fn test_full_cart_at_highest_price_totals_exactly() {
        let top = Money::from_cents(crate::MAX_PRICE_CENTS);
        let mut order = OrderSession::new();
        for _ in 0..MAX_CART_LINES {
            order.add_line("Americano", "12oz", top).unwrap();
        }

        assert_eq!(
            order.total().cents(),
            crate::MAX_PRICE_CENTS * MAX_CART_LINES as i64
        );

        let mut order = OrderSession::new();
        let err = order
            .add_line("Americano", "12oz", Money::from_cents(i64::MAX))
            .unwrap_err();
        assert!(matches!(err, CoreError::InvalidPrice { .. }));
        assert!(order.is_empty());
    }

    /// 300 Americanos need 5400 g of beans; only 5000 g are on hand.
    #[test]
    fn test_checkout_three_hundred_americanos() {
        let mut ledger = sample_ledger();
        let lines: Vec<CartLine> = (0..300)
            .map(|_| CartLine::new("Americano", "12oz", Money::from_major(60)))
            .collect();

        let err = ledger.fulfill(&lines, &americano_book()).unwrap_err();

        let names = err.insufficient_ingredients().unwrap();
        assert!(names.contains("Beans"));
        assert_eq!(ledger, sample_ledger());
    }

    #[test]
    fn test_receipt_ids_are_unique_and_increasing() {
        let mut ledger = InventoryLedger::from_quantities([("Beans", 1.0e6), ("Water", 1.0e7)]).unwrap();
        let book = americano_book();
        let mut order = OrderSession::with_last_receipt_id(1_714_555_900);

        let mut ids = Vec::new();
        for secs in [1_714_555_800, 1_714_555_800, 1_714_556_000, 1_714_556_000] {
            order.add_line("Americano", "12oz", Money::from_major(60)).unwrap();
            ids.push(order.checkout_at(&mut ledger, &book, at(secs)).unwrap().id());
        }

        assert_eq!(ids, vec![1_714_555_901, 1_714_555_902, 1_714_556_000, 1_714_556_001]);
    }
}
