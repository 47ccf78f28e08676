//! # Cart State
//!
//! The order being built at the till.

use std::sync::{Arc, Mutex, PoisonError};

use barista_core::OrderSession;

#[derive(Debug, Clone, Default)]
pub struct CartState {
    order: Arc<Mutex<OrderSession>>,
}

impl CartState {
    pub fn new(order: OrderSession) -> Self {
        CartState {
            order: Arc::new(Mutex::new(order)),
        }
    }

    /// Executes a function with read access to the order.
    pub fn with_order<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&OrderSession) -> R,
    {
        let order = self.order.lock().unwrap_or_else(PoisonError::into_inner);
        f(&order)
    }

    /// Executes a function with write access to the order.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// cart_state.with_order_mut(|order| order.add_line("Americano", "12oz", price))?;
    /// ```
    pub fn with_order_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut OrderSession) -> R,
    {
        let mut order = self.order.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut order)
    }
}
