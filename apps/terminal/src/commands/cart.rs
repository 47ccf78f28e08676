//! # Cart Commands
//!
//! Building and abandoning the current order. Prices are read from the
//! catalog when a line is added and stay frozen on that line.

use barista_core::{CartLine, Money, OrderSession, OrderState};
use serde::Serialize;
use tracing::debug;

use crate::error::ApiError;
use crate::state::{CartState, CatalogState};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineDto {
    /// 1-based position, as shown to the operator
    pub position: usize,
    pub product: String,
    pub size: String,
    pub price: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub state: OrderState,
    pub lines: Vec<CartLineDto>,
    pub total: Money,
}

impl From<&OrderSession> for CartResponse {
    fn from(order: &OrderSession) -> Self {
        CartResponse {
            state: order.state(),
            lines: order
                .lines()
                .iter()
                .enumerate()
                .map(|(i, line)| CartLineDto::new(i + 1, line))
                .collect(),
            total: order.total(),
        }
    }
}

impl CartLineDto {
    fn new(position: usize, line: &CartLine) -> Self {
        CartLineDto {
            position,
            product: line.product.clone(),
            size: line.size.clone(),
            price: line.unit_price,
        }
    }
}

pub fn get_cart(cart: &CartState) -> CartResponse {
    debug!("get_cart command");
    cart.with_order(|order| CartResponse::from(order))
}

/// Adds one product size to the cart.
///
/// `category` may be omitted when the product name is unique on the menu.
pub fn add_to_cart(
    cart: &CartState,
    catalog: &CatalogState,
    category: Option<&str>,
    product: &str,
    size: &str,
) -> Result<CartResponse, ApiError> {
    debug!(?category, product, size, "add_to_cart command");

    cart.with_order_mut(|order| {
        catalog.with_catalog(|catalog| -> Result<CartResponse, ApiError> {
            let category = match category {
                Some(category) => category,
                None => catalog
                    .find_category(product)
                    .ok_or_else(|| ApiError::not_found("Product", product))?,
            };
            order.add_from_catalog(catalog, category, product, size)?;
            Ok(CartResponse::from(&*order))
        })
    })
}

/// Removes the line at a 1-based position.
pub fn remove_from_cart(cart: &CartState, position: usize) -> Result<CartResponse, ApiError> {
    debug!(position, "remove_from_cart command");

    cart.with_order_mut(|order| -> Result<CartResponse, ApiError> {
        let index = position
            .checked_sub(1)
            .ok_or_else(|| ApiError::validation("Cart positions start at 1"))?;
        order.remove_line(index)?;
        Ok(CartResponse::from(&*order))
    })
}

/// Drops the whole order. Stock is untouched.
pub fn cancel_order(cart: &CartState) -> CartResponse {
    debug!("cancel_order command");

    cart.with_order_mut(|order| {
        order.cancel();
        CartResponse::from(&*order)
    })
}
