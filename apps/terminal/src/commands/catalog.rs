//! # Catalog Commands
//!
//! Browsing the menu and editing prices. A price change applies to lines
//! added afterwards; lines already in the cart keep their price.

use barista_core::validation::parse_price;
use barista_core::{Catalog, Money};
use serde::Serialize;
use tracing::debug;

use crate::error::ApiError;
use crate::state::{CatalogState, StoreState};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub product: String,
    /// (size label, price)
    pub sizes: Vec<(String, Money)>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuCategory {
    pub name: String,
    pub items: Vec<MenuItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceChange {
    pub category: String,
    pub product: String,
    pub size: String,
    pub old_price: Money,
    pub new_price: Money,
}

/// The menu, or one category of it.
pub fn menu_view(
    catalog: &CatalogState,
    category: Option<&str>,
) -> Result<Vec<MenuCategory>, ApiError> {
    debug!(?category, "menu_view command");

    catalog.with_catalog(|catalog| -> Result<Vec<MenuCategory>, ApiError> {
        let names: Vec<&str> = match category {
            Some(name) => {
                catalog.list_products(name)?;
                vec![name]
            }
            None => catalog.list_categories(),
        };
        names
            .into_iter()
            .map(|name| menu_category(catalog, name))
            .collect()
    })
}

fn menu_category(catalog: &Catalog, name: &str) -> Result<MenuCategory, ApiError> {
    let items = catalog
        .list_products(name)?
        .iter()
        .map(|product| MenuItem {
            product: product.name.clone(),
            sizes: product
                .sizes
                .iter()
                .map(|(size, price)| (size.clone(), *price))
                .collect(),
        })
        .collect();
    Ok(MenuCategory {
        name: name.to_string(),
        items,
    })
}

/// Changes one size's price and saves the catalog.
pub fn set_price(
    catalog: &CatalogState,
    store: &StoreState,
    category: &str,
    product: &str,
    size: &str,
    input: &str,
) -> Result<PriceChange, ApiError> {
    debug!(category, product, size, input, "set_price command");

    let new_price = parse_price(input)?;
    let old_price = catalog.with_catalog_mut(|catalog| {
        catalog.set_price(category, product, size, new_price, store.persistence())
    })?;

    Ok(PriceChange {
        category: category.to_string(),
        product: product.to_string(),
        size: size.to_string(),
        old_price,
        new_price,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::Fixture;
    use crate::commands::{add_to_cart, get_cart};
    use crate::error::ErrorCode;
    use barista_core::Persistence;

    #[test]
    fn test_menu_lists_every_category() {
        let fx = Fixture::new();

        let menu = menu_view(&fx.catalog, None).unwrap();

        assert_eq!(menu[0].name, "HOT COFFEE");
        assert_eq!(menu[0].items[0].product, "Americano");
        assert_eq!(
            menu[0].items[0].sizes,
            vec![
                ("12oz".to_string(), Money::from_major(60)),
                ("16oz".to_string(), Money::from_major(70)),
            ]
        );
    }

    #[test]
    fn test_menu_unknown_category() {
        let fx = Fixture::new();
        let err = menu_view(&fx.catalog, Some("SMOOTHIES")).unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[test]
    fn test_set_price_persists_and_spares_cart() {
        let fx = Fixture::new();
        add_to_cart(&fx.cart, &fx.catalog, None, "Americano", "12oz").unwrap();

        let change =
            set_price(&fx.catalog, &fx.store, "HOT COFFEE", "Americano", "12oz", "65").unwrap();

        assert_eq!(change.old_price, Money::from_major(60));
        assert_eq!(change.new_price, Money::from_major(65));
        assert_eq!(get_cart(&fx.cart).total, Money::from_major(60));

        let stored = fx.memory.load_catalog().unwrap().unwrap();
        assert_eq!(
            stored.price("HOT COFFEE", "Americano", "12oz").unwrap(),
            Money::from_major(65)
        );

        let cart = add_to_cart(&fx.cart, &fx.catalog, None, "Americano", "12oz").unwrap();
        assert_eq!(cart.total, Money::from_major(125));
    }

    #[test]
    fn test_set_price_rejects_bad_input() {
        let fx = Fixture::new();

        for input in ["-5", "abc", "1.999"] {
            let err = set_price(&fx.catalog, &fx.store, "HOT COFFEE", "Americano", "12oz", input)
                .unwrap_err();
            assert_eq!(err.code, ErrorCode::ValidationError, "input {input}");
        }
        assert_eq!(fx.memory.save_count(), 0);
    }
}
