//! # Catalog
//!
//! The menu: ordered categories, each with ordered products, each product
//! with a price per size label.
//!
//! ```text
//! HOT COFFEE
//! ├── Americano          12oz 60.00   16oz 70.00
//! ├── Cafe Latte         12oz 80.00   16oz 90.00
//! └── ...
//! ICED COFFEE
//! └── ...
//! ```
//!
//! Category and product order is insertion order and never changes. Sizes
//! are kept sorted by label. Prices are edited in place from the back
//! office; every edit is persisted immediately.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use crate::defaults::DEFAULT_PRODUCTS;
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::persistence::Persistence;
use crate::validation::{validate_name, validate_price};

// =============================================================================
// Product & Category
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub name: String,
    /// Size label → price.
    pub sizes: BTreeMap<String, Money>,
}

impl Product {
    pub fn price(&self, size: &str) -> Option<Money> {
        self.sizes.get(size).copied()
    }

    /// Size labels in display order.
    pub fn size_labels(&self) -> impl Iterator<Item = &str> {
        self.sizes.keys().map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    pub products: Vec<Product>,
}

// =============================================================================
// Catalog
// =============================================================================

/// Stored as a bare list of categories. Loading goes through
/// [`Catalog::new`], so a hand-edited `products.json` is validated too.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Category>", into = "Vec<Category>")]
pub struct Catalog {
    categories: Vec<Category>,
}

impl TryFrom<Vec<Category>> for Catalog {
    type Error = CoreError;

    fn try_from(categories: Vec<Category>) -> CoreResult<Self> {
        Catalog::new(categories)
    }
}

impl From<Catalog> for Vec<Category> {
    fn from(catalog: Catalog) -> Self {
        catalog.categories
    }
}

impl Catalog {
    /// Builds a catalog, validating names and prices.
    pub fn new(categories: Vec<Category>) -> CoreResult<Self> {
        for category in &categories {
            validate_name("category", &category.name)?;
            for product in &category.products {
                validate_name("product", &product.name)?;
                for (size, price) in &product.sizes {
                    validate_name("size", size)?;
                    validate_price(*price)?;
                }
            }
        }
        Ok(Catalog { categories })
    }

    /// The café's opening menu.
    pub fn defaults() -> Self {
        let categories = DEFAULT_PRODUCTS
            .iter()
            .map(|(category, products)| Category {
                name: category.to_string(),
                products: products
                    .iter()
                    .map(|(name, sizes)| Product {
                        name: name.to_string(),
                        sizes: sizes
                            .iter()
                            .map(|(size, price)| (size.to_string(), Money::from_major(*price)))
                            .collect(),
                    })
                    .collect(),
            })
            .collect();
        Catalog { categories }
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Category names in menu order.
    pub fn list_categories(&self) -> Vec<&str> {
        self.categories.iter().map(|c| c.name.as_str()).collect()
    }

    /// Products of a category in menu order.
    pub fn list_products(&self, category: &str) -> CoreResult<&[Product]> {
        Ok(&self.category(category)?.products)
    }

    pub fn product(&self, category: &str, product: &str) -> CoreResult<&Product> {
        self.category(category)?
            .products
            .iter()
            .find(|p| p.name == product)
            .ok_or_else(|| CoreError::not_found("Product", format!("{category}/{product}")))
    }

    /// Current price of a product size.
    pub fn price(&self, category: &str, product: &str, size: &str) -> CoreResult<Money> {
        self.product(category, product)?
            .price(size)
            .ok_or_else(|| CoreError::not_found("Size", format!("{category}/{product}/{size}")))
    }

    /// First category containing a product with this name.
    pub fn find_category(&self, product: &str) -> Option<&str> {
        self.categories
            .iter()
            .find(|c| c.products.iter().any(|p| p.name == product))
            .map(|c| c.name.as_str())
    }

    /// Changes a price and persists the catalog.
    ///
    /// ## Errors
    /// - `InvalidPrice` when `new_price` is negative (nothing changes)
    /// - `NotFound` when the category, product or size does not exist
    /// - `Persistence` when the save fails; the new price stays in memory
    pub fn set_price(
        &mut self,
        category: &str,
        product: &str,
        size: &str,
        new_price: Money,
        persistence: &dyn Persistence,
    ) -> CoreResult<Money> {
        debug!(category, product, size, price = %new_price, "set_price");
        validate_price(new_price)?;

        let slot = self
            .categories
            .iter_mut()
            .find(|c| c.name == category)
            .ok_or_else(|| CoreError::not_found("Category", category))?
            .products
            .iter_mut()
            .find(|p| p.name == product)
            .ok_or_else(|| CoreError::not_found("Product", format!("{category}/{product}")))?
            .sizes
            .get_mut(size)
            .ok_or_else(|| CoreError::not_found("Size", format!("{category}/{product}/{size}")))?;

        let old_price = std::mem::replace(slot, new_price);
        info!(
            category,
            product,
            size,
            old = %old_price,
            new = %new_price,
            "Price changed"
        );

        persistence.save_catalog(self).map_err(|e| {
            error!(error = %e, "Failed to persist catalog after price change");
            CoreError::from(e)
        })?;

        Ok(old_price)
    }

    fn category(&self, name: &str) -> CoreResult<&Category> {
        self.categories
            .iter()
            .find(|c| c.name == name)
            .ok_or_else(|| CoreError::not_found("Category", name))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
