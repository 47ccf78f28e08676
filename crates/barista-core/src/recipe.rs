//! # Recipe Book
//!
//! Static mapping from product key to the raw ingredient cost of one unit
//! sold.
//!
//! ```text
//! "Americano 12oz" ──► { Beans: 18, Water: 200, 12oz Cups Hot: 1, Strawless lid hot: 1 }
//! "Oreo Ube 22oz"  ──► { Milk: 250, 22oz Cups Iced: 1 }
//! "Croissant Solo" ──► NoRecipe (sold, but consumes no tracked stock)
//! ```
//!
//! The book never changes after construction. A missing recipe is not an
//! error at checkout time: the line is sold untracked.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use tracing::warn;

use crate::defaults::RECIPES;
use crate::error::{CoreError, CoreResult};
use crate::ledger::InventoryLedger;
use crate::validation::{validate_ingredient_name, validate_name, validate_quantity};

/// Ingredient → raw quantity consumed per unit sold.
pub type Recipe = BTreeMap<String, f64>;

/// Builds the product key shared by recipes, cart lines and receipts.
pub fn recipe_key(product: &str, size: &str) -> String {
    format!("{product} {size}")
}

// =============================================================================
// Recipe Book
// =============================================================================

#[derive(Debug, Clone, Default)]
pub struct RecipeBook {
    recipes: HashMap<String, Recipe>,
}

impl RecipeBook {
    /// Builds a book from `(product key, recipe)` pairs.
    ///
    /// Quantities must be finite and non-negative.
    pub fn new<I, K>(entries: I) -> CoreResult<Self>
    where
        I: IntoIterator<Item = (K, Recipe)>,
        K: Into<String>,
    {
        let mut recipes = HashMap::new();
        for (key, recipe) in entries {
            let key = key.into();
            validate_name("recipe", &key)?;
            for (ingredient, qty) in &recipe {
                validate_ingredient_name(ingredient)?;
                validate_quantity(ingredient, *qty)?;
                if *qty < 0.0 {
                    return Err(CoreError::invalid_quantity(
                        ingredient.as_str(),
                        format!("recipe {key} consumes a negative amount"),
                    ));
                }
            }
            recipes.insert(key, recipe);
        }
        Ok(RecipeBook { recipes })
    }

    /// The full café recipe table.
    pub fn defaults() -> Self {
        let recipes = RECIPES
            .iter()
            .map(|(key, ingredients)| {
                let recipe = ingredients
                    .iter()
                    .map(|(name, qty)| (name.to_string(), *qty))
                    .collect();
                (key.to_string(), recipe)
            })
            .collect();
        RecipeBook { recipes }
    }

    /// Looks up the recipe for a product size.
    pub fn resolve(&self, product: &str, size: &str) -> CoreResult<&Recipe> {
        self.resolve_key(&recipe_key(product, size))
    }

    /// Looks up a recipe by its product key.
    pub fn resolve_key(&self, key: &str) -> CoreResult<&Recipe> {
        self.recipes
            .get(key)
            .ok_or_else(|| CoreError::NoRecipe(key.to_string()))
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    /// Recipe ingredients the ledger does not track.
    ///
    /// A checkout needing any of these fails with `InsufficientStock`, so the
    /// terminal reports them at startup rather than at the till.
    pub fn unknown_ingredients(&self, ledger: &InventoryLedger) -> BTreeSet<String> {
        let unknown: BTreeSet<String> = self
            .recipes
            .values()
            .flat_map(|recipe| recipe.keys())
            .filter(|ingredient| !ledger.contains(ingredient))
            .cloned()
            .collect();

        if !unknown.is_empty() {
            warn!(
                count = unknown.len(),
                ingredients = ?unknown,
                "Recipes reference ingredients missing from the ledger"
            );
        }
        unknown
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recipe(pairs: &[(&str, f64)]) -> Recipe {
        pairs.iter().map(|(n, q)| (n.to_string(), *q)).collect()
    }

    #[test]
    fn test_resolve() {
        let book = RecipeBook::defaults();
        let americano = book.resolve("Americano", "12oz").unwrap();
        assert_eq!(americano.get("Beans"), Some(&18.0));
        assert_eq!(americano.get("Water"), Some(&200.0));
        assert_eq!(americano.len(), 4);
    }

    #[test]
    fn test_resolve_missing_is_no_recipe() {
        let book = RecipeBook::defaults();
        let err = book.resolve("Croissant", "Solo").unwrap_err();
        assert!(matches!(err, CoreError::NoRecipe(ref key) if key == "Croissant Solo"));
    }

    #[test]
    fn test_new_rejects_negative_quantities() {
        let result = RecipeBook::new([("Americano 12oz", recipe(&[("Beans", -18.0)]))]);
        assert!(matches!(result, Err(CoreError::InvalidQuantity { .. })));

        let result = RecipeBook::new([("Americano 12oz", recipe(&[("Beans", f64::NAN)]))]);
        assert!(matches!(result, Err(CoreError::InvalidQuantity { .. })));
    }

    #[test]
    fn test_unknown_ingredients() {
        let book = RecipeBook::new([
            ("Americano 12oz", recipe(&[("Beans", 18.0), ("Water", 200.0)])),
            ("Matcha 16oz", recipe(&[("Matcha Powder", 5.0), ("Milk", 200.0)])),
        ])
        .unwrap();
        let ledger =
            InventoryLedger::from_quantities([("Beans", 5000.0), ("Water", 5000.0), ("Milk", 1.0)])
                .unwrap();

        let unknown = book.unknown_ingredients(&ledger);
        assert_eq!(unknown.into_iter().collect::<Vec<_>>(), vec!["Matcha Powder"]);
    }

    #[test]
    fn test_defaults_match_default_ledger() {
        let book = RecipeBook::defaults();
        assert!(book.unknown_ingredients(&InventoryLedger::defaults()).is_empty());
    }
}
