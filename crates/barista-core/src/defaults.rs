//! # Default Tables
//!
//! First-run data for a fresh terminal: unit sizes, starting inventory,
//! the menu with prices and the recipe for every product size.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Table              Used by                    Units                    │
//! │  ─────────────────  ─────────────────────────  ───────────────────────  │
//! │  UNIT_SIZES         UnitConverter::defaults    raw units per bulk unit  │
//! │  DEFAULT_INVENTORY  InventoryLedger::defaults  raw units (g, ml, pcs)   │
//! │  DEFAULT_PRODUCTS   Catalog::defaults          whole pesos              │
//! │  RECIPES            RecipeBook::defaults       raw units per cup sold   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Once the ledger and catalog have been saved, the persisted documents win
//! and these tables are only read for unit sizes and recipes.

// =============================================================================
// Unit Sizes
// =============================================================================

pub const UNIT_SIZES: &[(&str, f64)] = &[
    ("Beans", 1000.0),
    ("Milk", 1000.0),
    ("Biscoff Spread", 1000.0),
    ("Biscoff Crackers", 1000.0),
    ("Condense", 1000.0),
    ("Choco Sauce", 1000.0),
    ("White Choco Sauce", 1000.0),
    ("Caramel Sauce", 1000.0),
    ("Fructose", 1000.0),
    ("Whip Cream", 1000.0),
    ("Hazelnut Syrup", 750.0),
    ("Salted Caramel Syrup", 750.0),
    ("Strawberry Syrup", 750.0),
    ("Irish Cream Syrup", 750.0),
    ("Vanilla Syrup", 750.0),
    ("Caramel Syrup", 750.0),
    ("Butterscotch Syrup", 750.0),
];

// =============================================================================
// Starting Inventory
// =============================================================================

pub const DEFAULT_INVENTORY: &[(&str, f64)] = &[
    ("12oz Cups Hot", 100.0),
    ("16oz Cups Hot", 100.0),
    ("16oz Cups Iced", 100.0),
    ("22oz Cups Iced", 100.0),
    ("Strawless lid hot", 200.0),
    ("Strawless lid iced", 200.0),
    ("Dome lid", 100.0),
    ("Beans", 5000.0),
    ("Milk", 10000.0),
    ("Fructose", 2000.0),
    ("Sugar", 1000.0),
    ("Water", 5000.0),
    ("Condense", 2000.0),
    ("Choco Sauce", 2000.0),
    ("White Choco Sauce", 1000.0),
    ("Caramel Sauce", 1000.0),
    ("Whip Cream", 500.0),
    ("Cinnamon Powder", 100.0),
    ("Biscoff Spread", 500.0),
    ("Hazelnut Syrup", 750.0),
    ("Salted Caramel Syrup", 750.0),
    ("Strawberry Syrup", 750.0),
    ("Irish Cream Syrup", 750.0),
    ("Vanilla Syrup", 750.0),
    ("Caramel Syrup", 750.0),
    ("Butterscotch Syrup", 750.0),
    ("Biscoff Crackers", 1000.0),
];

// =============================================================================
// Menu
// =============================================================================

/// Category → product → size → price in whole pesos.
pub const DEFAULT_PRODUCTS: &[(&str, &[(&str, &[(&str, i64)])])] = &[
    (
        "HOT COFFEE",
        &[
            ("Americano", &[("12oz", 60), ("16oz", 70)]),
            ("Cafe Latte", &[("12oz", 80), ("16oz", 90)]),
            ("Cappuccino", &[("12oz", 80), ("16oz", 90)]),
            ("Caramel Macchiato", &[("12oz", 90), ("16oz", 100)]),
            ("Salted Caramel", &[("12oz", 95), ("16oz", 105)]),
            ("Spanish Latte", &[("12oz", 90), ("16oz", 100)]),
            ("Vietnamese", &[("12oz", 85), ("16oz", 95)]),
            ("Choko Hazelnut", &[("12oz", 95), ("16oz", 105)]),
            ("Kafe Mocha", &[("12oz", 95), ("16oz", 105)]),
            ("White Mocha", &[("12oz", 95), ("16oz", 105)]),
        ],
    ),
    (
        "ICED COFFEE",
        &[
            ("Iced Americano", &[("16oz", 70), ("22oz", 80)]),
            ("Iced Latte", &[("16oz", 90), ("22oz", 100)]),
            ("Iced Cappuccino", &[("16oz", 90), ("22oz", 100)]),
            ("Iced Caramel Macchiato", &[("16oz", 100), ("22oz", 110)]),
            ("Iced Salted Caramel", &[("16oz", 110), ("22oz", 120)]),
            ("Iced Spanish Latte", &[("16oz", 100), ("22oz", 110)]),
            ("Iced Vietnamese", &[("16oz", 95), ("22oz", 105)]),
            ("Iced Shaken Hazelnut", &[("16oz", 100), ("22oz", 110)]),
            ("Biscoff Latte", &[("16oz", 110), ("22oz", 120)]),
            ("Ube Espresso", &[("16oz", 110), ("22oz", 120)]),
            ("Oreo Latte", &[("16oz", 110), ("22oz", 120)]),
            ("Strawberry Coffee", &[("16oz", 105), ("22oz", 115)]),
        ],
    ),
    (
        "FLAVORED COFFEE",
        &[
            ("Buttered Scotch", &[("12oz", 85), ("16oz", 95), ("22oz", 105)]),
            ("Hazelnut", &[("12oz", 85), ("16oz", 95), ("22oz", 105)]),
            ("Vanilla", &[("12oz", 85), ("16oz", 95), ("22oz", 105)]),
        ],
    ),
    (
        "NON-COFFEE DRINKS",
        &[
            ("Iced Choco", &[("16oz", 90), ("22oz", 100)]),
            ("Strawberry Choco", &[("16oz", 100), ("22oz", 110)]),
            ("Oreo Blend", &[("16oz", 100), ("22oz", 110)]),
            ("Oreo Matcha", &[("16oz", 110), ("22oz", 120)]),
            ("Ube Matcha", &[("16oz", 110), ("22oz", 120)]),
            ("Oreo Ube", &[("16oz", 110), ("22oz", 120)]),
        ],
    ),
];

// =============================================================================
// Recipes
// =============================================================================

/// Product key (`"<product> <size>"`) → ingredient → raw units per unit sold.
pub const RECIPES: &[(&str, &[(&str, f64)])] = &[
    (
        "Americano 12oz",
        &[
            ("Beans", 18.0),
            ("Water", 200.0),
            ("12oz Cups Hot", 1.0),
            ("Strawless lid hot", 1.0),
        ],
    ),
    (
        "Americano 16oz",
        &[
            ("Beans", 36.0),
            ("Water", 300.0),
            ("16oz Cups Hot", 1.0),
            ("Strawless lid hot", 1.0),
        ],
    ),
    (
        "Cafe Latte 12oz",
        &[
            ("Beans", 18.0),
            ("Milk", 180.0),
            ("12oz Cups Hot", 1.0),
            ("Strawless lid hot", 1.0),
        ],
    ),
    (
        "Cafe Latte 16oz",
        &[
            ("Beans", 36.0),
            ("Milk", 200.0),
            ("16oz Cups Hot", 1.0),
            ("Strawless lid hot", 1.0),
        ],
    ),
    (
        "Cappuccino 12oz",
        &[
            ("Beans", 18.0),
            ("Milk", 150.0),
            ("12oz Cups Hot", 1.0),
            ("Strawless lid hot", 1.0),
        ],
    ),
    (
        "Cappuccino 16oz",
        &[
            ("Beans", 36.0),
            ("Milk", 180.0),
            ("16oz Cups Hot", 1.0),
            ("Strawless lid hot", 1.0),
        ],
    ),
    (
        "Caramel Macchiato 12oz",
        &[
            ("Beans", 18.0),
            ("Milk", 150.0),
            ("Caramel Syrup", 20.0),
            ("12oz Cups Hot", 1.0),
        ],
    ),
    (
        "Caramel Macchiato 16oz",
        &[
            ("Beans", 36.0),
            ("Milk", 200.0),
            ("Caramel Syrup", 30.0),
            ("16oz Cups Hot", 1.0),
        ],
    ),
    (
        "Salted Caramel 12oz",
        &[
            ("Beans", 18.0),
            ("Milk", 150.0),
            ("Salted Caramel Syrup", 20.0),
            ("12oz Cups Hot", 1.0),
        ],
    ),
    (
        "Salted Caramel 16oz",
        &[
            ("Beans", 36.0),
            ("Milk", 200.0),
            ("Salted Caramel Syrup", 30.0),
            ("16oz Cups Hot", 1.0),
        ],
    ),
    (
        "Spanish Latte 12oz",
        &[
            ("Beans", 18.0),
            ("Milk", 150.0),
            ("Condense", 20.0),
            ("12oz Cups Hot", 1.0),
        ],
    ),
    (
        "Spanish Latte 16oz",
        &[
            ("Beans", 36.0),
            ("Milk", 200.0),
            ("Condense", 30.0),
            ("16oz Cups Hot", 1.0),
        ],
    ),
    (
        "Vietnamese 12oz",
        &[
            ("Beans", 18.0),
            ("Water", 100.0),
            ("Condense", 30.0),
            ("12oz Cups Hot", 1.0),
        ],
    ),
    (
        "Vietnamese 16oz",
        &[
            ("Beans", 36.0),
            ("Water", 150.0),
            ("Condense", 40.0),
            ("16oz Cups Hot", 1.0),
        ],
    ),
    (
        "Choko Hazelnut 12oz",
        &[
            ("Beans", 18.0),
            ("Milk", 180.0),
            ("Hazelnut Syrup", 15.0),
            ("Choco Sauce", 15.0),
            ("12oz Cups Hot", 1.0),
        ],
    ),
    (
        "Choko Hazelnut 16oz",
        &[
            ("Beans", 36.0),
            ("Milk", 200.0),
            ("Hazelnut Syrup", 20.0),
            ("Choco Sauce", 20.0),
            ("16oz Cups Hot", 1.0),
        ],
    ),
    (
        "Kafe Mocha 12oz",
        &[
            ("Beans", 18.0),
            ("Milk", 180.0),
            ("Choco Sauce", 20.0),
            ("12oz Cups Hot", 1.0),
        ],
    ),
    (
        "Kafe Mocha 16oz",
        &[
            ("Beans", 36.0),
            ("Milk", 200.0),
            ("Choco Sauce", 30.0),
            ("16oz Cups Hot", 1.0),
        ],
    ),
    (
        "White Mocha 12oz",
        &[
            ("Beans", 18.0),
            ("Milk", 180.0),
            ("White Choco Sauce", 20.0),
            ("12oz Cups Hot", 1.0),
        ],
    ),
    (
        "White Mocha 16oz",
        &[
            ("Beans", 36.0),
            ("Milk", 200.0),
            ("White Choco Sauce", 30.0),
            ("16oz Cups Hot", 1.0),
        ],
    ),
    (
        "Iced Americano 16oz",
        &[
            ("Beans", 36.0),
            ("Water", 200.0),
            ("16oz Cups Iced", 1.0),
            ("Strawless lid iced", 1.0),
        ],
    ),
    (
        "Iced Americano 22oz",
        &[
            ("Beans", 36.0),
            ("Water", 250.0),
            ("22oz Cups Iced", 1.0),
            ("Strawless lid iced", 1.0),
        ],
    ),
    (
        "Iced Latte 16oz",
        &[
            ("Beans", 36.0),
            ("Milk", 200.0),
            ("16oz Cups Iced", 1.0),
            ("Strawless lid iced", 1.0),
        ],
    ),
    (
        "Iced Latte 22oz",
        &[
            ("Beans", 36.0),
            ("Milk", 250.0),
            ("22oz Cups Iced", 1.0),
            ("Strawless lid iced", 1.0),
        ],
    ),
    (
        "Iced Cappuccino 16oz",
        &[
            ("Beans", 36.0),
            ("Milk", 180.0),
            ("16oz Cups Iced", 1.0),
            ("Strawless lid iced", 1.0),
        ],
    ),
    (
        "Iced Cappuccino 22oz",
        &[
            ("Beans", 36.0),
            ("Milk", 220.0),
            ("22oz Cups Iced", 1.0),
            ("Strawless lid iced", 1.0),
        ],
    ),
    (
        "Iced Caramel Macchiato 16oz",
        &[
            ("Beans", 36.0),
            ("Milk", 200.0),
            ("Caramel Syrup", 30.0),
            ("16oz Cups Iced", 1.0),
        ],
    ),
    (
        "Iced Caramel Macchiato 22oz",
        &[
            ("Beans", 36.0),
            ("Milk", 250.0),
            ("Caramel Syrup", 40.0),
            ("22oz Cups Iced", 1.0),
        ],
    ),
    (
        "Iced Salted Caramel 16oz",
        &[
            ("Beans", 36.0),
            ("Milk", 200.0),
            ("Salted Caramel Syrup", 30.0),
            ("16oz Cups Iced", 1.0),
        ],
    ),
    (
        "Iced Salted Caramel 22oz",
        &[
            ("Beans", 36.0),
            ("Milk", 250.0),
            ("Salted Caramel Syrup", 40.0),
            ("22oz Cups Iced", 1.0),
        ],
    ),
    (
        "Iced Spanish Latte 16oz",
        &[
            ("Beans", 36.0),
            ("Milk", 200.0),
            ("Condense", 30.0),
            ("16oz Cups Iced", 1.0),
        ],
    ),
    (
        "Iced Spanish Latte 22oz",
        &[
            ("Beans", 36.0),
            ("Milk", 250.0),
            ("Condense", 40.0),
            ("22oz Cups Iced", 1.0),
        ],
    ),
    (
        "Iced Vietnamese 16oz",
        &[
            ("Beans", 36.0),
            ("Water", 150.0),
            ("Condense", 40.0),
            ("16oz Cups Iced", 1.0),
        ],
    ),
    (
        "Iced Vietnamese 22oz",
        &[
            ("Beans", 36.0),
            ("Water", 200.0),
            ("Condense", 50.0),
            ("22oz Cups Iced", 1.0),
        ],
    ),
    (
        "Iced Shaken Hazelnut 16oz",
        &[
            ("Beans", 36.0),
            ("Milk", 150.0),
            ("Hazelnut Syrup", 20.0),
            ("16oz Cups Iced", 1.0),
        ],
    ),
    (
        "Iced Shaken Hazelnut 22oz",
        &[
            ("Beans", 36.0),
            ("Milk", 200.0),
            ("Hazelnut Syrup", 30.0),
            ("22oz Cups Iced", 1.0),
        ],
    ),
    (
        "Biscoff Latte 16oz",
        &[
            ("Beans", 36.0),
            ("Milk", 200.0),
            ("Biscoff Spread", 20.0),
            ("16oz Cups Iced", 1.0),
        ],
    ),
    (
        "Biscoff Latte 22oz",
        &[
            ("Beans", 36.0),
            ("Milk", 250.0),
            ("Biscoff Spread", 30.0),
            ("22oz Cups Iced", 1.0),
        ],
    ),
    ("Ube Espresso 16oz", &[("Beans", 36.0), ("Milk", 200.0), ("16oz Cups Iced", 1.0)]),
    ("Ube Espresso 22oz", &[("Beans", 36.0), ("Milk", 250.0), ("22oz Cups Iced", 1.0)]),
    ("Oreo Latte 16oz", &[("Beans", 36.0), ("Milk", 200.0), ("16oz Cups Iced", 1.0)]),
    ("Oreo Latte 22oz", &[("Beans", 36.0), ("Milk", 250.0), ("22oz Cups Iced", 1.0)]),
    (
        "Strawberry Coffee 16oz",
        &[
            ("Beans", 36.0),
            ("Milk", 200.0),
            ("Strawberry Syrup", 20.0),
            ("16oz Cups Iced", 1.0),
        ],
    ),
    (
        "Strawberry Coffee 22oz",
        &[
            ("Beans", 36.0),
            ("Milk", 250.0),
            ("Strawberry Syrup", 30.0),
            ("22oz Cups Iced", 1.0),
        ],
    ),
    (
        "Buttered Scotch 12oz",
        &[
            ("Beans", 18.0),
            ("Milk", 150.0),
            ("Butterscotch Syrup", 20.0),
            ("12oz Cups Hot", 1.0),
        ],
    ),
    (
        "Buttered Scotch 16oz",
        &[
            ("Beans", 36.0),
            ("Milk", 200.0),
            ("Butterscotch Syrup", 30.0),
            ("16oz Cups Hot", 1.0),
        ],
    ),
    (
        "Buttered Scotch 22oz",
        &[
            ("Beans", 36.0),
            ("Milk", 250.0),
            ("Butterscotch Syrup", 40.0),
            ("22oz Cups Iced", 1.0),
        ],
    ),
    (
        "Hazelnut 12oz",
        &[
            ("Beans", 18.0),
            ("Milk", 150.0),
            ("Hazelnut Syrup", 20.0),
            ("12oz Cups Hot", 1.0),
        ],
    ),
    (
        "Hazelnut 16oz",
        &[
            ("Beans", 36.0),
            ("Milk", 200.0),
            ("Hazelnut Syrup", 30.0),
            ("16oz Cups Hot", 1.0),
        ],
    ),
    (
        "Hazelnut 22oz",
        &[
            ("Beans", 36.0),
            ("Milk", 250.0),
            ("Hazelnut Syrup", 40.0),
            ("22oz Cups Iced", 1.0),
        ],
    ),
    (
        "Vanilla 12oz",
        &[
            ("Beans", 18.0),
            ("Milk", 150.0),
            ("Vanilla Syrup", 20.0),
            ("12oz Cups Hot", 1.0),
        ],
    ),
    (
        "Vanilla 16oz",
        &[
            ("Beans", 36.0),
            ("Milk", 200.0),
            ("Vanilla Syrup", 30.0),
            ("16oz Cups Hot", 1.0),
        ],
    ),
    (
        "Vanilla 22oz",
        &[
            ("Beans", 36.0),
            ("Milk", 250.0),
            ("Vanilla Syrup", 40.0),
            ("22oz Cups Iced", 1.0),
        ],
    ),
    ("Iced Choco 16oz", &[("Milk", 200.0), ("Choco Sauce", 30.0), ("16oz Cups Iced", 1.0)]),
    ("Iced Choco 22oz", &[("Milk", 250.0), ("Choco Sauce", 40.0), ("22oz Cups Iced", 1.0)]),
    ("Oreo Blend 16oz", &[("Milk", 200.0), ("Vanilla Syrup", 10.0), ("16oz Cups Iced", 1.0)]),
    ("Oreo Blend 22oz", &[("Milk", 250.0), ("Vanilla Syrup", 20.0), ("22oz Cups Iced", 1.0)]),
    (
        "Strawberry Choco 16oz",
        &[
            ("Milk", 200.0),
            ("Strawberry Syrup", 20.0),
            ("Choco Sauce", 20.0),
            ("16oz Cups Iced", 1.0),
        ],
    ),
    (
        "Strawberry Choco 22oz",
        &[
            ("Milk", 250.0),
            ("Strawberry Syrup", 30.0),
            ("Choco Sauce", 30.0),
            ("22oz Cups Iced", 1.0),
        ],
    ),
    ("Oreo Matcha 16oz", &[("Milk", 200.0), ("16oz Cups Iced", 1.0)]),
    ("Oreo Matcha 22oz", &[("Milk", 250.0), ("22oz Cups Iced", 1.0)]),
    ("Ube Matcha 16oz", &[("Milk", 200.0), ("16oz Cups Iced", 1.0)]),
    ("Ube Matcha 22oz", &[("Milk", 250.0), ("22oz Cups Iced", 1.0)]),
    ("Oreo Ube 16oz", &[("Milk", 200.0), ("16oz Cups Iced", 1.0)]),
    ("Oreo Ube 22oz", &[("Milk", 250.0), ("22oz Cups Iced", 1.0)]),
];

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_every_menu_item_has_a_recipe() {
        let recipes: HashSet<&str> = RECIPES.iter().map(|(key, _)| *key).collect();
        for (_, products) in DEFAULT_PRODUCTS {
            for (product, sizes) in products.iter() {
                for (size, _) in sizes.iter() {
                    let key = format!("{product} {size}");
                    assert!(recipes.contains(key.as_str()), "missing recipe {key}");
                }
            }
        }
    }

    #[test]
    fn test_recipe_ingredients_are_stocked() {
        let stocked: HashSet<&str> = DEFAULT_INVENTORY.iter().map(|(name, _)| *name).collect();
        for (key, ingredients) in RECIPES {
            for (ingredient, qty) in ingredients.iter() {
                assert!(stocked.contains(ingredient), "{key} uses unstocked {ingredient}");
                assert!(*qty > 0.0);
            }
        }
    }

    #[test]
    fn test_unit_sizes_are_positive() {
        assert!(UNIT_SIZES.iter().all(|(_, size)| *size > 0.0));
    }
}
