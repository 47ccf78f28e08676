//! Conversion between raw stock units and bulk display units.
//!
//! Stock is tracked in the smallest measure (grams, millilitres, pieces).
//! Operators count in bulk units: a 1000 g bag of beans, a 750 ml syrup
//! bottle. The unit size of an ingredient is how many raw units one bulk unit
//! holds; ingredients without an entry are counted raw (size 1).

use std::collections::HashMap;

use crate::defaults::UNIT_SIZES;
use crate::validation::{validate_ingredient_name, validate_unit_size, ValidationResult};
use crate::DEFAULT_UNIT_SIZE;

/// Per-ingredient unit sizes. Every stored size is finite and positive.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UnitConverter {
    sizes: HashMap<String, f64>,
}

impl UnitConverter {
    /// Builds a converter, rejecting empty names and sizes that are zero,
    /// negative or non-finite.
    pub fn new<I, S>(entries: I) -> ValidationResult<Self>
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        let mut sizes = HashMap::new();
        for (name, size) in entries {
            let name = name.into();
            validate_ingredient_name(&name)?;
            validate_unit_size(&name, size)?;
            sizes.insert(name, size);
        }
        Ok(UnitConverter { sizes })
    }

    /// The café's bulk sizes: 1000 g/ml bags and bottles, 750 ml syrups.
    pub fn defaults() -> Self {
        UnitConverter {
            sizes: UNIT_SIZES
                .iter()
                .map(|(name, size)| (name.to_string(), *size))
                .collect(),
        }
    }

    pub fn unit_size(&self, ingredient: &str) -> f64 {
        self.sizes
            .get(ingredient)
            .copied()
            .unwrap_or(DEFAULT_UNIT_SIZE)
    }

    pub fn to_display(&self, ingredient: &str, raw: f64) -> f64 {
        raw / self.unit_size(ingredient)
    }

    pub fn to_raw(&self, ingredient: &str, display: f64) -> f64 {
        display * self.unit_size(ingredient)
    }
}
