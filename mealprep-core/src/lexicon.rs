//! Known ingredient base forms derived from the catalog.
//!
//! Built once per catalog load and used to tell which query tokens are
//! plausibly ingredient names rather than generic modifiers.

use std::collections::HashSet;

use crate::text::{normalize, singularize};
use crate::types::Recipe;

/// The set of known ingredient base forms (normalized, singularized).
#[derive(Debug, Default, Clone)]
pub struct IngredientLexicon {
    terms: HashSet<String>,
}

impl IngredientLexicon {
    /// Collect the base form of every ingredient mention in the catalog.
    /// Forms shorter than three characters are dropped as noise.
    pub fn build(catalog: &[Recipe]) -> Self {
        let mut terms = HashSet::new();
        for recipe in catalog {
            for name in recipe.ingredient_names() {
                let base = normalize(&singularize(name));
                if base.chars().count() >= 3 {
                    terms.insert(base);
                }
            }
        }
        IngredientLexicon { terms }
    }

    /// Whether a query token reduces to a known ingredient base form.
    pub fn contains(&self, token: &str) -> bool {
        self.terms.contains(&normalize(&singularize(token)))
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}
