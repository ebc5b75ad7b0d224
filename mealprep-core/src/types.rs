//! Catalog and persistence data types.

use serde::de::Deserializer;
use serde::{Deserialize, Serialize};

use crate::text::normalize;

/// Budget tier of a recipe.
///
/// Catalog files carry French labels ("éco", "normal", "plus"); parsing is
/// accent- and case-insensitive, and unknown labels fall back to `Normal`
/// (catalog integrity is the audit tool's concern, not a load error).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum BudgetTier {
    Eco,
    #[default]
    Normal,
    Plus,
}

impl BudgetTier {
    /// Parse a catalog label. Returns `None` for unrecognized labels.
    pub fn parse(label: &str) -> Option<Self> {
        match normalize(label).as_str() {
            "eco" => Some(BudgetTier::Eco),
            "normal" => Some(BudgetTier::Normal),
            "plus" => Some(BudgetTier::Plus),
            _ => None,
        }
    }

    /// The canonical catalog label.
    pub fn as_str(&self) -> &'static str {
        match self {
            BudgetTier::Eco => "éco",
            BudgetTier::Normal => "normal",
            BudgetTier::Plus => "plus",
        }
    }
}

impl std::fmt::Display for BudgetTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for BudgetTier {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for BudgetTier {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        Ok(BudgetTier::parse(&label).unwrap_or_default())
    }
}

/// Cooking mode derived from tags or requested in a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CookMode {
    Four,
    Wok,
    Poele,
    Cru,
    Mixeur,
}

impl CookMode {
    pub const ALL: &'static [CookMode] = &[
        CookMode::Four,
        CookMode::Wok,
        CookMode::Poele,
        CookMode::Cru,
        CookMode::Mixeur,
    ];

    /// The canonical tag spelling for this mode.
    pub fn as_str(&self) -> &'static str {
        match self {
            CookMode::Four => "Four",
            CookMode::Wok => "Wok",
            CookMode::Poele => "Poêle",
            CookMode::Cru => "Cru",
            CookMode::Mixeur => "Mixeur",
        }
    }
}

impl std::fmt::Display for CookMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An ingredient with an optional quantity and unit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IngredientQty {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qty: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

/// One entry of a recipe's ingredient list.
///
/// Catalog files mix two shapes: bare strings ("poulet") and quantified
/// objects (`{"name": "farine", "qty": 200, "unit": "g"}`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum IngredientEntry {
    Name(String),
    Qty(IngredientQty),
}

impl IngredientEntry {
    pub fn name(&self) -> &str {
        match self {
            IngredientEntry::Name(name) => name,
            IngredientEntry::Qty(iq) => &iq.name,
        }
    }

    pub fn to_qty(&self) -> IngredientQty {
        match self {
            IngredientEntry::Name(name) => IngredientQty {
                name: name.clone(),
                qty: None,
                unit: None,
            },
            IngredientEntry::Qty(iq) => iq.clone(),
        }
    }
}

/// Per-serving macro values.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Nutrition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kcal: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protein: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub carbs: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fat: Option<f64>,
}

/// A catalog recipe. Loaded once, immutable for the engine's lifetime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipe {
    pub slug: String,
    pub name: String,
    #[serde(default)]
    pub time: u32,
    #[serde(default)]
    pub budget: BudgetTier,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub ingredients: Vec<IngredientEntry>,
    /// Quantified ingredient list, preferred over `ingredients` when present.
    #[serde(
        default,
        rename = "ingredientsQty",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub ingredients_qty: Vec<IngredientQty>,
    #[serde(default)]
    pub steps: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nutrition: Option<Nutrition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub servings: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl Recipe {
    /// Ingredient names, whichever representation the catalog uses.
    pub fn ingredient_names(&self) -> Vec<&str> {
        if !self.ingredients_qty.is_empty() {
            self.ingredients_qty.iter().map(|iq| iq.name.as_str()).collect()
        } else {
            self.ingredients.iter().map(IngredientEntry::name).collect()
        }
    }

    /// Ingredients in the quantified shape, falling back to bare names.
    pub fn quantified_ingredients(&self) -> Vec<IngredientQty> {
        if !self.ingredients_qty.is_empty() {
            self.ingredients_qty.clone()
        } else {
            self.ingredients.iter().map(IngredientEntry::to_qty).collect()
        }
    }

    /// Reference headcount the quantities are written for.
    pub fn base_servings(&self) -> u32 {
        self.servings.unwrap_or(2)
    }
}

/// One line of the shopping list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ListItem {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qty: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    /// Slug of the recipe this line came from, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipe: Option<String>,
    #[serde(default)]
    pub checked: bool,
}

impl ListItem {
    pub fn new(name: impl Into<String>) -> Self {
        ListItem {
            name: name.into(),
            qty: None,
            unit: None,
            recipe: None,
            checked: false,
        }
    }
}

/// The persisted daily-pick record. At most one lives in the store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DailyPick {
    /// UTC calendar day, "YYYY-MM-DD".
    pub date: String,
    pub slug: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_budget_tier_lenient_parse() {
        assert_eq!(BudgetTier::parse("éco"), Some(BudgetTier::Eco));
        assert_eq!(BudgetTier::parse("ECO"), Some(BudgetTier::Eco));
        assert_eq!(BudgetTier::parse("Plus"), Some(BudgetTier::Plus));
        assert_eq!(BudgetTier::parse("luxe"), None);
    }

    #[test]
    fn test_budget_tier_deserialize_unknown_falls_back() {
        let tier: BudgetTier = serde_json::from_str("\"luxe\"").unwrap();
        assert_eq!(tier, BudgetTier::Normal);
        let tier: BudgetTier = serde_json::from_str("\"éco\"").unwrap();
        assert_eq!(tier, BudgetTier::Eco);
    }

    #[test]
    fn test_ingredient_entry_both_shapes() {
        let entries: Vec<IngredientEntry> = serde_json::from_str(
            r#"["poulet", {"name": "farine", "qty": 200.0, "unit": "g"}]"#,
        )
        .unwrap();
        assert_eq!(entries[0].name(), "poulet");
        assert_eq!(entries[1].name(), "farine");
        assert_eq!(entries[1].to_qty().qty, Some(200.0));
    }

    #[test]
    fn test_recipe_prefers_quantified_list() {
        let recipe: Recipe = serde_json::from_str(
            r#"{
                "slug": "a",
                "name": "Test",
                "time": 10,
                "budget": "normal",
                "ingredients": ["riz"],
                "ingredientsQty": [{"name": "riz blanc", "qty": 150.0, "unit": "g"}],
                "steps": []
            }"#,
        )
        .unwrap();
        assert_eq!(recipe.ingredient_names(), vec!["riz blanc"]);
        assert_eq!(recipe.base_servings(), 2);
    }
}
