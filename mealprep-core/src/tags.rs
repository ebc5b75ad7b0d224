//! Canonical tag vocabulary: cook modes, diet markers, tag spelling canon.
//!
//! Catalog tags are free-form strings; this module is the single place that
//! knows which spellings mean what.

use std::collections::HashSet;

use crate::text::normalize;
use crate::types::CookMode;

/// Diet markers recognized on catalog tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DietTag {
    Vegetarien,
    Vegan,
    SansGluten,
    SansLactose,
}

impl DietTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            DietTag::Vegetarien => "Végétarien",
            DietTag::Vegan => "Vegan",
            DietTag::SansGluten => "Sans gluten",
            DietTag::SansLactose => "Sans lactose",
        }
    }
}

/// Tag spellings (normalized) that map to each cook mode.
const MODE_TAGS: &[(CookMode, &[&str])] = &[
    (CookMode::Four, &["four", "gratin"]),
    (CookMode::Wok, &["wok"]),
    (CookMode::Poele, &["poele", "saute"]),
    (CookMode::Cru, &["cru"]),
    (CookMode::Mixeur, &["mixeur"]),
];

/// Tag spellings (normalized) that map to each diet marker.
const DIET_TAGS: &[(DietTag, &[&str])] = &[
    (
        DietTag::Vegetarien,
        &["vegetarien", "vege", "veggie", "veg"],
    ),
    (DietTag::Vegan, &["vegan", "vegetalien"]),
    (
        DietTag::SansGluten,
        &["sans gluten", "gluten free", "sg"],
    ),
    (
        DietTag::SansLactose,
        &["sans lactose", "lactose free", "sl"],
    ),
];

/// Known tag spellings and their canonical form, for the audit tooling.
const CANONICAL_TAGS: &[(&str, &str)] = &[
    ("wok", "Wok"),
    ("mixeur", "Mixeur"),
    ("poele", "Poêle"),
    ("four", "Four"),
    ("cru", "Cru"),
    ("gratin", "Gratin"),
    ("saute", "Sauté"),
    ("vegetarien", "Végétarien"),
    ("vege", "Végétarien"),
    ("vegan", "Vegan"),
    ("vegetalien", "Vegan"),
    ("sans gluten", "Sans gluten"),
    ("sansgluten", "Sans gluten"),
    ("sg", "Sans gluten"),
    ("sans lactose", "Sans lactose"),
    ("sl", "Sans lactose"),
    ("healthy", "Healthy"),
    ("eco", "eco"),
    ("normal", "normal"),
    ("plus", "plus"),
];

/// Tags (normalized) that disqualify a recipe when a vegetarian meal is
/// requested. The catalog tags the main protein, so tag equality is enough.
const MEAT_FISH_TAGS: &[&str] = &["viande", "poulet", "boeuf", "poisson"];

/// Tags (normalized) that disqualify a recipe when dairy-free is requested.
const DAIRY_TAGS: &[&str] = &["lait", "lactose", "fromage", "beurre", "creme"];

/// Whether any tag names a meat or fish.
///
/// A recipe tagged both "Végétarien" and a meat tag still counts as meat
/// here; the meat tag alone decides.
pub fn has_meat_or_fish_tag(tags: &[String]) -> bool {
    tags.iter()
        .any(|t| MEAT_FISH_TAGS.contains(&normalize(t).as_str()))
}

/// Whether any tag names a dairy product.
pub fn has_dairy_tag(tags: &[String]) -> bool {
    tags.iter()
        .any(|t| DAIRY_TAGS.contains(&normalize(t).as_str()))
}

/// Whether the recipe carries an explicit gluten-free tag.
pub fn has_gluten_free_tag(tags: &[String]) -> bool {
    diets_from_tags(tags).contains(&DietTag::SansGluten)
}

/// Cook modes a recipe supports, derived from its tags.
pub fn modes_from_tags(tags: &[String]) -> HashSet<CookMode> {
    let normalized: HashSet<String> = tags.iter().map(|t| normalize(t)).collect();
    let mut out = HashSet::new();
    for (mode, spellings) in MODE_TAGS {
        if spellings.iter().any(|s| normalized.contains(*s)) {
            out.insert(*mode);
        }
    }
    out
}

/// Diet markers a recipe carries, derived from its tags.
pub fn diets_from_tags(tags: &[String]) -> HashSet<DietTag> {
    let normalized: HashSet<String> = tags.iter().map(|t| normalize(t)).collect();
    let mut out = HashSet::new();
    for (diet, spellings) in DIET_TAGS {
        if spellings.iter().any(|s| normalized.contains(*s)) {
            out.insert(*diet);
        }
    }
    out
}

/// Canonical spelling for a known tag, or `None` for unrecognized tags.
pub fn canonical_tag(tag: &str) -> Option<&'static str> {
    let key = normalize(tag);
    CANONICAL_TAGS
        .iter()
        .find(|(spelling, _)| *spelling == key)
        .map(|(_, canon)| *canon)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_modes_from_tags() {
        let modes = modes_from_tags(&tags(&["Wok", "Gratin"]));
        assert!(modes.contains(&CookMode::Wok));
        assert!(modes.contains(&CookMode::Four));
        assert!(!modes.contains(&CookMode::Cru));
    }

    #[test]
    fn test_modes_accent_insensitive() {
        let modes = modes_from_tags(&tags(&["Poêle"]));
        assert!(modes.contains(&CookMode::Poele));
    }

    #[test]
    fn test_diets_from_tags() {
        let diets = diets_from_tags(&tags(&["Végétarien", "Sans gluten"]));
        assert!(diets.contains(&DietTag::Vegetarien));
        assert!(diets.contains(&DietTag::SansGluten));
        assert!(!diets.contains(&DietTag::Vegan));
    }

    #[test]
    fn test_meat_and_dairy_tags() {
        assert!(has_meat_or_fish_tag(&tags(&["Poulet", "Wok"])));
        assert!(has_meat_or_fish_tag(&tags(&["Végétarien", "Viande"])));
        assert!(!has_meat_or_fish_tag(&tags(&["Végétarien"])));
        assert!(has_dairy_tag(&tags(&["Fromage"])));
        assert!(has_dairy_tag(&tags(&["Crème"])));
        assert!(!has_dairy_tag(&tags(&["Sans lactose"])));
    }

    #[test]
    fn test_gluten_free_tag() {
        assert!(has_gluten_free_tag(&tags(&["Sans gluten"])));
        assert!(has_gluten_free_tag(&tags(&["SG"])));
        assert!(!has_gluten_free_tag(&tags(&["Healthy"])));
    }

    #[test]
    fn test_canonical_tag() {
        assert_eq!(canonical_tag("poêle"), Some("Poêle"));
        assert_eq!(canonical_tag("POELE"), Some("Poêle"));
        assert_eq!(canonical_tag("sg"), Some("Sans gluten"));
        assert_eq!(canonical_tag("licorne"), None);
    }
}
