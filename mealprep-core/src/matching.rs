//! Hard-filter / soft-score ranking of catalog recipes.
//!
//! Two entry points share the same structure: [`match_recipes`] ranks against
//! a parsed [`Intent`], [`suggest`] ranks against a plain pantry list. Hard
//! constraints drop candidates outright; soft scores only order survivors.

use std::cmp::Ordering;

use crate::intent::Intent;
use crate::tags::{has_dairy_tag, has_gluten_free_tag, has_meat_or_fish_tag, modes_from_tags};
use crate::text::{normalize, singularize, strip_plural_s};
use crate::types::Recipe;

/// Result-set size used when the caller has no opinion.
pub const DEFAULT_LIMIT: usize = 12;

/// Whether `haystack` contains the term in its inflected or plural-stripped
/// form.
fn contains_term(haystack: &str, term: &str) -> bool {
    if haystack.contains(term) {
        return true;
    }
    let stripped = strip_plural_s(term);
    stripped != term && haystack.contains(&stripped)
}

/// The recipe's aggregated searchable text: name, tags and ingredient names,
/// normalized.
fn searchable_text(recipe: &Recipe) -> String {
    let mut parts = vec![normalize(&recipe.name), normalize(&recipe.tags.join(" "))];
    parts.push(normalize(&recipe.ingredient_names().join(" ")));
    parts.join(" ")
}

fn passes_hard_filter(recipe: &Recipe, intent: &Intent) -> bool {
    // A recipe tagged both "Végétarien" and a meat tag is still rejected
    // here; the filter goes by the meat tag alone.
    if intent.vegetarian && has_meat_or_fish_tag(&recipe.tags) {
        return false;
    }
    if intent.gluten_free && !has_gluten_free_tag(&recipe.tags) {
        return false;
    }
    if intent.dairy_free && has_dairy_tag(&recipe.tags) {
        return false;
    }
    if let Some(max) = intent.max_time {
        if recipe.time > max {
            return false;
        }
    }
    if let Some(budget) = intent.budget {
        if recipe.budget != budget {
            return false;
        }
    }
    if !intent.excluded.is_empty() {
        let text = searchable_text(recipe);
        if intent.excluded.iter().any(|term| contains_term(&text, term)) {
            return false;
        }
    }
    true
}

/// Score a surviving recipe and count how many keywords matched anywhere.
/// Title hits weigh more than tag hits, which weigh more than ingredient
/// hits.
fn soft_score(recipe: &Recipe, intent: &Intent) -> (i32, usize) {
    let name = normalize(&recipe.name);
    let tags = normalize(&recipe.tags.join(" "));
    let ingredients = normalize(&recipe.ingredient_names().join(" "));

    let mut score = 0;
    let mut hits = 0;
    for keyword in &intent.keywords {
        let mut hit = false;
        if contains_term(&name, keyword) {
            score += 3;
            hit = true;
        }
        if contains_term(&tags, keyword) {
            score += 2;
            hit = true;
        }
        if contains_term(&ingredients, keyword) {
            score += 1;
            hit = true;
        }
        if hit {
            hits += 1;
        }
    }

    if !intent.modes.is_empty() {
        let recipe_modes = modes_from_tags(&recipe.tags);
        let confirmed = intent
            .modes
            .iter()
            .filter(|m| recipe_modes.contains(m))
            .count();
        score += 2 * confirmed as i32;
    }

    // Survivors are already within the ceiling when one was requested.
    if intent.max_time.is_some() {
        score += 1;
    }

    (score, hits)
}

/// Acceptance threshold scaling with keyword count: partial matches are
/// tolerated rather than demanding every token.
fn accepts(hits: usize, need: usize) -> bool {
    match need {
        0 => true,
        1 | 2 => hits >= 1,
        // ceil(0.6 * need)
        n => hits >= (3 * n + 4) / 5,
    }
}

/// Rank catalog recipes against a parsed intent.
///
/// Hard constraints combine with logical AND; survivors are ordered by score
/// descending, then preparation time ascending, then catalog order. An intent
/// with no usable signal returns an empty set, never the whole catalog.
pub fn match_recipes<'a>(catalog: &'a [Recipe], intent: &Intent, limit: usize) -> Vec<&'a Recipe> {
    if !intent.has_signal() {
        return Vec::new();
    }

    let mut scored: Vec<(i32, u32, usize, &Recipe)> = Vec::new();
    for (position, recipe) in catalog.iter().enumerate() {
        if !passes_hard_filter(recipe, intent) {
            continue;
        }
        let (score, hits) = soft_score(recipe, intent);
        if !accepts(hits, intent.keywords.len()) {
            continue;
        }
        scored.push((score, recipe.time, position, recipe));
    }

    scored.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)).then(a.2.cmp(&b.2)));
    scored.into_iter().take(limit).map(|s| s.3).collect()
}

/// Options for [`suggest`].
#[derive(Debug, Clone)]
pub struct SuggestOptions {
    /// Minimum fraction of a recipe's ingredients found in the pantry.
    pub min_score: f64,
    pub limit: usize,
    pub max_time: Option<u32>,
    /// When non-empty, the recipe must carry at least one of these tags.
    pub tags: Vec<String>,
}

impl Default for SuggestOptions {
    fn default() -> Self {
        SuggestOptions {
            min_score: 0.3,
            limit: 9,
            max_time: None,
            tags: Vec::new(),
        }
    }
}

/// Whether two base forms refer to the same ingredient: exact equality,
/// substring containment when the shorter form is long enough to be
/// distinctive, or a single edit of slack for typos.
fn fuzzy_match(a: &str, b: &str) -> bool {
    if a == b {
        return true;
    }
    let (short, long) = if a.chars().count() <= b.chars().count() {
        (a, b)
    } else {
        (b, a)
    };
    if short.chars().count() > 3 && long.contains(short) {
        return true;
    }
    strsim::levenshtein(a, b) <= 1
}

/// Rank recipes by how much of each one the pantry already covers.
///
/// The score is the fraction of the recipe's ingredients found among the
/// pantry items. An empty pantry yields an empty result.
pub fn suggest<'a>(
    catalog: &'a [Recipe],
    pantry: &[String],
    options: &SuggestOptions,
) -> Vec<&'a Recipe> {
    let bag: Vec<String> = pantry
        .iter()
        .map(|item| normalize(&singularize(item)))
        .filter(|base| !base.is_empty())
        .collect();
    if bag.is_empty() {
        return Vec::new();
    }

    let wanted_tags: Vec<String> = options.tags.iter().map(|t| normalize(t)).collect();

    let mut scored: Vec<(f64, u32, usize, &Recipe)> = Vec::new();
    for (position, recipe) in catalog.iter().enumerate() {
        if let Some(max) = options.max_time {
            if recipe.time > max {
                continue;
            }
        }
        if !wanted_tags.is_empty() {
            let recipe_tags: Vec<String> = recipe.tags.iter().map(|t| normalize(t)).collect();
            if !wanted_tags.iter().any(|w| recipe_tags.contains(w)) {
                continue;
            }
        }

        let names = recipe.ingredient_names();
        if names.is_empty() {
            continue;
        }
        let found = names
            .iter()
            .filter(|name| {
                let base = normalize(&singularize(name));
                bag.iter().any(|have| fuzzy_match(have, &base))
            })
            .count();
        if found == 0 {
            continue;
        }
        let score = found as f64 / names.len() as f64;
        if score < options.min_score {
            continue;
        }
        scored.push((score, recipe.time, position, recipe));
    }

    scored.sort_by(|a, b| {
        b.0.partial_cmp(&a.0)
            .unwrap_or(Ordering::Equal)
            .then(a.1.cmp(&b.1))
            .then(a.2.cmp(&b.2))
    });
    scored.into_iter().take(options.limit).map(|s| s.3).collect()
}
