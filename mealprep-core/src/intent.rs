//! Free-text query interpretation.
//!
//! Turns a raw query like "wok rapide avec poulet, sans gluten" into a
//! structured [`Intent`]: hard constraints (diets, exclusions, time ceiling,
//! cook modes, budget) and soft preferences (positive keywords, recognized
//! ingredients). Parsing is heuristic and total: malformed input degrades to
//! an empty intent, it never fails.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::lexicon::IngredientLexicon;
use crate::text::{normalize, strip_plural_s, tokenize};
use crate::types::{BudgetTier, CookMode, Recipe};

/// Structured interpretation of a free-text query. Ephemeral, recomputed per
/// query, never persisted.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Intent {
    /// An explicit "Sans gluten" tag is required.
    pub gluten_free: bool,
    /// Dairy-tagged recipes are rejected.
    pub dairy_free: bool,
    /// Meat- or fish-tagged recipes are rejected.
    pub vegetarian: bool,
    /// Excluded terms, each present in normalized and singular form.
    pub excluded: Vec<String>,
    /// Preparation-time ceiling in minutes.
    pub max_time: Option<u32>,
    /// Requested cook modes; several may be requested at once.
    pub modes: Vec<CookMode>,
    /// Requested budget tier, at most one.
    pub budget: Option<BudgetTier>,
    /// Positive keyword tokens.
    pub keywords: Vec<String>,
    /// Keywords recognized as ingredient base forms by the lexicon.
    pub wanted_ingredients: Vec<String>,
}

impl Intent {
    /// True when the query produced any constraint or preference at all.
    /// A signal-free intent yields an empty match result, never the whole
    /// catalog.
    pub fn has_signal(&self) -> bool {
        self.gluten_free
            || self.dairy_free
            || self.vegetarian
            || !self.excluded.is_empty()
            || self.max_time.is_some()
            || !self.modes.is_empty()
            || self.budget.is_some()
            || !self.keywords.is_empty()
    }
}

/// Keyword families requesting each cook mode, matched as substrings of the
/// normalized query. Any hit adds the mode.
const MODE_RULES: &[(CookMode, &[&str])] = &[
    (CookMode::Four, &["four", "au four", "gratin"]),
    (CookMode::Wok, &["wok"]),
    (CookMode::Poele, &["poele", "saute", "sauter"]),
    (CookMode::Mixeur, &["mixeur", "mixe", "veloute"]),
    (CookMode::Cru, &["cru", "poke", "tartare", "carpaccio"]),
];

/// Keyword families per budget tier, checked in order; the first family with
/// a hit wins, so "eco" beats "plus" when a query somehow names both.
const BUDGET_RULES: &[(BudgetTier, &[&str])] = &[
    (BudgetTier::Eco, &["eco", "pas cher"]),
    (BudgetTier::Normal, &["normal"]),
    (BudgetTier::Plus, &["plus", "premium"]),
];

/// Generic tokens that carry no matching signal.
const STOPWORDS: &[&str] = &["un", "une", "des", "de", "du", "avec", "pour", "plat"];

/// Negated diet words that become diet flags instead of ingredient
/// exclusions.
const DIET_WORDS: &[&str] = &["gluten", "lactose", "lait"];

/// Time ceiling: "en 20 min", "< 25 minutes", "max 30". Runs on the
/// lowercased raw query so "<" and "≤" survive.
static TIME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:en|≤|<|max)\s*(\d{1,3})\s*(?:min|minutes)?").expect("invalid time regex")
});

/// Negation capture: "sans X", "pas de X", "pas d'X". The captured phrase
/// stops at digits and punctuation by construction of the character class.
static NEGATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:sans\s+|pas\s+de\s+|pas\s+d'\s*)([a-z][a-z'\- ]*)")
        .expect("invalid negation regex")
});

/// Diet negations, handled before exclusion capture.
static SANS_GLUTEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bsans[\s\-]+gluten\b").expect("invalid gluten regex"));
static SANS_LACTOSE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bsans\s+(?:lactose|lait)\b").expect("invalid lactose regex"));
static VEGETARIEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bvegetarien").expect("invalid vegetarien regex"));

/// First conjunction inside a captured negation phrase.
static ET_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\bet\b").expect("invalid et regex"));

/// Verb-like cues suggesting the user typed a request, not a title.
static VERB_CUE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(je|j|veux|voudrais|cherche|trouve|propose|idee|donne|fais|faire|manger|mange)\b")
        .expect("invalid verb cue regex")
});

/// Lowercase and strip diacritics, keeping letters, digits, apostrophes,
/// hyphens and spaces; everything else collapses to a space. Unlike
/// [`normalize`] this keeps apostrophes so "pas d'ail" stays recognizable.
fn scrub(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.nfd() {
        if is_combining_mark(c) {
            continue;
        }
        let c = if c == '’' { '\'' } else { c };
        if c.is_alphanumeric() || c == '\'' || c == '-' {
            out.extend(c.to_lowercase());
        } else if !out.is_empty() && !out.ends_with(' ') {
            out.push(' ');
        }
    }
    while out.ends_with(' ') {
        out.pop();
    }
    out
}

/// Index of the first negation marker in scrubbed text, if any.
fn first_negation(scrubbed: &str) -> Option<usize> {
    static MARKER_RE: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"\b(?:sans|pas de|pas d')\b").expect("invalid marker regex")
    });
    MARKER_RE.find(scrubbed).map(|m| m.start())
}

/// Parse a free-text query into an [`Intent`].
///
/// The lexicon is the one built from the catalog the intent will be matched
/// against; it only influences `wanted_ingredients`.
pub fn parse_query(raw: &str, lexicon: &IngredientLexicon) -> Intent {
    let scrubbed = scrub(raw);
    let nq = normalize(raw);
    let mut intent = Intent::default();

    // Time ceiling, on the raw lowercased text so "<"/"≤" are still there.
    if let Some(caps) = TIME_RE.captures(&raw.to_lowercase()) {
        intent.max_time = caps[1].parse::<u32>().ok();
    }

    // Diet flags. The negated diet spans are removed before exclusion
    // capture so "sans gluten" requests a tag instead of excluding every
    // recipe whose text mentions gluten.
    intent.gluten_free = SANS_GLUTEN_RE.is_match(&scrubbed);
    intent.dairy_free = SANS_LACTOSE_RE.is_match(&scrubbed);
    intent.vegetarian = VEGETARIEN_RE.is_match(&scrubbed);

    let without_diets = SANS_LACTOSE_RE
        .replace_all(&SANS_GLUTEN_RE.replace_all(&scrubbed, " "), " ")
        .into_owned();

    // Ingredient exclusions: "sans X", "pas de X", "pas d'X". The phrase is
    // truncated at the first "et", then split on remaining conjunctions and
    // commas (punctuation is already collapsed by scrubbing).
    let mut excluded: Vec<String> = Vec::new();
    for caps in NEGATION_RE.captures_iter(&without_diets) {
        let mut phrase = caps[1].trim();
        if let Some(m) = ET_RE.find(phrase) {
            phrase = phrase[..m.start()].trim();
        }
        for term in phrase.split(" et ").flat_map(|p| p.split(',')) {
            let base = normalize(term);
            if base.chars().count() < 2 || DIET_WORDS.contains(&base.as_str()) {
                continue;
            }
            let singular = strip_plural_s(&base);
            if !excluded.contains(&base) {
                excluded.push(base.clone());
            }
            if singular != base && !excluded.contains(&singular) {
                excluded.push(singular);
            }
        }
    }

    // Positive keywords: everything before the first negation marker,
    // tokenized, minus stopwords and excluded terms.
    let positive_span = match first_negation(&scrubbed) {
        Some(idx) => &scrubbed[..idx],
        None => scrubbed.as_str(),
    };
    let keywords: Vec<String> = tokenize(positive_span)
        .into_iter()
        .filter(|t| !STOPWORDS.contains(&t.as_str()))
        .filter(|t| {
            let singular = strip_plural_s(t);
            !excluded.contains(t) && !excluded.contains(&singular)
        })
        .collect();

    intent.wanted_ingredients = keywords
        .iter()
        .filter(|t| lexicon.contains(t))
        .cloned()
        .collect();
    intent.keywords = keywords;
    intent.excluded = excluded;

    // Cook modes: any family hit adds the mode.
    for (mode, words) in MODE_RULES {
        if words.iter().any(|w| nq.contains(w)) {
            intent.modes.push(*mode);
        }
    }

    // Budget: first family hit wins.
    for (tier, words) in BUDGET_RULES {
        if words.iter().any(|w| nq.contains(w)) {
            intent.budget = Some(*tier);
            break;
        }
    }

    intent
}

/// Soft-preference vocabularies used by [`should_activate`].
const QUICK_WORDS: &[&str] = &["rapide", "vite", "express", "simple"];
const KID_WORDS: &[&str] = &["enfant", "fils", "fille", "kid", "gamin", "ado"];
const CHEAP_WORDS: &[&str] = &["pas cher", "eco", "economique", "budget"];
const HEALTHY_WORDS: &[&str] = &["healthy", "equilibre", "leger", "light"];
const METHOD_WORDS: &[&str] = &["wok", "poele", "four", "cru", "mixeur"];
const MEAT_WORDS: &[&str] = &[
    "viande", "boeuf", "poulet", "porc", "dinde", "agneau", "lardon", "jambon", "saucisse",
];
const DAIRY_WORDS: &[&str] = &["lait", "creme", "beurre", "fromage", "yaourt"];
const GLUTEN_VOCAB: &[&str] = &["gluten", "ble", "farine"];

fn contains_any(text: &str, words: &[&str]) -> bool {
    words.iter().any(|w| text.contains(w))
}

/// Whether the token stream negates a word from the vocabulary: "sans X",
/// "pas de X", or "pas X" (the elided "d'" is dropped by tokenization).
fn has_negation_for(tokens: &[String], vocab: &[&str]) -> bool {
    for (i, token) in tokens.iter().enumerate() {
        let next = tokens.get(i + 1).map(String::as_str);
        let after = tokens.get(i + 2).map(String::as_str);
        let in_vocab = |t: Option<&str>| t.is_some_and(|t| vocab.contains(&t));
        if token == "sans" && in_vocab(next) {
            return true;
        }
        if token == "pas" && (in_vocab(next) || (next == Some("de") && in_vocab(after))) {
            return true;
        }
    }
    false
}

/// Whether free-text interpretation should override plain faceted filtering.
///
/// True on a verb-like cue, soft-preference vocabulary, a negation over
/// meat/dairy/gluten words, or any multi-token query that is not an exact
/// title. Pure and deterministic.
pub fn should_activate(raw: &str, catalog: &[Recipe]) -> bool {
    let nq = normalize(raw);
    let tokens = tokenize(raw);

    let looks_like_exact_title = !catalog.is_empty()
        && nq.chars().count() >= 4
        && catalog.iter().any(|r| normalize(&r.name) == nq);

    let has_foodish = contains_any(&nq, QUICK_WORDS)
        || contains_any(&nq, KID_WORDS)
        || contains_any(&nq, CHEAP_WORDS)
        || contains_any(&nq, HEALTHY_WORDS)
        || contains_any(&nq, METHOD_WORDS)
        || has_negation_for(&tokens, MEAT_WORDS)
        || has_negation_for(&tokens, DAIRY_WORDS)
        || has_negation_for(&tokens, GLUTEN_VOCAB);

    let has_verbish = VERB_CUE_RE.is_match(&nq);

    has_verbish || has_foodish || (!looks_like_exact_title && tokens.len() >= 2)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Vec<Recipe> {
        serde_json::from_str(
            r#"[
                {"slug": "a", "name": "Wok de poulet", "time": 15, "budget": "normal",
                 "tags": ["Wok"], "ingredients": ["poulet", "poivron"], "steps": []},
                {"slug": "b", "name": "Tarte vegan", "time": 40, "budget": "eco",
                 "tags": ["Végétarien", "Sans gluten"],
                 "ingredients": ["farine de riz", "legumes"], "steps": []}
            ]"#,
        )
        .unwrap()
    }

    fn lexicon() -> IngredientLexicon {
        IngredientLexicon::build(&catalog())
    }

    #[test]
    fn test_parse_modes_and_keywords() {
        let intent = parse_query("wok rapide avec poulet", &lexicon());
        assert_eq!(intent.modes, vec![CookMode::Wok]);
        assert_eq!(intent.keywords, vec!["wok", "rapide", "poulet"]);
        assert_eq!(intent.wanted_ingredients, vec!["poulet"]);
        assert!(intent.excluded.is_empty());
    }

    #[test]
    fn test_parse_diet_flags_and_time() {
        let intent = parse_query("sans gluten en 20 min", &lexicon());
        assert!(intent.gluten_free);
        assert!(!intent.dairy_free);
        assert_eq!(intent.max_time, Some(20));
        // "gluten" is a diet flag, not an ingredient exclusion.
        assert!(intent.excluded.is_empty());
        assert!(intent.keywords.is_empty());
        assert!(intent.has_signal());
    }

    #[test]
    fn test_parse_dairy_variants() {
        assert!(parse_query("sans lactose", &lexicon()).dairy_free);
        assert!(parse_query("sans lait", &lexicon()).dairy_free);
        assert!(parse_query("végétarien", &lexicon()).vegetarian);
        assert!(parse_query("vegetarien", &lexicon()).vegetarian);
    }

    #[test]
    fn test_parse_exclusions() {
        let intent = parse_query("un plat sans oignons", &lexicon());
        assert!(intent.excluded.contains(&"oignons".to_string()));
        assert!(intent.excluded.contains(&"oignon".to_string()));
    }

    #[test]
    fn test_parse_exclusion_pas_d_apostrophe() {
        let intent = parse_query("ce soir pas d'ail", &lexicon());
        assert!(intent.excluded.contains(&"ail".to_string()));
    }

    #[test]
    fn test_parse_exclusion_truncated_at_conjunction() {
        let intent = parse_query("sans lardons et tranquille", &lexicon());
        assert!(intent.excluded.contains(&"lardons".to_string()));
        assert!(intent.excluded.contains(&"lardon".to_string()));
        assert!(!intent.excluded.iter().any(|t| t.contains("tranquille")));
    }

    #[test]
    fn test_keywords_stop_at_negation() {
        let intent = parse_query("poulet croustillant sans friture", &lexicon());
        assert_eq!(intent.keywords, vec!["poulet", "croustillant"]);
        assert!(intent.excluded.contains(&"friture".to_string()));
    }

    #[test]
    fn test_stopwords_dropped() {
        let intent = parse_query("des pates pour un plat du soir", &lexicon());
        assert_eq!(intent.keywords, vec!["pates", "soir"]);
    }

    #[test]
    fn test_budget_precedence_eco_first() {
        let intent = parse_query("normal ou eco", &lexicon());
        assert_eq!(intent.budget, Some(BudgetTier::Eco));
        let intent = parse_query("version premium", &lexicon());
        assert_eq!(intent.budget, Some(BudgetTier::Plus));
    }

    #[test]
    fn test_multiple_modes() {
        let intent = parse_query("gratin au four ou au wok", &lexicon());
        assert!(intent.modes.contains(&CookMode::Four));
        assert!(intent.modes.contains(&CookMode::Wok));
    }

    #[test]
    fn test_empty_query_has_no_signal() {
        let intent = parse_query("", &lexicon());
        assert_eq!(intent, Intent::default());
        assert!(!intent.has_signal());
    }

    #[test]
    fn test_garbage_query_never_panics() {
        let intent = parse_query("!!! ??? 🍳🍳🍳 ,,,, sans", &lexicon());
        assert!(intent.excluded.is_empty());
    }

    #[test]
    fn test_should_activate_verb_cue() {
        assert!(should_activate("je veux un wok", &catalog()));
        assert!(should_activate("cherche idee repas", &catalog()));
    }

    #[test]
    fn test_should_activate_negation() {
        assert!(should_activate("tarte sans lait", &catalog()));
        assert!(should_activate("tarte pas de viande", &catalog()));
    }

    #[test]
    fn test_should_activate_exact_title_stays_faceted() {
        assert!(!should_activate("Tarte vegan", &catalog()));
    }

    #[test]
    fn test_should_activate_multi_token_non_title() {
        assert!(should_activate("tarte salee", &catalog()));
        assert!(!should_activate("tarte", &catalog()));
    }
}
