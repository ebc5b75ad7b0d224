//! French shopping-list line parsing.
//!
//! Turns a typed entry like "200 g de farine", "2 c. à soupe d'huile" or
//! "2 tomates" into a quantified [`ListItem`] so manual entries merge the
//! same way recipe-sourced ones do. Best effort: anything unparseable
//! becomes a bare name.

use std::sync::LazyLock;

use crate::types::ListItem;

/// Known unit spellings (accent-stripped, lowercase) and their canonical
/// form. Sorted by word count at runtime, longest spelling first, so
/// "c a soupe" wins over "c".
static UNITS_SORTED: LazyLock<Vec<(&'static str, &'static str)>> = LazyLock::new(|| {
    let mut units = UNIT_TABLE.to_vec();
    units.sort_by(|a, b| {
        let words = |s: &str| s.split(' ').count();
        words(b.0).cmp(&words(a.0)).then(b.0.len().cmp(&a.0.len()))
    });
    units
});

const UNIT_TABLE: &[(&str, &str)] = &[
    ("cuilleres a soupe", "c. à soupe"),
    ("cuillere a soupe", "c. à soupe"),
    ("cuilleres a cafe", "c. à café"),
    ("cuillere a cafe", "c. à café"),
    ("c a soupe", "c. à soupe"),
    ("c a cafe", "c. à café"),
    ("cas", "c. à soupe"),
    ("cac", "c. à café"),
    ("cs", "c. à soupe"),
    ("cc", "c. à café"),
    ("kg", "kg"),
    ("g", "g"),
    ("mg", "mg"),
    ("l", "l"),
    ("cl", "cl"),
    ("ml", "ml"),
    ("pincees", "pincée"),
    ("pincee", "pincée"),
    ("gousses", "gousse"),
    ("gousse", "gousse"),
    ("tranches", "tranche"),
    ("tranche", "tranche"),
    ("sachets", "sachet"),
    ("sachet", "sachet"),
    ("boites", "boîte"),
    ("boite", "boîte"),
    ("bottes", "botte"),
    ("botte", "botte"),
    ("pieces", "pièce"),
    ("piece", "pièce"),
    ("paquets", "paquet"),
    ("paquet", "paquet"),
    ("pots", "pot"),
    ("pot", "pot"),
    ("briques", "brique"),
    ("brique", "brique"),
];

/// Lowercase, strip diacritics and trailing dots, for unit lookup.
fn unit_key(word: &str) -> String {
    crate::text::normalize(word)
}

/// Parse "2", "1,5", "1.5" or "1/2".
fn parse_amount(word: &str) -> Option<f64> {
    let w = word.trim();
    if w.is_empty() {
        return None;
    }
    if let Some((num, den)) = w.split_once('/') {
        let num: f64 = num.parse().ok()?;
        let den: f64 = den.parse().ok()?;
        if den == 0.0 {
            return None;
        }
        return Some(num / den);
    }
    w.replace(',', ".").parse().ok()
}

/// Split a leading numeric prefix off a word, so "200g" reads as "200" "g".
fn split_numeric_prefix(word: &str) -> (Option<f64>, &str) {
    let end = word
        .find(|c: char| !c.is_ascii_digit() && c != ',' && c != '.' && c != '/')
        .unwrap_or(word.len());
    if end == 0 {
        return (None, word);
    }
    match parse_amount(&word[..end]) {
        Some(qty) => (Some(qty), &word[end..]),
        None => (None, word),
    }
}

/// Match the longest known unit spelling at the front of `words`.
/// Returns the canonical unit and how many words it consumed.
fn match_unit(words: &[&str]) -> Option<(&'static str, usize)> {
    for (spelling, canonical) in UNITS_SORTED.iter() {
        let take = spelling.split(' ').count();
        if take > words.len() {
            continue;
        }
        let candidate = words[..take].join(" ");
        if unit_key(&candidate) == *spelling {
            return Some((canonical, take));
        }
    }
    None
}

/// Parse one typed shopping-list line into a [`ListItem`].
///
/// Returns `None` for blank input. The name keeps the user's spelling; only
/// amount and unit are canonicalized.
pub fn parse_entry(raw: &str) -> Option<ListItem> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    let mut words: Vec<&str> = trimmed.split_whitespace().collect();

    // Leading amount, possibly glued to its unit ("200g") or followed by a
    // fraction ("1 1/2").
    let mut qty = None;
    if let Some(&first) = words.first() {
        let (amount, rest) = split_numeric_prefix(first);
        if let Some(amount) = amount {
            qty = Some(amount);
            if rest.is_empty() {
                words.remove(0);
                let fraction = words
                    .first()
                    .filter(|w| w.contains('/'))
                    .and_then(|w| parse_amount(w));
                if let Some(fraction) = fraction {
                    qty = Some(amount + fraction);
                    words.remove(0);
                }
            } else {
                words[0] = rest;
            }
        }
    }

    // A unit only makes sense after an amount.
    let mut unit = None;
    if qty.is_some() {
        if let Some((canonical, consumed)) = match_unit(&words) {
            unit = Some(canonical.to_string());
            words.drain(..consumed);
        }
    }

    // Drop the "de" / "d'" linking a quantity or unit to the name.
    if qty.is_some() {
        if let Some(&first) = words.first() {
            let lowered = first.to_lowercase();
            if lowered == "de" || lowered == "d'" || lowered == "d’" {
                words.remove(0);
            } else if let Some(prefix_len) = ["d'", "d’"]
                .iter()
                .find(|p| lowered.starts_with(**p) && first.len() > p.len())
                .map(|p| p.len())
            {
                words[0] = &first[prefix_len..];
            }
        }
    }

    let name = words.join(" ");
    if name.is_empty() && qty.is_none() {
        return None;
    }

    Some(ListItem {
        name: if name.is_empty() {
            trimmed.to_string()
        } else {
            name
        },
        qty,
        unit,
        recipe: None,
        checked: false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amount_unit_name() {
        let item = parse_entry("200 g de farine").expect("parses");
        assert_eq!(item.name, "farine");
        assert_eq!(item.qty, Some(200.0));
        assert_eq!(item.unit.as_deref(), Some("g"));
    }

    #[test]
    fn test_glued_unit() {
        let item = parse_entry("200g de farine").expect("parses");
        assert_eq!(item.qty, Some(200.0));
        assert_eq!(item.unit.as_deref(), Some("g"));
        assert_eq!(item.name, "farine");
    }

    #[test]
    fn test_spoon_abbreviations() {
        let item = parse_entry("2 c. à soupe d'huile d'olive").expect("parses");
        assert_eq!(item.qty, Some(2.0));
        assert_eq!(item.unit.as_deref(), Some("c. à soupe"));
        assert_eq!(item.name, "huile d'olive");

        let item = parse_entry("1 cas de miel").expect("parses");
        assert_eq!(item.unit.as_deref(), Some("c. à soupe"));
        assert_eq!(item.name, "miel");
    }

    #[test]
    fn test_count_without_unit() {
        let item = parse_entry("2 tomates").expect("parses");
        assert_eq!(item.qty, Some(2.0));
        assert_eq!(item.unit, None);
        assert_eq!(item.name, "tomates");
    }

    #[test]
    fn test_decimal_comma_and_fraction() {
        assert_eq!(parse_entry("1,5 l de lait").expect("parses").qty, Some(1.5));
        assert_eq!(parse_entry("1/2 oignon").expect("parses").qty, Some(0.5));
        let mixed = parse_entry("1 1/2 citron").expect("parses");
        assert_eq!(mixed.qty, Some(1.5));
        assert_eq!(mixed.name, "citron");
    }

    #[test]
    fn test_unit_word_needs_amount() {
        // Without a leading amount, "gousse" is part of the name.
        let item = parse_entry("gousse d'ail").expect("parses");
        assert_eq!(item.qty, None);
        assert_eq!(item.unit, None);
        assert_eq!(item.name, "gousse d'ail");
    }

    #[test]
    fn test_plural_units_canonicalized() {
        let item = parse_entry("2 gousses d'ail").expect("parses");
        assert_eq!(item.unit.as_deref(), Some("gousse"));
        assert_eq!(item.name, "ail");
    }

    #[test]
    fn test_bare_name() {
        let item = parse_entry("sel").expect("parses");
        assert_eq!(item.name, "sel");
        assert_eq!(item.qty, None);
    }

    #[test]
    fn test_blank_input() {
        assert!(parse_entry("").is_none());
        assert!(parse_entry("   ").is_none());
    }

    #[test]
    fn test_unit_not_matched_inside_word() {
        // "grenade" starts with "g" but is a single word, not an amount+unit.
        let item = parse_entry("1 grenade").expect("parses");
        assert_eq!(item.unit, None);
        assert_eq!(item.name, "grenade");
    }
}
