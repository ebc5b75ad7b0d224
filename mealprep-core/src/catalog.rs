//! Catalog loading and offline integrity audit.
//!
//! The audit is report-only tooling run by the host, never per query:
//! duplicate slugs, missing required fields, non-canonical tag spellings and
//! gluten-free tagging that disagrees with the ingredient list.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::error::CatalogError;
use crate::tags::{canonical_tag, has_gluten_free_tag};
use crate::text::normalize;
use crate::types::Recipe;

/// Load the catalog from a JSON file. The only fallible load path the
/// engine owns.
pub fn load_catalog(path: &Path) -> Result<Vec<Recipe>, CatalogError> {
    let raw = fs::read_to_string(path)?;
    let catalog: Vec<Recipe> = serde_json::from_str(&raw)?;
    tracing::debug!(recipes = catalog.len(), path = %path.display(), "catalog loaded");
    Ok(catalog)
}

/// Ingredient words that point at gluten.
const GLUTEN_WORDS: &[&str] = &[
    "ble",
    "farine",
    "pain",
    "pate",
    "pates",
    "spaghetti",
    "nouilles de ble",
    "semoule",
    "couscous",
    "chapelure",
    "biscuit",
    "biere",
    "seigle",
    "orge",
];

/// Phrases that look like gluten but are safe alternatives.
const GLUTEN_EXCEPTIONS: &[&str] = &[
    "pate sans gluten",
    "pates sans gluten",
    "nouilles de riz",
    "farine de riz",
    "farine de mais",
    "farine de sarrasin",
    "quinoa",
];

/// Heuristic: no gluten word in the ingredient text, or an explicit safe
/// alternative named.
fn looks_gluten_free(recipe: &Recipe) -> bool {
    let text = normalize(&recipe.ingredient_names().join(" "));
    if GLUTEN_EXCEPTIONS.iter().any(|safe| text.contains(safe)) {
        return true;
    }
    !GLUTEN_WORDS.iter().any(|word| text.contains(word))
}

/// One audit finding, serialized for report output.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AuditFinding {
    DuplicateSlug {
        slug: String,
    },
    MissingField {
        slug: String,
        field: &'static str,
    },
    /// A known tag under a non-canonical spelling, with the fix.
    NonCanonicalTag {
        slug: String,
        tag: String,
        suggestion: String,
    },
    /// Ingredients look gluten-free but the tag is missing.
    LikelyGlutenFree {
        slug: String,
    },
    /// Tagged gluten-free while an ingredient names gluten.
    MistaggedGlutenFree {
        slug: String,
    },
}

#[derive(Debug, Clone, Serialize)]
pub struct AuditReport {
    pub recipes: usize,
    pub findings: Vec<AuditFinding>,
}

impl AuditReport {
    pub fn is_clean(&self) -> bool {
        self.findings.is_empty()
    }
}

/// Audit the catalog for integrity issues. Report-only; fixing the data is
/// the host's concern.
pub fn audit_catalog(catalog: &[Recipe]) -> AuditReport {
    let mut findings = Vec::new();
    let mut seen_slugs = HashSet::new();

    for recipe in catalog {
        let slug = recipe.slug.clone();

        if recipe.slug.is_empty() {
            findings.push(AuditFinding::MissingField {
                slug: recipe.name.clone(),
                field: "slug",
            });
        } else if !seen_slugs.insert(recipe.slug.clone()) {
            findings.push(AuditFinding::DuplicateSlug { slug: slug.clone() });
        }

        if recipe.name.is_empty() {
            findings.push(AuditFinding::MissingField {
                slug: slug.clone(),
                field: "name",
            });
        }
        if recipe.time == 0 {
            findings.push(AuditFinding::MissingField {
                slug: slug.clone(),
                field: "time",
            });
        }
        if recipe.ingredient_names().is_empty() {
            findings.push(AuditFinding::MissingField {
                slug: slug.clone(),
                field: "ingredients",
            });
        }
        if recipe.steps.is_empty() {
            findings.push(AuditFinding::MissingField {
                slug: slug.clone(),
                field: "steps",
            });
        }

        for tag in &recipe.tags {
            if let Some(canonical) = canonical_tag(tag) {
                if tag != canonical {
                    findings.push(AuditFinding::NonCanonicalTag {
                        slug: slug.clone(),
                        tag: tag.clone(),
                        suggestion: canonical.to_string(),
                    });
                }
            }
        }

        let tagged = has_gluten_free_tag(&recipe.tags);
        let looks = looks_gluten_free(recipe);
        if looks && !tagged {
            findings.push(AuditFinding::LikelyGlutenFree { slug: slug.clone() });
        } else if tagged && !looks {
            findings.push(AuditFinding::MistaggedGlutenFree { slug });
        }
    }

    AuditReport {
        recipes: catalog.len(),
        findings,
    }
}
