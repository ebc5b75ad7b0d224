//! Shopping-list aggregation with unit-safe quantity merging.
//!
//! Entries merge by normalized name plus unit, and only when both sides
//! carry numeric quantities. Mismatched or missing units never combine
//! arithmetically; the new entry is appended instead. Toggling and removal
//! are positional, since duplicate names with different units must stay
//! independently addressable.

use crate::text::normalize;
use crate::types::{ListItem, Recipe};

fn merge_key(item: &ListItem) -> (String, Option<String>) {
    (
        normalize(&item.name),
        item.unit.as_deref().map(|u| u.trim().to_lowercase()),
    )
}

/// Add one entry, summing quantities into an existing line when the merge
/// key matches and both sides are numeric.
pub fn add_item(list: &mut Vec<ListItem>, new_item: ListItem) {
    if let Some(new_qty) = new_item.qty {
        let key = merge_key(&new_item);
        for existing in list.iter_mut() {
            if merge_key(existing) == key {
                if let Some(qty) = existing.qty {
                    existing.qty = Some(qty + new_qty);
                    return;
                }
            }
        }
    }
    list.push(new_item);
}

/// Add every ingredient of a recipe, scaled from the recipe's reference
/// headcount to the requested serving count, with the slug stamped as
/// provenance.
pub fn add_recipe(list: &mut Vec<ListItem>, recipe: &Recipe, servings: u32) {
    let scale = f64::from(servings) / f64::from(recipe.base_servings().max(1));
    for ingredient in recipe.quantified_ingredients() {
        add_item(
            list,
            ListItem {
                name: ingredient.name,
                qty: ingredient.qty.map(|q| q * scale),
                unit: ingredient.unit,
                recipe: Some(recipe.slug.clone()),
                checked: false,
            },
        );
    }
}

/// Flip the checked flag of the entry at `index`. Out of range is a no-op.
pub fn toggle(list: &mut [ListItem], index: usize) {
    if let Some(item) = list.get_mut(index) {
        item.checked = !item.checked;
    }
}

/// Remove and return the entry at `index`, if any.
pub fn remove_at(list: &mut Vec<ListItem>, index: usize) -> Option<ListItem> {
    if index < list.len() {
        Some(list.remove(index))
    } else {
        None
    }
}

/// Drop every checked entry.
pub fn clear_checked(list: &mut Vec<ListItem>) {
    list.retain(|item| !item.checked);
}
