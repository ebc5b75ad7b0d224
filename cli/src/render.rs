//! Plain-text rendering for terminal output and share text.

use mealprep_core::{ListItem, Recipe};

/// One result line: name, time, budget, tags.
pub fn result_line(recipe: &Recipe) -> String {
    let mut line = format!("{} — {} min • {}", recipe.name, recipe.time, recipe.budget);
    if !recipe.tags.is_empty() {
        line.push_str(&format!(" • {}", recipe.tags.join(", ")));
    }
    line
}

/// Shareable text for a full recipe: header, ingredients, steps.
pub fn recipe_text(recipe: &Recipe) -> String {
    let mut out = format!("{}\n{} min • {}\n", recipe.name, recipe.time, recipe.budget);
    if !recipe.tags.is_empty() {
        out.push_str(&format!("#{}\n", recipe.tags.join(" #")));
    }
    out.push_str("\nIngrédients:\n");
    for ingredient in recipe.quantified_ingredients() {
        match (ingredient.qty, ingredient.unit.as_deref()) {
            (Some(qty), Some(unit)) => {
                out.push_str(&format!("- {} {} {}\n", trim_qty(qty), unit, ingredient.name))
            }
            (Some(qty), None) => out.push_str(&format!("- {} {}\n", trim_qty(qty), ingredient.name)),
            _ => out.push_str(&format!("- {}\n", ingredient.name)),
        }
    }
    if !recipe.steps.is_empty() {
        out.push_str("\nÉtapes:\n");
        for (i, step) in recipe.steps.iter().enumerate() {
            out.push_str(&format!("{}. {}\n", i + 1, step));
        }
    }
    out
}

/// Shareable text for the shopping list. Checked entries are marked off.
pub fn list_text(list: &[ListItem]) -> String {
    let mut out = String::from("Liste de courses:\n");
    for (i, item) in list.iter().enumerate() {
        let mark = if item.checked { "x" } else { " " };
        let mut line = format!("{i:>2}. [{mark}] {}", item.name);
        match (item.qty, item.unit.as_deref()) {
            (Some(qty), Some(unit)) => line.push_str(&format!(" — {} {}", trim_qty(qty), unit)),
            (Some(qty), None) => line.push_str(&format!(" — {}", trim_qty(qty))),
            _ => {}
        }
        if let Some(slug) = &item.recipe {
            line.push_str(&format!(" ({slug})"));
        }
        out.push_str(&line);
        out.push('\n');
    }
    out
}

/// Drop the trailing ".0" of whole quantities.
fn trim_qty(qty: f64) -> String {
    if qty.fract() == 0.0 {
        format!("{}", qty as i64)
    } else {
        format!("{qty}")
    }
}
