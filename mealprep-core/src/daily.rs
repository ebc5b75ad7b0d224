//! Deterministic "pick of the day" selection with manual reroll.
//!
//! The seed is the UTC calendar day, so every caller sees the same pick until
//! midnight UTC regardless of local timezone.

use chrono::Utc;
use rand::Rng;

use crate::storage::{read_record, write_record, Store, DAILY_KEY};
use crate::types::{DailyPick, Recipe};

/// How many redraws [`reroll`] attempts before accepting a repeat, so a
/// single-recipe catalog still terminates.
const REROLL_ATTEMPTS: u32 = 10;

fn today() -> String {
    Utc::now().format("%Y-%m-%d").to_string()
}

/// FNV-1a-style 32-bit hash: fixed offset basis, XOR each character,
/// multiply by the FNV prime, take the absolute value of the signed result.
fn seed_hash(seed: &str) -> u32 {
    let mut h: u32 = 2166136261;
    for c in seed.chars() {
        h ^= c as u32;
        h = h.wrapping_mul(16777619);
    }
    (h as i32).unsigned_abs()
}

fn persist_pick(store: &dyn Store, date: &str, slug: &str) {
    write_record(
        store,
        DAILY_KEY,
        &DailyPick {
            date: date.to_string(),
            slug: slug.to_string(),
        },
    );
}

fn get_daily_for<'a>(catalog: &'a [Recipe], store: &dyn Store, date: &str) -> Option<&'a Recipe> {
    if catalog.is_empty() {
        return None;
    }

    if let Some(pick) = read_record::<DailyPick>(store, DAILY_KEY) {
        if pick.date == date {
            if let Some(recipe) = catalog.iter().find(|r| r.slug == pick.slug) {
                return Some(recipe);
            }
            // The stored slug no longer resolves (catalog update); repick.
        }
    }

    let index = seed_hash(date) as usize % catalog.len();
    let picked = &catalog[index];
    persist_pick(store, date, &picked.slug);
    Some(picked)
}

/// Today's pick. The same calendar day always yields the same recipe unless
/// a reroll intervened.
pub fn get_daily<'a>(catalog: &'a [Recipe], store: &dyn Store) -> Option<&'a Recipe> {
    get_daily_for(catalog, store, &today())
}

fn reroll_for<'a, R: Rng + ?Sized>(
    catalog: &'a [Recipe],
    store: &dyn Store,
    rng: &mut R,
    date: &str,
) -> Option<&'a Recipe> {
    if catalog.is_empty() {
        return None;
    }

    let current = get_daily_for(catalog, store, date).map(|r| r.slug.clone());
    let mut index = rng.gen_range(0..catalog.len());
    let mut tries = 0;
    while current.as_deref() == Some(catalog[index].slug.as_str()) && tries < REROLL_ATTEMPTS {
        index = rng.gen_range(0..catalog.len());
        tries += 1;
    }

    let picked = &catalog[index];
    persist_pick(store, date, &picked.slug);
    Some(picked)
}

/// Replace today's pick with a random one, avoiding the current pick within
/// a bounded number of redraws. Only today's record is ever touched.
pub fn reroll<'a>(catalog: &'a [Recipe], store: &dyn Store) -> Option<&'a Recipe> {
    reroll_with(catalog, store, &mut rand::thread_rng())
}

/// [`reroll`] with a caller-supplied source of randomness.
pub fn reroll_with<'a, R: Rng + ?Sized>(
    catalog: &'a [Recipe],
    store: &dyn Store,
    rng: &mut R,
) -> Option<&'a Recipe> {
    reroll_for(catalog, store, rng, &today())
}
