//! Recipe recommendation core: query understanding, hard-filter/soft-score
//! matching, deterministic daily pick and shopping-list aggregation.
//!
//! The catalog is immutable input loaded once; the [`lexicon::IngredientLexicon`]
//! is built once per catalog load and shared across queries. Persistence goes
//! through the injected [`storage::Store`] capability, and every failure at
//! that boundary degrades to a default instead of propagating.

pub mod catalog;
pub mod daily;
pub mod error;
pub mod intent;
pub mod lexicon;
pub mod matching;
pub mod quantity;
pub mod shopping_list;
pub mod storage;
pub mod tags;
pub mod text;
pub mod types;

pub use catalog::{audit_catalog, load_catalog, AuditFinding, AuditReport};
pub use daily::{get_daily, reroll, reroll_with};
pub use error::{CatalogError, StoreError};
pub use intent::{parse_query, should_activate, Intent};
pub use lexicon::IngredientLexicon;
pub use matching::{match_recipes, suggest, SuggestOptions, DEFAULT_LIMIT};
pub use quantity::parse_entry;
pub use shopping_list::{add_item, add_recipe, clear_checked, remove_at, toggle};
pub use storage::{
    favorite_recipes, is_favorite, load_favorites, load_list, save_list, toggle_favorite,
    FileStore, MemoryStore, Store,
};
pub use types::{
    BudgetTier, CookMode, DailyPick, IngredientEntry, IngredientQty, ListItem, Nutrition, Recipe,
};
