mod render;

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use mealprep_core::{
    add_item, add_recipe, audit_catalog, clear_checked, favorite_recipes, get_daily, load_catalog,
    load_list, match_recipes, parse_entry, parse_query, remove_at, reroll, save_list,
    should_activate, suggest, text, toggle, toggle_favorite, FileStore, IngredientLexicon, Recipe,
    SuggestOptions, DEFAULT_LIMIT,
};

#[derive(Parser)]
#[command(name = "mealprep")]
#[command(about = "Recipe search, daily pick and shopping list", long_about = None)]
struct Cli {
    /// Path to the catalog JSON file
    #[arg(long, default_value = "recipes.json", global = true)]
    catalog: PathBuf,

    /// Path to the persistence file (favorites, list, daily pick)
    #[arg(long, default_value = ".mealprep_store.json", global = true)]
    store: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search recipes from a free-text query
    Query {
        /// Free-text query, e.g. "wok rapide avec poulet sans oignon"
        text: String,
        /// Maximum number of results
        #[arg(long, default_value_t = DEFAULT_LIMIT)]
        limit: usize,
    },
    /// Suggest recipes from the ingredients you have
    Suggest {
        /// Pantry ingredients
        #[arg(required = true)]
        items: Vec<String>,
        /// Minimum fraction of a recipe's ingredients covered
        #[arg(long, default_value_t = 0.3)]
        min_score: f64,
        #[arg(long, default_value_t = 9)]
        limit: usize,
        /// Only recipes at most this many minutes
        #[arg(long)]
        max_time: Option<u32>,
        /// Only recipes carrying this tag
        #[arg(long)]
        tag: Option<String>,
    },
    /// Show today's pick
    Daily {
        /// Draw a different pick for today
        #[arg(long)]
        reroll: bool,
    },
    /// Print the share text of a recipe
    Share {
        slug: String,
    },
    /// Toggle a favorite, or list favorites when no slug is given
    Fav {
        slug: Option<String>,
    },
    /// Shopping list operations
    #[command(subcommand)]
    List(ListCommand),
    /// Audit the catalog for integrity issues
    Audit {
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
enum ListCommand {
    /// Print the list
    Show,
    /// Add an entry, e.g. "200 g de farine" or "2 tomates"
    Add { entry: String },
    /// Add every ingredient of a recipe
    AddRecipe {
        slug: String,
        /// Serving count to scale quantities to
        #[arg(long, default_value_t = 2)]
        servings: u32,
    },
    /// Check or uncheck the entry at an index
    Toggle { index: usize },
    /// Remove the entry at an index
    Remove { index: usize },
    /// Drop every checked entry
    ClearChecked,
}

fn find_recipe<'a>(catalog: &'a [Recipe], slug: &str) -> Result<&'a Recipe> {
    catalog
        .iter()
        .find(|r| r.slug == slug)
        .with_context(|| format!("no recipe with slug '{slug}'"))
}

fn print_results(results: &[&Recipe]) {
    if results.is_empty() {
        println!("Aucune idée trouvée.");
        return;
    }
    for recipe in results {
        println!("{}", render::result_line(recipe));
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let catalog = load_catalog(&cli.catalog)
        .with_context(|| format!("failed to load catalog {}", cli.catalog.display()))?;
    let store = FileStore::new(&cli.store);

    match cli.command {
        Commands::Query { text: query, limit } => {
            let results: Vec<&Recipe> = if should_activate(&query, &catalog) {
                let lexicon = IngredientLexicon::build(&catalog);
                let intent = parse_query(&query, &lexicon);
                tracing::debug!(?intent, "parsed free-text query");
                match_recipes(&catalog, &intent, limit)
            } else {
                // Short non-query input: plain title lookup.
                let needle = text::normalize(&query);
                catalog
                    .iter()
                    .filter(|r| text::normalize(&r.name).contains(&needle))
                    .take(limit)
                    .collect()
            };
            print_results(&results);
        }
        Commands::Suggest {
            items,
            min_score,
            limit,
            max_time,
            tag,
        } => {
            let options = SuggestOptions {
                min_score,
                limit,
                max_time,
                tags: tag.into_iter().collect(),
            };
            print_results(&suggest(&catalog, &items, &options));
        }
        Commands::Daily { reroll: redraw } => {
            let pick = if redraw {
                reroll(&catalog, &store)
            } else {
                get_daily(&catalog, &store)
            };
            match pick {
                Some(recipe) => println!("{}", render::recipe_text(recipe)),
                None => println!("Catalogue vide."),
            }
        }
        Commands::Share { slug } => {
            let recipe = find_recipe(&catalog, &slug)?;
            println!("{}", render::recipe_text(recipe));
        }
        Commands::Fav { slug } => match slug {
            Some(slug) => {
                find_recipe(&catalog, &slug)?;
                if toggle_favorite(&store, &slug) {
                    println!("Ajouté aux favoris: {slug}");
                } else {
                    println!("Retiré des favoris: {slug}");
                }
            }
            None => {
                let favorites = favorite_recipes(&catalog, &store);
                if favorites.is_empty() {
                    println!("Aucun favori.");
                } else {
                    print_results(&favorites);
                }
            }
        },
        Commands::List(command) => {
            let mut list = load_list(&store);
            match command {
                ListCommand::Show => {
                    print!("{}", render::list_text(&list));
                    return Ok(());
                }
                ListCommand::Add { entry } => {
                    let Some(item) = parse_entry(&entry) else {
                        bail!("empty list entry");
                    };
                    add_item(&mut list, item);
                }
                ListCommand::AddRecipe { slug, servings } => {
                    let recipe = find_recipe(&catalog, &slug)?;
                    add_recipe(&mut list, recipe, servings);
                }
                ListCommand::Toggle { index } => toggle(&mut list, index),
                ListCommand::Remove { index } => {
                    if remove_at(&mut list, index).is_none() {
                        bail!("no list entry at index {index}");
                    }
                }
                ListCommand::ClearChecked => clear_checked(&mut list),
            }
            save_list(&store, &list);
            print!("{}", render::list_text(&list));
        }
        Commands::Audit { json } => {
            let report = audit_catalog(&catalog);
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("Recettes: {}", report.recipes);
                if report.is_clean() {
                    println!("Aucun problème détecté.");
                } else {
                    for finding in &report.findings {
                        println!("- {finding:?}");
                    }
                }
            }
        }
    }

    Ok(())
}
