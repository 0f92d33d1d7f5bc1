//! # Foundry
//!
//! Command-line entry point for Project Foundry.
//!
//! Loads the configuration and recipe set, then runs one of:
//! - `check`: load everything and report what was found
//! - `datagen`: write the built-in recipes out as JSON files
//! - `crush`: look up the crusher recipe for an item
//! - `filters`: inspect a stored filter list

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use foundry_common::{ItemStack, ResourceLocation};
use foundry_filters::{BaseFilter, Filter, FilterManager};
use foundry_recipes::{providers, Crusher, MachineRecipe, RecipeKind};
use tracing::info;
use tracing_subscriber::{prelude::*, EnvFilter};

use foundry_engine::config::{EngineConfig, CONFIG_FILE};
use foundry_engine::{build_recipes, logging, recipe_loader};

#[derive(Parser, Debug)]
#[command(name = "foundry", version, about = "Machine recipe tooling for Project Foundry")]
struct Cli {
    /// Configuration file
    #[arg(long, default_value = CONFIG_FILE)]
    config: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load the configured recipes and report counts
    Check,
    /// Write the built-in recipes as JSON files
    Datagen {
        /// Output directory
        #[arg(long, default_value = recipe_loader::DEFAULT_RECIPE_PATH)]
        out: PathBuf,
    },
    /// Show the crusher recipe for an item
    Crush {
        /// Item id, e.g. `minecraft:bone`
        item: String,
        /// Stack size
        #[arg(long, default_value_t = 1)]
        count: u32,
    },
    /// Inspect a JSON file holding a stored filter list
    Filters {
        /// File containing the filter tree
        file: PathBuf,
        /// Item id to test against the enabled filters
        #[arg(long)]
        test: Option<String>,
    },
}

/// Main entry point.
fn main() -> Result<()> {
    let cli = Cli::parse();

    let env_filter = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let (subscriber, log_filter) = logging::subscriber(env_filter.as_deref());
    subscriber.init();

    info!("Project Foundry starting...");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let config = EngineConfig::load_from(&cli.config);
    log_filter.apply_config(&config)?;

    match cli.command.unwrap_or(Command::Check) {
        Command::Check => check(&config)?,
        Command::Datagen { out } => {
            let recipes = providers::all()?;
            let written = recipe_loader::write_recipe_files(&out, &recipes)?;
            println!("Wrote {written} recipes to {}", out.display());
        },
        Command::Crush { item, count } => crush(&config, &item, count)?,
        Command::Filters { file, test } => filters(&file, test.as_deref())?,
    }

    Ok(())
}

fn check(config: &EngineConfig) -> Result<()> {
    let (recipes, loader) = build_recipes(config)?;
    let stats = loader.stats();
    info!(
        files = stats.files_loaded,
        loaded = stats.recipes_loaded,
        errors = stats.validation_errors,
        overrides = stats.overrides,
        "Recipe directory processed"
    );

    for kind in RecipeKind::all() {
        println!("{:<24} {}", kind.type_id().to_string(), recipes.count(*kind));
    }
    println!("{:<24} {}", "total", recipes.len());

    if stats.validation_errors > 0 {
        bail!("{} recipe files failed to load", stats.validation_errors);
    }
    Ok(())
}

fn crush(config: &EngineConfig, item: &str, count: u32) -> Result<()> {
    let item: ResourceLocation = item.parse().context("invalid item id")?;
    let (recipes, _) = build_recipes(config)?;
    let mut crusher = Crusher::new(&recipes);
    crusher.input.set(ItemStack::new(item.clone(), count));

    match crusher.current_recipe() {
        Some(recipe) => println!(
            "{item} x{count} -> {} x{} ({})",
            recipe.output().item(),
            recipe.output().count(),
            recipe.id()
        ),
        None => println!("No crusher recipe accepts {item} x{count}"),
    }
    Ok(())
}

fn filters(file: &Path, test: Option<&str>) -> Result<()> {
    let contents = fs::read_to_string(file)
        .with_context(|| format!("failed to read {}", file.display()))?;
    let tree: serde_json::Map<String, serde_json::Value> =
        serde_json::from_str(&contents).context("filter file must hold a JSON object")?;

    let mut manager: FilterManager<BaseFilter> = FilterManager::new(|| {});
    manager.read_from_tree(&tree);

    for (index, filter) in manager.filters().iter().enumerate() {
        let state = if filter.is_enabled() { "on " } else { "off" };
        println!("{index:>3} [{state}] {}", filter.kind());
    }
    println!(
        "{} filters, {} enabled",
        manager.count(),
        manager.enabled_filters().len()
    );

    if let Some(test) = test {
        let item: ResourceLocation = test.parse().context("invalid item id")?;
        let stack = ItemStack::one(item);
        let matched = manager.any_enabled_match(|filter| filter.matches(&stack));
        println!("{test}: {}", if matched { "matched" } else { "not matched" });
    }
    Ok(())
}
