//! # Foundry Engine
//!
//! Runtime wiring for Project Foundry.
//!
//! This crate ties the library crates together:
//! - Configuration loaded from `foundry.toml`
//! - Log filter setup that follows the configuration
//! - Recipe files loaded over the built-in recipe set
//! - Data generation of the built-in recipes as files

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod config;
pub mod logging;
pub mod recipe_loader;

pub use config::EngineConfig;
pub use recipe_loader::{RecipeLoader, RecipeLoaderStats};

use foundry_recipes::{providers, MachineRecipes};
use tracing::info;

/// Builds the recipe set described by `config`.
///
/// Returns the recipes together with the loader that read the directory, so
/// callers can report its statistics.
pub fn build_recipes(
    config: &EngineConfig,
) -> anyhow::Result<(MachineRecipes, RecipeLoader)> {
    let builtins = if config.load_builtin_recipes {
        providers::all()?
    } else {
        Vec::new()
    };
    info!(count = builtins.len(), "Built-in recipes prepared");

    let mut loader = RecipeLoader::new(&config.recipe_path);
    loader.load_all()?;

    let mut recipes = MachineRecipes::new(&config.cache);
    loader.apply(&mut recipes, builtins);
    Ok((recipes, loader))
}

#[cfg(test)]
mod tests {
    use super::*;
    use foundry_recipes::RecipeKind;
    use tempfile::TempDir;

    #[test]
    fn test_build_without_builtins() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let config = EngineConfig {
            recipe_path: temp_dir.path().to_path_buf(),
            load_builtin_recipes: false,
            ..EngineConfig::default()
        };

        let (recipes, loader) = build_recipes(&config).expect("build");
        assert!(recipes.is_empty());
        assert_eq!(loader.stats(), &RecipeLoaderStats::default());
    }

    #[test]
    fn test_build_with_builtins() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let config = EngineConfig {
            recipe_path: temp_dir.path().join("none"),
            ..EngineConfig::default()
        };

        let (recipes, _) = build_recipes(&config).expect("build");
        assert!(recipes.count(RecipeKind::Crushing) > 0);
        assert_eq!(recipes.count(RecipeKind::Washing), 0);
    }
}
