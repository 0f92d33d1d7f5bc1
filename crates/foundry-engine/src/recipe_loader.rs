//! Recipe file loading.
//!
//! This module provides:
//! - Loading recipes from `<base>/<namespace>/<path>.json`, one recipe per file
//! - Validation of every file, with bad files logged and counted
//! - Applying loaded recipes (over the built-ins) to a [`MachineRecipes`]
//! - Writing recipes back out as files for data generation
//!
//! Files are read in path order so that recipe priority does not depend on
//! the platform's directory listing order.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Component, Path, PathBuf};

use foundry_common::{RecipeId, ResourceLocation, FOUNDRY_NAMESPACE};
use foundry_recipes::{parse_recipe, recipe_to_json, AnyRecipe, MachineRecipe, MachineRecipes, RecipeError};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Default directory for recipe files.
pub const DEFAULT_RECIPE_PATH: &str = "data/recipes";

/// Extension of recipe files.
const RECIPE_EXTENSION: &str = "json";

/// Reasons a recipe file is rejected.
#[derive(Debug, Error)]
pub enum RecipeLoadError {
    /// Failed to read or write a file.
    #[error("Recipe file I/O failed: {0}")]
    ReadError(#[from] std::io::Error),

    /// File is not valid JSON.
    #[error("Failed to parse recipe file {path}: {source}")]
    ParseError {
        /// Offending file.
        path: PathBuf,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// File path does not map to a recipe id.
    #[error("Recipe file path does not form a valid id: {0}")]
    InvalidPath(PathBuf),

    /// File content is not a valid recipe.
    #[error(transparent)]
    Recipe(#[from] RecipeError),

    /// Two files define the same recipe id.
    #[error("Recipe {0} is defined by more than one file")]
    DuplicateId(RecipeId),
}

/// Result of reading recipe files.
pub type RecipeLoadResult<T> = Result<T, RecipeLoadError>;

/// Counters from the last [`RecipeLoader::load_all`].
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RecipeLoaderStats {
    /// Number of files read.
    pub files_loaded: u32,
    /// Number of recipes accepted.
    pub recipes_loaded: u32,
    /// Number of files rejected.
    pub validation_errors: u32,
    /// Number of built-in recipes replaced by a file with the same id.
    pub overrides: u32,
}

/// Loads recipe files from a directory tree.
#[derive(Debug)]
pub struct RecipeLoader {
    /// Directory holding `<namespace>/<path>.json` files.
    base_path: PathBuf,
    /// Loaded recipes, in file path order.
    recipes: Vec<AnyRecipe>,
    /// Ids of loaded recipes.
    ids: HashSet<RecipeId>,
    /// Statistics.
    stats: RecipeLoaderStats,
}

impl RecipeLoader {
    /// Creates a loader reading from `base_path`.
    #[must_use]
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        let base_path = base_path.into();
        debug!("Initializing recipe loader at: {:?}", base_path);

        Self {
            base_path,
            recipes: Vec::new(),
            ids: HashSet::new(),
            stats: RecipeLoaderStats::default(),
        }
    }

    /// Returns the loaded recipes.
    #[must_use]
    pub fn recipes(&self) -> &[AnyRecipe] {
        &self.recipes
    }

    /// Counters from the last load.
    #[must_use]
    pub fn stats(&self) -> &RecipeLoaderStats {
        &self.stats
    }

    /// Loads every recipe file under the base path, replacing earlier loads.
    ///
    /// A missing directory is not an error; it simply holds no recipes.
    pub fn load_all(&mut self) -> RecipeLoadResult<()> {
        self.recipes.clear();
        self.ids.clear();
        self.stats = RecipeLoaderStats::default();

        if !self.base_path.exists() {
            info!(
                "Recipe directory does not exist, skipping: {:?}",
                self.base_path
            );
            return Ok(());
        }

        let mut files = Vec::new();
        collect_recipe_files(&self.base_path, &mut files)?;
        files.sort();

        for path in files {
            if let Err(e) = self.load_file(&path) {
                warn!(file = %path.display(), error = %e, "Skipping recipe file");
                self.stats.validation_errors += 1;
            }
        }

        info!(
            recipes = self.stats.recipes_loaded,
            files = self.stats.files_loaded,
            rejected = self.stats.validation_errors,
            "Recipe directory loaded"
        );

        Ok(())
    }

    /// Loads the recipe in a single file under the base path.
    pub fn load_file(&mut self, path: &Path) -> RecipeLoadResult<()> {
        debug!(file = %path.display(), "Reading recipe");

        let id = recipe_id_for(&self.base_path, path)?;
        let content = fs::read_to_string(path)?;
        self.stats.files_loaded += 1;

        let json: serde_json::Value =
            serde_json::from_str(&content).map_err(|source| RecipeLoadError::ParseError {
                path: path.to_path_buf(),
                source,
            })?;
        let recipe = parse_recipe(id, &json)?;

        if !self.ids.insert(recipe.id().clone()) {
            return Err(RecipeLoadError::DuplicateId(recipe.id().clone()));
        }
        self.recipes.push(recipe);
        self.stats.recipes_loaded += 1;

        Ok(())
    }

    /// Reloads `target` with `builtins` followed by the loaded recipes.
    ///
    /// A loaded recipe with a built-in's id takes that built-in's place in
    /// the list, so lookup priority is unchanged by overriding.
    pub fn apply(
        &mut self,
        target: &mut MachineRecipes,
        builtins: impl IntoIterator<Item = AnyRecipe>,
    ) {
        let files: HashMap<&RecipeId, &AnyRecipe> =
            self.recipes.iter().map(|recipe| (recipe.id(), recipe)).collect();
        let mut overridden = HashSet::new();

        let mut merged: Vec<AnyRecipe> = builtins
            .into_iter()
            .map(|builtin| match files.get(builtin.id()) {
                Some(file) => {
                    debug!(id = %builtin.id(), "Built-in recipe overridden by file");
                    overridden.insert(builtin.id().clone());
                    (*file).clone()
                }
                None => builtin,
            })
            .collect();
        merged.extend(
            self.recipes
                .iter()
                .filter(|recipe| !overridden.contains(recipe.id()))
                .cloned(),
        );

        self.stats.overrides = overridden.len() as u32;
        target.reload(merged);
    }
}

/// Maps a recipe file to its id.
///
/// `<base>/<namespace>/<path>.json` becomes `namespace:path`; files directly
/// under the base use the Foundry namespace.
pub fn recipe_id_for(base: &Path, file: &Path) -> RecipeLoadResult<RecipeId> {
    let invalid = || RecipeLoadError::InvalidPath(file.to_path_buf());

    let relative = file.strip_prefix(base).map_err(|_| invalid())?;
    let relative = relative.with_extension("");

    let mut parts = Vec::new();
    for component in relative.components() {
        match component {
            Component::Normal(part) => parts.push(part.to_str().ok_or_else(invalid)?),
            _ => return Err(invalid()),
        }
    }

    let id = match parts.as_slice() {
        [] => return Err(invalid()),
        [path] => ResourceLocation::new(FOUNDRY_NAMESPACE, path),
        [namespace, rest @ ..] => ResourceLocation::new(namespace, &rest.join("/")),
    };
    id.map_err(|_| invalid())
}

/// Writes each recipe to `<dir>/<namespace>/<path>.json`.
///
/// Returns the number of files written.
pub fn write_recipe_files(dir: &Path, recipes: &[AnyRecipe]) -> RecipeLoadResult<usize> {
    for recipe in recipes {
        let id = recipe.id();
        let path = dir
            .join(id.namespace())
            .join(format!("{}.{RECIPE_EXTENSION}", id.path()));
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let json = recipe_to_json(recipe)?;
        let contents = serde_json::to_string_pretty(&json)
            .map_err(|source| RecipeError::JsonWrite {
                id: id.clone(),
                source,
            })?;
        fs::write(&path, contents)?;
        debug!("Wrote recipe {} to {:?}", id, path);
    }

    info!("Wrote {} recipe files to {:?}", recipes.len(), dir);
    Ok(recipes.len())
}

fn collect_recipe_files(dir: &Path, files: &mut Vec<PathBuf>) -> RecipeLoadResult<()> {
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            collect_recipe_files(&path, files)?;
        } else if path.extension().is_some_and(|ext| ext == RECIPE_EXTENSION) {
            files.push(path);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use foundry_common::ItemStack;
    use foundry_recipes::{providers, Crusher, RecipeKind, SingleRecipeLookupHandler};
    use tempfile::TempDir;

    const BONE_TO_DUST: &str = r#"{
        "type": "foundry:crushing",
        "input": { "item": "minecraft:bone" },
        "output": { "item": "foundry:bone_dust", "count": 2 }
    }"#;

    const GRAVEL_TO_SAND: &str = r#"{
        "type": "foundry:crushing",
        "input": { "item": "minecraft:gravel" },
        "output": { "item": "minecraft:sand" }
    }"#;

    fn write(base: &Path, relative: &str, contents: &str) {
        let path = base.join(relative);
        fs::create_dir_all(path.parent().expect("has parent")).expect("mkdir");
        fs::write(path, contents).expect("write");
    }

    #[test]
    fn test_recipe_id_for() {
        let base = Path::new("/data/recipes");
        let id = recipe_id_for(base, &base.join("foundry/crushing/bone.json")).expect("valid");
        assert_eq!(id.to_string(), "foundry:crushing/bone");

        let id = recipe_id_for(base, &base.join("extra.json")).expect("valid");
        assert_eq!(id.to_string(), "foundry:extra");

        assert!(recipe_id_for(base, Path::new("/elsewhere/a.json")).is_err());
        assert!(recipe_id_for(base, &base.join("Bad Name/a.json")).is_err());
    }

    #[test]
    fn test_load_missing_directory() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let mut loader = RecipeLoader::new(temp_dir.path().join("missing"));
        loader.load_all().expect("load");
        assert!(loader.recipes().is_empty());
    }

    #[test]
    fn test_load_tolerates_bad_files() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let base = temp_dir.path();
        write(base, "custom/crushing/gravel.json", GRAVEL_TO_SAND);
        write(base, "custom/crushing/broken.json", "{ not json");
        write(base, "custom/crushing/empty_output.json", r#"{
            "type": "foundry:crushing",
            "input": { "item": "minecraft:bone" },
            "output": { "item": "minecraft:air" }
        }"#);
        write(base, "custom/readme.txt", "ignored");

        let mut loader = RecipeLoader::new(base);
        loader.load_all().expect("load");

        assert_eq!(loader.recipes().len(), 1);
        assert_eq!(loader.recipes()[0].id().to_string(), "custom:crushing/gravel");
        assert_eq!(loader.stats().validation_errors, 2);
        assert_eq!(loader.stats().files_loaded, 3);
    }

    #[test]
    fn test_load_order_is_path_order() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let base = temp_dir.path();
        write(base, "b/crushing/bone.json", BONE_TO_DUST);
        write(base, "a/crushing/bone.json", BONE_TO_DUST);

        let mut loader = RecipeLoader::new(base);
        loader.load_all().expect("load");

        let ids: Vec<String> = loader.recipes().iter().map(|r| r.id().to_string()).collect();
        assert_eq!(ids, vec!["a:crushing/bone", "b:crushing/bone"]);
    }

    #[test]
    fn test_file_overrides_builtin() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let base = temp_dir.path();
        write(base, "foundry/crushing/bone.json", BONE_TO_DUST);

        let mut loader = RecipeLoader::new(base);
        loader.load_all().expect("load");

        let builtins = providers::all().expect("valid");
        let builtin_count = builtins.len();
        let mut recipes = MachineRecipes::default();
        loader.apply(&mut recipes, builtins);

        assert_eq!(loader.stats().overrides, 1);
        assert_eq!(recipes.len(), builtin_count);

        let crusher = Crusher::new(&recipes);
        let recipe = crusher
            .find_first_recipe(&ItemStack::one(ResourceLocation::minecraft("bone")))
            .expect("bone crushes");
        assert_eq!(recipe.output().item().to_string(), "foundry:bone_dust");
    }

    #[test]
    fn test_override_keeps_builtin_position() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let base = temp_dir.path();
        let builtins = providers::crushing().expect("valid");
        let first = builtins[0].id().clone();

        write(
            base,
            &format!("{}/{}.json", first.namespace(), first.path()),
            BONE_TO_DUST,
        );
        write(base, "custom/crushing/gravel.json", GRAVEL_TO_SAND);

        let mut loader = RecipeLoader::new(base);
        loader.load_all().expect("load");
        let mut recipes = MachineRecipes::default();
        loader.apply(&mut recipes, builtins.clone());

        let list = recipes.crushing().recipes();
        assert_eq!(list.len(), builtins.len() + 1);

        let head = list.get(0).expect("first recipe");
        assert_eq!(head.id(), &first);
        assert_eq!(head.output().item().to_string(), "foundry:bone_dust");
        assert_eq!(list.get(1).map(|r| r.id()), Some(builtins[1].id()));

        let tail = list.get(builtins.len()).expect("last recipe");
        assert_eq!(tail.id().to_string(), "custom:crushing/gravel");
        assert_eq!(loader.stats().overrides, 1);
    }

    #[test]
    fn test_datagen_then_load() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let builtins = providers::all().expect("valid");

        let written = write_recipe_files(temp_dir.path(), &builtins).expect("write");
        assert_eq!(written, builtins.len());
        assert!(temp_dir
            .path()
            .join("foundry/nucleosynthesizing/diamond.json")
            .exists());

        let mut loader = RecipeLoader::new(temp_dir.path());
        loader.load_all().expect("load");
        assert_eq!(loader.stats().validation_errors, 0);
        assert_eq!(loader.recipes().len(), builtins.len());

        let mut recipes = MachineRecipes::default();
        loader.apply(&mut recipes, Vec::new());
        assert_eq!(
            recipes.count(RecipeKind::Nucleosynthesizing),
            providers::nucleosynthesizing().expect("valid").len()
        );
    }
}
