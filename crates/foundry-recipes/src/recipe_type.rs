//! Recipe types and the per-context recipe set.
//!
//! A [`RecipeType`] owns its ordered recipe list and the one cache that
//! answers lookups against it. [`MachineRecipes`] groups every type used by
//! the machines of one context (world, session, test fixture).

use std::hash::Hash;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use foundry_common::{ChemicalStack, FluidStack, ItemStack, RecipeId, ResourceLocation};
use tracing::{debug, info};

use crate::cache::{CacheConfig, CacheStats, DoubleInputRecipeCache, SingleInputRecipeCache};
use crate::recipe::{
    AnyRecipe, CombiningRecipe, CrushingRecipe, DoubleInputRecipe, MachineRecipe,
    NucleosynthesizingRecipe, RecipeKind, SingleInputRecipe, WashingRecipe,
};

/// Global counter for recipe list versions.
///
/// Shared by every list so a cache can never mistake one list's version for
/// another's.
static LIST_VERSION: AtomicU64 = AtomicU64::new(1);

fn next_version() -> u64 {
    LIST_VERSION.fetch_add(1, Ordering::Relaxed)
}

// ============================================================================
// Recipe list
// ============================================================================

/// Ordered, versioned list of recipes.
///
/// Order is load order and decides which recipe wins when several match.
/// Every mutation moves the list to a fresh version.
#[derive(Debug)]
pub struct RecipeList<R> {
    recipes: Vec<Arc<R>>,
    version: u64,
}

impl<R> Default for RecipeList<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> RecipeList<R> {
    /// Creates an empty list.
    #[must_use]
    pub fn new() -> Self {
        Self {
            recipes: Vec::new(),
            version: next_version(),
        }
    }

    /// Current snapshot version.
    #[must_use]
    pub const fn version(&self) -> u64 {
        self.version
    }

    /// Number of recipes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    /// Check if the list is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    /// Recipe at a list position.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Arc<R>> {
        self.recipes.get(index)
    }

    /// Iterate in list order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<R>> {
        self.recipes.iter()
    }

    /// Replaces the whole list.
    pub fn reload(&mut self, recipes: impl IntoIterator<Item = R>) {
        self.recipes = recipes.into_iter().map(Arc::new).collect();
        self.bump();
    }

    /// Appends a recipe at the end of the list.
    pub fn push(&mut self, recipe: R) {
        self.recipes.push(Arc::new(recipe));
        self.bump();
    }

    /// Removes every recipe.
    pub fn clear(&mut self) {
        self.recipes.clear();
        self.bump();
    }

    fn bump(&mut self) {
        self.version = next_version();
    }
}

impl<R: MachineRecipe> RecipeList<R> {
    /// Recipe with the given id.
    #[must_use]
    pub fn by_id(&self, id: &RecipeId) -> Option<&Arc<R>> {
        self.recipes.iter().find(|recipe| recipe.id() == id)
    }

    /// Removes the recipe with the given id, keeping the order of the rest.
    pub fn remove(&mut self, id: &RecipeId) -> bool {
        let before = self.recipes.len();
        self.recipes.retain(|recipe| recipe.id() != id);
        let removed = self.recipes.len() != before;
        if removed {
            self.bump();
        }
        removed
    }
}

// ============================================================================
// Recipe type
// ============================================================================

/// A category of recipe with its list and lookup cache.
#[derive(Debug)]
pub struct RecipeType<R, C> {
    name: ResourceLocation,
    recipes: RecipeList<R>,
    cache: C,
}

/// Recipe type looked up by one input.
pub type SingleRecipeType<I, R> = RecipeType<R, SingleInputRecipeCache<I, R>>;

/// Recipe type looked up by two inputs.
pub type DoubleRecipeType<A, B, R> = RecipeType<R, DoubleInputRecipeCache<A, B, R>>;

impl<R, C> RecipeType<R, C> {
    /// Identifier of this type.
    #[must_use]
    pub fn name(&self) -> &ResourceLocation {
        &self.name
    }

    /// Current recipe list.
    #[must_use]
    pub fn recipes(&self) -> &RecipeList<R> {
        &self.recipes
    }

    /// Lookup cache bound to this type.
    #[must_use]
    pub fn input_cache(&self) -> &C {
        &self.cache
    }

    /// Replaces every recipe of this type.
    pub fn reload(&mut self, recipes: impl IntoIterator<Item = R>) {
        self.recipes.reload(recipes);
        debug!(
            recipe_type = %self.name,
            count = self.recipes.len(),
            "Reloaded recipe type"
        );
    }

    /// Adds a recipe after the existing ones.
    pub fn add(&mut self, recipe: R) {
        self.recipes.push(recipe);
    }

    /// Removes every recipe of this type.
    pub fn clear(&mut self) {
        self.recipes.clear();
    }
}

impl<R: MachineRecipe, C> RecipeType<R, C> {
    /// Removes a recipe by id.
    pub fn remove(&mut self, id: &RecipeId) -> bool {
        self.recipes.remove(id)
    }
}

impl<I, R> SingleRecipeType<I, R>
where
    I: Eq + Hash + Clone,
    R: SingleInputRecipe<I>,
{
    /// Creates an empty single-input type.
    #[must_use]
    pub fn new(name: ResourceLocation, config: &CacheConfig) -> Self {
        Self {
            name,
            recipes: RecipeList::new(),
            cache: SingleInputRecipeCache::new(config),
        }
    }

    /// Cache counters.
    #[must_use]
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }
}

impl<A, B, R> DoubleRecipeType<A, B, R>
where
    A: Eq + Hash + Clone,
    B: Eq + Hash + Clone,
    R: DoubleInputRecipe<A, B>,
{
    /// Creates an empty double-input type.
    #[must_use]
    pub fn new(name: ResourceLocation, config: &CacheConfig) -> Self {
        Self {
            name,
            recipes: RecipeList::new(),
            cache: DoubleInputRecipeCache::new(config),
        }
    }

    /// Cache counters.
    #[must_use]
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }
}

// ============================================================================
// Machine recipes
// ============================================================================

/// Every machine recipe type of one context.
#[derive(Debug)]
pub struct MachineRecipes {
    crushing: SingleRecipeType<ItemStack, CrushingRecipe>,
    combining: DoubleRecipeType<ItemStack, ItemStack, CombiningRecipe>,
    nucleosynthesizing: DoubleRecipeType<ItemStack, ChemicalStack, NucleosynthesizingRecipe>,
    washing: DoubleRecipeType<FluidStack, ChemicalStack, WashingRecipe>,
}

impl Default for MachineRecipes {
    fn default() -> Self {
        Self::new(&CacheConfig::default())
    }
}

impl MachineRecipes {
    /// Creates empty recipe types sharing one cache configuration.
    #[must_use]
    pub fn new(config: &CacheConfig) -> Self {
        Self {
            crushing: SingleRecipeType::new(RecipeKind::Crushing.type_id(), config),
            combining: DoubleRecipeType::new(RecipeKind::Combining.type_id(), config),
            nucleosynthesizing: DoubleRecipeType::new(
                RecipeKind::Nucleosynthesizing.type_id(),
                config,
            ),
            washing: DoubleRecipeType::new(RecipeKind::Washing.type_id(), config),
        }
    }

    /// Crusher recipes.
    #[must_use]
    pub fn crushing(&self) -> &SingleRecipeType<ItemStack, CrushingRecipe> {
        &self.crushing
    }

    /// Combiner recipes.
    #[must_use]
    pub fn combining(&self) -> &DoubleRecipeType<ItemStack, ItemStack, CombiningRecipe> {
        &self.combining
    }

    /// Nucleosynthesizer recipes.
    #[must_use]
    pub fn nucleosynthesizing(
        &self,
    ) -> &DoubleRecipeType<ItemStack, ChemicalStack, NucleosynthesizingRecipe> {
        &self.nucleosynthesizing
    }

    /// Chemical washer recipes.
    #[must_use]
    pub fn washing(&self) -> &DoubleRecipeType<FluidStack, ChemicalStack, WashingRecipe> {
        &self.washing
    }

    /// Replaces every type's list with the given recipes, keeping their order.
    pub fn reload(&mut self, recipes: impl IntoIterator<Item = AnyRecipe>) {
        let mut crushing = Vec::new();
        let mut combining = Vec::new();
        let mut nucleosynthesizing = Vec::new();
        let mut washing = Vec::new();

        for recipe in recipes {
            match recipe {
                AnyRecipe::Crushing(r) => crushing.push(r),
                AnyRecipe::Combining(r) => combining.push(r),
                AnyRecipe::Nucleosynthesizing(r) => nucleosynthesizing.push(r),
                AnyRecipe::Washing(r) => washing.push(r),
            }
        }

        self.crushing.reload(crushing);
        self.combining.reload(combining);
        self.nucleosynthesizing.reload(nucleosynthesizing);
        self.washing.reload(washing);

        info!(
            crushing = self.crushing.recipes().len(),
            combining = self.combining.recipes().len(),
            nucleosynthesizing = self.nucleosynthesizing.recipes().len(),
            washing = self.washing.recipes().len(),
            "Machine recipes reloaded"
        );
    }

    /// Adds one recipe to the end of its type's list.
    pub fn add(&mut self, recipe: AnyRecipe) {
        match recipe {
            AnyRecipe::Crushing(r) => self.crushing.add(r),
            AnyRecipe::Combining(r) => self.combining.add(r),
            AnyRecipe::Nucleosynthesizing(r) => self.nucleosynthesizing.add(r),
            AnyRecipe::Washing(r) => self.washing.add(r),
        }
    }

    /// Removes a recipe of the given kind by id.
    pub fn remove(&mut self, kind: RecipeKind, id: &RecipeId) -> bool {
        match kind {
            RecipeKind::Crushing => self.crushing.remove(id),
            RecipeKind::Combining => self.combining.remove(id),
            RecipeKind::Nucleosynthesizing => self.nucleosynthesizing.remove(id),
            RecipeKind::Washing => self.washing.remove(id),
        }
    }

    /// Number of recipes of a kind.
    #[must_use]
    pub fn count(&self, kind: RecipeKind) -> usize {
        match kind {
            RecipeKind::Crushing => self.crushing.recipes().len(),
            RecipeKind::Combining => self.combining.recipes().len(),
            RecipeKind::Nucleosynthesizing => self.nucleosynthesizing.recipes().len(),
            RecipeKind::Washing => self.washing.recipes().len(),
        }
    }

    /// Total number of recipes.
    #[must_use]
    pub fn len(&self) -> usize {
        RecipeKind::all().iter().map(|kind| self.count(*kind)).sum()
    }

    /// Check if no recipes are loaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Cache counters of a kind.
    #[must_use]
    pub fn cache_stats(&self, kind: RecipeKind) -> CacheStats {
        match kind {
            RecipeKind::Crushing => self.crushing.cache_stats(),
            RecipeKind::Combining => self.combining.cache_stats(),
            RecipeKind::Nucleosynthesizing => self.nucleosynthesizing.cache_stats(),
            RecipeKind::Washing => self.washing.cache_stats(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingredient::ItemIngredient;

    fn item(path: &str, count: u32) -> ItemStack {
        ItemStack::new(ResourceLocation::minecraft(path), count)
    }

    fn crushing(path: &str, input: &str, output: &str) -> CrushingRecipe {
        CrushingRecipe::new(
            ResourceLocation::foundry(path),
            ItemIngredient::of(item(input, 1)),
            item(output, 1),
        )
        .expect("valid")
    }

    #[test]
    fn test_versions_change_on_mutation() {
        let mut list = RecipeList::new();
        let v0 = list.version();

        list.push(crushing("crushing/a", "flint", "gunpowder"));
        let v1 = list.version();
        assert_ne!(v0, v1);

        assert!(!list.remove(&ResourceLocation::foundry("crushing/missing")));
        assert_eq!(list.version(), v1);

        assert!(list.remove(&ResourceLocation::foundry("crushing/a")));
        assert_ne!(list.version(), v1);
    }

    #[test]
    fn test_fresh_lists_have_distinct_versions() {
        let a: RecipeList<CrushingRecipe> = RecipeList::new();
        let b: RecipeList<CrushingRecipe> = RecipeList::new();
        assert_ne!(a.version(), b.version());
    }

    #[test]
    fn test_by_id() {
        let mut list = RecipeList::new();
        list.reload(vec![
            crushing("crushing/a", "flint", "gunpowder"),
            crushing("crushing/b", "gravel", "sand"),
        ]);
        let found = list.by_id(&ResourceLocation::foundry("crushing/b")).expect("found");
        assert_eq!(found.output().item().path(), "sand");
    }

    #[test]
    fn test_machine_recipes_reload_distributes() {
        let mut recipes = MachineRecipes::default();
        recipes.reload(vec![
            crushing("crushing/a", "flint", "gunpowder").into(),
            crushing("crushing/b", "gravel", "sand").into(),
        ]);

        assert_eq!(recipes.count(RecipeKind::Crushing), 2);
        assert_eq!(recipes.count(RecipeKind::Washing), 0);
        assert_eq!(recipes.len(), 2);
        assert_eq!(recipes.crushing().name().to_string(), "foundry:crushing");
    }

    #[test]
    fn test_machine_recipes_add_and_remove() {
        let mut recipes = MachineRecipes::default();
        recipes.add(crushing("crushing/a", "flint", "gunpowder").into());
        assert!(!recipes.is_empty());

        assert!(recipes.remove(RecipeKind::Crushing, &ResourceLocation::foundry("crushing/a")));
        assert!(recipes.is_empty());
    }
}
