//! Machines bound to recipe types.
//!
//! Each machine holds its input slots and the recipe set of its context, and
//! answers "what would I craft right now" and "may this go in that slot"
//! through the lookup handler traits.

use std::sync::Arc;

use foundry_common::{ChemicalId, ChemicalStack, FluidStack, ItemStack, ResourceLocation};

use crate::lookup::{
    ChemicalRecipeLookupHandler, DoubleRecipeLookupHandler, InputHandler,
    SingleRecipeLookupHandler,
};
use crate::recipe::{CombiningRecipe, CrushingRecipe, NucleosynthesizingRecipe, WashingRecipe};
use crate::recipe_type::{DoubleRecipeType, MachineRecipes, SingleRecipeType};

/// A machine slot or tank holding one input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputSlot<T> {
    contents: T,
}

impl<T> InputSlot<T> {
    /// Creates a slot with the given contents.
    #[must_use]
    pub fn new(contents: T) -> Self {
        Self { contents }
    }

    /// Current contents.
    #[must_use]
    pub fn contents(&self) -> &T {
        &self.contents
    }

    /// Replaces the contents.
    pub fn set(&mut self, contents: T) {
        self.contents = contents;
    }
}

impl<T: Clone> InputHandler<T> for InputSlot<T> {
    fn input(&self) -> T {
        self.contents.clone()
    }
}

// ============================================================================
// Crusher
// ============================================================================

/// Single-slot crusher.
#[derive(Debug)]
pub struct Crusher<'a> {
    recipes: &'a MachineRecipes,
    /// Item being crushed.
    pub input: InputSlot<ItemStack>,
}

impl<'a> Crusher<'a> {
    /// Creates an empty crusher.
    #[must_use]
    pub fn new(recipes: &'a MachineRecipes) -> Self {
        Self {
            recipes,
            input: InputSlot::default(),
        }
    }

    /// Recipe the current input would run.
    #[must_use]
    pub fn current_recipe(&self) -> Option<Arc<CrushingRecipe>> {
        self.find_first_recipe_from(&self.input)
    }

    /// Check if a stack may be inserted.
    #[must_use]
    pub fn is_valid_input(&self, stack: &ItemStack) -> bool {
        self.contains_recipe(stack)
    }
}

impl SingleRecipeLookupHandler<ItemStack, CrushingRecipe> for Crusher<'_> {
    fn recipe_type(&self) -> &SingleRecipeType<ItemStack, CrushingRecipe> {
        self.recipes.crushing()
    }
}

// ============================================================================
// Combiner
// ============================================================================

/// Combiner with a main slot and an extra slot.
#[derive(Debug)]
pub struct Combiner<'a> {
    recipes: &'a MachineRecipes,
    /// Main input.
    pub main: InputSlot<ItemStack>,
    /// Extra input.
    pub extra: InputSlot<ItemStack>,
}

impl<'a> Combiner<'a> {
    /// Creates an empty combiner.
    #[must_use]
    pub fn new(recipes: &'a MachineRecipes) -> Self {
        Self {
            recipes,
            main: InputSlot::default(),
            extra: InputSlot::default(),
        }
    }

    /// Recipe the current inputs would run.
    #[must_use]
    pub fn current_recipe(&self) -> Option<Arc<CombiningRecipe>> {
        self.find_first_recipe_from(&self.main, &self.extra)
    }

    /// Check if a stack may go in the main slot given the extra slot.
    #[must_use]
    pub fn is_valid_main(&self, stack: &ItemStack) -> bool {
        let extra = self.extra.contents();
        if extra.is_empty() {
            return self.contains_recipe_a(stack);
        }
        self.contains_recipe_ab(stack, extra)
    }

    /// Check if a stack may go in the extra slot given the main slot.
    #[must_use]
    pub fn is_valid_extra(&self, stack: &ItemStack) -> bool {
        let main = self.main.contents();
        if main.is_empty() {
            return self.contains_recipe_b(stack);
        }
        self.contains_recipe_ba(stack, main)
    }
}

impl DoubleRecipeLookupHandler<ItemStack, ItemStack, CombiningRecipe> for Combiner<'_> {
    fn recipe_type(&self) -> &DoubleRecipeType<ItemStack, ItemStack, CombiningRecipe> {
        self.recipes.combining()
    }
}

// ============================================================================
// Nucleosynthesizer
// ============================================================================

/// Antiprotonic nucleosynthesizer with an item slot and a chemical tank.
#[derive(Debug)]
pub struct Nucleosynthesizer<'a> {
    recipes: &'a MachineRecipes,
    /// Item input.
    pub item: InputSlot<ItemStack>,
    /// Chemical tank.
    pub chemical: InputSlot<ChemicalStack>,
}

impl<'a> Nucleosynthesizer<'a> {
    /// Creates an empty nucleosynthesizer.
    #[must_use]
    pub fn new(recipes: &'a MachineRecipes) -> Self {
        Self {
            recipes,
            item: InputSlot::default(),
            chemical: InputSlot::new(ChemicalStack::new(ResourceLocation::foundry("empty"), 0)),
        }
    }

    /// Recipe the current inputs would run.
    #[must_use]
    pub fn current_recipe(&self) -> Option<Arc<NucleosynthesizingRecipe>> {
        self.find_first_recipe_from(&self.item, &self.chemical)
    }

    /// Check if an item may be inserted.
    #[must_use]
    pub fn is_valid_item(&self, stack: &ItemStack) -> bool {
        self.contains_recipe_a(stack)
    }

    /// Check if a chemical type may be piped in given the current item.
    #[must_use]
    pub fn is_valid_chemical(&self, chemical: &ChemicalId) -> bool {
        let item = self.item.contents();
        if item.is_empty() {
            return self.contains_recipe_b_chemical(chemical);
        }
        self.contains_recipe_ba_chemical(chemical, item)
    }
}

impl DoubleRecipeLookupHandler<ItemStack, ChemicalStack, NucleosynthesizingRecipe>
    for Nucleosynthesizer<'_>
{
    fn recipe_type(&self) -> &DoubleRecipeType<ItemStack, ChemicalStack, NucleosynthesizingRecipe> {
        self.recipes.nucleosynthesizing()
    }
}

// ============================================================================
// Chemical washer
// ============================================================================

/// Chemical washer with a fluid tank and a slurry tank.
#[derive(Debug)]
pub struct ChemicalWasher<'a> {
    recipes: &'a MachineRecipes,
    /// Washing fluid.
    pub fluid: InputSlot<FluidStack>,
    /// Dirty slurry.
    pub slurry: InputSlot<ChemicalStack>,
}

impl<'a> ChemicalWasher<'a> {
    /// Creates a washer with the given tanks.
    #[must_use]
    pub fn new(recipes: &'a MachineRecipes, fluid: FluidStack, slurry: ChemicalStack) -> Self {
        Self {
            recipes,
            fluid: InputSlot::new(fluid),
            slurry: InputSlot::new(slurry),
        }
    }

    /// Recipe the current tanks would run.
    #[must_use]
    pub fn current_recipe(&self) -> Option<Arc<WashingRecipe>> {
        self.find_first_recipe_from(&self.fluid, &self.slurry)
    }

    /// Check if a fluid may be piped in.
    #[must_use]
    pub fn is_valid_fluid(&self, fluid: &FluidStack) -> bool {
        self.contains_recipe_a(fluid)
    }

    /// Check if a slurry type may be piped in given the current fluid.
    #[must_use]
    pub fn is_valid_slurry(&self, slurry: &ChemicalId) -> bool {
        let fluid = self.fluid.contents();
        if fluid.is_empty() {
            return self.contains_recipe_b_chemical(slurry);
        }
        self.contains_recipe_ba_chemical(slurry, fluid)
    }
}

impl DoubleRecipeLookupHandler<FluidStack, ChemicalStack, WashingRecipe> for ChemicalWasher<'_> {
    fn recipe_type(&self) -> &DoubleRecipeType<FluidStack, ChemicalStack, WashingRecipe> {
        self.recipes.washing()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingredient::{ChemicalIngredient, FluidIngredient, ItemIngredient};
    use crate::recipe::MachineRecipe;

    fn item(path: &str, count: u32) -> ItemStack {
        ItemStack::new(ResourceLocation::minecraft(path), count)
    }

    fn antimatter(amount: u64) -> ChemicalStack {
        ChemicalStack::new(ResourceLocation::foundry("antimatter"), amount)
    }

    fn recipes() -> MachineRecipes {
        let mut recipes = MachineRecipes::default();
        recipes.reload(vec![
            CrushingRecipe::new(
                ResourceLocation::foundry("crushing/bone"),
                ItemIngredient::of(item("bone", 1)),
                item("bone_meal", 6),
            )
            .expect("valid")
            .into(),
            CombiningRecipe::new(
                ResourceLocation::foundry("combining/iron_ore"),
                ItemIngredient::of(item("raw_iron", 8)),
                ItemIngredient::of(item("cobblestone", 1)),
                item("iron_ore", 1),
            )
            .expect("valid")
            .into(),
            NucleosynthesizingRecipe::new(
                ResourceLocation::foundry("nucleosynthesizing/diamond"),
                ItemIngredient::of(item("coal", 1)),
                ChemicalIngredient::of(antimatter(4)),
                item("diamond", 1),
                1_000,
                false,
            )
            .expect("valid")
            .into(),
            WashingRecipe::new(
                ResourceLocation::foundry("washing/clean_iron"),
                FluidIngredient::of(FluidStack::new(ResourceLocation::minecraft("water"), 5)),
                ChemicalIngredient::of(ChemicalStack::new(
                    ResourceLocation::foundry("dirty_iron"),
                    1,
                )),
                ChemicalStack::new(ResourceLocation::foundry("clean_iron"), 1),
            )
            .expect("valid")
            .into(),
        ]);
        recipes
    }

    #[test]
    fn test_crusher() {
        let recipes = recipes();
        let mut crusher = Crusher::new(&recipes);
        assert!(crusher.current_recipe().is_none());

        crusher.input.set(item("bone", 3));
        let recipe = crusher.current_recipe().expect("recipe");
        assert_eq!(recipe.id().path(), "crushing/bone");
        assert!(!crusher.is_valid_input(&item("dirt", 1)));
    }

    #[test]
    fn test_combiner_slots_are_ordered() {
        let recipes = recipes();
        let mut combiner = Combiner::new(&recipes);

        assert!(combiner.is_valid_main(&item("raw_iron", 1)));
        assert!(!combiner.is_valid_main(&item("cobblestone", 1)));

        combiner.main.set(item("raw_iron", 8));
        assert!(combiner.is_valid_extra(&item("cobblestone", 1)));
        assert!(!combiner.is_valid_extra(&item("raw_iron", 8)));

        combiner.extra.set(item("cobblestone", 1));
        assert!(combiner.current_recipe().is_some());
    }

    #[test]
    fn test_combiner_takes_partial_main_stack() {
        let recipes = recipes();
        let mut combiner = Combiner::new(&recipes);
        combiner.extra.set(item("cobblestone", 1));

        assert!(combiner.is_valid_main(&item("raw_iron", 1)));
        assert!(!combiner.is_valid_main(&item("cobblestone", 1)));
        assert!(combiner.current_recipe().is_none());
    }

    #[test]
    fn test_combiner_ba_takes_extra_first() {
        let recipes = recipes();
        let combiner = Combiner::new(&recipes);
        let main = item("raw_iron", 1);
        let extra = item("cobblestone", 1);

        assert!(combiner.contains_recipe_ab(&main, &extra));
        assert!(combiner.contains_recipe_ba(&extra, &main));
        assert!(!combiner.contains_recipe_ba(&main, &extra));
    }

    #[test]
    fn test_nucleosynthesizer() {
        let recipes = recipes();
        let mut machine = Nucleosynthesizer::new(&recipes);
        let antimatter_id = ResourceLocation::foundry("antimatter");

        assert!(machine.is_valid_chemical(&antimatter_id));
        assert!(!machine.is_valid_chemical(&ResourceLocation::foundry("hydrogen")));

        machine.item.set(item("coal", 1));
        assert!(machine.is_valid_item(&item("coal", 1)));
        assert!(machine.current_recipe().is_none());

        // A loaded item slot still lets a matching chemical in, one unit at a time
        assert!(machine.is_valid_chemical(&antimatter_id));
        assert!(!machine.is_valid_chemical(&ResourceLocation::foundry("hydrogen")));

        machine.chemical.set(antimatter(10));
        let recipe = machine.current_recipe().expect("recipe");
        assert_eq!(recipe.output().item().path(), "diamond");
    }

    #[test]
    fn test_washer() {
        let recipes = recipes();
        let washer = ChemicalWasher::new(
            &recipes,
            FluidStack::new(ResourceLocation::minecraft("water"), 1000),
            ChemicalStack::new(ResourceLocation::foundry("dirty_iron"), 100),
        );

        assert!(washer.current_recipe().is_some());
        assert!(washer.is_valid_fluid(&FluidStack::new(ResourceLocation::minecraft("water"), 1)));
        assert!(!washer.is_valid_fluid(&FluidStack::new(ResourceLocation::minecraft("lava"), 1)));
        assert!(!washer.is_valid_slurry(&ResourceLocation::foundry("clean_iron")));
        assert!(washer.is_valid_slurry(&ResourceLocation::foundry("dirty_iron")));
    }
}
