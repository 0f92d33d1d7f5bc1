//! Machine recipe definitions.
//!
//! This module provides:
//! - The matching contracts the lookup caches consume
//! - Concrete recipes for each machine
//! - A closed enum over every recipe kind for loading and syncing

use foundry_common::{ChemicalStack, FluidStack, ItemStack, RecipeId, ResourceLocation};
use serde::{Deserialize, Serialize};

use crate::error::{RecipeError, RecipeResult};
use crate::ingredient::{ChemicalIngredient, FluidIngredient, ItemIngredient};

// ============================================================================
// Matching contracts
// ============================================================================

/// Common surface of every machine recipe.
pub trait MachineRecipe {
    /// Unique recipe identifier.
    fn id(&self) -> &RecipeId;
}

/// A recipe consuming a single input.
///
/// `matches` must be a pure function of its argument: caches assume equal
/// inputs give equal answers for as long as the recipe list is unchanged.
pub trait SingleInputRecipe<I>: MachineRecipe {
    /// Check if the input satisfies this recipe.
    fn matches(&self, input: &I) -> bool;
}

/// A recipe consuming two inputs, A and B.
///
/// `matches` must be a pure function of its arguments. It is free to be
/// asymmetric; callers pick the argument order explicitly.
pub trait DoubleInputRecipe<A, B>: MachineRecipe {
    /// Check if both inputs satisfy this recipe.
    fn matches(&self, input_a: &A, input_b: &B) -> bool;

    /// Check if the input's type is usable in slot A, ignoring amount.
    fn accepts_a(&self, input_a: &A) -> bool;

    /// Check if the input's type is usable in slot B, ignoring amount.
    fn accepts_b(&self, input_b: &B) -> bool;

    /// Check if both input types fit this recipe, ignoring amounts.
    ///
    /// Slot validity checks use this so a partial stack can still be inserted
    /// and topped up later.
    fn accepts(&self, input_a: &A, input_b: &B) -> bool {
        self.accepts_a(input_a) && self.accepts_b(input_b)
    }
}

// ============================================================================
// Recipe types
// ============================================================================

/// Path of the crushing recipe type.
pub const CRUSHING: &str = "crushing";
/// Path of the combining recipe type.
pub const COMBINING: &str = "combining";
/// Path of the nucleosynthesizing recipe type.
pub const NUCLEOSYNTHESIZING: &str = "nucleosynthesizing";
/// Path of the washing recipe type.
pub const WASHING: &str = "washing";

/// Kinds of machine recipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecipeKind {
    /// Item to item.
    Crushing,
    /// Item plus item to item.
    Combining,
    /// Item plus chemical to item.
    Nucleosynthesizing,
    /// Fluid plus chemical to chemical.
    Washing,
}

impl RecipeKind {
    /// Identifier of the recipe type.
    #[must_use]
    pub fn type_id(self) -> ResourceLocation {
        ResourceLocation::foundry(self.path())
    }

    /// Path of the recipe type within the Foundry namespace.
    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Self::Crushing => CRUSHING,
            Self::Combining => COMBINING,
            Self::Nucleosynthesizing => NUCLEOSYNTHESIZING,
            Self::Washing => WASHING,
        }
    }

    /// Get all kinds.
    #[must_use]
    pub fn all() -> &'static [RecipeKind] {
        &[
            Self::Crushing,
            Self::Combining,
            Self::Nucleosynthesizing,
            Self::Washing,
        ]
    }
}

// ============================================================================
// Crushing
// ============================================================================

/// Crusher recipe: one item stack into another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrushingRecipe {
    id: RecipeId,
    input: ItemIngredient,
    output: ItemStack,
}

impl CrushingRecipe {
    /// Creates and validates a crushing recipe.
    pub fn new(id: RecipeId, input: ItemIngredient, output: ItemStack) -> RecipeResult<Self> {
        input.validate(&id, "input")?;
        ensure_output(&id, output.is_empty())?;
        Ok(Self { id, input, output })
    }

    /// Input ingredient.
    #[must_use]
    pub fn input(&self) -> &ItemIngredient {
        &self.input
    }

    /// Produced stack.
    #[must_use]
    pub fn output(&self) -> &ItemStack {
        &self.output
    }
}

impl MachineRecipe for CrushingRecipe {
    fn id(&self) -> &RecipeId {
        &self.id
    }
}

impl SingleInputRecipe<ItemStack> for CrushingRecipe {
    fn matches(&self, input: &ItemStack) -> bool {
        self.input.test(input)
    }
}

// ============================================================================
// Combining
// ============================================================================

/// Combiner recipe: a main item merged with an extra item.
///
/// The two slots are not interchangeable; swapping the inputs generally
/// stops the recipe from matching.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombiningRecipe {
    id: RecipeId,
    main_input: ItemIngredient,
    extra_input: ItemIngredient,
    output: ItemStack,
}

impl CombiningRecipe {
    /// Creates and validates a combining recipe.
    pub fn new(
        id: RecipeId,
        main_input: ItemIngredient,
        extra_input: ItemIngredient,
        output: ItemStack,
    ) -> RecipeResult<Self> {
        main_input.validate(&id, "main_input")?;
        extra_input.validate(&id, "extra_input")?;
        ensure_output(&id, output.is_empty())?;
        Ok(Self {
            id,
            main_input,
            extra_input,
            output,
        })
    }

    /// Main input ingredient.
    #[must_use]
    pub fn main_input(&self) -> &ItemIngredient {
        &self.main_input
    }

    /// Extra input ingredient.
    #[must_use]
    pub fn extra_input(&self) -> &ItemIngredient {
        &self.extra_input
    }

    /// Produced stack.
    #[must_use]
    pub fn output(&self) -> &ItemStack {
        &self.output
    }
}

impl MachineRecipe for CombiningRecipe {
    fn id(&self) -> &RecipeId {
        &self.id
    }
}

impl DoubleInputRecipe<ItemStack, ItemStack> for CombiningRecipe {
    fn matches(&self, main: &ItemStack, extra: &ItemStack) -> bool {
        self.main_input.test(main) && self.extra_input.test(extra)
    }

    fn accepts_a(&self, main: &ItemStack) -> bool {
        self.main_input.test_type(main)
    }

    fn accepts_b(&self, extra: &ItemStack) -> bool {
        self.extra_input.test_type(extra)
    }
}

// ============================================================================
// Nucleosynthesizing
// ============================================================================

/// Antiprotonic nucleosynthesizer recipe: item plus chemical into an item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NucleosynthesizingRecipe {
    id: RecipeId,
    item_input: ItemIngredient,
    chemical_input: ChemicalIngredient,
    output: ItemStack,
    duration: u32,
    per_tick_usage: bool,
}

impl NucleosynthesizingRecipe {
    /// Creates and validates a nucleosynthesizing recipe.
    pub fn new(
        id: RecipeId,
        item_input: ItemIngredient,
        chemical_input: ChemicalIngredient,
        output: ItemStack,
        duration: u32,
        per_tick_usage: bool,
    ) -> RecipeResult<Self> {
        item_input.validate(&id, "item_input")?;
        chemical_input.validate(&id, "chemical_input")?;
        ensure_output(&id, output.is_empty())?;
        if duration == 0 {
            return Err(RecipeError::invalid(&id, "duration must be positive"));
        }
        Ok(Self {
            id,
            item_input,
            chemical_input,
            output,
            duration,
            per_tick_usage,
        })
    }

    /// Item ingredient.
    #[must_use]
    pub fn item_input(&self) -> &ItemIngredient {
        &self.item_input
    }

    /// Chemical ingredient.
    #[must_use]
    pub fn chemical_input(&self) -> &ChemicalIngredient {
        &self.chemical_input
    }

    /// Produced stack.
    #[must_use]
    pub fn output(&self) -> &ItemStack {
        &self.output
    }

    /// Processing time in ticks.
    #[must_use]
    pub const fn duration(&self) -> u32 {
        self.duration
    }

    /// Whether the chemical amount is drained every tick rather than once.
    #[must_use]
    pub const fn per_tick_usage(&self) -> bool {
        self.per_tick_usage
    }
}

impl MachineRecipe for NucleosynthesizingRecipe {
    fn id(&self) -> &RecipeId {
        &self.id
    }
}

impl DoubleInputRecipe<ItemStack, ChemicalStack> for NucleosynthesizingRecipe {
    fn matches(&self, item: &ItemStack, chemical: &ChemicalStack) -> bool {
        self.item_input.test(item) && self.chemical_input.test(chemical)
    }

    fn accepts_a(&self, item: &ItemStack) -> bool {
        self.item_input.test_type(item)
    }

    fn accepts_b(&self, chemical: &ChemicalStack) -> bool {
        self.chemical_input.test_type(chemical)
    }
}

// ============================================================================
// Washing
// ============================================================================

/// Chemical washer recipe: fluid plus slurry into a clean slurry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WashingRecipe {
    id: RecipeId,
    fluid_input: FluidIngredient,
    chemical_input: ChemicalIngredient,
    output: ChemicalStack,
}

impl WashingRecipe {
    /// Creates and validates a washing recipe.
    pub fn new(
        id: RecipeId,
        fluid_input: FluidIngredient,
        chemical_input: ChemicalIngredient,
        output: ChemicalStack,
    ) -> RecipeResult<Self> {
        fluid_input.validate(&id, "fluid_input")?;
        chemical_input.validate(&id, "chemical_input")?;
        ensure_output(&id, output.is_empty())?;
        Ok(Self {
            id,
            fluid_input,
            chemical_input,
            output,
        })
    }

    /// Fluid ingredient.
    #[must_use]
    pub fn fluid_input(&self) -> &FluidIngredient {
        &self.fluid_input
    }

    /// Chemical ingredient.
    #[must_use]
    pub fn chemical_input(&self) -> &ChemicalIngredient {
        &self.chemical_input
    }

    /// Produced chemical.
    #[must_use]
    pub fn output(&self) -> &ChemicalStack {
        &self.output
    }
}

impl MachineRecipe for WashingRecipe {
    fn id(&self) -> &RecipeId {
        &self.id
    }
}

impl DoubleInputRecipe<FluidStack, ChemicalStack> for WashingRecipe {
    fn matches(&self, fluid: &FluidStack, chemical: &ChemicalStack) -> bool {
        self.fluid_input.test(fluid) && self.chemical_input.test(chemical)
    }

    fn accepts_a(&self, fluid: &FluidStack) -> bool {
        self.fluid_input.test_type(fluid)
    }

    fn accepts_b(&self, chemical: &ChemicalStack) -> bool {
        self.chemical_input.test_type(chemical)
    }
}

fn ensure_output(id: &RecipeId, empty: bool) -> RecipeResult<()> {
    if empty {
        return Err(RecipeError::invalid(id, "Recipe output must not be empty."));
    }
    Ok(())
}

// ============================================================================
// Any recipe
// ============================================================================

/// Every recipe kind in one closed enum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnyRecipe {
    /// Crusher recipe.
    Crushing(CrushingRecipe),
    /// Combiner recipe.
    Combining(CombiningRecipe),
    /// Nucleosynthesizer recipe.
    Nucleosynthesizing(NucleosynthesizingRecipe),
    /// Chemical washer recipe.
    Washing(WashingRecipe),
}

impl AnyRecipe {
    /// Kind of this recipe.
    #[must_use]
    pub const fn kind(&self) -> RecipeKind {
        match self {
            Self::Crushing(_) => RecipeKind::Crushing,
            Self::Combining(_) => RecipeKind::Combining,
            Self::Nucleosynthesizing(_) => RecipeKind::Nucleosynthesizing,
            Self::Washing(_) => RecipeKind::Washing,
        }
    }
}

impl MachineRecipe for AnyRecipe {
    fn id(&self) -> &RecipeId {
        match self {
            Self::Crushing(r) => r.id(),
            Self::Combining(r) => r.id(),
            Self::Nucleosynthesizing(r) => r.id(),
            Self::Washing(r) => r.id(),
        }
    }
}

impl From<CrushingRecipe> for AnyRecipe {
    fn from(recipe: CrushingRecipe) -> Self {
        Self::Crushing(recipe)
    }
}

impl From<CombiningRecipe> for AnyRecipe {
    fn from(recipe: CombiningRecipe) -> Self {
        Self::Combining(recipe)
    }
}

impl From<NucleosynthesizingRecipe> for AnyRecipe {
    fn from(recipe: NucleosynthesizingRecipe) -> Self {
        Self::Nucleosynthesizing(recipe)
    }
}

impl From<WashingRecipe> for AnyRecipe {
    fn from(recipe: WashingRecipe) -> Self {
        Self::Washing(recipe)
    }
}
