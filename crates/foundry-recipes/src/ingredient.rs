//! Recipe ingredients.
//!
//! An ingredient is a set of alternative stacks; an input satisfies it when it
//! has the same resource type as one alternative and at least that
//! alternative's amount.

use foundry_common::{ChemicalStack, FluidStack, ItemStack, RecipeId};
use serde::{Deserialize, Serialize};

use crate::error::{RecipeError, RecipeResult};

/// A stack kind that can appear in an ingredient.
pub trait IngredientStack {
    /// Check if both stacks hold the same resource type, ignoring amount.
    fn same_type(&self, other: &Self) -> bool;

    /// Amount held, widened to a common unit.
    fn quantity(&self) -> u64;

    /// Check if this stack holds nothing.
    fn is_empty_stack(&self) -> bool;
}

impl IngredientStack for ItemStack {
    fn same_type(&self, other: &Self) -> bool {
        self.item() == other.item()
    }

    fn quantity(&self) -> u64 {
        u64::from(self.count())
    }

    fn is_empty_stack(&self) -> bool {
        self.is_empty()
    }
}

impl IngredientStack for FluidStack {
    fn same_type(&self, other: &Self) -> bool {
        self.fluid() == other.fluid()
    }

    fn quantity(&self) -> u64 {
        self.amount()
    }

    fn is_empty_stack(&self) -> bool {
        self.is_empty()
    }
}

impl IngredientStack for ChemicalStack {
    fn same_type(&self, other: &Self) -> bool {
        self.chemical() == other.chemical()
    }

    fn quantity(&self) -> u64 {
        self.amount()
    }

    fn is_empty_stack(&self) -> bool {
        self.is_empty()
    }
}

/// Alternatives accepted in one recipe input slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient<S> {
    alternatives: Vec<S>,
}

/// Item ingredient.
pub type ItemIngredient = Ingredient<ItemStack>;

/// Fluid ingredient.
pub type FluidIngredient = Ingredient<FluidStack>;

/// Chemical ingredient.
pub type ChemicalIngredient = Ingredient<ChemicalStack>;

impl<S: IngredientStack> Ingredient<S> {
    /// Ingredient accepting exactly one kind of stack.
    #[must_use]
    pub fn of(stack: S) -> Self {
        Self {
            alternatives: vec![stack],
        }
    }

    /// Ingredient accepting any of the given stacks.
    #[must_use]
    pub fn any_of(alternatives: Vec<S>) -> Self {
        Self { alternatives }
    }

    /// Accepted alternatives, in declaration order.
    #[must_use]
    pub fn alternatives(&self) -> &[S] {
        &self.alternatives
    }

    /// Check if the input has an accepted type and enough of it.
    #[must_use]
    pub fn test(&self, input: &S) -> bool {
        self.matching(input).is_some()
    }

    /// Check if the input has an accepted type, ignoring amount.
    #[must_use]
    pub fn test_type(&self, input: &S) -> bool {
        !input.is_empty_stack() && self.alternatives.iter().any(|alt| alt.same_type(input))
    }

    /// Alternative satisfied by the input, if any.
    #[must_use]
    pub fn matching(&self, input: &S) -> Option<&S> {
        if input.is_empty_stack() {
            return None;
        }
        self.alternatives
            .iter()
            .find(|alt| alt.same_type(input) && input.quantity() >= alt.quantity())
    }

    /// Rejects ingredients that could never be satisfied.
    pub fn validate(&self, id: &RecipeId, slot: &str) -> RecipeResult<()> {
        if self.alternatives.is_empty() {
            return Err(RecipeError::invalid(id, format!("{slot} has no alternatives")));
        }
        if self.alternatives.iter().any(IngredientStack::is_empty_stack) {
            return Err(RecipeError::invalid(
                id,
                format!("{slot} contains an empty stack"),
            ));
        }
        Ok(())
    }
}

impl<S: IngredientStack> From<S> for Ingredient<S> {
    fn from(stack: S) -> Self {
        Self::of(stack)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use foundry_common::ResourceLocation;

    fn item(path: &str, count: u32) -> ItemStack {
        ItemStack::new(ResourceLocation::minecraft(path), count)
    }

    #[test]
    fn test_requires_amount() {
        let ingredient = ItemIngredient::of(item("bone", 2));
        assert!(!ingredient.test(&item("bone", 1)));
        assert!(ingredient.test(&item("bone", 2)));
        assert!(ingredient.test(&item("bone", 64)));
        assert!(!ingredient.test(&item("stick", 64)));
    }

    #[test]
    fn test_type_ignores_amount() {
        let ingredient = ItemIngredient::of(item("bone", 2));
        assert!(ingredient.test_type(&item("bone", 1)));
        assert!(!ingredient.test_type(&item("bone", 0)));
    }

    #[test]
    fn test_alternatives() {
        let ingredient = ItemIngredient::any_of(vec![item("gravel", 1), item("suspicious_gravel", 4)]);
        assert_eq!(
            ingredient.matching(&item("suspicious_gravel", 4)),
            Some(&item("suspicious_gravel", 4))
        );
        assert!(!ingredient.test(&item("suspicious_gravel", 3)));
        assert!(ingredient.test(&item("gravel", 1)));
    }

    #[test]
    fn test_validate() {
        let id = ResourceLocation::foundry("test");
        assert!(ItemIngredient::any_of(vec![]).validate(&id, "input").is_err());
        assert!(ItemIngredient::of(ItemStack::empty()).validate(&id, "input").is_err());
        assert!(ItemIngredient::of(item("bone", 1)).validate(&id, "input").is_ok());
    }

    #[test]
    fn test_chemical_ingredient() {
        let antimatter = ResourceLocation::foundry("antimatter");
        let ingredient = ChemicalIngredient::of(ChemicalStack::new(antimatter.clone(), 4));
        assert!(ingredient.test(&ChemicalStack::new(antimatter.clone(), 4)));
        assert!(!ingredient.test(&ChemicalStack::new(antimatter.clone(), 3)));
        assert!(ingredient.test_type(&ChemicalStack::unit(antimatter)));
    }
}
