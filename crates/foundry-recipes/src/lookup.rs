//! Recipe lookup handlers.
//!
//! Machines implement one of these traits by naming the recipe type they
//! process; every query shape then comes for free and is answered through
//! the type's input cache.

use std::hash::Hash;
use std::sync::Arc;

use foundry_common::{ChemicalId, ChemicalStack};

use crate::recipe::{DoubleInputRecipe, SingleInputRecipe};
use crate::recipe_type::{DoubleRecipeType, SingleRecipeType};

/// Source of a recipe input read at lookup time.
pub trait InputHandler<T> {
    /// Current input value.
    fn input(&self) -> T;
}

/// Lookups for a recipe type with one input.
pub trait SingleRecipeLookupHandler<I, R>
where
    I: Eq + Hash + Clone,
    R: SingleInputRecipe<I>,
{
    /// Recipe type handled by this machine.
    fn recipe_type(&self) -> &SingleRecipeType<I, R>;

    /// Check if any recipe accepts the input.
    fn contains_recipe(&self, input: &I) -> bool {
        let recipe_type = self.recipe_type();
        recipe_type
            .input_cache()
            .contains_input(recipe_type.recipes(), input)
    }

    /// First recipe accepting the input.
    fn find_first_recipe(&self, input: &I) -> Option<Arc<R>> {
        let recipe_type = self.recipe_type();
        recipe_type
            .input_cache()
            .find_first_recipe(recipe_type.recipes(), input)
    }

    /// First recipe accepting the handler's current input.
    fn find_first_recipe_from(&self, handler: &dyn InputHandler<I>) -> Option<Arc<R>> {
        self.find_first_recipe(&handler.input())
    }
}

/// Lookups for a recipe type with two inputs.
///
/// `contains_recipe_ab` and `contains_recipe_ba` answer the same question for
/// callers holding their inputs in different orders. Pick the one matching
/// the order you actually have; they are cached and evaluated separately.
/// Both compare input types only; `find_first_recipe` also checks amounts.
pub trait DoubleRecipeLookupHandler<A, B, R>
where
    A: Eq + Hash + Clone,
    B: Eq + Hash + Clone,
    R: DoubleInputRecipe<A, B>,
{
    /// Recipe type handled by this machine.
    fn recipe_type(&self) -> &DoubleRecipeType<A, B, R>;

    /// Check if any recipe accepts the types of `input_a` and `input_b`.
    fn contains_recipe_ab(&self, input_a: &A, input_b: &B) -> bool {
        let recipe_type = self.recipe_type();
        recipe_type
            .input_cache()
            .contains_input_ab(recipe_type.recipes(), input_a, input_b)
    }

    /// Check if any recipe accepts both input types.
    ///
    /// Arguments are `(input_b, input_a)`: the B-slot value comes first.
    fn contains_recipe_ba(&self, input_b: &B, input_a: &A) -> bool {
        let recipe_type = self.recipe_type();
        recipe_type
            .input_cache()
            .contains_input_ba(recipe_type.recipes(), input_b, input_a)
    }

    /// Check if some recipe takes this input in slot A.
    fn contains_recipe_a(&self, input: &A) -> bool {
        let recipe_type = self.recipe_type();
        recipe_type
            .input_cache()
            .contains_input_a(recipe_type.recipes(), input)
    }

    /// Check if some recipe takes this input in slot B.
    fn contains_recipe_b(&self, input: &B) -> bool {
        let recipe_type = self.recipe_type();
        recipe_type
            .input_cache()
            .contains_input_b(recipe_type.recipes(), input)
    }

    /// First recipe matching both inputs.
    fn find_first_recipe(&self, input_a: &A, input_b: &B) -> Option<Arc<R>> {
        let recipe_type = self.recipe_type();
        recipe_type
            .input_cache()
            .find_first_recipe(recipe_type.recipes(), input_a, input_b)
    }

    /// First recipe matching the handlers' current inputs.
    fn find_first_recipe_from(
        &self,
        handler_a: &dyn InputHandler<A>,
        handler_b: &dyn InputHandler<B>,
    ) -> Option<Arc<R>> {
        self.find_first_recipe(&handler_a.input(), &handler_b.input())
    }
}

/// Chemical conveniences for two-input types whose B slot is a chemical.
///
/// Validity checks usually start from a bare chemical type; these wrap it in
/// a one-unit stack before looking up.
pub trait ChemicalRecipeLookupHandler<A, R>: DoubleRecipeLookupHandler<A, ChemicalStack, R>
where
    A: Eq + Hash + Clone,
    R: DoubleInputRecipe<A, ChemicalStack>,
{
    /// [`DoubleRecipeLookupHandler::contains_recipe_ba`] for a bare chemical,
    /// B-slot chemical first.
    fn contains_recipe_ba_chemical(&self, chemical: &ChemicalId, input_a: &A) -> bool {
        self.contains_recipe_ba(&ChemicalStack::unit(chemical.clone()), input_a)
    }

    /// [`DoubleRecipeLookupHandler::contains_recipe_b`] for a bare chemical.
    fn contains_recipe_b_chemical(&self, chemical: &ChemicalId) -> bool {
        self.contains_recipe_b(&ChemicalStack::unit(chemical.clone()))
    }
}

impl<T, A, R> ChemicalRecipeLookupHandler<A, R> for T
where
    T: DoubleRecipeLookupHandler<A, ChemicalStack, R> + ?Sized,
    A: Eq + Hash + Clone,
    R: DoubleInputRecipe<A, ChemicalStack>,
{
}
