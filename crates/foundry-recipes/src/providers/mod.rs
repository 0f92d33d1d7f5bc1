//! Built-in recipe definitions.
//!
//! Providers return the recipes a fresh install ships with. Ids are grouped
//! by machine (`crushing/…`, `nucleosynthesizing/…`) and, within a machine,
//! by material family.

mod crushing;
mod nucleosynthesizing;

pub use crushing::crushing;
pub use nucleosynthesizing::nucleosynthesizing;

use foundry_common::{ItemStack, ResourceLocation};

use crate::error::RecipeResult;
use crate::recipe::AnyRecipe;

/// Every built-in recipe, crushing first.
pub fn all() -> RecipeResult<Vec<AnyRecipe>> {
    let mut recipes = crushing()?;
    recipes.extend(nucleosynthesizing()?);
    Ok(recipes)
}

/// Parses an item reference, `minecraft` namespace when none is given.
fn item(name: &str, count: u32) -> RecipeResult<ItemStack> {
    let id: ResourceLocation = name.parse()?;
    Ok(ItemStack::new(id, count))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recipe::{MachineRecipe, RecipeKind};
    use crate::recipe_type::MachineRecipes;
    use std::collections::HashSet;

    #[test]
    fn test_builtin_ids_are_unique() {
        let recipes = all().expect("built-ins are valid");
        let ids: HashSet<_> = recipes.iter().map(|r| r.id().clone()).collect();
        assert_eq!(ids.len(), recipes.len());
    }

    #[test]
    fn test_builtin_ids_are_grouped_by_machine() {
        for recipe in all().expect("built-ins are valid") {
            let prefix = format!("{}/", recipe.kind().path());
            assert!(
                recipe.id().path().starts_with(&prefix),
                "{} not under {prefix}",
                recipe.id()
            );
        }
    }

    #[test]
    fn test_builtins_load_into_context() {
        let mut recipes = MachineRecipes::default();
        recipes.reload(all().expect("built-ins are valid"));
        assert!(recipes.count(RecipeKind::Crushing) > 0);
        assert!(recipes.count(RecipeKind::Nucleosynthesizing) > 0);
    }
}
