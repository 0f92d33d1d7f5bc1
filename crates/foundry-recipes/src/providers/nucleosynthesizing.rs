//! Antiprotonic nucleosynthesizer recipes.
//!
//! Processing time scales with the antimatter consumed.

use foundry_common::{ChemicalStack, ResourceLocation};

use super::item;
use crate::error::RecipeResult;
use crate::ingredient::{ChemicalIngredient, ItemIngredient};
use crate::recipe::{AnyRecipe, NucleosynthesizingRecipe};

/// Chemical fed to every nucleosynthesizer recipe.
pub const ANTIMATTER: &str = "antimatter";

/// (id path, input, antimatter, output)
const RECIPES: &[(&str, &str, u64, &str)] = &[
    ("wither_skeleton_skull", "skeleton_skull", 5, "wither_skeleton_skull"),
    ("heart_of_the_sea", "nether_star", 5, "heart_of_the_sea"),
    ("diamond", "coal", 4, "diamond"),
    ("emerald", "diamond", 4, "emerald"),
    ("dragon_egg", "egg", 4, "dragon_egg"),
    ("trident", "diamond_sword", 4, "trident"),
    ("end_crystal", "beacon", 3, "end_crystal"),
    ("respawn_anchor", "red_bed", 3, "respawn_anchor"),
    ("nautilus_shell", "flower_pot", 3, "nautilus_shell"),
    ("enchanted_golden_apple", "golden_apple", 3, "enchanted_golden_apple"),
    ("phantom_membrane", "leather", 3, "phantom_membrane"),
    ("redstone_block", "red_wool", 2, "redstone_block"),
    ("glowstone_block", "yellow_wool", 2, "glowstone"),
    ("lapis_block", "blue_wool", 2, "lapis_block"),
    ("quartz_block", "light_gray_wool", 2, "quartz_block"),
    ("chorus_flower", "poppy", 2, "chorus_flower"),
    ("ender_chest", "chest", 2, "ender_chest"),
    ("echo_shard", "amethyst_shard", 2, "echo_shard"),
    ("iron", "foundry:tin_ingot", 1, "iron_ingot"),
    ("crying_obsidian", "obsidian", 1, "crying_obsidian"),
    ("crossbow", "bow", 1, "crossbow"),
];

/// Ticks needed for a recipe consuming `antimatter` units.
#[must_use]
pub const fn duration_for(antimatter: u64) -> u32 {
    match antimatter {
        0 | 1 => 200,
        2 => 500,
        3 => 750,
        4 => 1_000,
        _ => 1_250,
    }
}

/// Built-in nucleosynthesizer recipes.
pub fn nucleosynthesizing() -> RecipeResult<Vec<AnyRecipe>> {
    RECIPES
        .iter()
        .map(|(path, input, antimatter, output)| -> RecipeResult<AnyRecipe> {
            let recipe = NucleosynthesizingRecipe::new(
                ResourceLocation::foundry(&format!("nucleosynthesizing/{path}")),
                ItemIngredient::of(item(input, 1)?),
                ChemicalIngredient::of(ChemicalStack::new(
                    ResourceLocation::foundry(ANTIMATTER),
                    *antimatter,
                )),
                item(output, 1)?,
                duration_for(*antimatter),
                false,
            )?;
            Ok(recipe.into())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recipe::{DoubleInputRecipe, MachineRecipe};
    use foundry_common::ItemStack;

    #[test]
    fn test_durations_follow_antimatter() {
        for recipe in nucleosynthesizing().expect("valid") {
            let AnyRecipe::Nucleosynthesizing(recipe) = recipe else {
                panic!("unexpected recipe kind");
            };
            let amount = recipe.chemical_input().alternatives()[0].amount();
            assert_eq!(recipe.duration(), duration_for(amount), "{}", recipe.id());
        }
    }

    #[test]
    fn test_coal_to_diamond() {
        let recipes = nucleosynthesizing().expect("valid");
        let diamond = recipes
            .iter()
            .find_map(|r| match r {
                AnyRecipe::Nucleosynthesizing(n) if n.id().path() == "nucleosynthesizing/diamond" => {
                    Some(n.clone())
                }
                _ => None,
            })
            .expect("present");

        let coal = ItemStack::one(ResourceLocation::minecraft("coal"));
        let antimatter = |amount| ChemicalStack::new(ResourceLocation::foundry(ANTIMATTER), amount);
        assert!(diamond.matches(&coal, &antimatter(4)));
        assert!(!diamond.matches(&coal, &antimatter(3)));
        assert_eq!(diamond.duration(), 1_000);
    }
}
