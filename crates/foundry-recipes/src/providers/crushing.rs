//! Crusher recipes.

use foundry_common::ResourceLocation;

use super::item;
use crate::error::RecipeResult;
use crate::ingredient::ItemIngredient;
use crate::recipe::{AnyRecipe, CrushingRecipe};

const BONE_MEAL_FROM_BONE: u32 = 6;

const WOOL_COLORS: [&str; 16] = [
    "white",
    "orange",
    "magenta",
    "light_blue",
    "yellow",
    "lime",
    "pink",
    "gray",
    "light_gray",
    "cyan",
    "purple",
    "blue",
    "brown",
    "green",
    "red",
    "black",
];

/// (id path, accepted inputs, output, output count)
type Entry = (&'static str, &'static [&'static str], &'static str, u32);

const MISC: &[Entry] = &[
    ("pointed_dripstone_from_block", &["dripstone_block"], "pointed_dripstone", 4),
    ("honeycomb_from_block", &["honeycomb_block"], "honeycomb", 4),
    ("purpur_block_from_pillar", &["purpur_pillar"], "purpur_block", 1),
    ("charcoal_dust", &["charcoal"], "foundry:charcoal_dust", 1),
    ("cobblestone_to_gravel", &["cobblestone", "mossy_cobblestone"], "gravel", 1),
    ("flint_to_gunpowder", &["flint"], "gunpowder", 1),
    ("gravel_to_sand", &["gravel"], "sand", 1),
    ("mud_to_packed_mud", &["mud"], "packed_mud", 1),
    ("disc_fragment", &["music_disc_5"], "disc_fragment_5", 9),
    ("obsidian_to_dust", &["obsidian", "crying_obsidian"], "foundry:obsidian_dust", 4),
    ("blaze_rod", &["blaze_rod"], "blaze_powder", 4),
    ("breeze_rod", &["breeze_rod"], "wind_charge", 6),
    ("bone", &["bone"], "bone_meal", BONE_MEAL_FROM_BONE),
    ("bone_block", &["bone_block"], "bone_meal", BONE_MEAL_FROM_BONE * 3),
    (
        "red_sandstone_to_sand",
        &["red_sandstone", "chiseled_red_sandstone", "cut_red_sandstone", "smooth_red_sandstone"],
        "red_sand",
        2,
    ),
    (
        "sandstone_to_sand",
        &["sandstone", "chiseled_sandstone", "cut_sandstone", "smooth_sandstone"],
        "sand",
        2,
    ),
    ("soul_soil_to_soul_sand", &["soul_soil"], "soul_sand", 1),
    (
        "polished_or_smooth_basalt_to_basalt",
        &["polished_basalt", "smooth_basalt"],
        "basalt",
        1,
    ),
    (
        "chiseled_nether_bricks_to_nether_bricks",
        &["chiseled_nether_bricks"],
        "nether_bricks",
        1,
    ),
    (
        "nether_bricks_to_cracked_nether_bricks",
        &["nether_bricks"],
        "cracked_nether_bricks",
        1,
    ),
];

const STONE: &[Entry] = &[
    ("stone/to_cobblestone", &["stone"], "cobblestone", 1),
    ("stone/stairs_to_cobblestone_stairs", &["stone_stairs"], "cobblestone_stairs", 1),
    ("stone/slabs_to_cobblestone_slabs", &["stone_slab"], "cobblestone_slab", 1),
    ("stone/chiseled_bricks_to_bricks", &["chiseled_stone_bricks"], "stone_bricks", 1),
    ("stone/bricks_to_cracked_bricks", &["stone_bricks"], "cracked_stone_bricks", 1),
    ("stone/from_cracked_bricks", &["cracked_stone_bricks"], "stone", 1),
];

const DEEPSLATE: &[Entry] = &[
    ("deepslate/to_cobbled", &["deepslate"], "cobbled_deepslate", 1),
    ("deepslate/polished_to_bricks", &["polished_deepslate"], "deepslate_bricks", 1),
    ("deepslate/bricks_to_cracked", &["deepslate_bricks"], "cracked_deepslate_bricks", 1),
    ("deepslate/tiles_to_cracked", &["deepslate_tiles"], "cracked_deepslate_tiles", 1),
    ("deepslate/chiseled_to_cobbled", &["chiseled_deepslate"], "cobbled_deepslate", 1),
];

const BLACKSTONE: &[Entry] = &[
    ("blackstone/polished_to_blackstone", &["polished_blackstone"], "blackstone", 1),
    (
        "blackstone/bricks_to_cracked",
        &["polished_blackstone_bricks"],
        "cracked_polished_blackstone_bricks",
        1,
    ),
    (
        "blackstone/chiseled_to_polished",
        &["chiseled_polished_blackstone"],
        "polished_blackstone",
        1,
    ),
];

/// Built-in crusher recipes.
pub fn crushing() -> RecipeResult<Vec<AnyRecipe>> {
    let mut recipes = Vec::new();
    for table in [MISC, STONE, DEEPSLATE, BLACKSTONE] {
        for (path, inputs, output, count) in table {
            recipes.push(build(path, inputs.iter().copied(), output, *count)?);
        }
    }

    let wools: Vec<String> = WOOL_COLORS.iter().map(|color| format!("{color}_wool")).collect();
    recipes.push(build(
        "wool_to_string",
        wools.iter().map(String::as_str),
        "string",
        4,
    )?);

    Ok(recipes)
}

fn build<'a>(
    path: &str,
    inputs: impl Iterator<Item = &'a str>,
    output: &str,
    count: u32,
) -> RecipeResult<AnyRecipe> {
    let alternatives = inputs
        .map(|input| item(input, 1))
        .collect::<RecipeResult<Vec<_>>>()?;
    let recipe = CrushingRecipe::new(
        ResourceLocation::foundry(&format!("crushing/{path}")),
        ItemIngredient::any_of(alternatives),
        item(output, count)?,
    )?;
    Ok(recipe.into())
}
