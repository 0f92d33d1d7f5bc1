//! Recipe serialization.
//!
//! Two formats are supported:
//! - JSON recipe files, one recipe per file, discriminated by a `"type"` key
//! - A versioned bincode payload used to sync recipes to clients
//!
//! Both paths run the same validation as the recipe constructors, so a
//! decoded recipe is always one that could have been built in code.

use foundry_common::{ChemicalStack, FluidStack, ItemStack, RecipeId, SchemaVersion};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::error::{RecipeError, RecipeResult};
use crate::ingredient::{Ingredient, IngredientStack};
use crate::recipe::{
    AnyRecipe, CombiningRecipe, CrushingRecipe, MachineRecipe, NucleosynthesizingRecipe,
    WashingRecipe,
};

// ============================================================================
// JSON
// ============================================================================

/// An ingredient written either as a single stack or a list of alternatives.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum OneOrMany<S> {
    One(S),
    Many(Vec<S>),
}

impl<S: IngredientStack + Clone> OneOrMany<S> {
    fn from_ingredient(ingredient: &Ingredient<S>) -> Self {
        match ingredient.alternatives() {
            [single] => Self::One(single.clone()),
            many => Self::Many(many.to_vec()),
        }
    }

    fn into_ingredient(self) -> Ingredient<S> {
        match self {
            Self::One(stack) => Ingredient::of(stack),
            Self::Many(stacks) => Ingredient::any_of(stacks),
        }
    }
}

/// On-disk shape of a recipe file, minus its id (which comes from the path).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
enum RecipeBody {
    #[serde(rename = "foundry:crushing")]
    Crushing {
        input: OneOrMany<ItemStack>,
        output: ItemStack,
    },
    #[serde(rename = "foundry:combining")]
    Combining {
        main_input: OneOrMany<ItemStack>,
        extra_input: OneOrMany<ItemStack>,
        output: ItemStack,
    },
    #[serde(rename = "foundry:nucleosynthesizing")]
    Nucleosynthesizing {
        item_input: OneOrMany<ItemStack>,
        chemical_input: OneOrMany<ChemicalStack>,
        output: ItemStack,
        duration: u32,
        #[serde(default)]
        per_tick_usage: bool,
    },
    #[serde(rename = "foundry:washing")]
    Washing {
        fluid_input: OneOrMany<FluidStack>,
        chemical_input: OneOrMany<ChemicalStack>,
        output: ChemicalStack,
    },
}

impl RecipeBody {
    fn from_recipe(recipe: &AnyRecipe) -> Self {
        match recipe {
            AnyRecipe::Crushing(r) => Self::Crushing {
                input: OneOrMany::from_ingredient(r.input()),
                output: r.output().clone(),
            },
            AnyRecipe::Combining(r) => Self::Combining {
                main_input: OneOrMany::from_ingredient(r.main_input()),
                extra_input: OneOrMany::from_ingredient(r.extra_input()),
                output: r.output().clone(),
            },
            AnyRecipe::Nucleosynthesizing(r) => Self::Nucleosynthesizing {
                item_input: OneOrMany::from_ingredient(r.item_input()),
                chemical_input: OneOrMany::from_ingredient(r.chemical_input()),
                output: r.output().clone(),
                duration: r.duration(),
                per_tick_usage: r.per_tick_usage(),
            },
            AnyRecipe::Washing(r) => Self::Washing {
                fluid_input: OneOrMany::from_ingredient(r.fluid_input()),
                chemical_input: OneOrMany::from_ingredient(r.chemical_input()),
                output: r.output().clone(),
            },
        }
    }

    fn build(self, id: RecipeId) -> RecipeResult<AnyRecipe> {
        let recipe = match self {
            Self::Crushing { input, output } => {
                CrushingRecipe::new(id, input.into_ingredient(), output)?.into()
            }
            Self::Combining {
                main_input,
                extra_input,
                output,
            } => CombiningRecipe::new(
                id,
                main_input.into_ingredient(),
                extra_input.into_ingredient(),
                output,
            )?
            .into(),
            Self::Nucleosynthesizing {
                item_input,
                chemical_input,
                output,
                duration,
                per_tick_usage,
            } => NucleosynthesizingRecipe::new(
                id,
                item_input.into_ingredient(),
                chemical_input.into_ingredient(),
                output,
                duration,
                per_tick_usage,
            )?
            .into(),
            Self::Washing {
                fluid_input,
                chemical_input,
                output,
            } => WashingRecipe::new(
                id,
                fluid_input.into_ingredient(),
                chemical_input.into_ingredient(),
                output,
            )?
            .into(),
        };
        Ok(recipe)
    }
}

/// Parses a recipe from its JSON value.
pub fn parse_recipe(id: RecipeId, json: &Value) -> RecipeResult<AnyRecipe> {
    let body = match RecipeBody::deserialize(json) {
        Ok(body) => body,
        Err(source) => return Err(RecipeError::Json { id, source }),
    };
    body.build(id)
}

/// Parses a recipe from JSON text.
pub fn parse_recipe_str(id: RecipeId, json: &str) -> RecipeResult<AnyRecipe> {
    let body: RecipeBody = match serde_json::from_str(json) {
        Ok(body) => body,
        Err(source) => return Err(RecipeError::Json { id, source }),
    };
    body.build(id)
}

/// Writes a recipe as its JSON value.
pub fn recipe_to_json(recipe: &AnyRecipe) -> RecipeResult<Value> {
    serde_json::to_value(RecipeBody::from_recipe(recipe)).map_err(|source| RecipeError::JsonWrite {
        id: recipe.id().clone(),
        source,
    })
}

// ============================================================================
// Binary sync
// ============================================================================

/// Binary payload sent to clients.
///
/// The version comes first so it can be read before the recipe itself.
#[derive(Debug, Serialize, Deserialize)]
struct SyncPayload {
    version: SchemaVersion,
    recipe: AnyRecipe,
}

/// Encodes a recipe for network sync.
pub fn encode_recipe(recipe: &AnyRecipe) -> RecipeResult<Vec<u8>> {
    let payload = SyncPayload {
        version: SchemaVersion::RECIPE_SYNC,
        recipe: recipe.clone(),
    };
    Ok(bincode::serialize(&payload)?)
}

/// Decodes a recipe sent by [`encode_recipe`].
pub fn decode_recipe(bytes: &[u8]) -> RecipeResult<AnyRecipe> {
    let version: SchemaVersion = bincode::deserialize(bytes)?;
    if let Err(e) = SchemaVersion::RECIPE_SYNC.ensure_readable(&version) {
        warn!("Rejecting recipe payload: {e}");
        return Err(e.into());
    }

    let payload: SyncPayload = bincode::deserialize(bytes)?;
    let id = payload.recipe.id().clone();
    RecipeBody::from_recipe(&payload.recipe).build(id)
}
