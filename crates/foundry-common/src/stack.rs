//! Resource stacks.
//!
//! A stack pairs a resource identifier with an amount. Item stacks count
//! whole items; fluid and chemical stacks measure millibuckets.
//!
//! Stacks hash and compare structurally (identifier and amount), which is
//! what lets them act as memo keys in the recipe caches.

use serde::{Deserialize, Serialize};

use crate::ids::{ChemicalId, FluidId, ItemId, ResourceLocation};

/// Path of the item that represents an empty slot.
pub const AIR: &str = "air";

/// A stack of items.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemStack {
    item: ItemId,
    #[serde(default = "default_count")]
    count: u32,
}

const fn default_count() -> u32 {
    1
}

impl ItemStack {
    /// Creates a new item stack.
    #[must_use]
    pub fn new(item: ItemId, count: u32) -> Self {
        Self { item, count }
    }

    /// Creates a stack holding a single item.
    #[must_use]
    pub fn one(item: ItemId) -> Self {
        Self::new(item, 1)
    }

    /// Creates an empty stack.
    #[must_use]
    pub fn empty() -> Self {
        Self::new(ResourceLocation::minecraft(AIR), 0)
    }

    /// Item type of this stack.
    #[must_use]
    pub fn item(&self) -> &ItemId {
        &self.item
    }

    /// Number of items in the stack.
    #[must_use]
    pub const fn count(&self) -> u32 {
        self.count
    }

    /// Check if this stack holds nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count == 0 || self.item.path() == AIR
    }

    /// Copy of this stack with a different count.
    #[must_use]
    pub fn with_count(&self, count: u32) -> Self {
        Self::new(self.item.clone(), count)
    }
}

impl Default for ItemStack {
    fn default() -> Self {
        Self::empty()
    }
}

/// A measured amount of fluid.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FluidStack {
    fluid: FluidId,
    amount: u64,
}

impl FluidStack {
    /// Creates a new fluid stack.
    #[must_use]
    pub fn new(fluid: FluidId, amount: u64) -> Self {
        Self { fluid, amount }
    }

    /// Fluid type of this stack.
    #[must_use]
    pub fn fluid(&self) -> &FluidId {
        &self.fluid
    }

    /// Amount in millibuckets.
    #[must_use]
    pub const fn amount(&self) -> u64 {
        self.amount
    }

    /// Check if this stack holds nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.amount == 0
    }
}

/// A measured amount of a chemical (gas, slurry, infusion type or pigment).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChemicalStack {
    chemical: ChemicalId,
    amount: u64,
}

impl ChemicalStack {
    /// Creates a new chemical stack.
    #[must_use]
    pub fn new(chemical: ChemicalId, amount: u64) -> Self {
        Self { chemical, amount }
    }

    /// Smallest non-empty stack of a chemical.
    #[must_use]
    pub fn unit(chemical: ChemicalId) -> Self {
        Self::new(chemical, 1)
    }

    /// Chemical type of this stack.
    #[must_use]
    pub fn chemical(&self) -> &ChemicalId {
        &self.chemical
    }

    /// Amount in millibuckets.
    #[must_use]
    pub const fn amount(&self) -> u64 {
        self.amount
    }

    /// Check if this stack holds nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.amount == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_item_stack() {
        assert!(ItemStack::empty().is_empty());
        assert!(ItemStack::new(ResourceLocation::minecraft("bone"), 0).is_empty());
        assert!(ItemStack::new(ResourceLocation::minecraft(AIR), 5).is_empty());
    }

    #[test]
    fn test_with_count() {
        let stack = ItemStack::one(ResourceLocation::minecraft("flint"));
        let bigger = stack.with_count(16);
        assert_eq!(bigger.item(), stack.item());
        assert_eq!(bigger.count(), 16);
    }

    #[test]
    fn test_stack_equality_includes_amount() {
        let antimatter = ResourceLocation::foundry("antimatter");
        assert_ne!(
            ChemicalStack::new(antimatter.clone(), 4),
            ChemicalStack::new(antimatter.clone(), 5)
        );
        assert_eq!(ChemicalStack::unit(antimatter.clone()).amount(), 1);
        assert!(ChemicalStack::new(antimatter, 0).is_empty());
    }

    #[test]
    fn test_item_stack_count_defaults_to_one() {
        let stack: ItemStack =
            serde_json::from_str(r#"{"item":"minecraft:gravel"}"#).expect("deserialize");
        assert_eq!(stack.count(), 1);
    }

    #[test]
    fn test_fluid_stack() {
        let water = FluidStack::new(ResourceLocation::minecraft("water"), 1000);
        assert_eq!(water.amount(), 1000);
        assert_eq!(water.fluid().path(), "water");
        assert!(!water.is_empty());
    }
}
