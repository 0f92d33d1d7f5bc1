//! # Foundry Filters
//!
//! Item filters for Project Foundry machines.
//!
//! This crate provides:
//! - Filters matching items by id, namespace or name pattern
//! - A tagged enum covering every filter kind for persistence
//! - An ordered filter collection with a cached enabled view

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod error;
pub mod filter;
pub mod manager;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::error::*;
    pub use crate::filter::*;
    pub use crate::manager::*;
}

pub use prelude::*;

#[cfg(test)]
mod tests {
    use super::*;
    use foundry_common::{ItemStack, ResourceLocation};

    #[test]
    fn test_mixed_manager_matches_any_kind() {
        let mut manager: FilterManager<BaseFilter> = FilterManager::new(|| {});
        manager.add_filter(ModIdFilter::new("foundry").expect("valid").into());
        manager.add_filter(NameFilter::new("*_ore").expect("valid").into());

        let dust = ItemStack::one(ResourceLocation::foundry("obsidian_dust"));
        let ore = ItemStack::one(ResourceLocation::minecraft("iron_ore"));
        let bone = ItemStack::one(ResourceLocation::minecraft("bone"));

        assert!(manager.any_enabled_match(|f| f.matches(&dust)));
        assert!(manager.any_enabled_match(|f| f.matches(&ore)));
        assert!(!manager.any_enabled_match(|f| f.matches(&bone)));
    }
}
