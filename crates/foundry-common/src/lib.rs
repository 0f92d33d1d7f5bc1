//! # Foundry Common
//!
//! Common types, utilities, and shared abstractions for Project Foundry.
//!
//! This crate provides foundational types used across all Foundry subsystems:
//! - Resource locations (`namespace:path` identifiers)
//! - Resource stacks (items, fluids, chemicals)
//! - Version information for schemas
//! - Common error types
//! - Prelude for convenient imports

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod error;
pub mod ids;
pub mod stack;
pub mod version;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::*;
    pub use crate::ids::*;
    pub use crate::stack::*;
    pub use crate::version::*;
}

pub use prelude::*;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_location_parse() {
        let loc: ResourceLocation = "foundry:crushing/bone".parse().expect("valid");
        assert_eq!(loc.namespace(), "foundry");
        assert_eq!(loc.path(), "crushing/bone");
    }

    #[test]
    fn test_stack_from_location() {
        let stack = ItemStack::new(ResourceLocation::minecraft("bone"), 3);
        assert_eq!(stack.count(), 3);
        assert!(!stack.is_empty());
    }

    #[test]
    fn test_sync_version_reads_itself() {
        assert!(SchemaVersion::RECIPE_SYNC.can_read(&SchemaVersion::RECIPE_SYNC));
    }
}
