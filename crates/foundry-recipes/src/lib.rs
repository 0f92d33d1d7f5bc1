//! # Foundry Recipes
//!
//! Machine recipes for Project Foundry.
//!
//! This crate provides:
//! - Ingredients and concrete recipes for every machine
//! - Recipe types holding ordered, versioned recipe lists
//! - Input caches memoizing lookups against those lists
//! - Lookup handler traits machines implement to query their recipe type
//! - JSON and binary recipe serialization
//! - Built-in recipe definitions

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod cache;
pub mod error;
pub mod ingredient;
pub mod lookup;
pub mod machine;
pub mod providers;
pub mod recipe;
pub mod recipe_type;
pub mod serializer;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::cache::*;
    pub use crate::error::*;
    pub use crate::ingredient::*;
    pub use crate::lookup::*;
    pub use crate::machine::*;
    pub use crate::recipe::*;
    pub use crate::recipe_type::*;
    pub use crate::serializer::*;
}

pub use prelude::*;
