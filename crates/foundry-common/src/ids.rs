//! Namespaced identifiers for resources and recipes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{FoundryError, FoundryResult};

/// Namespace used when an identifier is written without one.
pub const DEFAULT_NAMESPACE: &str = "minecraft";

/// Namespace of the content shipped with Foundry itself.
pub const FOUNDRY_NAMESPACE: &str = "foundry";

/// A `namespace:path` identifier.
///
/// Serialized as its string form. Both halves are restricted to lowercase
/// ASCII letters, digits, `_`, `-` and `.`; the path may also contain `/`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ResourceLocation {
    namespace: String,
    path: String,
}

impl ResourceLocation {
    /// Creates a location, validating both halves.
    pub fn new(namespace: &str, path: &str) -> FoundryResult<Self> {
        if namespace.is_empty() || !namespace.chars().all(valid_namespace_char) {
            return Err(FoundryError::InvalidResourceLocation(format!(
                "{namespace}:{path}"
            )));
        }
        if path.is_empty() || !path.chars().all(valid_path_char) {
            return Err(FoundryError::InvalidResourceLocation(format!(
                "{namespace}:{path}"
            )));
        }
        Ok(Self {
            namespace: namespace.to_string(),
            path: path.to_string(),
        })
    }

    /// Location in the default namespace.
    ///
    /// Intended for compile-time known paths; an invalid path is kept as-is.
    #[must_use]
    pub fn minecraft(path: &str) -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
            path: path.to_string(),
        }
    }

    /// Location in the Foundry namespace.
    #[must_use]
    pub fn foundry(path: &str) -> Self {
        Self {
            namespace: FOUNDRY_NAMESPACE.to_string(),
            path: path.to_string(),
        }
    }

    /// Returns the namespace half.
    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Returns the path half.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }
}

fn valid_namespace_char(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '_' | '-' | '.')
}

fn valid_path_char(c: char) -> bool {
    valid_namespace_char(c) || c == '/'
}

impl FromStr for ResourceLocation {
    type Err = FoundryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once(':') {
            Some((namespace, path)) => Self::new(namespace, path),
            None => Self::new(DEFAULT_NAMESPACE, s),
        }
    }
}

impl TryFrom<String> for ResourceLocation {
    type Error = FoundryError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ResourceLocation> for String {
    fn from(value: ResourceLocation) -> Self {
        value.to_string()
    }
}

impl fmt::Display for ResourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace, self.path)
    }
}

/// Identifier of an item type.
pub type ItemId = ResourceLocation;

/// Identifier of a fluid type.
pub type FluidId = ResourceLocation;

/// Identifier of a chemical type.
pub type ChemicalId = ResourceLocation;

/// Identifier of a recipe.
pub type RecipeId = ResourceLocation;
