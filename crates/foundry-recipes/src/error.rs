//! Recipe error types.

use foundry_common::{FoundryError, RecipeId};
use thiserror::Error;

/// Errors raised while building, parsing or transferring recipes.
///
/// A recipe that simply does not match its inputs is never an error; lookups
/// report that through `false` / `None`.
#[derive(Debug, Error)]
pub enum RecipeError {
    /// Recipe failed validation.
    #[error("Recipe {id} is invalid: {reason}")]
    Invalid {
        /// Offending recipe.
        id: RecipeId,
        /// What was wrong with it.
        reason: String,
    },

    /// Recipe JSON could not be decoded.
    #[error("Failed to parse recipe {id}: {source}")]
    Json {
        /// Recipe being parsed.
        id: RecipeId,
        /// Underlying decode error.
        #[source]
        source: serde_json::Error,
    },

    /// Recipe could not be written as JSON.
    #[error("Failed to write recipe {id}: {source}")]
    JsonWrite {
        /// Recipe being written.
        id: RecipeId,
        /// Underlying encode error.
        #[source]
        source: serde_json::Error,
    },

    /// Binary sync payload could not be encoded or decoded.
    #[error("Recipe payload error: {0}")]
    Payload(#[from] bincode::Error),

    /// Shared error (bad identifiers, version mismatch).
    #[error(transparent)]
    Common(#[from] FoundryError),
}

impl RecipeError {
    /// Shorthand for a validation failure.
    pub fn invalid(id: &RecipeId, reason: impl Into<String>) -> Self {
        Self::Invalid {
            id: id.clone(),
            reason: reason.into(),
        }
    }
}

/// Result type for recipe operations.
pub type RecipeResult<T> = Result<T, RecipeError>;
