//! Filter error types.

use thiserror::Error;

/// Errors raised while building or decoding filters.
#[derive(Debug, Error)]
pub enum FilterError {
    /// A match pattern was empty.
    #[error("Filter pattern must not be empty")]
    EmptyPattern,

    /// A persisted entry was not a valid filter.
    #[error("Filter entry {index} could not be decoded: {source}")]
    Decode {
        /// Position of the entry in the stored list.
        index: usize,
        /// Underlying decode error.
        #[source]
        source: serde_json::Error,
    },

    /// A persisted entry decoded to a filter kind this collection does not hold.
    #[error("Filter entry {index} is a {kind} filter, which this collection does not accept")]
    WrongVariant {
        /// Position of the entry in the stored list.
        index: usize,
        /// Kind that was found.
        kind: &'static str,
    },

    /// Filters could not be encoded.
    #[error("Failed to encode filters: {0}")]
    Encode(#[source] serde_json::Error),
}

/// Result type for filter operations.
pub type FilterResult<T> = Result<T, FilterError>;
