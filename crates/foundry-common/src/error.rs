//! Error types shared across Foundry crates.

use thiserror::Error;

/// Errors raised by the shared types themselves.
#[derive(Debug, Error)]
pub enum FoundryError {
    /// Malformed `namespace:path` identifier
    #[error("Invalid resource location: {0}")]
    InvalidResourceLocation(String),

    /// Payload written by an unreadable schema version
    #[error("Schema version mismatch: expected {expected}, got {actual}")]
    VersionMismatch {
        /// Version of the reader
        expected: String,
        /// Version found in the data
        actual: String,
    },
}

/// Result type alias for Foundry operations.
pub type FoundryResult<T> = Result<T, FoundryError>;
