//! Versions of the data formats Foundry exchanges.

use serde::{Deserialize, Serialize};

use crate::error::{FoundryError, FoundryResult};

/// `major.minor.patch` version stamped on serialized payloads.
///
/// Only the major component decides readability: minor and patch bumps add
/// fields that older readers skip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SchemaVersion {
    /// Breaking changes
    pub major: u16,
    /// Additions
    pub minor: u16,
    /// Fixes
    pub patch: u16,
}

impl SchemaVersion {
    /// Binary recipe sync payload.
    pub const RECIPE_SYNC: Self = Self::new(1, 0, 0);

    /// Creates a new schema version.
    #[must_use]
    pub const fn new(major: u16, minor: u16, patch: u16) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Whether a reader at this version understands data written at `data_version`.
    #[must_use]
    pub const fn can_read(&self, data_version: &Self) -> bool {
        self.major == data_version.major
    }

    /// Fails with [`FoundryError::VersionMismatch`] unless `data_version` is readable.
    pub fn ensure_readable(&self, data_version: &Self) -> FoundryResult<()> {
        if self.can_read(data_version) {
            Ok(())
        } else {
            Err(FoundryError::VersionMismatch {
                expected: self.to_string(),
                actual: data_version.to_string(),
            })
        }
    }
}

impl std::fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}
