//! Board locations.
//!
//! The core never interprets station ids. Board topology belongs to the rules
//! collaborator; here a station is just an opaque integer that can be compared
//! and hashed.

use serde::{Deserialize, Serialize};

/// Opaque location identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StationId(pub u32);

impl StationId {
    /// Create a new station ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for StationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Station({})", self.0)
    }
}

impl From<u32> for StationId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}
