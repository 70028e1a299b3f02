//! Value objects with smart constructors.
//!
//! Value objects are immutable, equality-compared by value, and validated
//! at construction time where applicable.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier for an aggregate instance (an `Encounter`, a `Diagnosis`, ...).
///
/// Wraps a UUID, providing type safety to prevent mixing up an aggregate's
/// own identity with, say, the patient or actor UUIDs carried in an event's
/// payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AggregateId(Uuid);

impl AggregateId {
    /// Generate a new random `AggregateId`.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID as an `AggregateId`.
    ///
    /// Use this when parsing from a request or rehydrating from storage.
    #[must_use]
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    #[must_use]
    pub fn into_inner(self) -> Uuid {
        self.0
    }
}

impl Default for AggregateId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for AggregateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for AggregateId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl From<AggregateId> for Uuid {
    fn from(id: AggregateId) -> Self {
        id.0
    }
}
