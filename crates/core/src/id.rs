//! Strongly-typed person identity.

use core::str::FromStr;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Identity of a person in the friendship graph.
///
/// Assigned once at construction and never reused. The hyphenated string form
/// produced by `Display` is the join key of the serialized graph.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersonId(Uuid);

impl PersonId {
    /// Create a new random identifier (UUIDv4).
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for PersonId {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Display for PersonId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl From<Uuid> for PersonId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<PersonId> for Uuid {
    fn from(value: PersonId) -> Self {
        value.0
    }
}

impl FromStr for PersonId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let uuid =
            Uuid::from_str(s).map_err(|e| DomainError::invalid_id(format!("PersonId: {e}")))?;
        Ok(Self(uuid))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_ids_are_distinct() {
        let a = PersonId::new();
        let b = PersonId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn display_round_trips_through_from_str() {
        let id = PersonId::new();
        let parsed: PersonId = id.to_string().parse().unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn from_str_rejects_garbage() {
        let err = "not-a-uuid".parse::<PersonId>().unwrap_err();
        match err {
            DomainError::InvalidId(msg) => assert!(msg.starts_with("PersonId")),
            other => panic!("Expected InvalidId, got {other:?}"),
        }
    }

    #[test]
    fn converts_to_and_from_uuid() {
        let uuid = Uuid::new_v4();
        let id = PersonId::from_uuid(uuid);

        assert_eq!(id.as_uuid(), &uuid);
        assert_eq!(PersonId::from(uuid), id);
        assert_eq!(Uuid::from(id), uuid);
    }

    #[test]
    fn serializes_as_plain_string() {
        let id = PersonId::new();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{id}\""));
    }
}
