//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// Two entities are the same logical entity exactly when their identities are
/// equal, whatever their other attributes hold.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;

    /// Whether `other` carries the same identity.
    fn same_identity(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}
