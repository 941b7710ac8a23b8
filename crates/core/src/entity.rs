//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// Identity is assigned by storage, so an entity that has not been persisted
/// yet reports `None`.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Copy + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier, if one has been assigned.
    fn id(&self) -> Option<Self::Id>;

    /// Whether storage has assigned an identity to this entity.
    fn is_persisted(&self) -> bool {
        self.id().is_some()
    }
}
