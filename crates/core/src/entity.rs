//! Entity trait: identity that survives attribute differences.

/// Entity marker + minimal interface.
///
/// Catalog records are immutable once loaded, so identity is used for
/// exclusion and uniqueness checks (e.g. "related products except this one")
/// rather than for tracking state changes.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;

    /// Two entities are the same record when their identifiers match.
    fn same_identity<E>(&self, other: &E) -> bool
    where
        E: Entity<Id = Self::Id> + ?Sized,
    {
        self.id() == other.id()
    }
}
