//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// Users and investment records are entities: two records with identical
/// amounts are still different investments.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}
