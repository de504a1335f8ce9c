//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects have no identity and are never mutated in place. An email
/// address or a computed `(interest, total)` pair is a value object; an
/// investment record is an entity.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
