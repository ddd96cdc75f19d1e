//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Insight payloads are value objects: produced fresh per request, compared by
/// their contents and never mutated after they are returned.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
