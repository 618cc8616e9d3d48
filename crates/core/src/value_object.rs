//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects have no identity; two instances with the same attributes are
/// interchangeable. In the catalog these are the small validated wrappers such
/// as `Price` and `Rating`: they are checked once at construction and are
/// `Copy`/`Clone` afterwards.
///
/// ```ignore
/// #[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// struct Price(u64);
///
/// impl ValueObject for Price {}
///
/// assert_eq!(Price(2499), Price(2499));
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
