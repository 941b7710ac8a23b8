//! Value object trait: equality by value, not identity.
//!
//! Value objects have **no identity**; two value objects with the same values
//! are the same value. In this workspace they are also the place where raw
//! input is normalized, so once a value object exists it is known to be valid.

/// Marker trait for value objects.
///
/// ## Value Object vs Entity
///
/// - **Value Object**: no identity (a SKU `"ABC-1"` is equal to any other `"ABC-1"`)
/// - **Entity**: has identity (two products are the same product if their IDs match)
///
/// Value objects are immutable. To "modify" one, build a new one.
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq, Eq)]
/// struct Sku(String);
///
/// impl ValueObject for Sku {}
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
