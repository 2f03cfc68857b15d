//! Compatibility between declared attribute types and static value types.
//!
//! | Declared | Accepted concrete types |
//! |---|---|
//! | `string` | `string` |
//! | `int` | `sbyte`, `byte`, `short`, `ushort`, `int`, `uint`, `long`, `ulong` |
//! | `double` | `float`, `double` |
//! | `boolean` | `bool` |
//! | `T[]` | single-dimensional arrays whose element type is accepted by `T` |
//! | `unknown` | anything |
//!
//! Native-sized integers (`nint`, `nuint`), `decimal` and `char` are not accepted by any scalar
//! tag. The caller is expected to peel conversions off the value type first, see
//! [`ValueType::innermost`](crate::host::ValueType::innermost).

use crate::{host::ConcreteType, registry::TypeTag};

/// Check whether a value of type `actual` may be recorded under an attribute declared as
/// `declared`.
///
/// # Examples
///
/// ```rust
/// use tagscope::{compat::is_compatible, host::ConcreteType, registry::TypeTag};
///
/// assert!(is_compatible(TypeTag::Int, &ConcreteType::I8));
/// assert!(!is_compatible(TypeTag::Int, &ConcreteType::String));
/// assert!(is_compatible(TypeTag::Unknown, &ConcreteType::Object));
/// ```
#[must_use]
pub fn is_compatible(declared: TypeTag, actual: &ConcreteType) -> bool {
    match declared {
        TypeTag::String => matches!(actual, ConcreteType::String),
        TypeTag::Int => actual.is_fixed_width_integer(),
        TypeTag::Double => actual.is_floating_point(),
        TypeTag::Boolean => matches!(actual, ConcreteType::Boolean),
        TypeTag::StringArray
        | TypeTag::IntArray
        | TypeTag::DoubleArray
        | TypeTag::BooleanArray => match (declared.element(), actual.element()) {
            (Some(scalar), Some(element)) => is_compatible(scalar, element),
            _ => false,
        },
        TypeTag::Unknown => true,
    }
}
