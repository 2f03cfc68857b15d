//! Static resolution of attribute names.
//!
//! Only two expression shapes yield a name: a string literal and a reference to a constant field
//! whose value is a string. There is no constant folding and no data-flow tracking, so
//! concatenations, interpolations, locals and method calls are all unresolved and the call site is
//! skipped by the validator.

use crate::host::{ConstantValue, Expression};

/// Resolve the compile-time string value of an attribute-name expression.
///
/// Returns `None` for every expression whose value is not statically known to be a string.
///
/// # Examples
///
/// ```rust
/// use tagscope::{host::Expression, resolver::resolve};
///
/// assert_eq!(resolve(&Expression::string_literal("http.route")), Some("http.route"));
/// assert_eq!(resolve(&Expression::Other), None);
/// ```
#[must_use]
pub fn resolve(expression: &Expression) -> Option<&str> {
    match expression {
        Expression::Literal { value } => value.as_str(),
        Expression::FieldReference {
            constant: Some(ConstantValue::String(value)),
            ..
        } => Some(value),
        Expression::FieldReference { .. }
        | Expression::LocalReference { .. }
        | Expression::Other => None,
    }
}
