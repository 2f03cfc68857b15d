use serde::{Deserialize, Serialize};

use crate::host::ValueType;

/// Location of an expression in its source unit.
///
/// `start` and `end` are byte offsets, `line` and `column` are 1-based and default to 0 when the
/// host does not supply them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceSpan {
    /// Byte offset of the first character
    pub start: usize,
    /// Byte offset one past the last character
    pub end: usize,
    /// 1-based line of `start`
    #[serde(default)]
    pub line: u32,
    /// 1-based column of `start`
    #[serde(default)]
    pub column: u32,
}

impl SourceSpan {
    /// Create a span from byte offsets without line information
    #[must_use]
    pub fn new(start: usize, end: usize) -> Self {
        Self {
            start,
            end,
            line: 0,
            column: 0,
        }
    }

    /// Attach line and column
    #[must_use]
    pub fn at(mut self, line: u32, column: u32) -> Self {
        self.line = line;
        self.column = column;
        self
    }

    /// Length in bytes
    #[must_use]
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Returns `true` for zero-length spans
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A compile-time constant value.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ConstantValue {
    /// `true` / `false`
    Boolean(bool),
    /// Any integral constant
    Integer(i64),
    /// Any floating-point constant
    Float(f64),
    /// A string constant
    String(String),
    /// The `null` literal
    Null,
}

impl ConstantValue {
    /// The string payload, if this is a string constant
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ConstantValue::String(value) => Some(value),
            _ => None,
        }
    }
}

/// The shape of an argument expression as far as name resolution is concerned.
///
/// The facts document writes expressions as objects tagged with `kind`:
///
/// ```json
/// {"kind": "literal", "value": "http.request.method"}
/// {"kind": "field_reference", "field": "Attrs.Method", "constant": "http.request.method"}
/// {"kind": "local_reference", "name": "key"}
/// {"kind": "other"}
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Expression {
    /// A literal constant written in place
    Literal {
        /// The literal's value
        value: ConstantValue,
    },
    /// A reference to a named field or member
    FieldReference {
        /// Display name of the referenced member
        field: String,
        /// The member's value if it is a compile-time constant
        #[serde(default)]
        constant: Option<ConstantValue>,
    },
    /// A reference to a local variable or parameter
    LocalReference {
        /// Name of the local
        name: String,
    },
    /// Any other expression (invocation, concatenation, interpolation, ...)
    Other,
}

impl Expression {
    /// A string literal
    pub fn string_literal(value: impl Into<String>) -> Self {
        Expression::Literal {
            value: ConstantValue::String(value.into()),
        }
    }

    /// A reference to a constant field holding `value`
    pub fn constant_field(field: impl Into<String>, value: ConstantValue) -> Self {
        Expression::FieldReference {
            field: field.into(),
            constant: Some(value),
        }
    }
}

/// One argument of a call site.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Argument {
    /// Location of the argument expression
    pub span: SourceSpan,
    /// The argument expression
    pub expression: Expression,
    /// Static type of the expression, `None` if the host could not determine it
    #[serde(rename = "type", default)]
    pub value_type: Option<ValueType>,
}

impl Argument {
    /// Create an argument without type information
    #[must_use]
    pub fn new(span: SourceSpan, expression: Expression) -> Self {
        Self {
            span,
            expression,
            value_type: None,
        }
    }

    /// Attach the static type of the expression
    #[must_use]
    pub fn with_type(mut self, value_type: ValueType) -> Self {
        self.value_type = Some(value_type);
        self
    }
}

/// A method invocation found in a source unit.
///
/// The receiver type is the fully qualified name of the type that declares the invoked method,
/// e.g. `System.Diagnostics.Activity`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CallSite {
    /// Fully qualified name of the callee's declaring type
    pub callee_type: String,
    /// Name of the invoked method
    pub callee_method: String,
    /// Arguments in positional order
    #[serde(default)]
    pub arguments: Vec<Argument>,
}

impl CallSite {
    /// Create a call site without arguments
    pub fn new(callee_type: impl Into<String>, callee_method: impl Into<String>) -> Self {
        Self {
            callee_type: callee_type.into(),
            callee_method: callee_method.into(),
            arguments: Vec::new(),
        }
    }

    /// Append an argument
    #[must_use]
    pub fn with_argument(mut self, argument: Argument) -> Self {
        self.arguments.push(argument);
        self
    }

    /// The attribute name argument (position 0)
    #[must_use]
    pub fn key_argument(&self) -> Option<&Argument> {
        self.arguments.first()
    }

    /// The attribute value argument (position 1)
    #[must_use]
    pub fn value_argument(&self) -> Option<&Argument> {
        self.arguments.get(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::ConcreteType;

    #[test]
    fn test_deserialize_expressions() {
        let literal: Expression =
            serde_json::from_str(r#"{"kind": "literal", "value": "http.route"}"#).unwrap();
        assert_eq!(literal, Expression::string_literal("http.route"));

        let field: Expression = serde_json::from_str(
            r#"{"kind": "field_reference", "field": "Attrs.Route", "constant": "http.route"}"#,
        )
        .unwrap();
        assert_eq!(
            field,
            Expression::constant_field(
                "Attrs.Route",
                ConstantValue::String("http.route".to_string())
            )
        );

        let readonly: Expression =
            serde_json::from_str(r#"{"kind": "field_reference", "field": "Attrs.Route"}"#)
                .unwrap();
        assert!(matches!(
            readonly,
            Expression::FieldReference { constant: None, .. }
        ));

        let local: Expression =
            serde_json::from_str(r#"{"kind": "local_reference", "name": "key"}"#).unwrap();
        assert!(matches!(local, Expression::LocalReference { name } if name == "key"));

        let other: Expression = serde_json::from_str(r#"{"kind": "other"}"#).unwrap();
        assert_eq!(other, Expression::Other);
    }

    #[test]
    fn test_deserialize_constants() {
        let values: Vec<ConstantValue> =
            serde_json::from_str(r#"[true, 42, 1.5, "x", null]"#).unwrap();
        assert_eq!(
            values,
            vec![
                ConstantValue::Boolean(true),
                ConstantValue::Integer(42),
                ConstantValue::Float(1.5),
                ConstantValue::String("x".to_string()),
                ConstantValue::Null,
            ]
        );
        assert_eq!(values[3].as_str(), Some("x"));
        assert_eq!(values[1].as_str(), None);
    }

    #[test]
    fn test_deserialize_call_site() {
        let call: CallSite = serde_json::from_str(
            r#"{
                "callee_type": "System.Diagnostics.Activity",
                "callee_method": "SetTag",
                "arguments": [
                    {"span": {"start": 10, "end": 22, "line": 3, "column": 17},
                     "expression": {"kind": "literal", "value": "http.route"}},
                    {"span": {"start": 24, "end": 29},
                     "expression": {"kind": "local_reference", "name": "route"},
                     "type": {"converted": {"direct": "string"}}}
                ]
            }"#,
        )
        .unwrap();

        let key = call.key_argument().unwrap();
        assert_eq!(key.span, SourceSpan::new(10, 22).at(3, 17));
        assert_eq!(key.value_type, None);

        let value = call.value_argument().unwrap();
        assert_eq!(value.span.line, 0);
        assert_eq!(
            value.value_type.as_ref().map(ValueType::innermost),
            Some(&ConcreteType::String)
        );
    }

    #[test]
    fn test_missing_arguments() {
        let call = CallSite::new("System.Diagnostics.Activity", "SetTag");
        assert!(call.key_argument().is_none());
        assert!(call.value_argument().is_none());

        let call = call.with_argument(Argument::new(
            SourceSpan::new(0, 4),
            Expression::string_literal("a.b"),
        ));
        assert!(call.key_argument().is_some());
        assert!(call.value_argument().is_none());
    }

    #[test]
    fn test_span_len() {
        assert_eq!(SourceSpan::new(4, 10).len(), 6);
        assert!(SourceSpan::new(3, 3).is_empty());
        assert_eq!(SourceSpan::new(10, 4).len(), 0);
    }
}
