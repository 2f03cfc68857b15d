//! Shared fixtures for unit tests.

use crate::{
    host::{Argument, CallSite, Expression, SourceSpan, ValueType},
    registry::{AttributeDefinition, AttributeRegistry, StabilityTag, TypeTag},
};

/// Registry used across unit tests
pub fn fixture_registry() -> AttributeRegistry {
    AttributeRegistry::from_definitions(
        Some("test".to_string()),
        [
            AttributeDefinition::new("http.request.method", TypeTag::String)
                .with_alias("HttpRequestMethod"),
            AttributeDefinition::new("http.response.status_code", TypeTag::Int)
                .with_alias("HttpResponseStatusCode"),
            AttributeDefinition::new("http.method", TypeTag::String)
                .deprecated("Replaced by `http.request.method`."),
            AttributeDefinition::new("gen_ai.request.model", TypeTag::String)
                .with_stability(StabilityTag::Development),
            AttributeDefinition::new("legacy.experimental.flag", TypeTag::Boolean)
                .with_stability(StabilityTag::Experimental)
                .deprecated("Use feature.flag.key instead"),
            AttributeDefinition::new("myapp.tags", TypeTag::StringArray),
            AttributeDefinition::new("myapp.payload", TypeTag::Unknown),
        ],
    )
}

/// An `Activity.SetTag(key, value)` call, the key spanning bytes 100..120 on line 10
pub fn activity_set_tag(key: Expression, value: Argument) -> CallSite {
    CallSite::new("System.Diagnostics.Activity", "SetTag")
        .with_argument(Argument::new(SourceSpan::new(100, 120).at(10, 24), key))
        .with_argument(value)
}

/// A value argument spanning bytes 122..130 on line 10 with a known static type
pub fn typed_value(value_type: ValueType) -> Argument {
    Argument::new(SourceSpan::new(122, 130).at(10, 46), Expression::Other).with_type(value_type)
}
