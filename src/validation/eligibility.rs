//! Which invocations are tag-setting calls.
//!
//! A call is checked only if its receiver type and method name match an entry of the tag-setter
//! allow-list and it passes at least a name and a value argument. Everything else is ignored
//! silently.

use serde::Serialize;

use crate::host::CallSite;

/// How a tag setter's receiver type is matched against the callee's declaring type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeMatch {
    /// The fully qualified type name must be equal
    Exact(String),
    /// The fully qualified type name must start with this text
    Prefix(String),
}

impl TypeMatch {
    /// Check a fully qualified type name
    #[must_use]
    pub fn matches(&self, type_name: &str) -> bool {
        match self {
            TypeMatch::Exact(expected) => type_name == expected,
            TypeMatch::Prefix(prefix) => type_name.starts_with(prefix.as_str()),
        }
    }
}

/// One entry of the tag-setter allow-list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct TagSetter {
    /// Receiver type
    pub receiver: TypeMatch,
    /// Method name, matched exactly
    pub method: String,
}

impl TagSetter {
    /// A setter on exactly this receiver type
    pub fn exact(type_name: impl Into<String>, method: impl Into<String>) -> Self {
        Self {
            receiver: TypeMatch::Exact(type_name.into()),
            method: method.into(),
        }
    }

    /// A setter on every receiver type whose name starts with `prefix`
    pub fn prefix(prefix: impl Into<String>, method: impl Into<String>) -> Self {
        Self {
            receiver: TypeMatch::Prefix(prefix.into()),
            method: method.into(),
        }
    }

    /// Check whether a call invokes this setter
    #[must_use]
    pub fn matches(&self, call: &CallSite) -> bool {
        call.callee_method == self.method && self.receiver.matches(&call.callee_type)
    }
}

/// The built-in allow-list.
///
/// - `System.Diagnostics.Activity.SetTag` and `.AddTag`
/// - `OpenTelemetry.Trace.TelemetrySpan.SetAttribute`
/// - `SetAttribute` on the `OpenTelemetry.Trace.ISpan` interface family
#[must_use]
pub fn default_tag_setters() -> Vec<TagSetter> {
    vec![
        TagSetter::exact("System.Diagnostics.Activity", "SetTag"),
        TagSetter::exact("System.Diagnostics.Activity", "AddTag"),
        TagSetter::exact("OpenTelemetry.Trace.TelemetrySpan", "SetAttribute"),
        TagSetter::prefix("OpenTelemetry.Trace.ISpan", "SetAttribute"),
    ]
}

/// Check whether a call is subject to attribute validation.
#[must_use]
pub fn is_eligible(call: &CallSite, setters: &[TagSetter]) -> bool {
    call.arguments.len() >= 2 && setters.iter().any(|setter| setter.matches(call))
}
