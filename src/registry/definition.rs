use std::sync::Arc;

use crate::registry::{AttributeRecord, StabilityTag, TypeTag};

/// A reference-counted pointer to an `AttributeDefinition`, shared by both registry lookups
pub type AttributeDefinitionRc = Arc<AttributeDefinition>;

/// One registered telemetry attribute.
///
/// Definitions are created by the registry builder with the document defaults already applied:
/// a missing `type` becomes [`TypeTag::String`], a missing `stability` becomes
/// [`StabilityTag::Stable`] and a missing or empty `deprecated` leaves
/// [`AttributeDefinition::deprecation_note`] empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeDefinition {
    /// Dotted attribute name, the unique registry key
    pub name: String,
    /// Symbolic alias used by generated code, empty if none
    pub constant_alias: String,
    /// The abstract type values of this attribute must have
    pub declared_type: TypeTag,
    /// Maturity classification
    pub stability: StabilityTag,
    /// Replacement guidance, present iff the attribute is deprecated
    pub deprecation_note: Option<String>,
}

impl AttributeDefinition {
    /// Create a stable, non-deprecated definition without alias
    pub fn new(name: impl Into<String>, declared_type: TypeTag) -> Self {
        Self {
            name: name.into(),
            constant_alias: String::new(),
            declared_type,
            stability: StabilityTag::Stable,
            deprecation_note: None,
        }
    }

    /// Set the generated-code alias
    #[must_use]
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.constant_alias = alias.into();
        self
    }

    /// Set the stability classification
    #[must_use]
    pub fn with_stability(mut self, stability: StabilityTag) -> Self {
        self.stability = stability;
        self
    }

    /// Mark the definition as deprecated with the given note
    #[must_use]
    pub fn deprecated(mut self, note: impl Into<String>) -> Self {
        self.deprecation_note = Some(note.into());
        self
    }

    /// Apply the document defaults to a raw record.
    ///
    /// Returns `None` for records without a usable name, which the builder skips.
    pub(crate) fn from_record(record: AttributeRecord) -> Option<Self> {
        let name = record.attribute_name.filter(|name| !name.is_empty())?;

        Some(Self {
            name,
            constant_alias: record.constant_name.unwrap_or_default(),
            declared_type: record
                .type_name
                .as_deref()
                .map_or(TypeTag::String, TypeTag::from_declared),
            stability: record
                .stability
                .as_deref()
                .map_or(StabilityTag::Stable, StabilityTag::from_declared),
            deprecation_note: record.deprecated.filter(|note| !note.is_empty()),
        })
    }

    /// Whether the attribute carries a deprecation note
    #[must_use]
    pub fn is_deprecated(&self) -> bool {
        self.deprecation_note.is_some()
    }

    /// Whether usage is reported as experimental
    #[must_use]
    pub fn is_experimental(&self) -> bool {
        self.stability.is_experimental()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: Option<&str>) -> AttributeRecord {
        AttributeRecord {
            attribute_name: name.map(str::to_string),
            ..AttributeRecord::default()
        }
    }

    #[test]
    fn test_from_record_defaults() {
        let definition = AttributeDefinition::from_record(record(Some("service.name"))).unwrap();
        assert_eq!(definition.name, "service.name");
        assert_eq!(definition.constant_alias, "");
        assert_eq!(definition.declared_type, TypeTag::String);
        assert_eq!(definition.stability, StabilityTag::Stable);
        assert_eq!(definition.deprecation_note, None);
        assert!(!definition.is_deprecated());
        assert!(!definition.is_experimental());
    }

    #[test]
    fn test_from_record_skips_missing_name() {
        assert!(AttributeDefinition::from_record(record(None)).is_none());
        assert!(AttributeDefinition::from_record(record(Some(""))).is_none());
    }

    #[test]
    fn test_from_record_all_fields() {
        let definition = AttributeDefinition::from_record(AttributeRecord {
            attribute_name: Some("http.method".to_string()),
            constant_name: Some("HttpMethod".to_string()),
            type_name: Some("string[]".to_string()),
            stability: Some("development".to_string()),
            deprecated: Some("Replaced by http.request.method".to_string()),
        })
        .unwrap();

        assert_eq!(definition.constant_alias, "HttpMethod");
        assert_eq!(definition.declared_type, TypeTag::StringArray);
        assert_eq!(definition.stability, StabilityTag::Development);
        assert_eq!(
            definition.deprecation_note.as_deref(),
            Some("Replaced by http.request.method")
        );
        assert!(definition.is_deprecated());
        assert!(definition.is_experimental());
    }

    #[test]
    fn test_from_record_empty_deprecation_is_absent() {
        let definition = AttributeDefinition::from_record(AttributeRecord {
            attribute_name: Some("a".to_string()),
            deprecated: Some(String::new()),
            ..AttributeRecord::default()
        })
        .unwrap();
        assert!(!definition.is_deprecated());

        let definition = AttributeDefinition::from_record(AttributeRecord {
            attribute_name: Some("a".to_string()),
            deprecated: Some("  ".to_string()),
            ..AttributeRecord::default()
        })
        .unwrap();
        assert!(definition.is_deprecated());
        assert_eq!(definition.deprecation_note.as_deref(), Some("  "));
    }

    #[test]
    fn test_builder_methods() {
        let definition = AttributeDefinition::new("myapp.count", TypeTag::Int)
            .with_alias("MyappCount")
            .with_stability(StabilityTag::Experimental)
            .deprecated("use myapp.total");

        assert_eq!(definition.constant_alias, "MyappCount");
        assert!(definition.is_experimental());
        assert!(definition.is_deprecated());
    }
}
