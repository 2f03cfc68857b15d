//! In-memory registry of known telemetry attributes.
//!
//! The registry is built once per analysis session from the metadata document and is immutable
//! afterwards. It is `Send + Sync` and is shared read-only between all concurrently running call
//! site checks, so no synchronisation is involved at lookup time.
//!
//! # Key Components
//!
//! - [`AttributeRegistry`] - Dual lookup (by name and by generated-code alias)
//! - [`AttributeDefinition`] - One registered attribute with defaults applied
//! - [`MetadataDocument`] - Raw, structurally loose form of the input document
//! - [`TypeTag`] / [`StabilityTag`] - Parsed declared type and stability
//!
//! # Absent vs. Empty
//!
//! [`AttributeRegistry::build`] distinguishes two outcomes that look alike at first glance:
//!
//! - `None` - the document is malformed or has no `attributes` list; validation is disabled for
//!   the whole session.
//! - `Some(registry)` with zero entries - the document is well formed but lists nothing; every
//!   tagging call with a resolvable name is then reported as invalid.
//!
//! # Examples
//!
//! ```rust
//! use tagscope::registry::{AttributeRegistry, TypeTag};
//!
//! let registry = AttributeRegistry::build(
//!     r#"{"version": "1.0", "attributes": [{"attribute_name": "myapp.count", "type": "int"}]}"#,
//! )
//! .expect("well formed document");
//!
//! let definition = registry.get("myapp.count").unwrap();
//! assert_eq!(definition.declared_type, TypeTag::Int);
//! assert_eq!(registry.version(), "1.0");
//! ```

mod definition;
mod document;
mod tags;

pub use definition::{AttributeDefinition, AttributeDefinitionRc};
pub use document::{AttributeRecord, MetadataDocument};
pub use tags::{StabilityTag, TypeTag};

use std::{collections::HashMap, sync::Arc};

/// Version reported by registries whose document does not carry one
pub const UNKNOWN_VERSION: &str = "unknown";

/// Immutable lookup structure mapping attribute names and aliases to their definitions.
#[derive(Debug, Clone)]
pub struct AttributeRegistry {
    by_name: HashMap<String, AttributeDefinitionRc>,
    by_alias: HashMap<String, AttributeDefinitionRc>,
    version: String,
}

impl AttributeRegistry {
    /// Build a registry from the JSON text of a metadata document.
    ///
    /// This never fails loudly: a document that cannot be decoded, or that has no `attributes`
    /// list, yields `None` (the "no registry" state). Records without a name are skipped,
    /// duplicate names and aliases are resolved by letting the later record win.
    ///
    /// # Arguments
    ///
    /// * `raw` - The metadata document text
    #[must_use]
    pub fn build(raw: &str) -> Option<Self> {
        match MetadataDocument::parse(raw) {
            Ok(document) => Self::from_document(document),
            Err(error) => {
                log::debug!("{error}");
                None
            }
        }
    }

    /// Build a registry from an already decoded document.
    ///
    /// Returns `None` if the document has no `attributes` list.
    #[must_use]
    pub fn from_document(document: MetadataDocument) -> Option<Self> {
        let records = document.attributes?;

        let mut registry = Self::empty(document.version);
        for record in records.into_iter().flatten() {
            if let Some(definition) = AttributeDefinition::from_record(record) {
                registry.insert(definition);
            }
        }

        Some(registry)
    }

    /// Build a registry directly from definitions.
    ///
    /// The same rules as for documents apply: definitions with an empty name are skipped and
    /// later duplicates overwrite earlier ones.
    #[must_use]
    pub fn from_definitions(
        version: Option<String>,
        definitions: impl IntoIterator<Item = AttributeDefinition>,
    ) -> Self {
        let mut registry = Self::empty(version);
        for definition in definitions {
            if !definition.name.is_empty() {
                registry.insert(definition);
            }
        }
        registry
    }

    fn empty(version: Option<String>) -> Self {
        Self {
            by_name: HashMap::new(),
            by_alias: HashMap::new(),
            version: version
                .filter(|version| !version.is_empty())
                .unwrap_or_else(|| UNKNOWN_VERSION.to_string()),
        }
    }

    fn insert(&mut self, definition: AttributeDefinition) {
        let definition = Arc::new(definition);

        if !definition.constant_alias.is_empty() {
            self.by_alias
                .insert(definition.constant_alias.clone(), definition.clone());
        }

        if self
            .by_name
            .insert(definition.name.clone(), definition.clone())
            .is_some()
        {
            log::debug!(
                "attribute '{}' is defined more than once, keeping the last definition",
                definition.name
            );
        }
    }

    /// Look up a definition by its exact, case-sensitive attribute name
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&AttributeDefinitionRc> {
        self.by_name.get(name)
    }

    /// Look up a definition by its generated-code alias
    #[must_use]
    pub fn get_by_alias(&self, alias: &str) -> Option<&AttributeDefinitionRc> {
        self.by_alias.get(alias)
    }

    /// Whether an attribute with this exact name is registered
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// The provenance tag of the source document, `"unknown"` if it had none
    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Number of registered attribute names
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    /// Returns `true` if no attribute is registered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    /// Number of registered aliases
    #[must_use]
    pub fn alias_count(&self) -> usize {
        self.by_alias.len()
    }

    /// All definitions, sorted by attribute name
    #[must_use]
    pub fn definitions(&self) -> Vec<&AttributeDefinitionRc> {
        let mut definitions: Vec<_> = self.by_name.values().collect();
        definitions.sort_by(|a, b| a.name.cmp(&b.name));
        definitions
    }
}
