//! Analysis session lifecycle.
//!
//! A session owns the attribute registry and the analyzer configuration for one compilation. The
//! registry is built exactly once when the session starts and then shared read-only by all source
//! units analyzed in the session, possibly on several threads at once.
//!
//! If the metadata document is missing or malformed the session is disabled: every analysis
//! returns no diagnostics at all, rather than flagging every attribute as unknown.

use rayon::prelude::*;

use crate::{
    diagnostics::Diagnostic,
    host::SemanticModel,
    registry::AttributeRegistry,
    validation::{AnalyzerConfig, Validator},
};

/// One analysis session with its registry and configuration.
///
/// # Examples
///
/// ```rust
/// use tagscope::{session::AnalysisSession, validation::AnalyzerConfig};
///
/// let disabled = AnalysisSession::new(None, AnalyzerConfig::default());
/// assert!(!disabled.is_enabled());
///
/// let session = AnalysisSession::new(
///     Some(r#"{"attributes": [{"attribute_name": "myapp.count", "type": "int"}]}"#),
///     AnalyzerConfig::default(),
/// );
/// assert!(session.is_enabled());
/// assert_eq!(session.registry().map(|r| r.len()), Some(1));
/// ```
#[derive(Debug, Clone)]
pub struct AnalysisSession {
    registry: Option<AttributeRegistry>,
    config: AnalyzerConfig,
}

impl AnalysisSession {
    /// Start a session from the text of the metadata document, if the project has one.
    ///
    /// # Arguments
    ///
    /// * `document` - The metadata document text, `None` if no document was found
    /// * `config` - Analyzer configuration for the whole session
    #[must_use]
    pub fn new(document: Option<&str>, config: AnalyzerConfig) -> Self {
        let registry = match document {
            None => {
                log::debug!("no attribute metadata document, attribute validation is disabled");
                None
            }
            Some(raw) => {
                let registry = AttributeRegistry::build(raw);
                match &registry {
                    Some(registry) => log::debug!(
                        "loaded {} telemetry attributes (registry version {})",
                        registry.len(),
                        registry.version()
                    ),
                    None => log::warn!(
                        "attribute metadata document is malformed, attribute validation is disabled"
                    ),
                }
                registry
            }
        };

        Self { registry, config }
    }

    /// Start a session with an already built registry
    #[must_use]
    pub fn with_registry(registry: AttributeRegistry, config: AnalyzerConfig) -> Self {
        Self {
            registry: Some(registry),
            config,
        }
    }

    /// The session's registry, `None` if validation is disabled
    #[must_use]
    pub fn registry(&self) -> Option<&AttributeRegistry> {
        self.registry.as_ref()
    }

    /// Whether call sites are validated in this session
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.registry.is_some()
    }

    /// The analyzer configuration
    #[must_use]
    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// A validator over the session's registry, `None` if validation is disabled
    #[must_use]
    pub fn validator(&self) -> Option<Validator<'_>> {
        self.registry
            .as_ref()
            .map(|registry| Validator::new(registry, &self.config))
    }

    /// Analyze one source unit.
    ///
    /// Every returned diagnostic carries the unit's path. A disabled session returns nothing.
    #[must_use]
    pub fn analyze(&self, model: &impl SemanticModel) -> Vec<Diagnostic> {
        let Some(validator) = self.validator() else {
            return Vec::new();
        };

        let path = model.path();
        validator
            .validate(model.call_sites())
            .into_iter()
            .map(|diagnostic| diagnostic.with_file(path))
            .collect()
    }

    /// Analyze several source units, in parallel unless the configuration is sequential.
    ///
    /// Diagnostics of one unit stay together and units keep their input order.
    #[must_use]
    pub fn analyze_all<M: SemanticModel>(&self, models: &[M]) -> Vec<Diagnostic> {
        if !self.is_enabled() {
            return Vec::new();
        }

        if self.config.parallel {
            models
                .par_iter()
                .flat_map_iter(|model| self.analyze(model))
                .collect()
        } else {
            models.iter().flat_map(|model| self.analyze(model)).collect()
        }
    }
}
