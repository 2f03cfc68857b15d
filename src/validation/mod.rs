//! Validation of tag-setting call sites.
//!
//! This module ties the registry, the name resolver and the compatibility matrix together. The
//! [`Validator`] walks the call sites of a source unit, picks the ones that attach an attribute
//! to a span (see [`is_eligible`]) and reports every mismatch with the registry as a
//! [`Diagnostic`](crate::diagnostics::Diagnostic).
//!
//! # Key Components
//!
//! - [`Validator`] - Per-call checks and parallel validation of many call sites
//! - [`AnalyzerConfig`] - Severity overrides, tag-setter allow-list and parallelism
//! - [`TagSetter`] / [`TypeMatch`] - Allow-list entries
//!
//! # Parallel Processing
//!
//! Call sites are independent of each other and the registry is immutable, so
//! [`Validator::validate`] distributes them over the [`rayon`] thread pool and collects
//! diagnostics into a lock-free [`Diagnostics`](crate::diagnostics::Diagnostics) container.

mod config;
mod eligibility;
mod engine;

pub use config::{AnalyzerConfig, RuleLevel};
pub use eligibility::{default_tag_setters, is_eligible, TagSetter, TypeMatch};
pub use engine::Validator;

use crate::{diagnostics::Diagnostic, host::CallSite, registry::AttributeRegistry};

/// Validate call sites against a registry with the default configuration.
///
/// # Examples
///
/// ```rust
/// use tagscope::{registry::AttributeRegistry, validation::validate};
///
/// let registry = AttributeRegistry::build(r#"{"attributes": []}"#).unwrap();
/// assert!(validate(&[], &registry).is_empty());
/// ```
#[must_use]
pub fn validate(call_sites: &[CallSite], registry: &AttributeRegistry) -> Vec<Diagnostic> {
    let config = AnalyzerConfig::default();
    Validator::new(registry, &config).validate(call_sites)
}
