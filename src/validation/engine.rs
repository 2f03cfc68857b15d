use rayon::prelude::*;

use crate::{
    compat::is_compatible,
    diagnostics::{Diagnostic, Diagnostics, RuleId},
    host::{CallSite, SourceSpan},
    registry::AttributeRegistry,
    resolver::resolve,
    validation::{is_eligible, AnalyzerConfig},
};

/// Checks tag-setting call sites against an attribute registry.
///
/// The validator borrows the registry and configuration read-only and holds no state of its
/// own, so one instance can be shared by any number of threads.
///
/// # Check Order
///
/// For every eligible call whose name argument resolves to a constant string:
///
/// 1. Unregistered name: `InvalidAttribute` on the name argument, nothing else is reported
/// 2. Experimental or development stability: `ExperimentalAttribute` on the name argument
/// 3. Deprecation note: `DeprecatedAttribute` on the name argument
/// 4. Known value type incompatible with the declared type: `TypeMismatch` on the value argument
///
/// A rule configured as `none` produces nothing but does not change the order of the others.
///
/// # Examples
///
/// ```rust
/// use tagscope::{
///     host::{Argument, CallSite, ConcreteType, Expression, SourceSpan, ValueType},
///     registry::{AttributeDefinition, AttributeRegistry, TypeTag},
///     validation::{AnalyzerConfig, Validator},
///     diagnostics::RuleId,
/// };
///
/// let registry = AttributeRegistry::from_definitions(
///     None,
///     [AttributeDefinition::new("myapp.count", TypeTag::Int)],
/// );
/// let config = AnalyzerConfig::default();
/// let validator = Validator::new(&registry, &config);
///
/// let call = CallSite::new("System.Diagnostics.Activity", "SetTag")
///     .with_argument(Argument::new(
///         SourceSpan::new(0, 13),
///         Expression::string_literal("myapp.count"),
///     ))
///     .with_argument(
///         Argument::new(SourceSpan::new(15, 22), Expression::Other)
///             .with_type(ValueType::converted(ConcreteType::String.into())),
///     );
///
/// let diagnostics = validator.check_call(&call);
/// assert_eq!(diagnostics.len(), 1);
/// assert_eq!(diagnostics[0].rule, RuleId::TypeMismatch);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Validator<'a> {
    registry: &'a AttributeRegistry,
    config: &'a AnalyzerConfig,
}

impl<'a> Validator<'a> {
    /// Create a validator over a registry
    #[must_use]
    pub fn new(registry: &'a AttributeRegistry, config: &'a AnalyzerConfig) -> Self {
        Self { registry, config }
    }

    /// The registry names are checked against
    #[must_use]
    pub fn registry(&self) -> &'a AttributeRegistry {
        self.registry
    }

    /// Check a single call site.
    ///
    /// Returns the diagnostics of this call in check order. Calls that are not tag setters, or
    /// whose name argument does not resolve, produce nothing.
    #[must_use]
    pub fn check_call(&self, call: &CallSite) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();

        if !is_eligible(call, &self.config.tag_setters) {
            return diagnostics;
        }
        let (Some(key), Some(value)) = (call.key_argument(), call.value_argument()) else {
            return diagnostics;
        };
        let Some(name) = resolve(&key.expression) else {
            return diagnostics;
        };

        let Some(definition) = self.registry.get(name) else {
            self.report(
                &mut diagnostics,
                RuleId::InvalidAttribute,
                key.span,
                vec![name.to_string()],
            );
            return diagnostics;
        };

        if definition.is_experimental() {
            self.report(
                &mut diagnostics,
                RuleId::ExperimentalAttribute,
                key.span,
                vec![name.to_string()],
            );
        }

        if let Some(note) = &definition.deprecation_note {
            self.report(
                &mut diagnostics,
                RuleId::DeprecatedAttribute,
                key.span,
                vec![name.to_string(), note.clone()],
            );
        }

        if let Some(value_type) = &value.value_type {
            let actual = value_type.innermost();
            if !is_compatible(definition.declared_type, actual) {
                self.report(
                    &mut diagnostics,
                    RuleId::TypeMismatch,
                    value.span,
                    vec![
                        name.to_string(),
                        definition.declared_type.to_string(),
                        actual.to_string(),
                    ],
                );
            }
        }

        diagnostics
    }

    /// Check every call site.
    ///
    /// Call sites are checked in parallel unless the configuration is sequential. The order of
    /// diagnostics across call sites is unspecified; within one call site it is the check order.
    #[must_use]
    pub fn validate(&self, call_sites: &[CallSite]) -> Vec<Diagnostic> {
        let diagnostics = Diagnostics::new();

        if self.config.parallel {
            call_sites
                .par_iter()
                .for_each(|call| diagnostics.extend(self.check_call(call)));
        } else {
            for call in call_sites {
                diagnostics.extend(self.check_call(call));
            }
        }

        diagnostics.into_vec()
    }

    fn report(
        &self,
        diagnostics: &mut Vec<Diagnostic>,
        rule: RuleId,
        span: SourceSpan,
        arguments: Vec<String>,
    ) {
        if let Some(severity) = self.config.severity(rule) {
            diagnostics.push(Diagnostic::new(rule, span, arguments).with_severity(severity));
        }
    }
}
