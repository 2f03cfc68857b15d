//! Diagnostics reported by attribute validation.
//!
//! Every finding of the validator is a [`Diagnostic`]: a rule identifier, the effective severity,
//! the source span it applies to and the positional arguments for the rule's message template.
//! Rendering to text happens late, in [`Diagnostic::message`], so hosts that localise or format
//! messages themselves can work from the raw arguments.
//!
//! # Key Components
//!
//! - [`RuleId`] - The four validation rules with their default severities and templates
//! - [`DiagnosticSeverity`] - Severity level (Info, Warning, Error)
//! - [`Diagnostic`] - One finding
//! - [`Diagnostics`] - Thread-safe container collecting findings from parallel checks
//!
//! # Rules
//!
//! | Rule | Default | Arguments |
//! |---|---|---|
//! | `InvalidAttribute` | Error | name |
//! | `TypeMismatch` | Error | name, declared type, actual type |
//! | `ExperimentalAttribute` | Info | name |
//! | `DeprecatedAttribute` | Warning | name, deprecation note |
//!
//! # Thread Safety
//!
//! [`Diagnostics`] uses `boxcar::Vec` internally, which provides lock-free concurrent append
//! operations. The validator pushes into one shared container from all worker threads.
//!
//! # Examples
//!
//! ```rust
//! use tagscope::diagnostics::{Diagnostic, Diagnostics, RuleId};
//! use tagscope::host::SourceSpan;
//!
//! let diagnostics = Diagnostics::new();
//! diagnostics.push(Diagnostic::new(
//!     RuleId::InvalidAttribute,
//!     SourceSpan::new(10, 22),
//!     vec!["myapp.cuont".to_string()],
//! ));
//!
//! assert!(diagnostics.has_errors());
//! assert_eq!(
//!     diagnostics.iter().next().unwrap().message(),
//!     "Attribute 'myapp.cuont' is not defined in the telemetry attribute registry"
//! );
//! ```

use std::fmt;

use serde::Serialize;
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

use crate::host::SourceSpan;

/// Severity level of a diagnostic entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum DiagnosticSeverity {
    /// Informational message, not indicating a problem.
    ///
    /// Used for surfacing the use of experimental attributes.
    Info,

    /// Warning about an attribute that still works but should be replaced.
    Warning,

    /// The call records telemetry that does not conform to the registry.
    Error,
}

impl fmt::Display for DiagnosticSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticSeverity::Info => write!(f, "INFO"),
            DiagnosticSeverity::Warning => write!(f, "WARN"),
            DiagnosticSeverity::Error => write!(f, "ERROR"),
        }
    }
}

/// Identifier of a validation rule.
///
/// Rule names parse ASCII case-insensitively from their variant name, which is also the key used
/// in the `[severity]` table of the analyzer configuration.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
    Serialize,
)]
#[strum(ascii_case_insensitive)]
pub enum RuleId {
    /// The attribute name is not in the registry
    InvalidAttribute,
    /// The value's static type does not match the registered type
    TypeMismatch,
    /// The attribute is experimental or under development
    ExperimentalAttribute,
    /// The attribute is deprecated
    DeprecatedAttribute,
}

impl RuleId {
    /// Severity used when the configuration does not override it
    #[must_use]
    pub fn default_severity(self) -> DiagnosticSeverity {
        match self {
            RuleId::InvalidAttribute | RuleId::TypeMismatch => DiagnosticSeverity::Error,
            RuleId::ExperimentalAttribute => DiagnosticSeverity::Info,
            RuleId::DeprecatedAttribute => DiagnosticSeverity::Warning,
        }
    }

    /// Message template with positional `{0}`, `{1}`, `{2}` placeholders
    #[must_use]
    pub fn template(self) -> &'static str {
        match self {
            RuleId::InvalidAttribute => {
                "Attribute '{0}' is not defined in the telemetry attribute registry"
            }
            RuleId::TypeMismatch => "Attribute '{0}' expects a value of type '{1}' but got '{2}'",
            RuleId::ExperimentalAttribute => {
                "Attribute '{0}' is experimental and may change in future releases"
            }
            RuleId::DeprecatedAttribute => "Attribute '{0}' is deprecated: {1}",
        }
    }

    /// Short human readable title
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            RuleId::InvalidAttribute => "Unknown telemetry attribute",
            RuleId::TypeMismatch => "Telemetry attribute type mismatch",
            RuleId::ExperimentalAttribute => "Experimental telemetry attribute",
            RuleId::DeprecatedAttribute => "Deprecated telemetry attribute",
        }
    }
}

/// A single validation finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// The rule that produced this diagnostic
    pub rule: RuleId,

    /// Effective severity after configuration overrides
    pub severity: DiagnosticSeverity,

    /// Location the diagnostic applies to: the name argument for registry rules, the value
    /// argument for type mismatches
    pub span: SourceSpan,

    /// Positional message arguments
    pub arguments: Vec<String>,

    /// Source unit the diagnostic was found in, set by the analysis session
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

impl Diagnostic {
    /// Creates a diagnostic with the rule's default severity.
    ///
    /// # Arguments
    ///
    /// * `rule` - The rule that was violated
    /// * `span` - Location of the offending expression
    /// * `arguments` - Positional arguments of the rule's message template
    pub fn new(rule: RuleId, span: SourceSpan, arguments: Vec<String>) -> Self {
        Self {
            rule,
            severity: rule.default_severity(),
            span,
            arguments,
            file: None,
        }
    }

    /// Override the severity
    #[must_use]
    pub fn with_severity(mut self, severity: DiagnosticSeverity) -> Self {
        self.severity = severity;
        self
    }

    /// Attach the source unit path
    #[must_use]
    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }

    /// The attribute name this diagnostic is about
    #[must_use]
    pub fn attribute(&self) -> Option<&str> {
        self.arguments.first().map(String::as_str)
    }

    /// Render the rule's template with this diagnostic's arguments.
    ///
    /// Placeholders without a matching argument are left in place.
    #[must_use]
    pub fn message(&self) -> String {
        let template = self.rule.template();
        let mut message = String::with_capacity(template.len());
        let mut rest = template;

        while let Some(open) = rest.find('{') {
            message.push_str(&rest[..open]);
            let after = &rest[open + 1..];
            let placeholder = after.find('}').and_then(|close| {
                let index = after[..close].parse::<usize>().ok()?;
                self.arguments.get(index).map(|argument| (close, argument))
            });

            match placeholder {
                Some((close, argument)) => {
                    message.push_str(argument);
                    rest = &after[close + 1..];
                }
                None => {
                    message.push('{');
                    rest = after;
                }
            }
        }

        message.push_str(rest);
        message
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(file) = &self.file {
            write!(f, "{file}:")?;
        }
        write!(
            f,
            "{}:{}: [{}] {}: {}",
            self.span.line,
            self.span.column,
            self.severity,
            self.rule,
            self.message()
        )
    }
}

/// Thread-safe container for collecting diagnostic entries.
///
/// Uses `boxcar::Vec` internally for lock-free concurrent append operations.
/// Multiple threads can safely add diagnostics simultaneously.
#[derive(Debug)]
pub struct Diagnostics {
    entries: boxcar::Vec<Diagnostic>,
}

impl Default for Diagnostics {
    fn default() -> Self {
        Self::new()
    }
}

impl Diagnostics {
    /// Creates a new empty diagnostics container.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: boxcar::Vec::new(),
        }
    }

    /// Adds a diagnostic entry.
    pub fn push(&self, diagnostic: Diagnostic) {
        self.entries.push(diagnostic);
    }

    /// Adds every diagnostic of an iterator.
    pub fn extend(&self, diagnostics: impl IntoIterator<Item = Diagnostic>) {
        for diagnostic in diagnostics {
            self.entries.push(diagnostic);
        }
    }

    /// Returns the total number of diagnostics.
    pub fn len(&self) -> usize {
        self.entries.count()
    }

    /// Returns true if no diagnostics have been collected.
    pub fn is_empty(&self) -> bool {
        self.entries.count() == 0
    }

    /// Returns true if any error-level diagnostics have been collected.
    pub fn has_errors(&self) -> bool {
        self.entries
            .iter()
            .any(|(_, d)| d.severity == DiagnosticSeverity::Error)
    }

    /// Returns the number of diagnostics with the given severity.
    pub fn count(&self, severity: DiagnosticSeverity) -> usize {
        self.entries
            .iter()
            .filter(|(_, d)| d.severity == severity)
            .count()
    }

    /// Returns an iterator over all diagnostics.
    ///
    /// Note: Uses boxcar's iterator which yields `(index, &Diagnostic)` tuples.
    /// The index is dropped here.
    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter().map(|(_, d)| d)
    }

    /// Returns diagnostics produced by the given rule.
    pub fn by_rule(&self, rule: RuleId) -> Vec<&Diagnostic> {
        self.iter().filter(|d| d.rule == rule).collect()
    }

    /// Consumes the container, returning the diagnostics in insertion order.
    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.entries.into_iter().collect()
    }

    /// Formats a one-line count summary.
    pub fn summary(&self) -> String {
        format!(
            "{} error(s), {} warning(s), {} info(s)",
            self.count(DiagnosticSeverity::Error),
            self.count(DiagnosticSeverity::Warning),
            self.count(DiagnosticSeverity::Info)
        )
    }
}

#[cfg(test)]
mod tests {
    use std::{sync::Arc, thread};

    use strum::IntoEnumIterator;

    use super::*;

    fn invalid(name: &str) -> Diagnostic {
        Diagnostic::new(
            RuleId::InvalidAttribute,
            SourceSpan::new(0, name.len()),
            vec![name.to_string()],
        )
    }

    #[test]
    fn test_default_severities() {
        assert_eq!(
            RuleId::InvalidAttribute.default_severity(),
            DiagnosticSeverity::Error
        );
        assert_eq!(
            RuleId::TypeMismatch.default_severity(),
            DiagnosticSeverity::Error
        );
        assert_eq!(
            RuleId::ExperimentalAttribute.default_severity(),
            DiagnosticSeverity::Info
        );
        assert_eq!(
            RuleId::DeprecatedAttribute.default_severity(),
            DiagnosticSeverity::Warning
        );
    }

    #[test]
    fn test_rule_names() {
        for rule in RuleId::iter() {
            assert_eq!(rule.to_string().parse::<RuleId>().unwrap(), rule);
        }
        assert_eq!(
            "typemismatch".parse::<RuleId>().unwrap(),
            RuleId::TypeMismatch
        );
        assert!("NoSuchRule".parse::<RuleId>().is_err());
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            invalid("myapp.cuont").message(),
            "Attribute 'myapp.cuont' is not defined in the telemetry attribute registry"
        );

        let mismatch = Diagnostic::new(
            RuleId::TypeMismatch,
            SourceSpan::new(5, 9),
            vec!["myapp.count".into(), "int".into(), "string".into()],
        );
        assert_eq!(
            mismatch.message(),
            "Attribute 'myapp.count' expects a value of type 'int' but got 'string'"
        );

        let deprecated = Diagnostic::new(
            RuleId::DeprecatedAttribute,
            SourceSpan::default(),
            vec!["http.method".into(), "Replaced by http.request.method".into()],
        );
        assert_eq!(
            deprecated.message(),
            "Attribute 'http.method' is deprecated: Replaced by http.request.method"
        );

        let experimental = Diagnostic::new(
            RuleId::ExperimentalAttribute,
            SourceSpan::default(),
            vec!["gen_ai.system".into()],
        );
        assert_eq!(
            experimental.message(),
            "Attribute 'gen_ai.system' is experimental and may change in future releases"
        );
    }

    #[test]
    fn test_message_missing_arguments() {
        let mismatch = Diagnostic::new(
            RuleId::TypeMismatch,
            SourceSpan::default(),
            vec!["a".into()],
        );
        assert_eq!(
            mismatch.message(),
            "Attribute 'a' expects a value of type '{1}' but got '{2}'"
        );
    }

    #[test]
    fn test_message_arguments_are_not_reinterpreted() {
        let deprecated = Diagnostic::new(
            RuleId::DeprecatedAttribute,
            SourceSpan::default(),
            vec!["a.{1}".into(), "see {0}".into()],
        );
        assert_eq!(deprecated.message(), "Attribute 'a.{1}' is deprecated: see {0}");
    }

    #[test]
    fn test_display() {
        let mut diagnostic = invalid("x.y").with_file("src/Program.cs");
        diagnostic.span = SourceSpan::new(3, 8).at(12, 5);
        assert_eq!(
            diagnostic.to_string(),
            "src/Program.cs:12:5: [ERROR] InvalidAttribute: Attribute 'x.y' is not defined in the telemetry attribute registry"
        );
    }

    #[test]
    fn test_container_counts() {
        let diagnostics = Diagnostics::new();
        assert!(diagnostics.is_empty());
        assert!(!diagnostics.has_errors());

        diagnostics.push(invalid("a"));
        diagnostics.push(invalid("b").with_severity(DiagnosticSeverity::Warning));
        diagnostics.extend([Diagnostic::new(
            RuleId::ExperimentalAttribute,
            SourceSpan::default(),
            vec!["c".into()],
        )]);

        assert_eq!(diagnostics.len(), 3);
        assert!(diagnostics.has_errors());
        assert_eq!(diagnostics.count(DiagnosticSeverity::Error), 1);
        assert_eq!(diagnostics.count(DiagnosticSeverity::Warning), 1);
        assert_eq!(diagnostics.count(DiagnosticSeverity::Info), 1);
        assert_eq!(diagnostics.by_rule(RuleId::InvalidAttribute).len(), 2);
        assert_eq!(
            diagnostics.summary(),
            "1 error(s), 1 warning(s), 1 info(s)"
        );

        let all = diagnostics.into_vec();
        let attributes: Vec<_> = all.iter().map(Diagnostic::attribute).collect();
        assert_eq!(attributes, vec![Some("a"), Some("b"), Some("c")]);
    }

    #[test]
    fn test_concurrent_push() {
        let diagnostics = Arc::new(Diagnostics::new());

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let diagnostics = Arc::clone(&diagnostics);
                thread::spawn(move || {
                    for j in 0..50 {
                        diagnostics.push(invalid(&format!("attr.{i}.{j}")));
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(diagnostics.len(), 400);
    }
}
