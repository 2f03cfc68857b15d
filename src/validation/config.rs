//! Analyzer configuration
//!
//! Controls the effective severity of each rule, the tag-setter allow-list and whether call sites
//! are checked in parallel. The configuration can be assembled in code or loaded from a TOML file:
//!
//! ```toml
//! parallel = true
//! extend_default_tag_setters = true
//!
//! [severity]
//! ExperimentalAttribute = "none"
//! DeprecatedAttribute = "error"
//!
//! [[tag_setters]]
//! type = "MyCompany.Tracing.Span"
//! method = "Tag"
//! prefix = false
//! ```

use std::{collections::BTreeMap, collections::HashMap, fs, path::Path, str::FromStr};

use serde::Deserialize;
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

use crate::{
    diagnostics::{DiagnosticSeverity, RuleId},
    validation::{default_tag_setters, TagSetter},
    Error, Result,
};

/// Configured level of a rule.
///
/// Accepted spellings (ASCII case-insensitive): `error`; `warning`, `warn`; `info`, `suggestion`;
/// `none`, `silent`, `hidden`, `off`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, IntoStaticStr)]
#[strum(ascii_case_insensitive)]
pub enum RuleLevel {
    /// Report as error
    #[strum(to_string = "error")]
    Error,
    /// Report as warning
    #[strum(to_string = "warning", serialize = "warn")]
    Warning,
    /// Report as informational message
    #[strum(to_string = "info", serialize = "suggestion")]
    Info,
    /// Do not report at all
    #[strum(
        to_string = "none",
        serialize = "silent",
        serialize = "hidden",
        serialize = "off"
    )]
    None,
}

impl RuleLevel {
    /// Parse a level, reporting unknown spellings as [`Error::InvalidSeverity`]
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSeverity`] if `raw` is not an accepted spelling.
    pub fn parse(raw: &str) -> Result<Self> {
        RuleLevel::from_str(raw.trim()).map_err(|_| Error::InvalidSeverity(raw.to_string()))
    }

    /// The severity diagnostics are reported with, `None` if the rule is suppressed
    #[must_use]
    pub fn severity(self) -> Option<DiagnosticSeverity> {
        match self {
            RuleLevel::Error => Some(DiagnosticSeverity::Error),
            RuleLevel::Warning => Some(DiagnosticSeverity::Warning),
            RuleLevel::Info => Some(DiagnosticSeverity::Info),
            RuleLevel::None => None,
        }
    }
}

impl From<DiagnosticSeverity> for RuleLevel {
    fn from(severity: DiagnosticSeverity) -> Self {
        match severity {
            DiagnosticSeverity::Error => RuleLevel::Error,
            DiagnosticSeverity::Warning => RuleLevel::Warning,
            DiagnosticSeverity::Info => RuleLevel::Info,
        }
    }
}

/// Configuration of the attribute validator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyzerConfig {
    /// Severity overrides per rule, rules without an entry use their default severity
    pub severities: HashMap<RuleId, RuleLevel>,

    /// Calls that are treated as attaching an attribute
    pub tag_setters: Vec<TagSetter>,

    /// Check call sites and source units on the rayon thread pool
    pub parallel: bool,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            severities: HashMap::new(),
            tag_setters: default_tag_setters(),
            parallel: true,
        }
    }
}

impl AnalyzerConfig {
    /// Override the level of a rule
    #[must_use]
    pub fn with_severity(mut self, rule: RuleId, level: RuleLevel) -> Self {
        self.severities.insert(rule, level);
        self
    }

    /// Add an entry to the tag-setter allow-list
    #[must_use]
    pub fn with_tag_setter(mut self, setter: TagSetter) -> Self {
        self.tag_setters.push(setter);
        self
    }

    /// Check everything on the calling thread
    #[must_use]
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// The configured level of a rule
    #[must_use]
    pub fn level(&self, rule: RuleId) -> RuleLevel {
        self.severities
            .get(&rule)
            .copied()
            .unwrap_or_else(|| rule.default_severity().into())
    }

    /// The severity a rule is reported with, `None` if it is suppressed
    #[must_use]
    pub fn severity(&self, rule: RuleId) -> Option<DiagnosticSeverity> {
        self.level(rule).severity()
    }

    /// Parse a configuration from TOML text.
    ///
    /// Missing keys keep their defaults. Tag setters listed in the file are appended to the
    /// built-in allow-list unless `extend_default_tag_setters = false`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] for invalid TOML or unknown keys, [`Error::UnknownRule`] for a
    /// `[severity]` entry naming no rule and [`Error::InvalidSeverity`] for an unknown level.
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let file: ConfigFile = toml::from_str(raw)?;

        let mut config = AnalyzerConfig {
            parallel: file.parallel,
            ..AnalyzerConfig::default()
        };

        if !file.extend_default_tag_setters {
            config.tag_setters.clear();
        }

        for entry in file.tag_setters {
            config.tag_setters.push(if entry.prefix {
                TagSetter::prefix(entry.type_name, entry.method)
            } else {
                TagSetter::exact(entry.type_name, entry.method)
            });
        }

        for (rule, level) in &file.severity {
            let rule =
                RuleId::from_str(rule.trim()).map_err(|_| Error::UnknownRule(rule.clone()))?;
            config.severities.insert(rule, RuleLevel::parse(level)?);
        }

        Ok(config)
    }

    /// Load a configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FileError`] if the file cannot be read, otherwise see
    /// [`AnalyzerConfig::from_toml_str`].
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    #[serde(default = "enabled")]
    parallel: bool,
    #[serde(default = "enabled")]
    extend_default_tag_setters: bool,
    #[serde(default)]
    severity: BTreeMap<String, String>,
    #[serde(default)]
    tag_setters: Vec<TagSetterEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct TagSetterEntry {
    #[serde(rename = "type")]
    type_name: String,
    method: String,
    #[serde(default)]
    prefix: bool,
}

fn enabled() -> bool {
    true
}
