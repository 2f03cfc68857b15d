//! # tagscope Prelude
//!
//! This module provides a convenient prelude for the most commonly used types and traits
//! from the tagscope library.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all tagscope operations
pub use crate::Error;

/// The result type used throughout tagscope
pub use crate::Result;

// ================================================================================================
// Main Entry Points
// ================================================================================================

/// Session owning the registry and configuration of one compilation
pub use crate::session::AnalysisSession;

/// Validator and its configuration
pub use crate::validation::{validate, AnalyzerConfig, RuleLevel, TagSetter, TypeMatch, Validator};

// ================================================================================================
// Registry
// ================================================================================================

/// Attribute registry and definitions
pub use crate::registry::{
    AttributeDefinition, AttributeDefinitionRc, AttributeRegistry, StabilityTag, TypeTag,
};

// ================================================================================================
// Host Facts
// ================================================================================================

/// Call sites, expressions and static types supplied by the host
pub use crate::host::{
    Argument, CallSite, ConcreteType, ConstantValue, Expression, FactsDocument, SemanticModel,
    SourceSpan, SourceUnit, ValueType,
};

// ================================================================================================
// Diagnostics
// ================================================================================================

/// Validation findings
pub use crate::diagnostics::{Diagnostic, DiagnosticSeverity, Diagnostics, RuleId};
