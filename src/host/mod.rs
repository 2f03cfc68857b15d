//! Facts supplied by the host compiler front end.
//!
//! tagscope does not parse source code. The host (a compiler plugin, an IDE extension or a
//! pre-computed facts file) hands over every method invocation of a source unit together with the
//! shape and static type of each argument. This module defines that contract.
//!
//! # Key Components
//!
//! - [`SemanticModel`] - Read-only view of one analyzed source unit
//! - [`CallSite`] / [`Argument`] / [`Expression`] - Invocation facts
//! - [`ValueType`] / [`ConcreteType`] - Static types of argument expressions
//! - [`SourceUnit`] / [`FactsDocument`] - Owned implementation and its JSON form
//!
//! # Facts Document
//!
//! ```json
//! {
//!   "files": [{
//!     "path": "src/Checkout.cs",
//!     "call_sites": [{
//!       "callee_type": "System.Diagnostics.Activity",
//!       "callee_method": "SetTag",
//!       "arguments": [
//!         {"span": {"start": 120, "end": 133, "line": 8, "column": 21},
//!          "expression": {"kind": "literal", "value": "myapp.count"}},
//!         {"span": {"start": 135, "end": 140, "line": 8, "column": 36},
//!          "expression": {"kind": "local_reference", "name": "count"},
//!          "type": {"converted": {"direct": "long"}}}
//!       ]
//!     }]
//!   }]
//! }
//! ```

mod call;
mod types;

pub use call::{Argument, CallSite, ConstantValue, Expression, SourceSpan};
pub use types::{ConcreteType, ValueType, MAX_ARRAY_DEPTH};

use serde::Deserialize;

use crate::{Error, Result};

/// Read-only semantic services for one source unit.
///
/// Implementations must be safe to query from several threads at once, since the session may
/// analyze multiple units in parallel.
pub trait SemanticModel: Send + Sync {
    /// Path or identifier of the source unit, attached to every diagnostic
    fn path(&self) -> &str;

    /// All method invocations found in the unit
    fn call_sites(&self) -> &[CallSite];
}

/// An owned source unit with pre-computed call sites.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SourceUnit {
    /// Path of the unit
    pub path: String,
    /// Invocations in the unit
    #[serde(default)]
    pub call_sites: Vec<CallSite>,
}

impl SourceUnit {
    /// Create a unit from its path and call sites
    pub fn new(path: impl Into<String>, call_sites: Vec<CallSite>) -> Self {
        Self {
            path: path.into(),
            call_sites,
        }
    }
}

impl SemanticModel for SourceUnit {
    fn path(&self) -> &str {
        &self.path
    }

    fn call_sites(&self) -> &[CallSite] {
        &self.call_sites
    }
}

/// The facts of a whole project, one [`SourceUnit`] per file.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct FactsDocument {
    /// Analyzed source units
    #[serde(default)]
    pub files: Vec<SourceUnit>,
}

impl FactsDocument {
    /// Decode a facts document from its JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Facts`] if the text is not a valid facts document, or
    /// [`Error::Malformed`] if an argument span ends before it starts.
    pub fn parse(raw: &str) -> Result<Self> {
        let document: FactsDocument = serde_json::from_str(raw).map_err(Error::Facts)?;

        for unit in &document.files {
            for argument in unit.call_sites.iter().flat_map(|call| &call.arguments) {
                if argument.span.end < argument.span.start {
                    return Err(malformed_error!(
                        "{}: span {}..{} ends before it starts",
                        unit.path,
                        argument.span.start,
                        argument.span.end
                    ));
                }
            }
        }

        Ok(document)
    }

    /// Number of call sites across all units
    #[must_use]
    pub fn call_site_count(&self) -> usize {
        self.files.iter().map(|unit| unit.call_sites.len()).sum()
    }
}
