//! Raw form of the attribute metadata document.
//!
//! The document is produced by an external generator and is treated as structurally loose: every
//! field is optional, unknown fields are ignored and field names are matched case-insensitively.
//! Case-insensitivity is implemented by lowercasing every object key of the decoded JSON tree
//! before the typed decode, so `Attribute_Name`, `ATTRIBUTE_NAME` and `attribute_name` all land
//! in [`AttributeRecord::attribute_name`].
//!
//! # Document Layout
//!
//! ```json
//! {
//!   "version": "1.26.0",
//!   "attributes": [
//!     {
//!       "attribute_name": "http.request.method",
//!       "constant_name": "HttpRequestMethod",
//!       "type": "string",
//!       "stability": "stable"
//!     },
//!     {
//!       "attribute_name": "http.method",
//!       "type": "string",
//!       "deprecated": "Replaced by `http.request.method`."
//!     }
//!   ]
//! }
//! ```

use serde::Deserialize;
use serde_json::Value;

use crate::{Error, Result};

/// Top-level metadata document.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct MetadataDocument {
    /// Opaque provenance tag of the document
    pub version: Option<String>,
    /// Attribute records; `None` when the list is absent or `null`
    pub attributes: Option<Vec<Option<AttributeRecord>>>,
}

/// One attribute record as it appears in the document, before defaults are applied.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AttributeRecord {
    /// Dotted attribute name, e.g. `http.request.method`
    pub attribute_name: Option<String>,
    /// Symbolic alias used by generated code
    pub constant_name: Option<String>,
    /// Declared type, e.g. `int` or `string[]`
    #[serde(rename = "type")]
    pub type_name: Option<String>,
    /// Stability classification
    pub stability: Option<String>,
    /// Deprecation note with replacement guidance
    pub deprecated: Option<String>,
}

impl MetadataDocument {
    /// Decode a metadata document from its JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Metadata`] if the text is not valid JSON, if the top-level value is not an
    /// object, or if a known field holds a value of the wrong kind (for example a numeric
    /// `attribute_name`).
    pub fn parse(raw: &str) -> Result<Self> {
        let tree: Value = serde_json::from_str(raw).map_err(Error::Metadata)?;
        serde_json::from_value(lowercase_keys(tree)).map_err(Error::Metadata)
    }
}

fn lowercase_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, value)| (key.to_ascii_lowercase(), lowercase_keys(value)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(lowercase_keys).collect()),
        other => other,
    }
}
