//! Declared type and stability tags of registered attributes.
//!
//! Both tags are parsed from the free-form strings found in the metadata document. Parsing is
//! total: strings outside the modelled set fall back to [`TypeTag::Unknown`] and
//! [`StabilityTag::Unspecified`] respectively, so a registry can always be built.

use strum::{Display, EnumIter, EnumString, IntoStaticStr};

/// The abstract value type recorded for an attribute in the registry.
///
/// The [`Display`](std::fmt::Display) form is the canonical lowercase spelling used by the
/// metadata document (`int`, `string[]`, ...), which is also the spelling reported in
/// [`crate::diagnostics::RuleId::TypeMismatch`] diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, IntoStaticStr)]
#[strum(ascii_case_insensitive)]
pub enum TypeTag {
    /// A single string value
    #[strum(serialize = "string")]
    String,
    /// A single integer value of any fixed width
    #[strum(serialize = "int")]
    Int,
    /// A single floating-point value
    #[strum(serialize = "double")]
    Double,
    /// A single boolean value
    #[strum(serialize = "boolean")]
    Boolean,
    /// An array of strings
    #[strum(serialize = "string[]")]
    StringArray,
    /// An array of integers
    #[strum(serialize = "int[]")]
    IntArray,
    /// An array of floating-point values
    #[strum(serialize = "double[]")]
    DoubleArray,
    /// An array of booleans
    #[strum(serialize = "boolean[]")]
    BooleanArray,
    /// Any declared type the compatibility matrix does not model (templates, `any`, ...)
    #[strum(serialize = "unknown")]
    Unknown,
}

impl TypeTag {
    /// Parse the `type` field of a metadata record.
    ///
    /// Matching is ASCII case-insensitive and ignores surrounding whitespace. Every value that is
    /// not one of the eight modelled spellings yields [`TypeTag::Unknown`].
    #[must_use]
    pub fn from_declared(raw: &str) -> Self {
        raw.trim().parse().unwrap_or(TypeTag::Unknown)
    }

    /// Returns `true` for the four array tags
    #[must_use]
    pub fn is_array(self) -> bool {
        self.element().is_some()
    }

    /// The scalar tag of an array tag's elements, `None` for scalar and unknown tags
    #[must_use]
    pub fn element(self) -> Option<TypeTag> {
        match self {
            TypeTag::StringArray => Some(TypeTag::String),
            TypeTag::IntArray => Some(TypeTag::Int),
            TypeTag::DoubleArray => Some(TypeTag::Double),
            TypeTag::BooleanArray => Some(TypeTag::Boolean),
            _ => None,
        }
    }
}

/// Maturity classification of a registered attribute.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString, EnumIter, IntoStaticStr,
)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
pub enum StabilityTag {
    /// The attribute is stable. This is the default when the record omits the field.
    #[default]
    Stable,
    /// The attribute is experimental and may change
    Experimental,
    /// The attribute is under active development
    Development,
    /// A stability value outside the modelled set
    Unspecified,
}

impl StabilityTag {
    /// Parse the `stability` field of a metadata record.
    ///
    /// Unrecognised values such as `release_candidate` map to [`StabilityTag::Unspecified`].
    #[must_use]
    pub fn from_declared(raw: &str) -> Self {
        raw.trim().parse().unwrap_or(StabilityTag::Unspecified)
    }

    /// Whether usage of an attribute with this stability is reported as experimental
    #[must_use]
    pub fn is_experimental(self) -> bool {
        matches!(self, StabilityTag::Experimental | StabilityTag::Development)
    }
}
