//! Static types of attribute value expressions.
//!
//! The host reports the statically known type of each argument. Because tag-setting APIs usually
//! accept `object`, the host typically sees the value wrapped in an implicit boxing conversion;
//! [`ValueType`] models that wrapping explicitly so the compatibility check can peel it off and
//! inspect the innermost [`ConcreteType`].

use std::{convert::Infallible, fmt, str::FromStr};

use serde::Deserialize;

/// Deepest array nesting parsed structurally. Names with more `[]` suffixes become
/// [`ConcreteType::Named`].
pub const MAX_ARRAY_DEPTH: usize = 32;

/// A concrete, statically known value type.
///
/// The primitive flavors follow the CLI element types (`I1` is a signed 8-bit integer, `R8` a
/// 64-bit float and so on). Display names use the C# keywords, which is also the spelling
/// reported in type mismatch diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "String")]
pub enum ConcreteType {
    /// `bool`
    Boolean,
    /// `char`
    Char,
    /// `sbyte`
    I1,
    /// `byte`
    U1,
    /// `short`
    I2,
    /// `ushort`
    U2,
    /// `int`
    I4,
    /// `uint`
    U4,
    /// `long`
    I8,
    /// `ulong`
    U8,
    /// `nint`, platform sized
    I,
    /// `nuint`, platform sized
    U,
    /// `float`
    R4,
    /// `double`
    R8,
    /// `decimal`
    Decimal,
    /// `string`
    String,
    /// `object`
    Object,
    /// Single-dimensional array of the element type
    Array(Box<ConcreteType>),
    /// Any other type, by display name
    Named(String),
}

impl ConcreteType {
    /// Build an array type of `element`
    #[must_use]
    pub fn array_of(element: ConcreteType) -> Self {
        ConcreteType::Array(Box::new(element))
    }

    /// Check if this is a fixed-width integer flavor (8, 16, 32 or 64 bit, signed or unsigned)
    #[must_use]
    pub fn is_fixed_width_integer(&self) -> bool {
        matches!(
            self,
            ConcreteType::I1
                | ConcreteType::U1
                | ConcreteType::I2
                | ConcreteType::U2
                | ConcreteType::I4
                | ConcreteType::U4
                | ConcreteType::I8
                | ConcreteType::U8
        )
    }

    /// Check if this is a 32-bit or 64-bit floating point flavor
    #[must_use]
    pub fn is_floating_point(&self) -> bool {
        matches!(self, ConcreteType::R4 | ConcreteType::R8)
    }

    /// The element type if this is an array
    #[must_use]
    pub fn element(&self) -> Option<&ConcreteType> {
        match self {
            ConcreteType::Array(element) => Some(element),
            _ => None,
        }
    }

    fn from_keyword(name: &str) -> Option<Self> {
        let flavor = match name {
            "bool" | "Boolean" | "System.Boolean" => ConcreteType::Boolean,
            "char" | "Char" | "System.Char" => ConcreteType::Char,
            "sbyte" | "SByte" | "System.SByte" => ConcreteType::I1,
            "byte" | "Byte" | "System.Byte" => ConcreteType::U1,
            "short" | "Int16" | "System.Int16" => ConcreteType::I2,
            "ushort" | "UInt16" | "System.UInt16" => ConcreteType::U2,
            "int" | "Int32" | "System.Int32" => ConcreteType::I4,
            "uint" | "UInt32" | "System.UInt32" => ConcreteType::U4,
            "long" | "Int64" | "System.Int64" => ConcreteType::I8,
            "ulong" | "UInt64" | "System.UInt64" => ConcreteType::U8,
            "nint" | "IntPtr" | "System.IntPtr" => ConcreteType::I,
            "nuint" | "UIntPtr" | "System.UIntPtr" => ConcreteType::U,
            "float" | "Single" | "System.Single" => ConcreteType::R4,
            "double" | "Double" | "System.Double" => ConcreteType::R8,
            "decimal" | "Decimal" | "System.Decimal" => ConcreteType::Decimal,
            "string" | "String" | "System.String" => ConcreteType::String,
            "object" | "Object" | "System.Object" => ConcreteType::Object,
            _ => return None,
        };
        Some(flavor)
    }
}

impl FromStr for ConcreteType {
    type Err = Infallible;

    /// Parsing is total: C# keywords and CLR names map to their flavor, each trailing `[]` adds an
    /// array level and every other name becomes [`ConcreteType::Named`]. A name nested deeper
    /// than [`MAX_ARRAY_DEPTH`] is kept whole as [`ConcreteType::Named`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();

        let mut element = name;
        let mut depth = 0;
        while let Some(inner) = element.strip_suffix("[]") {
            depth += 1;
            if depth > MAX_ARRAY_DEPTH {
                return Ok(ConcreteType::Named(name.to_string()));
            }
            element = inner.trim_end();
        }

        let mut flavor =
            Self::from_keyword(element).unwrap_or_else(|| ConcreteType::Named(element.to_string()));
        for _ in 0..depth {
            flavor = ConcreteType::array_of(flavor);
        }
        Ok(flavor)
    }
}

impl From<String> for ConcreteType {
    fn from(value: String) -> Self {
        match value.parse() {
            Ok(flavor) => flavor,
            Err(never) => match never {},
        }
    }
}

impl From<&str> for ConcreteType {
    fn from(value: &str) -> Self {
        ConcreteType::from(value.to_string())
    }
}

impl fmt::Display for ConcreteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConcreteType::Boolean => write!(f, "bool"),
            ConcreteType::Char => write!(f, "char"),
            ConcreteType::I1 => write!(f, "sbyte"),
            ConcreteType::U1 => write!(f, "byte"),
            ConcreteType::I2 => write!(f, "short"),
            ConcreteType::U2 => write!(f, "ushort"),
            ConcreteType::I4 => write!(f, "int"),
            ConcreteType::U4 => write!(f, "uint"),
            ConcreteType::I8 => write!(f, "long"),
            ConcreteType::U8 => write!(f, "ulong"),
            ConcreteType::I => write!(f, "nint"),
            ConcreteType::U => write!(f, "nuint"),
            ConcreteType::R4 => write!(f, "float"),
            ConcreteType::R8 => write!(f, "double"),
            ConcreteType::Decimal => write!(f, "decimal"),
            ConcreteType::String => write!(f, "string"),
            ConcreteType::Object => write!(f, "object"),
            ConcreteType::Array(element) => write!(f, "{element}[]"),
            ConcreteType::Named(name) => write!(f, "{name}"),
        }
    }
}

/// The static type of a value expression as reported by the host.
///
/// `Converted` wraps the operand of an implicit or explicit conversion (boxing to `object`,
/// numeric widening to a generic parameter, ...). The converted-to type itself is irrelevant to
/// attribute validation and is therefore not recorded.
///
/// In the facts document a value type is written as `{"direct": "long"}` or
/// `{"converted": {"direct": "long"}}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueType {
    /// The expression's own type
    Direct(ConcreteType),
    /// A conversion wrapped around an operand of the inner type
    Converted(Box<ValueType>),
}

impl ValueType {
    /// Wrap a type in a conversion
    #[must_use]
    pub fn converted(inner: ValueType) -> Self {
        ValueType::Converted(Box::new(inner))
    }

    /// Peel away every conversion layer and return the innermost concrete type
    #[must_use]
    pub fn innermost(&self) -> &ConcreteType {
        match self {
            ValueType::Direct(concrete) => concrete,
            ValueType::Converted(inner) => inner.innermost(),
        }
    }
}

impl From<ConcreteType> for ValueType {
    fn from(concrete: ConcreteType) -> Self {
        ValueType::Direct(concrete)
    }
}
