use thiserror::Error;

macro_rules! malformed_error {
    // Single string version
    ($msg:expr) => {
        crate::Error::Malformed {
            message: $msg.to_string(),
            file: file!(),
            line: line!(),
        }
    };

    // Format string with arguments version
    ($fmt:expr, $($arg:tt)*) => {
        crate::Error::Malformed {
            message: format!($fmt, $($arg)*),
            file: file!(),
            line: line!(),
        }
    };
}

/// The generic Error type, which provides coverage for all errors this library can potentially
/// return.
///
/// Analysis itself never fails: a broken metadata document degrades to "no registry", and an
/// expression that cannot be resolved statically degrades to a skipped check. The variants below
/// are only produced by the explicit loaders for metadata documents, host fact documents and
/// analyzer configuration files.
///
/// # Error Categories
///
/// ## Input Documents
/// - [`Error::Metadata`] - The attribute metadata document could not be decoded
/// - [`Error::Facts`] - The host facts document could not be decoded
/// - [`Error::Malformed`] - A document decoded but is structurally unusable
///
/// ## Configuration
/// - [`Error::Config`] - The analyzer configuration file is not valid TOML
/// - [`Error::UnknownRule`] - A severity override names a rule that does not exist
/// - [`Error::InvalidSeverity`] - A severity override uses an unknown level
///
/// ## I/O
/// - [`Error::FileError`] - Filesystem I/O errors
///
/// # Examples
///
/// ```rust
/// use tagscope::{Error, validation::AnalyzerConfig};
///
/// match AnalyzerConfig::from_toml_str("[severity]\nNoSuchRule = \"error\"") {
///     Ok(_) => unreachable!(),
///     Err(Error::UnknownRule(rule)) => assert_eq!(rule, "NoSuchRule"),
///     Err(e) => panic!("unexpected error: {e}"),
/// }
/// ```
#[derive(Error, Debug)]
pub enum Error {
    /// A document was decoded but its structure is unusable.
    ///
    /// The error includes the source location where the problem was detected for
    /// debugging purposes.
    ///
    /// # Fields
    ///
    /// * `message` - Detailed description of what was malformed
    /// * `file` - Source file where the error was detected
    /// * `line` - Source line where the error was detected
    #[error("Malformed - {file}:{line}: {message}")]
    Malformed {
        /// The message to be printed for the Malformed error
        message: String,
        /// The source file in which this error occured
        file: &'static str,
        /// The source line in which this error occured
        line: u32,
    },

    /// File I/O error.
    ///
    /// Wraps standard I/O errors that can occur while reading documents or
    /// configuration files from disk.
    #[error("{0}")]
    FileError(#[from] std::io::Error),

    /// The attribute metadata document is not valid JSON or has fields of the wrong kind.
    ///
    /// [`crate::registry::AttributeRegistry::build`] maps this error to the absent registry
    /// state, so it is only observable through [`crate::registry::MetadataDocument::parse`].
    #[error("Invalid attribute metadata document - {0}")]
    Metadata(serde_json::Error),

    /// The host facts document (call sites per source unit) could not be decoded.
    #[error("Invalid facts document - {0}")]
    Facts(serde_json::Error),

    /// The analyzer configuration file is not valid TOML or does not match the
    /// expected layout.
    #[error("Invalid analyzer configuration - {0}")]
    Config(#[from] toml::de::Error),

    /// A severity override references a rule identifier that does not exist.
    #[error("Unknown rule identifier - {0}")]
    UnknownRule(String),

    /// A severity override uses a level that is not one of
    /// `error`, `warning`, `info` or `none`.
    #[error("Invalid severity level - {0}")]
    InvalidSeverity(String),
}
