//! Errors for generation output that does not match its contract.

/// Ways a generated payload can fail structural validation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum MalformedResponseErrorKind {
    /// Output is not valid JSON
    #[display("Failed to read the story data: {}", _0)]
    InvalidJson(String),
    /// Output parsed but is not a JSON object
    #[display("Expected a JSON object for the {} response", _0)]
    NotAnObject(&'static str),
    /// A required field is absent or null
    #[display("The {} response is missing required field '{}'", shape, field)]
    MissingField {
        /// Response shape being validated
        shape: &'static str,
        /// Name of the missing field
        field: &'static str,
    },
    /// A field is present but has the wrong type
    #[display("The {} response has an invalid '{}' field: {}", shape, field, message)]
    InvalidField {
        /// Response shape being validated
        shape: &'static str,
        /// Name of the offending field
        field: String,
        /// Decoder message
        message: String,
    },
}

/// Malformed generation output with source location tracking.
///
/// # Examples
///
/// ```
/// use fabulist_error::{MalformedResponseError, MalformedResponseErrorKind};
///
/// let err = MalformedResponseError::new(MalformedResponseErrorKind::MissingField {
///     shape: "step",
///     field: "imagePrompt",
/// });
/// assert!(format!("{}", err).contains("imagePrompt"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Malformed Response: {} at line {} in {}", kind, line, file)]
pub struct MalformedResponseError {
    /// The specific error condition
    pub kind: MalformedResponseErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl MalformedResponseError {
    /// Create a new MalformedResponseError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: MalformedResponseErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
