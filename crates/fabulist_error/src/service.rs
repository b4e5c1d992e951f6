//! Errors raised while talking to a generation service.

/// Failure conditions of a single generation call.
///
/// Every kind is treated identically by the retry dispatcher: the call is
/// repeated until the retry budget is spent.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum ServiceErrorKind {
    /// API key not found in environment
    #[display("GEMINI_API_KEY environment variable not set")]
    MissingApiKey,
    /// Network or connectivity failure before a response arrived
    #[display("Request failed: {}", _0)]
    Transport(String),
    /// Non-success HTTP status. The message is the service's own error text
    /// when it provided one, otherwise a generic status description.
    #[display("{}", message)]
    Status {
        /// HTTP status code
        status_code: u16,
        /// Best-known error message
        message: String,
    },
    /// Success status but the payload reports an error or carries no result
    #[display("{}", _0)]
    Application(String),
    /// Response body could not be decoded
    #[display("Failed to decode response: {}", _0)]
    Decode(String),
}

impl ServiceErrorKind {
    /// Build a [`ServiceErrorKind::Status`] from a status code and the
    /// service-provided message, falling back to `Server Error: <status>`.
    pub fn status(status_code: u16, message: Option<String>) -> Self {
        let message = message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| format!("Server Error: {}", status_code));
        ServiceErrorKind::Status {
            status_code,
            message,
        }
    }
}

/// Generation service error with source location tracking.
///
/// # Examples
///
/// ```
/// use fabulist_error::{ServiceError, ServiceErrorKind};
///
/// let err = ServiceError::new(ServiceErrorKind::status(503, None));
/// assert!(format!("{}", err).contains("Server Error: 503"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Service Error: {} at line {} in {}", kind, line, file)]
pub struct ServiceError {
    /// The kind of error that occurred
    pub kind: ServiceErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl ServiceError {
    /// Create a new ServiceError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ServiceErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
