//! Top-level error wrapper types.

use crate::{BuilderError, ConfigError, MalformedResponseError, ServiceError, StoryError};

/// Every error a Fabulist operation can surface.
///
/// # Examples
///
/// ```
/// use fabulist_error::{FabulistError, FabulistErrorKind, StoryError, StoryErrorKind};
///
/// let err: FabulistError = StoryError::new(StoryErrorKind::GameOver).into();
/// assert!(matches!(err.kind(), FabulistErrorKind::Story(_)));
/// assert!(format!("{}", err).contains("Story Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum FabulistErrorKind {
    /// Generation service call failed
    #[from(ServiceError)]
    Service(ServiceError),
    /// Generation output did not match its contract
    #[from(MalformedResponseError)]
    MalformedResponse(MalformedResponseError),
    /// Story state machine rejected the action
    #[from(StoryError)]
    Story(StoryError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Builder error
    #[from(BuilderError)]
    Builder(BuilderError),
}

/// Fabulist error with kind discrimination.
///
/// # Examples
///
/// ```
/// use fabulist_error::{ConfigError, FabulistResult};
///
/// fn might_fail() -> FabulistResult<()> {
///     Err(ConfigError::new("Missing field"))?
/// }
///
/// assert!(might_fail().is_err());
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Fabulist Error: {}", _0)]
pub struct FabulistError(Box<FabulistErrorKind>);

impl FabulistError {
    /// Create a new error from a kind.
    pub fn new(kind: FabulistErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &FabulistErrorKind {
        &self.0
    }

    /// Message suitable for showing to a reader, without source locations.
    pub fn user_message(&self) -> String {
        match self.kind() {
            FabulistErrorKind::Service(e) => e.kind.to_string(),
            FabulistErrorKind::MalformedResponse(e) => e.kind.to_string(),
            FabulistErrorKind::Story(e) => e.kind.to_string(),
            FabulistErrorKind::Config(e) => e.message.clone(),
            FabulistErrorKind::Builder(e) => e.kind().to_string(),
        }
    }

    /// True when the generation output failed structural validation.
    pub fn is_malformed_response(&self) -> bool {
        matches!(self.kind(), FabulistErrorKind::MalformedResponse(_))
    }
}

// Generic From implementation for any type that converts to FabulistErrorKind
impl<T> From<T> for FabulistError
where
    T: Into<FabulistErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Fabulist operations.
pub type FabulistResult<T> = std::result::Result<T, FabulistError>;
