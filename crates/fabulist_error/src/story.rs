//! Story lifecycle errors.

/// Actions the story state machine refuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum StoryErrorKind {
    /// User input was empty after trimming
    #[display("Choice cannot be empty")]
    EmptyInput,
    /// Another operation is still in flight
    #[display("A story step is already in progress")]
    StepInFlight,
    /// The story has ended; only browsing remains
    #[display("The story has come to an end")]
    GameOver,
    /// A choice was submitted before the story started
    #[display("The story has not been started")]
    NotStarted,
    /// The story was started twice
    #[display("The story has already been started")]
    AlreadyStarted,
    /// The session failed before its first page and must be restarted
    #[display("The story could not be initialized; start over")]
    RestartRequired,
}

/// Story lifecycle error with source location tracking.
///
/// # Examples
///
/// ```
/// use fabulist_error::{StoryError, StoryErrorKind};
///
/// let err = StoryError::new(StoryErrorKind::StepInFlight);
/// assert_eq!(err.kind, StoryErrorKind::StepInFlight);
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Story Error: {} at line {} in {}", kind, line, file)]
pub struct StoryError {
    /// The specific error condition
    pub kind: StoryErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl StoryError {
    /// Create a new StoryError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: StoryErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
