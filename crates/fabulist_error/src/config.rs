//! Configuration loading errors.

/// Configuration error with source location.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Configuration Error: {} at line {} in {}", message, line, file)]
pub struct ConfigError {
    /// Error message
    pub message: String,
    /// Configuration file involved, when known
    pub path: Option<String>,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl ConfigError {
    /// Create a new ConfigError with the given message at the current location.
    ///
    /// # Examples
    ///
    /// ```
    /// use fabulist_error::ConfigError;
    ///
    /// let err = ConfigError::new("retry.backoff_multiplier must be at least 1.0");
    /// assert!(err.message.contains("backoff_multiplier"));
    /// assert!(err.path.is_none());
    /// ```
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            path: None,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Attach the path of the configuration file that failed.
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }
}
