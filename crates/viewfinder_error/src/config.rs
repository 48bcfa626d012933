//! Configuration error types.

/// Configuration error with the offending key (when known) and source location.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Configuration Error: {} at line {} in {}", message, line, file)]
pub struct ConfigError {
    /// Error message
    pub message: String,
    /// Dotted configuration key the error refers to, e.g. `pipeline.poll_attempts`
    pub key: Option<String>,
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
    /// use viewfinder_error::ConfigError;
    ///
    /// let err = ConfigError::new("Failed to build configuration");
    /// assert!(err.key.is_none());
    /// ```
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            key: None,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Create a ConfigError that names the invalid key.
    ///
    /// # Examples
    ///
    /// ```
    /// use viewfinder_error::ConfigError;
    ///
    /// let err = ConfigError::invalid_key("pipeline.poll_attempts", "must be at least 1");
    /// assert_eq!(err.key.as_deref(), Some("pipeline.poll_attempts"));
    /// assert!(err.message.contains("pipeline.poll_attempts"));
    /// ```
    #[track_caller]
    pub fn invalid_key(key: impl Into<String>, reason: impl AsRef<str>) -> Self {
        let key = key.into();
        let location = std::panic::Location::caller();
        Self {
            message: format!("{}: {}", key, reason.as_ref()),
            key: Some(key),
            line: location.line(),
            file: location.file(),
        }
    }
}
