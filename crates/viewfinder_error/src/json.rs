//! JSON error types.

/// Number of characters of the offending payload kept for diagnostics.
const PREVIEW_CHARS: usize = 120;

/// JSON serialization/deserialization error with a payload preview and source location.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("JSON Error: {} (payload: {:?}) at line {} in {}", message, preview, line, file)]
pub struct JsonError {
    /// The underlying error message
    pub message: String,
    /// Leading characters of the payload that failed, empty when not applicable
    pub preview: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl JsonError {
    /// Create a new JsonError with the given message at the current location.
    ///
    /// # Examples
    ///
    /// ```
    /// use viewfinder_error::JsonError;
    ///
    /// let err = JsonError::new("Invalid JSON syntax in response envelope");
    /// assert!(err.message.contains("Invalid JSON"));
    /// assert!(err.preview.is_empty());
    /// ```
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        Self::with_payload(message, "")
    }

    /// Create a JsonError that remembers the start of the payload that failed to parse.
    ///
    /// # Examples
    ///
    /// ```
    /// use viewfinder_error::JsonError;
    ///
    /// let payload = "x".repeat(500);
    /// let err = JsonError::with_payload("expected value", &payload);
    /// assert_eq!(err.preview.chars().count(), 120);
    /// ```
    #[track_caller]
    pub fn with_payload(message: impl Into<String>, payload: &str) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            preview: payload.chars().take(PREVIEW_CHARS).collect(),
            line: location.line(),
            file: location.file(),
        }
    }
}
