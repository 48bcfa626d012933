//! HTTP transport error types.

/// Transport-level HTTP failure (connection refused, TLS, body read) with source location.
///
/// Status-code failures returned by a remote API are [`crate::ProviderError`]s instead;
/// this type covers requests that never produced a usable response.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("HTTP Error: {} ({}) at line {} in {}", message, url, line, file)]
pub struct HttpError {
    /// The underlying error message
    pub message: String,
    /// Endpoint that was being contacted, or `"<unknown>"`
    pub url: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl HttpError {
    /// Create a new HttpError with the given message at the current location.
    ///
    /// # Examples
    ///
    /// ```
    /// use viewfinder_error::HttpError;
    ///
    /// let err = HttpError::new("Connection refused");
    /// assert!(err.message.contains("Connection refused"));
    /// assert_eq!(err.url, "<unknown>");
    /// ```
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        Self::for_url("<unknown>", message)
    }

    /// Create an HttpError for a request against a specific endpoint.
    ///
    /// # Examples
    ///
    /// ```
    /// use viewfinder_error::HttpError;
    ///
    /// let err = HttpError::for_url("https://api.example.com/v1", "timed out");
    /// assert!(format!("{}", err).contains("api.example.com"));
    /// ```
    #[track_caller]
    pub fn for_url(url: impl Into<String>, message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            url: url.into(),
            line: location.line(),
            file: location.file(),
        }
    }
}
