//! Transcript acquisition error types.

/// Ways the conversation capability can fail the acquisition stage.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum AcquisitionErrorKind {
    /// The conversation capability could not be reached
    #[display("Conversation service unavailable: {}", _0)]
    Unavailable(String),
    /// The conversation reached a terminal failure status
    #[display("Conversation '{}' ended with a failed status", _0)]
    Failed(String),
    /// Polling budget exhausted without a terminal status
    #[display("Conversation '{}' not ready after {} attempts ({} ms)", conversation_id, attempts, waited_ms)]
    Timeout {
        /// Conversation being polled
        conversation_id: String,
        /// Number of queries issued
        attempts: u32,
        /// Total time spent waiting between queries
        waited_ms: u64,
    },
}

/// Acquisition error with location tracking.
///
/// # Examples
///
/// ```
/// use viewfinder_error::{AcquisitionError, AcquisitionErrorKind};
///
/// let err = AcquisitionError::new(AcquisitionErrorKind::Timeout {
///     conversation_id: "conv_1".into(),
///     attempts: 30,
///     waited_ms: 60_000,
/// });
/// assert!(format!("{}", err).contains("after 30 attempts"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Acquisition Error: {} at line {} in {}", kind, line, file)]
pub struct AcquisitionError {
    /// The specific error condition
    pub kind: AcquisitionErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl AcquisitionError {
    /// Create a new AcquisitionError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: AcquisitionErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
