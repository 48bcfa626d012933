//! Request validation error types.

/// Reasons a session request is rejected before (or instead of) running stages.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum InputErrorKind {
    /// None of conversation id, transcript or intake form was supplied
    #[display("No transcript source supplied: provide a conversation id, transcript or intake form")]
    NoTranscriptSource,
    /// More than one transcript source was supplied
    #[display("Exactly one transcript source is allowed, got {}", _0)]
    MultipleTranscriptSources(usize),
    /// The transcript has no utterance with non-whitespace content
    #[display("No usable content in {}", _0)]
    NoUsableContent(String),
    /// Some other part of the request is malformed
    #[display("Invalid request: {}", _0)]
    InvalidRequest(String),
}

/// Request validation error with location tracking.
///
/// # Examples
///
/// ```
/// use viewfinder_error::{InputError, InputErrorKind};
///
/// let err = InputError::new(InputErrorKind::NoUsableContent("transcript".into()));
/// assert!(format!("{}", err).contains("No usable content"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Input Error: {} at line {} in {}", kind, line, file)]
pub struct InputError {
    /// The specific error condition
    pub kind: InputErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl InputError {
    /// Create a new InputError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: InputErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
