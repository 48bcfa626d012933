//! Structured generation error types.

/// Failure modes of a schema-guided generation attempt.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum GenerationErrorKind {
    /// The generation capability returned an error instead of text
    #[display("Generation capability unavailable: {}", _0)]
    Unavailable(String),
    /// The returned text could not be parsed as JSON, even leniently
    #[display("Unparseable output: {}", _0)]
    Unparseable(String),
    /// The output parsed but violated the schema or a stage invariant
    #[display("Invalid output: {}", _0)]
    Invalid(String),
    /// All attempts failed and the stage has no safe default
    #[display("Stage '{}' failed after {} attempts: {}", stage, attempts, reason)]
    Exhausted {
        /// Stage name
        stage: String,
        /// Attempts made
        attempts: u32,
        /// Last failure observed
        reason: String,
    },
}

/// Generation error with location tracking.
///
/// # Examples
///
/// ```
/// use viewfinder_error::{GenerationError, GenerationErrorKind};
///
/// let err = GenerationError::new(GenerationErrorKind::Unparseable("no JSON found".into()));
/// assert!(format!("{}", err).contains("Unparseable"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Generation Error: {} at line {} in {}", kind, line, file)]
pub struct GenerationError {
    /// The specific error condition
    pub kind: GenerationErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl GenerationError {
    /// Create a new GenerationError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: GenerationErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
