//! Tagged result of a single pipeline stage.

use viewfinder_core::ErrorKind;
use viewfinder_error::{ViewfinderError, ViewfinderResult};

/// What a stage produced.
///
/// Recoverable failures never surface to the caller; they are resolved to a
/// documented default and recorded here only so they can be logged.
#[derive(Debug)]
pub enum StageOutcome<T> {
    /// Generated output that passed validation
    Ok(T),
    /// Documented default substituted after the stage failed
    RecoverableDefault {
        /// The substituted value
        value: T,
        /// Last failure observed before substitution
        reason: String,
    },
    /// Unrecoverable failure; later stages must not run
    Fatal(ViewfinderError),
}

impl<T> StageOutcome<T> {
    /// Whether a default was substituted.
    pub fn is_default(&self) -> bool {
        matches!(self, StageOutcome::RecoverableDefault { .. })
    }

    /// Whether the stage failed fatally.
    pub fn is_fatal(&self) -> bool {
        matches!(self, StageOutcome::Fatal(_))
    }

    /// Caller-facing category of a fatal outcome.
    pub fn error_kind(&self) -> Option<ErrorKind> {
        match self {
            StageOutcome::Fatal(e) => Some(ErrorKind::classify(e)),
            _ => None,
        }
    }

    /// Short label for logs.
    pub fn label(&self) -> &'static str {
        match self {
            StageOutcome::Ok(_) => "generated",
            StageOutcome::RecoverableDefault { .. } => "default",
            StageOutcome::Fatal(_) => "fatal",
        }
    }

    /// Collapse into a value, treating defaults as success.
    ///
    /// # Errors
    ///
    /// Returns the fatal error, if any.
    pub fn into_result(self) -> ViewfinderResult<T> {
        match self {
            StageOutcome::Ok(value) | StageOutcome::RecoverableDefault { value, .. } => Ok(value),
            StageOutcome::Fatal(e) => Err(e),
        }
    }
}
