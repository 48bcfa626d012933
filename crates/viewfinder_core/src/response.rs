//! Response envelope and wire-level error taxonomy.

use crate::{LocationCandidate, PlanningContext, ShotPlan};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use viewfinder_error::{
    AcquisitionErrorKind, GenerationErrorKind, InputErrorKind, ViewfinderError,
    ViewfinderErrorKind,
};

/// Pipeline stage names, as reported in failure envelopes and logs.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display, strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Stage {
    /// Request validation, before any stage runs
    Request,
    /// Transcript acquisition
    Transcript,
    /// Planning context extraction
    Context,
    /// Location generation
    Locations,
    /// Shot plan generation
    Shots,
    /// Image fan-out
    Images,
}

/// Error categories surfaced to callers.
///
/// # Examples
///
/// ```
/// use viewfinder_core::ErrorKind;
/// use viewfinder_error::{InputError, InputErrorKind, ViewfinderError};
///
/// let err: ViewfinderError = InputError::new(InputErrorKind::NoTranscriptSource).into();
/// assert_eq!(ErrorKind::classify(&err), ErrorKind::InvalidInput);
/// assert_eq!(ErrorKind::InvalidInput.to_string(), "invalid-input");
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display, strum::EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum ErrorKind {
    /// The request itself is malformed
    InvalidInput,
    /// The transcript has nothing to work with
    NoUsableContent,
    /// A required capability could not be reached
    UpstreamUnavailable,
    /// The conversation ended in a failed state
    UpstreamFailed,
    /// The conversation never reached a terminal state
    UpstreamTimeout,
    /// Structured generation produced nothing usable
    GenerationFailed,
}

impl ErrorKind {
    /// Map an internal error onto the caller-facing category.
    pub fn classify(error: &ViewfinderError) -> Self {
        match error.kind() {
            ViewfinderErrorKind::Input(e) => match e.kind {
                InputErrorKind::NoUsableContent(_) => ErrorKind::NoUsableContent,
                _ => ErrorKind::InvalidInput,
            },
            ViewfinderErrorKind::Acquisition(e) => match e.kind {
                AcquisitionErrorKind::Unavailable(_) => ErrorKind::UpstreamUnavailable,
                AcquisitionErrorKind::Failed(_) => ErrorKind::UpstreamFailed,
                AcquisitionErrorKind::Timeout { .. } => ErrorKind::UpstreamTimeout,
            },
            ViewfinderErrorKind::Generation(e) => match e.kind {
                GenerationErrorKind::Unavailable(_) => ErrorKind::UpstreamUnavailable,
                _ => ErrorKind::GenerationFailed,
            },
            ViewfinderErrorKind::Json(_) => ErrorKind::GenerationFailed,
            ViewfinderErrorKind::Config(_) => ErrorKind::InvalidInput,
            ViewfinderErrorKind::Http(_)
            | ViewfinderErrorKind::Provider(_)
            | ViewfinderErrorKind::Image(_)
            | ViewfinderErrorKind::Storage(_) => ErrorKind::UpstreamUnavailable,
        }
    }
}

/// Whatever a run produced, stage by stage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineOutputs {
    /// Planning context, if the context stage ran
    pub context: Option<PlanningContext>,
    /// Locations, if the locations stage ran
    pub locations: Option<Vec<LocationCandidate>>,
    /// Shots, if the shots stage ran
    pub shots: Option<Vec<ShotPlan>>,
}

/// Body of a successful envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSuccess {
    success: bool,
    /// Planning context
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<PlanningContext>,
    /// Location candidates
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locations: Option<Vec<LocationCandidate>>,
    /// Shot plans
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shots: Option<Vec<ShotPlan>>,
    /// When the envelope was assembled
    pub timestamp: DateTime<Utc>,
}

/// Body of a failure envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionFailure {
    success: bool,
    /// Error category
    pub error_kind: ErrorKind,
    /// Human-readable description
    pub message: String,
    /// Stage that failed
    pub stage: Stage,
    /// When the envelope was assembled
    pub timestamp: DateTime<Utc>,
}

/// The single response of a pipeline invocation.
///
/// # Examples
///
/// ```
/// use viewfinder_core::{ErrorKind, SessionResponse, Stage};
///
/// let response = SessionResponse::failure(ErrorKind::UpstreamTimeout, "not ready", Stage::Transcript);
/// let json = serde_json::to_value(&response).unwrap();
///
/// assert_eq!(json["success"], false);
/// assert_eq!(json["errorKind"], "upstream-timeout");
/// assert_eq!(json["stage"], "transcript");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SessionResponse {
    /// Every requested stage produced an output
    Success(SessionSuccess),
    /// A stage failed fatally
    Failure(SessionFailure),
}

impl SessionResponse {
    /// Success envelope stamped with the current time.
    pub fn success(outputs: PipelineOutputs) -> Self {
        SessionResponse::Success(SessionSuccess {
            success: true,
            context: outputs.context,
            locations: outputs.locations,
            shots: outputs.shots,
            timestamp: Utc::now(),
        })
    }

    /// Failure envelope stamped with the current time.
    pub fn failure(error_kind: ErrorKind, message: impl Into<String>, stage: Stage) -> Self {
        SessionResponse::Failure(SessionFailure {
            success: false,
            error_kind,
            message: message.into(),
            stage,
            timestamp: Utc::now(),
        })
    }

    /// Failure envelope for an internal error raised at `stage`.
    pub fn from_error(error: &ViewfinderError, stage: Stage) -> Self {
        Self::failure(ErrorKind::classify(error), error.summary(), stage)
    }

    /// Whether this is a success envelope.
    pub fn is_success(&self) -> bool {
        matches!(self, SessionResponse::Success(_))
    }

    /// The success body, if any.
    pub fn as_success(&self) -> Option<&SessionSuccess> {
        match self {
            SessionResponse::Success(success) => Some(success),
            SessionResponse::Failure(_) => None,
        }
    }

    /// The failure body, if any.
    pub fn as_failure(&self) -> Option<&SessionFailure> {
        match self {
            SessionResponse::Success(_) => None,
            SessionResponse::Failure(failure) => Some(failure),
        }
    }
}
