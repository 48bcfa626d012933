//! Session requests.

use crate::{IntakeForm, LocationCandidate, PlanningContext};
use serde::{Deserialize, Serialize};
use viewfinder_error::{InputError, InputErrorKind};

/// Which outputs a session should produce.
///
/// Each selector implies its upstream stages: `shots` needs locations,
/// `locations` needs a context.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum StageSelector {
    /// Planning context only
    Context,
    /// Context and locations
    Locations,
    /// Context, locations and shots
    Shots,
    /// Every stage, always recomputed from the transcript
    #[default]
    Full,
}

impl StageSelector {
    /// Whether the selected output includes locations.
    pub fn wants_locations(self) -> bool {
        !matches!(self, StageSelector::Context)
    }

    /// Whether the selected output includes shots.
    pub fn wants_shots(self) -> bool {
        matches!(self, StageSelector::Shots | StageSelector::Full)
    }
}

/// The one transcript source a request carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranscriptSource<'a> {
    /// Poll the conversation capability for this id
    Conversation(&'a str),
    /// Use this text as-is
    Raw(&'a str),
    /// Render this form into text
    Intake(&'a IntakeForm),
}

impl TranscriptSource<'_> {
    /// Short label used in error messages and logs.
    pub fn label(&self) -> String {
        match self {
            TranscriptSource::Conversation(id) => format!("conversation {}", id),
            TranscriptSource::Raw(_) => "transcript".to_string(),
            TranscriptSource::Intake(_) => "intake form".to_string(),
        }
    }
}

/// Input handle for one pipeline invocation.
///
/// # Examples
///
/// ```
/// use viewfinder_core::{SessionRequest, StageSelector, TranscriptSource};
///
/// let request = SessionRequest::for_transcript("User: beach engagement shoot")
///     .with_stage(StageSelector::Locations);
///
/// assert!(matches!(request.transcript_source(), Ok(TranscriptSource::Raw(_))));
/// assert_eq!(request.stage_selector, StageSelector::Locations);
/// assert!(!request.generate_images);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRequest {
    /// Conversation to poll
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<String>,
    /// Raw transcript text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transcript: Option<String>,
    /// Pre-structured intake form
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intake_form: Option<IntakeForm>,
    /// Which outputs to produce
    #[serde(default)]
    pub stage_selector: StageSelector,
    /// Whether to illustrate shots
    #[serde(default)]
    pub generate_images: bool,
    /// Overrides the configured image cap
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_images: Option<usize>,
    /// Previously produced context, reused by the `locations` and `shots` selectors
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<PlanningContext>,
    /// Previously produced locations, reused by the `shots` selector
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locations: Option<Vec<LocationCandidate>>,
}

impl SessionRequest {
    /// Request backed by a recorded conversation.
    pub fn for_conversation(conversation_id: impl Into<String>) -> Self {
        Self {
            conversation_id: Some(conversation_id.into()),
            ..Default::default()
        }
    }

    /// Request backed by raw transcript text.
    pub fn for_transcript(transcript: impl Into<String>) -> Self {
        Self {
            transcript: Some(transcript.into()),
            ..Default::default()
        }
    }

    /// Request backed by an intake form.
    pub fn for_intake(form: IntakeForm) -> Self {
        Self {
            intake_form: Some(form),
            ..Default::default()
        }
    }

    /// Set the stage selector.
    pub fn with_stage(mut self, stage: StageSelector) -> Self {
        self.stage_selector = stage;
        self
    }

    /// Enable image generation, optionally overriding the cap.
    pub fn with_images(mut self, max_images: Option<usize>) -> Self {
        self.generate_images = true;
        self.max_images = max_images;
        self
    }

    /// Resolve the single transcript source.
    ///
    /// # Errors
    ///
    /// - [`InputErrorKind::NoTranscriptSource`] when nothing was supplied
    /// - [`InputErrorKind::MultipleTranscriptSources`] when more than one was
    /// - [`InputErrorKind::InvalidRequest`] when the conversation id is blank
    #[track_caller]
    pub fn transcript_source(&self) -> Result<TranscriptSource<'_>, InputError> {
        let supplied = [
            self.conversation_id.is_some(),
            self.transcript.is_some(),
            self.intake_form.is_some(),
        ]
        .into_iter()
        .filter(|present| *present)
        .count();

        if supplied > 1 {
            return Err(InputError::new(InputErrorKind::MultipleTranscriptSources(
                supplied,
            )));
        }

        if let Some(id) = &self.conversation_id {
            if id.trim().is_empty() {
                return Err(InputError::new(InputErrorKind::InvalidRequest(
                    "conversationId is blank".to_string(),
                )));
            }
            return Ok(TranscriptSource::Conversation(id.trim()));
        }
        if let Some(text) = &self.transcript {
            return Ok(TranscriptSource::Raw(text));
        }
        if let Some(form) = &self.intake_form {
            return Ok(TranscriptSource::Intake(form));
        }
        Err(InputError::new(InputErrorKind::NoTranscriptSource))
    }
}
