//! Core data types for the Viewfinder session pipeline.
//!
//! This crate holds the one canonical shape of every entity the pipeline
//! produces or consumes: the session request and response envelope, the
//! transcript, the planning context, location candidates, shot plans and
//! their generated images, plus the declarative output schema used to
//! constrain structured generation.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod context;
mod conversation;
mod intake;
mod location;
mod request;
mod response;
mod role;
mod schema;
mod shot;
mod transcript;

pub use config::{AspectRatio, PipelineConfig, PipelineConfigBuilder};
pub use context::{PlanningContext, PlanningContextBuilder};
pub use conversation::{ConversationRecord, ConversationStatus};
pub use intake::IntakeForm;
pub use location::LocationCandidate;
pub use request::{SessionRequest, StageSelector, TranscriptSource};
pub use response::{ErrorKind, PipelineOutputs, SessionFailure, SessionResponse, SessionSuccess, Stage};
pub use role::SpeakerRole;
pub use schema::{FieldType, OutputSchema, SchemaField};
pub use shot::{GeneratedImageAsset, ShotPlan};
pub use transcript::{Transcript, TranscriptText, Turn};
