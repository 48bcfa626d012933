//! Session-processing pipeline for Viewfinder.
//!
//! Turns a client conversation into a photo-shoot plan:
//!
//! - **Transcript acquisition**: poll a conversation until it is final, or
//!   take a raw transcript or intake form as-is
//! - **Schema-guided generation**: planning context, location candidates and
//!   shot plans, each parsed leniently, validated and retried, with
//!   documented defaults where a stage may not fail
//! - **Image fan-out**: concurrent sketch illustrations that tolerate
//!   partial failure
//! - **Orchestration**: one [`SessionResponse`](viewfinder_core::SessionResponse)
//!   envelope per request
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use viewfinder_core::SessionRequest;
//! use viewfinder_models::GeminiClient;
//! use viewfinder_pipeline::SessionPipeline;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let gemini = Arc::new(GeminiClient::new()?);
//! let pipeline = SessionPipeline::builder().generator(gemini).build()?;
//!
//! let response = pipeline
//!     .process(SessionRequest::for_transcript("user: engagement photos on the beach"))
//!     .await;
//! assert!(response.is_success());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod acquisition;
mod context;
mod defaults;
mod extraction;
mod generator;
mod images;
mod locations;
mod orchestrator;
mod outcome;
mod policy;
mod prompts;
mod run_context;
mod shots;

pub use acquisition::TranscriptAcquirer;
pub use context::{ContextStage, context_schema};
pub use defaults::{
    DEFAULT_DURATION, DEFAULT_EXPERIENCE_LEVEL, DEFAULT_LOCATION_PREFERENCE, DEFAULT_MOOD,
    DEFAULT_TIME_OF_DAY, LOCATION_RANGE, MOOD_RANGE, default_locations, default_shots,
};
pub use extraction::{lenient_parse, strict_parse};
pub use generator::{GenerationStage, SchemaGuidedGenerator};
pub use images::{FanOutReport, ImageFanOut, SKETCH_STYLE, image_key, image_prompt};
pub use locations::{LocationsStage, locations_schema};
pub use orchestrator::{SessionPipeline, SessionPipelineBuilder, SessionPipelineBuilderError};
pub use outcome::StageOutcome;
pub use policy::{FailureMode, Resolution, resolve};
pub use prompts::{JSON_FORMAT_REQUIREMENTS, PLANNER_ROLE, context_prompt, locations_prompt, shots_prompt};
pub use run_context::RunContext;
pub use shots::{ShotsStage, shots_schema};
