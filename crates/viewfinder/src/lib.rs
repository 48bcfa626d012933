//! Viewfinder - photo-shoot planning from client conversations
//!
//! Viewfinder turns a client conversation (a voice-agent conversation id, a
//! raw transcript or a structured intake form) into a shoot plan: a planning
//! context, candidate locations, a numbered shot list and optional concept
//! sketches for the first few shots.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use viewfinder::{SessionRequest, StageSelector, ViewfinderConfig, build_pipeline};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ViewfinderConfig::load()?;
//!     let pipeline = build_pipeline(&config, false)?;
//!
//!     let request = SessionRequest::for_transcript(
//!         "Agent: What are we shooting?\nUser: Engagement photos at the beach.",
//!     )
//!     .with_stage(StageSelector::Locations);
//!
//!     let response = pipeline.process(request).await;
//!     println!("{}", serde_json::to_string_pretty(&response)?);
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - `viewfinder_error` - Error types
//! - `viewfinder_core` - Domain types, request and response envelopes
//! - `viewfinder_interface` - Capability traits
//! - `viewfinder_storage` - Object storage for generated images
//! - `viewfinder_models` - Gemini and conversation-service clients
//! - `viewfinder_pipeline` - Stages and the session orchestrator
//!
//! This crate re-exports everything and adds layered configuration and the
//! `viewfinder` binary.

mod assembly;
mod config;
mod telemetry;

pub use assembly::build_pipeline;
pub use config::{ConversationSettings, GeminiSettings, StorageSettings, ViewfinderConfig};
pub use telemetry::init_telemetry;

pub use viewfinder_core::*;
pub use viewfinder_error::*;
pub use viewfinder_interface::*;
pub use viewfinder_models::*;
pub use viewfinder_pipeline::*;
pub use viewfinder_storage::*;
