//! HTTP capability adapters for the Viewfinder session pipeline.
//!
//! - [`GeminiClient`] implements both [`StructuredGenerator`] (schema-constrained
//!   `generateContent`) and [`ImageGenerator`] (Imagen `predict`).
//! - [`ConversationClient`] implements [`ConversationSource`] against the
//!   conversational-AI conversations endpoint.
//!
//! API keys are read from `GEMINI_API_KEY` and `ELEVENLABS_API_KEY`.
//!
//! # Example
//!
//! ```no_run
//! use viewfinder_core::{FieldType, OutputSchema, SchemaField};
//! use viewfinder_interface::StructuredGenerator;
//! use viewfinder_models::GeminiClient;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = GeminiClient::new()?;
//! let schema = OutputSchema::new(
//!     "answer",
//!     "A one-word answer",
//!     vec![SchemaField::required("word", FieldType::String, "The word")],
//! );
//! let text = client.generate("Name a color.", &schema).await?;
//! println!("{}", text);
//! # Ok(())
//! # }
//! ```
//!
//! [`StructuredGenerator`]: viewfinder_interface::StructuredGenerator
//! [`ImageGenerator`]: viewfinder_interface::ImageGenerator
//! [`ConversationSource`]: viewfinder_interface::ConversationSource

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod conversation;
mod gemini;
mod http;

pub use conversation::{ConversationClient, DEFAULT_CONVERSATION_BASE_URL};
pub use gemini::{DEFAULT_GEMINI_BASE_URL, DEFAULT_IMAGE_MODEL, DEFAULT_TEXT_MODEL, GeminiClient};
