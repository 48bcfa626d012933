//! Capability traits consumed by the Viewfinder session pipeline.
//!
//! The pipeline never talks to a remote service directly. It is handed
//! implementations of these traits: HTTP adapters live in
//! `viewfinder_models`, test doubles live next to the tests that use them.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod traits;
mod types;

pub use traits::{ConversationSource, ImageGenerator, StructuredGenerator};
pub use types::GeneratedImage;
