//! Error types for the Viewfinder session pipeline.
//!
//! This crate provides the foundation error types used throughout the Viewfinder workspace.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern for clean error handling:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All errors use `#[track_caller]` for automatic location capture
//!
//! Pipeline-facing errors map onto the stage taxonomy:
//! - [`InputError`] - request rejected before any stage runs
//! - [`AcquisitionError`] - conversation capability unavailable, failed or timed out
//! - [`GenerationError`] - structured generation unavailable, unparseable or invalid
//! - [`ImageError`] / [`StorageError`] - isolated per-image failures
//!
//! # Examples
//!
//! ```
//! use viewfinder_error::{ViewfinderResult, InputError, InputErrorKind};
//!
//! fn validate(sources: usize) -> ViewfinderResult<()> {
//!     if sources == 0 {
//!         Err(InputError::new(InputErrorKind::NoTranscriptSource))?
//!     }
//!     Ok(())
//! }
//!
//! assert!(validate(0).is_err());
//! assert!(validate(1).is_ok());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod acquisition;
mod config;
mod error;
mod generation;
mod http;
mod image;
mod input;
mod json;
mod provider;
mod storage;

pub use acquisition::{AcquisitionError, AcquisitionErrorKind};
pub use config::ConfigError;
pub use error::{ViewfinderError, ViewfinderErrorKind, ViewfinderResult};
pub use generation::{GenerationError, GenerationErrorKind};
pub use http::HttpError;
pub use image::{ImageError, ImageErrorKind};
pub use input::{InputError, InputErrorKind};
pub use json::JsonError;
pub use provider::{ProviderError, ProviderErrorKind, RetryableError};
pub use storage::{StorageError, StorageErrorKind};
