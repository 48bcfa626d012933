//! Pipeline tuning knobs.
//!
//! Loaded from the `[pipeline]` table of `viewfinder.toml`:
//!
//! ```toml
//! [pipeline]
//! poll_interval_ms = 2000
//! poll_attempts = 30
//! generation_attempts = 2
//! max_images = 6
//! aspect_ratio = "16:9"
//! image_key_prefix = "sessions"
//! ```

use serde::{Deserialize, Serialize};
use std::time::Duration;
use viewfinder_error::ConfigError;

/// Aspect ratio requested from the image capability.
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
pub enum AspectRatio {
    /// 1:1
    #[serde(rename = "1:1")]
    #[strum(serialize = "1:1")]
    Square,
    /// 3:4
    #[serde(rename = "3:4")]
    #[strum(serialize = "3:4")]
    Portrait,
    /// 4:3
    #[serde(rename = "4:3")]
    #[strum(serialize = "4:3")]
    Landscape,
    /// 16:9
    #[default]
    #[serde(rename = "16:9")]
    #[strum(serialize = "16:9")]
    Widescreen,
    /// 9:16
    #[serde(rename = "9:16")]
    #[strum(serialize = "9:16")]
    Tall,
}

/// Timing, retry and fan-out settings for one pipeline.
///
/// # Examples
///
/// ```
/// use viewfinder_core::PipelineConfig;
///
/// let config = PipelineConfig::builder()
///     .poll_attempts(5u32)
///     .max_images(2usize)
///     .build()
///     .unwrap();
///
/// assert_eq!(*config.poll_attempts(), 5);
/// assert_eq!(*config.poll_interval_ms(), 2000);
/// assert!(config.validate().is_ok());
/// ```
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    derive_getters::Getters,
    derive_builder::Builder,
)]
#[serde(default)]
#[builder(default, setter(into))]
pub struct PipelineConfig {
    /// Delay between conversation polls
    poll_interval_ms: u64,
    /// Maximum conversation polls before timing out
    poll_attempts: u32,
    /// Generation attempts per stage before the fallback policy applies
    generation_attempts: u32,
    /// Default cap on illustrated shots
    max_images: usize,
    /// Aspect ratio for generated images
    aspect_ratio: AspectRatio,
    /// First segment of every stored image key
    image_key_prefix: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 2000,
            poll_attempts: 30,
            generation_attempts: 2,
            max_images: 6,
            aspect_ratio: AspectRatio::default(),
            image_key_prefix: "sessions".to_string(),
        }
    }
}

impl PipelineConfig {
    /// Creates a builder seeded with the defaults.
    pub fn builder() -> PipelineConfigBuilder {
        PipelineConfigBuilder::default()
    }

    /// Poll interval as a [`Duration`].
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Reject settings that would stall or skip a stage.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] naming the first offending key.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.poll_interval_ms == 0 {
            return Err(ConfigError::invalid_key(
                "pipeline.poll_interval_ms",
                "must be greater than zero",
            ));
        }
        if self.poll_attempts == 0 {
            return Err(ConfigError::invalid_key(
                "pipeline.poll_attempts",
                "must be at least 1",
            ));
        }
        if self.generation_attempts == 0 {
            return Err(ConfigError::invalid_key(
                "pipeline.generation_attempts",
                "must be at least 1",
            ));
        }
        let prefix = self.image_key_prefix.trim_matches('/');
        if prefix.is_empty() || prefix.contains("..") {
            return Err(ConfigError::invalid_key(
                "pipeline.image_key_prefix",
                "must be a non-empty relative path segment",
            ));
        }
        Ok(())
    }
}
