//! Layered application configuration.
//!
//! Sources, lowest precedence first:
//!
//! 1. Bundled defaults (`include_str!` of `viewfinder.toml`)
//! 2. `~/.config/viewfinder/viewfinder.toml`
//! 3. `./viewfinder.toml`
//! 4. An explicit file passed with `--config`
//! 5. `VIEWFINDER__<SECTION>__<KEY>` environment variables

use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;
use viewfinder_core::PipelineConfig;
use viewfinder_error::{ConfigError, ViewfinderError, ViewfinderResult};
use viewfinder_models::{
    DEFAULT_CONVERSATION_BASE_URL, DEFAULT_GEMINI_BASE_URL, DEFAULT_IMAGE_MODEL,
    DEFAULT_TEXT_MODEL,
};

/// Bundled default configuration.
const DEFAULT_CONFIG: &str = include_str!("../viewfinder.toml");

/// `[gemini]` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
#[serde(default)]
pub struct GeminiSettings {
    /// API root, without a trailing slash
    base_url: String,
    /// Model used for structured generation
    text_model: String,
    /// Model used for sketches
    image_model: String,
}

impl Default for GeminiSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            text_model: DEFAULT_TEXT_MODEL.to_string(),
            image_model: DEFAULT_IMAGE_MODEL.to_string(),
        }
    }
}

/// `[conversation]` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
#[serde(default)]
pub struct ConversationSettings {
    /// API root of the conversation service
    base_url: String,
}

impl Default for ConversationSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_CONVERSATION_BASE_URL.to_string(),
        }
    }
}

/// `[storage]` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
#[serde(default)]
pub struct StorageSettings {
    /// Directory generated images are written under
    directory: PathBuf,
    /// Public URL prefix mapped onto `directory`
    public_base_url: Option<String>,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("viewfinder-output"),
            public_base_url: None,
        }
    }
}

/// Complete Viewfinder configuration.
///
/// # Examples
///
/// ```
/// use viewfinder::ViewfinderConfig;
///
/// let config = ViewfinderConfig::from_toml(
///     r#"
///     [pipeline]
///     max_images = 3
///
///     [storage]
///     directory = "/tmp/shoots"
///     "#,
/// )
/// .unwrap();
///
/// assert_eq!(*config.pipeline().max_images(), 3);
/// assert_eq!(*config.pipeline().poll_attempts(), 30);
/// assert_eq!(config.storage().directory().to_str(), Some("/tmp/shoots"));
/// ```
#[derive(
    Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters,
)]
#[serde(default)]
pub struct ViewfinderConfig {
    /// Pipeline tuning
    pipeline: PipelineConfig,
    /// Gemini endpoints and models
    gemini: GeminiSettings,
    /// Conversation service endpoint
    conversation: ConversationSettings,
    /// Image storage
    storage: StorageSettings,
}

impl ViewfinderConfig {
    /// Load from the standard locations and the environment.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when a source cannot be read or parsed, or
    /// when the result fails validation.
    pub fn load() -> ViewfinderResult<Self> {
        Self::load_with(None)
    }

    /// Load from the standard locations, an optional explicit file and the
    /// environment.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when a source cannot be read or parsed, or
    /// when the result fails validation. An explicit file must exist.
    pub fn load_with(explicit: Option<&Path>) -> ViewfinderResult<Self> {
        debug!(
            "Loading configuration with precedence: env > explicit > current dir > home dir > bundled defaults"
        );

        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/viewfinder/viewfinder.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder.add_source(File::with_name("viewfinder").required(false));

        if let Some(path) = explicit {
            debug!(path = %path.display(), "Adding explicit configuration file");
            builder = builder.add_source(File::from(path).required(true));
        }

        builder = builder.add_source(
            Environment::with_prefix("VIEWFINDER")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        Self::finish(builder)
    }

    /// Parse a single TOML document layered over the bundled defaults.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when the document is malformed or invalid.
    pub fn from_toml(toml: &str) -> ViewfinderResult<Self> {
        let builder = Config::builder()
            .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
            .add_source(File::from_str(toml, FileFormat::Toml));
        Self::finish(builder)
    }

    /// Load a single file layered over the bundled defaults.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when the file is missing, malformed or invalid.
    pub fn from_file(path: impl AsRef<Path>) -> ViewfinderResult<Self> {
        let builder = Config::builder()
            .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
            .add_source(File::from(path.as_ref()));
        Self::finish(builder)
    }

    /// Reject settings no session could run with.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] naming the first offending key.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.pipeline.validate()?;
        if self.gemini.base_url.trim().is_empty() {
            return Err(ConfigError::invalid_key("gemini.base_url", "must not be empty"));
        }
        if self.gemini.text_model.trim().is_empty() {
            return Err(ConfigError::invalid_key("gemini.text_model", "must not be empty"));
        }
        if self.conversation.base_url.trim().is_empty() {
            return Err(ConfigError::invalid_key(
                "conversation.base_url",
                "must not be empty",
            ));
        }
        if self.storage.directory.as_os_str().is_empty() {
            return Err(ConfigError::invalid_key("storage.directory", "must not be empty"));
        }
        Ok(())
    }

    fn finish(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> ViewfinderResult<Self> {
        let config: Self = builder
            .build()
            .map_err(|e| {
                ViewfinderError::from(ConfigError::new(format!(
                    "Failed to build configuration: {}",
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                ViewfinderError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })?;

        config.validate()?;
        Ok(config)
    }
}
