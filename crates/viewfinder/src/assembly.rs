//! Wiring configured clients into a [`SessionPipeline`].

use crate::ViewfinderConfig;
use std::sync::Arc;
use tracing::{info, warn};
use viewfinder_error::{ConfigError, ViewfinderError, ViewfinderResult};
use viewfinder_models::{ConversationClient, GeminiClient};
use viewfinder_pipeline::SessionPipeline;
use viewfinder_storage::FileSystemStorage;

/// Build a pipeline from configuration and the API keys in the environment.
///
/// The Gemini client serves both structured generation and sketches. The
/// conversation capability is attached only when `ELEVENLABS_API_KEY` is set,
/// and image storage only when `with_images` is true, so the output directory
/// is not created for text-only runs.
///
/// # Errors
///
/// Returns an error if `GEMINI_API_KEY` is missing, an HTTP client cannot be
/// built or the storage directory cannot be created.
pub fn build_pipeline(
    config: &ViewfinderConfig,
    with_images: bool,
) -> ViewfinderResult<SessionPipeline> {
    let gemini = Arc::new(
        GeminiClient::new()?
            .with_base_url(config.gemini().base_url())
            .with_text_model(config.gemini().text_model())
            .with_image_model(config.gemini().image_model()),
    );

    let mut builder = SessionPipeline::builder()
        .generator(gemini.clone())
        .config(config.pipeline().clone());

    match ConversationClient::new() {
        Ok(client) => {
            builder = builder
                .conversations(Arc::new(client.with_base_url(config.conversation().base_url())));
        }
        Err(e) => warn!(error = %e.summary(), "Conversation capability disabled"),
    }

    if with_images {
        let mut storage = FileSystemStorage::new(config.storage().directory())?;
        if let Some(url) = config.storage().public_base_url() {
            storage = storage.with_public_base_url(url);
        }
        builder = builder.images(gemini).storage(Arc::new(storage));
    }

    let pipeline = builder
        .build()
        .map_err(|e| ViewfinderError::from(ConfigError::new(e.to_string())))?;
    info!(
        text_model = %config.gemini().text_model(),
        images = with_images,
        "Session pipeline ready"
    );
    Ok(pipeline)
}
