//! Trait definitions for the remote capabilities a session depends on.

use crate::GeneratedImage;
use async_trait::async_trait;
use viewfinder_core::{AspectRatio, ConversationRecord, OutputSchema};
use viewfinder_error::ViewfinderResult;

/// Source of recorded planning conversations.
#[async_trait]
pub trait ConversationSource: Send + Sync {
    /// Fetch the current snapshot of a conversation.
    ///
    /// A non-terminal status is not an error; callers decide whether to
    /// poll again.
    ///
    /// # Errors
    ///
    /// Returns an error when the service cannot be reached or answers with
    /// something that is not a conversation record.
    async fn get(&self, conversation_id: &str) -> ViewfinderResult<ConversationRecord>;
}

/// Text generation constrained to a declarative output schema.
#[async_trait]
pub trait StructuredGenerator: Send + Sync {
    /// Generate text intended to conform to `schema`.
    ///
    /// The returned text is not trusted: providers may wrap it in code
    /// fences or ignore the schema entirely, so callers validate it.
    async fn generate(&self, prompt: &str, schema: &OutputSchema) -> ViewfinderResult<String>;

    /// Provider name (e.g., "gemini").
    fn provider_name(&self) -> &'static str;

    /// Model identifier (e.g., "gemini-2.5-flash").
    fn model_name(&self) -> &str;
}

/// Image generation from a text prompt.
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    /// Generate a single image.
    ///
    /// Implementations do not retry; a failure here only costs one
    /// illustration.
    async fn generate_image(
        &self,
        prompt: &str,
        aspect_ratio: AspectRatio,
    ) -> ViewfinderResult<GeneratedImage>;

    /// Model identifier (e.g., "imagen-3.0-generate-002").
    fn model_name(&self) -> &str;
}
