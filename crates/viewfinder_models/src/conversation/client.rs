//! Conversation records client.

use super::dto::ConversationDto;
use crate::http::{api_key_from_env, build_client, decode_json, request_error};
use async_trait::async_trait;
use tracing::{debug, instrument};
use viewfinder_core::ConversationRecord;
use viewfinder_error::{ProviderError, ProviderErrorKind, ViewfinderResult};
use viewfinder_interface::ConversationSource;

/// Default conversational-AI API root.
pub const DEFAULT_CONVERSATION_BASE_URL: &str = "https://api.elevenlabs.io";

/// Fetches conversation snapshots from `GET {base}/v1/convai/conversations/{id}`.
///
/// Makes one request per call; the acquisition stage owns the polling loop.
#[derive(Debug, Clone)]
pub struct ConversationClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl ConversationClient {
    /// Create a client using `ELEVENLABS_API_KEY`.
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is not set or the HTTP client cannot
    /// be built.
    #[instrument(name = "conversation_client_new")]
    pub fn new() -> ViewfinderResult<Self> {
        let api_key = api_key_from_env("ELEVENLABS_API_KEY")?;
        Self::with_api_key(api_key)
    }

    /// Create a client with an explicit API key.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn with_api_key(api_key: impl Into<String>) -> ViewfinderResult<Self> {
        Ok(Self {
            client: build_client()?,
            api_key: api_key.into(),
            base_url: DEFAULT_CONVERSATION_BASE_URL.to_string(),
        })
    }

    /// Point the client at a different API root.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// The id is pushed as one percent-encoded path segment.
    fn url_for(&self, conversation_id: &str) -> Result<reqwest::Url, ProviderError> {
        let mut url = reqwest::Url::parse(&self.base_url).map_err(|e| {
            ProviderError::new(ProviderErrorKind::Request(format!(
                "invalid base URL {}: {}",
                self.base_url, e
            )))
        })?;
        url.path_segments_mut()
            .map_err(|_| {
                ProviderError::new(ProviderErrorKind::Request(format!(
                    "base URL {} cannot carry a path",
                    self.base_url
                )))
            })?
            .pop_if_empty()
            .extend(["v1", "convai", "conversations", conversation_id]);
        Ok(url)
    }
}

#[async_trait]
impl ConversationSource for ConversationClient {
    #[instrument(skip(self))]
    async fn get(&self, conversation_id: &str) -> ViewfinderResult<ConversationRecord> {
        let url = self.url_for(conversation_id)?;
        debug!(url = %url, "Fetching conversation");

        let response = self
            .client
            .get(url)
            .header("xi-api-key", &self.api_key)
            .send()
            .await
            .map_err(request_error)?;

        let dto: ConversationDto = decode_json(response).await?;
        let record = ConversationRecord::from(dto);
        debug!(status = %record.status, turns = record.turns.len(), "Fetched conversation");
        Ok(record)
    }
}
