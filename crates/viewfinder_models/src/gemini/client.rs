//! Gemini REST client for structured text and image generation.

use super::dto::{
    Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig, Part,
    PredictInstance, PredictParameters, PredictRequest, PredictResponse, gemini_schema,
};
use crate::http::{api_key_from_env, build_client, decode_json, request_error};
use async_trait::async_trait;
use base64::Engine;
use std::time::Duration;
use tokio_retry2::{Retry, RetryError, strategy::ExponentialBackoff, strategy::jitter};
use tracing::{debug, info, instrument, warn};
use viewfinder_core::{AspectRatio, OutputSchema};
use viewfinder_error::{
    ImageError, ImageErrorKind, ProviderError, ProviderErrorKind, RetryableError,
    ViewfinderResult,
};
use viewfinder_interface::{GeneratedImage, ImageGenerator, StructuredGenerator};

/// Default Gemini API root.
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
/// Default model for structured text generation.
pub const DEFAULT_TEXT_MODEL: &str = "gemini-2.5-flash";
/// Default model for image generation.
pub const DEFAULT_IMAGE_MODEL: &str = "imagen-3.0-generate-002";

/// Client for the Gemini REST API.
///
/// Text generation retries transient failures (408, 429, 5xx, dropped
/// connections) with exponential backoff. Image generation makes exactly
/// one request.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    text_model: String,
    image_model: String,
    no_retry: bool,
    max_retries: Option<usize>,
    retry_backoff_ms: Option<u64>,
}

impl GeminiClient {
    /// Create a client using `GEMINI_API_KEY` and the default models.
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is not set or the HTTP client cannot
    /// be built.
    #[instrument(name = "gemini_client_new")]
    pub fn new() -> ViewfinderResult<Self> {
        let api_key = api_key_from_env("GEMINI_API_KEY")?;
        Self::with_api_key(api_key)
    }

    /// Create a client with an explicit API key.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    #[instrument(name = "gemini_client_with_api_key", skip_all)]
    pub fn with_api_key(api_key: impl Into<String>) -> ViewfinderResult<Self> {
        Ok(Self {
            client: build_client()?,
            api_key: api_key.into(),
            base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            text_model: DEFAULT_TEXT_MODEL.to_string(),
            image_model: DEFAULT_IMAGE_MODEL.to_string(),
            no_retry: false,
            max_retries: None,
            retry_backoff_ms: None,
        })
    }

    /// Point the client at a different API root.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Use a different model for structured text generation.
    pub fn with_text_model(mut self, model: impl Into<String>) -> Self {
        self.text_model = model.into();
        self
    }

    /// Use a different model for image generation.
    pub fn with_image_model(mut self, model: impl Into<String>) -> Self {
        self.image_model = model.into();
        self
    }

    /// Override or disable the text retry strategy.
    ///
    /// `max_retries` and `retry_backoff_ms` replace the per-error defaults
    /// from [`RetryableError::retry_strategy_params`].
    pub fn with_retry(
        mut self,
        no_retry: bool,
        max_retries: Option<usize>,
        retry_backoff_ms: Option<u64>,
    ) -> Self {
        self.no_retry = no_retry;
        self.max_retries = max_retries;
        self.retry_backoff_ms = retry_backoff_ms;
        self
    }

    /// Image model identifier.
    pub fn image_model(&self) -> &str {
        &self.image_model
    }

    fn endpoint(&self, model: &str, method: &str) -> String {
        format!("{}/models/{}:{}", self.base_url, model, method)
    }

    /// Issue one `generateContent` call.
    async fn generate_once(&self, body: &GenerateContentRequest) -> Result<String, ProviderError> {
        let url = self.endpoint(&self.text_model, "generateContent");
        debug!(url = %url, "Sending Gemini generateContent request");

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(body)
            .send()
            .await
            .map_err(request_error)?;

        let parsed: GenerateContentResponse = decode_json(response).await?;
        match parsed.first_text() {
            Some(text) => Ok(text),
            None => {
                let reason = parsed
                    .candidates
                    .first()
                    .and_then(|c| c.finish_reason.clone())
                    .or_else(|| parsed.prompt_feedback.as_ref().map(|f| f.to_string()))
                    .unwrap_or_else(|| "no candidates".to_string());
                Err(ProviderError::new(ProviderErrorKind::InvalidResponse(
                    format!("response contained no text ({})", reason),
                )))
            }
        }
    }

    /// Issue `generateContent`, retrying transient failures.
    async fn generate_with_retry(
        &self,
        body: &GenerateContentRequest,
    ) -> Result<String, ProviderError> {
        let first = self.generate_once(body).await;
        let err = match first {
            Ok(text) => return Ok(text),
            Err(e) if self.no_retry || !e.is_retryable() => return Err(e),
            Err(e) => e,
        };

        let (mut initial_ms, mut retries, max_delay_secs) = err.retry_strategy_params();
        if let Some(backoff) = self.retry_backoff_ms {
            initial_ms = backoff;
        }
        if let Some(max) = self.max_retries {
            retries = max;
        }
        info!(
            error = %err,
            initial_backoff_ms = initial_ms,
            max_retries = retries,
            max_delay_secs,
            "Gemini request failed, will retry with configured strategy"
        );

        let strategy = ExponentialBackoff::from_millis(initial_ms)
            .factor(2)
            .max_delay(Duration::from_secs(max_delay_secs))
            .map(jitter)
            .take(retries);

        Retry::spawn(strategy, move || async move {
            match self.generate_once(body).await {
                Ok(text) => Ok(text),
                Err(e) if e.is_retryable() => {
                    warn!(error = %e, "Gemini request failed, will retry");
                    Err(RetryError::Transient {
                        err: e,
                        retry_after: None,
                    })
                }
                Err(e) => {
                    warn!(error = %e, "Permanent Gemini error, failing immediately");
                    Err(RetryError::Permanent(e))
                }
            }
        })
        .await
    }
}

#[async_trait]
impl StructuredGenerator for GeminiClient {
    #[instrument(skip(self, prompt, schema), fields(model = %self.text_model, schema = %schema.name(), prompt_len = prompt.len()))]
    async fn generate(&self, prompt: &str, schema: &OutputSchema) -> ViewfinderResult<String> {
        let body = GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: Some(prompt.to_string()),
                }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema: gemini_schema(&schema.to_json_schema()),
            },
        };

        let text = self.generate_with_retry(&body).await?;
        debug!(response_len = text.len(), "Gemini returned structured output");
        Ok(text)
    }

    fn provider_name(&self) -> &'static str {
        "gemini"
    }

    fn model_name(&self) -> &str {
        &self.text_model
    }
}

#[async_trait]
impl ImageGenerator for GeminiClient {
    #[instrument(skip(self, prompt), fields(model = %self.image_model, aspect_ratio = %aspect_ratio))]
    async fn generate_image(
        &self,
        prompt: &str,
        aspect_ratio: AspectRatio,
    ) -> ViewfinderResult<GeneratedImage> {
        let url = self.endpoint(&self.image_model, "predict");
        let body = PredictRequest {
            instances: vec![PredictInstance {
                prompt: prompt.to_string(),
            }],
            parameters: PredictParameters {
                sample_count: 1,
                aspect_ratio: aspect_ratio.to_string(),
            },
        };

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(request_error)?;
        let parsed: PredictResponse = decode_json(response).await?;

        let prediction = parsed.predictions.into_iter().next().ok_or_else(|| {
            ImageError::new(ImageErrorKind::NoImage(
                "response contained no predictions".to_string(),
            ))
        })?;

        let Some(encoded) = prediction.bytes_base64_encoded else {
            let reason = prediction
                .rai_filtered_reason
                .unwrap_or_else(|| "prediction carried no image bytes".to_string());
            return Err(ImageError::new(ImageErrorKind::NoImage(reason)).into());
        };

        let bytes = base64::engine::general_purpose::STANDARD
            .decode(encoded.as_bytes())
            .map_err(|e| ProviderError::new(ProviderErrorKind::Base64Decode(e.to_string())))?;
        if bytes.is_empty() {
            return Err(ImageError::new(ImageErrorKind::EmptyImage).into());
        }

        debug!(size = bytes.len(), "Gemini returned image");
        let mime_type = prediction
            .mime_type
            .unwrap_or_else(|| "image/png".to_string());
        Ok(GeneratedImage::new(bytes, mime_type))
    }

    fn model_name(&self) -> &str {
        &self.image_model
    }
}
