//! Shared request plumbing for the HTTP adapters.

use serde::de::DeserializeOwned;
use viewfinder_error::{ProviderError, ProviderErrorKind};

/// Read a non-blank API key from `var`.
#[track_caller]
pub(crate) fn api_key_from_env(var: &str) -> Result<String, ProviderError> {
    match std::env::var(var) {
        Ok(key) if !key.trim().is_empty() => Ok(key),
        _ => Err(ProviderError::new(ProviderErrorKind::MissingApiKey(
            var.to_string(),
        ))),
    }
}

/// Build the shared reqwest client.
pub(crate) fn build_client() -> Result<reqwest::Client, ProviderError> {
    reqwest::Client::builder()
        .gzip(true)
        .build()
        .map_err(|e| ProviderError::new(ProviderErrorKind::ClientCreation(e.to_string())))
}

#[track_caller]
pub(crate) fn request_error(e: reqwest::Error) -> ProviderError {
    ProviderError::new(ProviderErrorKind::Request(e.to_string()))
}

/// Turn a non-2xx response into an error and decode a 2xx body as `T`.
pub(crate) async fn decode_json<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, ProviderError> {
    let status = response.status();
    if !status.is_success() {
        let message = response.text().await.unwrap_or_default();
        return Err(ProviderError::new(ProviderErrorKind::HttpStatus {
            status_code: status.as_u16(),
            message: truncate(&message, 500),
        }));
    }

    let body = response.text().await.map_err(request_error)?;
    parse_body(&body)
}

/// Decode a response body, keeping a preview of it in the error.
pub(crate) fn parse_body<T: DeserializeOwned>(body: &str) -> Result<T, ProviderError> {
    serde_json::from_str(body).map_err(|e| {
        ProviderError::new(ProviderErrorKind::InvalidResponse(format!(
            "{} (body starts with: {})",
            e,
            truncate(body, 200)
        )))
    })
}

fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}
