//! Mock structured-generation capability.

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use viewfinder_core::OutputSchema;
use viewfinder_error::{ProviderError, ProviderErrorKind, ViewfinderError, ViewfinderResult};
use viewfinder_interface::StructuredGenerator;

/// A single scripted response.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// Return this text
    Text(String),
    /// Fail as if the provider could not be reached
    Unavailable(String),
}

/// Mock generator scripted per schema name.
///
/// Responses for a schema are consumed in order; the last one repeats once
/// the script runs out. Schemas without a script answer `Unavailable`.
#[derive(Debug, Default)]
pub struct MockStructuredGenerator {
    scripts: Mutex<HashMap<String, VecDeque<MockResponse>>>,
    calls: Mutex<HashMap<String, usize>>,
    prompts: Mutex<Vec<(String, String)>>,
}

#[allow(dead_code)]
impl MockStructuredGenerator {
    /// Create a mock with no scripts.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a response for `schema_name`.
    pub fn respond(self, schema_name: &str, response: MockResponse) -> Self {
        self.scripts
            .lock()
            .unwrap()
            .entry(schema_name.to_string())
            .or_default()
            .push_back(response);
        self
    }

    /// Append a text response for `schema_name`.
    pub fn text(self, schema_name: &str, text: impl Into<String>) -> Self {
        self.respond(schema_name, MockResponse::Text(text.into()))
    }

    /// Number of generate calls made for `schema_name`.
    pub fn call_count(&self, schema_name: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .get(schema_name)
            .copied()
            .unwrap_or(0)
    }

    /// Total generate calls across schemas.
    pub fn total_calls(&self) -> usize {
        self.calls.lock().unwrap().values().sum()
    }

    /// Prompts received for `schema_name`, in order.
    pub fn prompts_for(&self, schema_name: &str) -> Vec<String> {
        self.prompts
            .lock()
            .unwrap()
            .iter()
            .filter(|(name, _)| name == schema_name)
            .map(|(_, prompt)| prompt.clone())
            .collect()
    }

    fn next_response(&self, schema_name: &str) -> MockResponse {
        *self
            .calls
            .lock()
            .unwrap()
            .entry(schema_name.to_string())
            .or_default() += 1;

        let mut scripts = self.scripts.lock().unwrap();
        match scripts.get_mut(schema_name) {
            Some(queue) if queue.len() > 1 => queue.pop_front().unwrap(),
            Some(queue) if !queue.is_empty() => queue[0].clone(),
            _ => MockResponse::Unavailable(format!("no script for {}", schema_name)),
        }
    }
}

#[async_trait]
impl StructuredGenerator for MockStructuredGenerator {
    async fn generate(&self, prompt: &str, schema: &OutputSchema) -> ViewfinderResult<String> {
        self.prompts
            .lock()
            .unwrap()
            .push((schema.name().clone(), prompt.to_string()));

        match self.next_response(schema.name()) {
            MockResponse::Text(text) => Ok(text),
            MockResponse::Unavailable(message) => Err(ViewfinderError::from(ProviderError::new(
                ProviderErrorKind::Request(message),
            ))),
        }
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }

    fn model_name(&self) -> &str {
        "mock-structured"
    }
}
