//! Groq provider implementation.

use async_trait::async_trait;
use tracing::{debug, warn};

use replyforge_protocols::error::ProviderError;
use replyforge_protocols::provider::{ChatRequest, CompletionBackend};

use crate::api::{ApiErrorBody, ApiMessage, ApiRequest, ApiResponse};

pub const DEFAULT_API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "llama-3.1-70b-versatile";

/// Endpoint, model and sampling parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct GroqOptions {
    pub api_url: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub top_p: f32,
}

impl Default for GroqOptions {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: 0.8,
            max_tokens: 150,
            top_p: 0.9,
        }
    }
}

/// Groq chat-completion backend.
///
/// Holds no credential; every call carries the caller's key. No retries and
/// no request timeout beyond what the HTTP client applies.
pub struct GroqProvider {
    options: GroqOptions,
    client: reqwest::Client,
}

impl GroqProvider {
    pub fn new() -> Self {
        Self::with_options(GroqOptions::default())
    }

    /// Create provider with custom API URL (for Groq-compatible APIs).
    pub fn with_url(api_url: impl Into<String>) -> Self {
        Self::with_options(GroqOptions {
            api_url: api_url.into(),
            ..GroqOptions::default()
        })
    }

    pub fn with_options(options: GroqOptions) -> Self {
        Self {
            options,
            client: reqwest::Client::new(),
        }
    }

    pub fn options(&self) -> &GroqOptions {
        &self.options
    }

    fn build_request(&self, request: &ChatRequest) -> ApiRequest {
        ApiRequest {
            model: self.options.model.clone(),
            messages: request.messages.iter().map(ApiMessage::from).collect(),
            temperature: self.options.temperature,
            max_tokens: self.options.max_tokens,
            top_p: self.options.top_p,
        }
    }

    async fn send_request(
        &self,
        api_request: &ApiRequest,
        api_key: &str,
    ) -> Result<reqwest::Response, ProviderError> {
        let response = self
            .client
            .post(&self.options.api_url)
            .header("Authorization", format!("Bearer {}", api_key))
            .header("Content-Type", "application/json")
            .json(api_request)
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorBody>(&text)
                .ok()
                .and_then(|body| body.error.message)
                .unwrap_or_else(|| format!("Groq API error: {}", status));
            warn!("Completion request failed with status {}", status);
            return Err(ProviderError::Remote { status, message });
        }

        Ok(response)
    }
}

impl Default for GroqProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CompletionBackend for GroqProvider {
    fn id(&self) -> &str {
        "groq"
    }

    async fn complete(&self, request: ChatRequest, api_key: &str) -> Result<String, ProviderError> {
        let api_request = self.build_request(&request);
        debug!(
            "Sending completion request: model={}, messages={}",
            api_request.model,
            api_request.messages.len()
        );

        let response = self.send_request(&api_request, api_key).await?;
        let text = response
            .text()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;
        let api_response: ApiResponse = serde_json::from_str(&text)
            .map_err(|e| ProviderError::InvalidResponse(e.to_string()))?;

        let content = api_response
            .first_content()
            .ok_or_else(|| ProviderError::InvalidResponse("missing choices[0].message.content".to_string()))?;
        Ok(content.trim().to_string())
    }
}

#[cfg(test)]
#[path = "provider_tests.rs"]
mod tests;
