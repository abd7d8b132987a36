//! Gemini Provider
//!
//! Implementation of the LlmProvider trait for Google's Gemini
//! `generateContent` API.

use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;
use tracing::debug;

use super::http_client::{build_http_client, map_transport_error};
use super::provider::{missing_api_key_error, parse_http_error, LlmProvider};
use super::types::{
    GenerationConfig, LlmError, LlmRequestOptions, LlmResponse, LlmResult, ProviderConfig,
    DEFAULT_BASE_URL,
};

const PROVIDER_NAME: &str = "gemini";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

/// Gemini provider
pub struct GeminiProvider {
    config: ProviderConfig,
    client: reqwest::Client,
}

impl GeminiProvider {
    /// Create a new Gemini provider with the given configuration
    pub fn new(config: ProviderConfig) -> LlmResult<Self> {
        let timeout = (config.timeout_secs > 0).then(|| Duration::from_secs(config.timeout_secs));
        let client = build_http_client(timeout)?;
        Ok(Self { config, client })
    }

    /// Get the API base URL
    fn base_url(&self) -> &str {
        self.config
            .base_url
            .as_deref()
            .unwrap_or(DEFAULT_BASE_URL)
            .trim_end_matches('/')
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url(), self.config.model)
    }

    /// Build the request body for the API
    fn build_request_body<'a>(&self, prompt: &'a str) -> GeminiRequest<'a> {
        GeminiRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
            generation_config: self.config.generation,
        }
    }
}

/// Pull the generated text out of a `generateContent` response body.
///
/// A body carrying `error.message` is an error even with a 2xx status.
pub fn extract_generated_text(body: &serde_json::Value) -> LlmResult<String> {
    if let Some(message) = body
        .get("error")
        .and_then(|e| e.get("message"))
        .and_then(|m| m.as_str())
    {
        return Err(LlmError::ServerError {
            message: message.to_string(),
            status: None,
        });
    }

    body.get("candidates")
        .and_then(|c| c.get(0))
        .and_then(|c| c.get("content"))
        .and_then(|c| c.get("parts"))
        .and_then(|p| p.get(0))
        .and_then(|p| p.get("text"))
        .and_then(|t| t.as_str())
        .map(str::to_string)
        .ok_or_else(|| LlmError::ParseError {
            message: "response has no candidates[0].content.parts[0].text".to_string(),
        })
}

/// Error message from a Gemini error body, or the raw body.
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(str::to_string))
        .unwrap_or_else(|| body.to_string())
}

#[async_trait]
impl LlmProvider for GeminiProvider {
    fn name(&self) -> &'static str {
        PROVIDER_NAME
    }

    fn model(&self) -> &str {
        &self.config.model
    }

    async fn generate(
        &self,
        prompt: &str,
        request_options: LlmRequestOptions,
    ) -> LlmResult<LlmResponse> {
        let api_key = request_options
            .api_key
            .as_deref()
            .or(self.config.api_key.as_deref())
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| missing_api_key_error(PROVIDER_NAME))?;

        let body = self.build_request_body(prompt);
        debug!(
            model = %self.config.model,
            purpose = request_options.purpose.as_deref().unwrap_or("unspecified"),
            prompt_len = prompt.len(),
            "sending generateContent request"
        );

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", api_key)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status().as_u16();
        let body_text = response.text().await.map_err(map_transport_error)?;

        if !(200..300).contains(&status) {
            return Err(parse_http_error(status, &error_message(&body_text), PROVIDER_NAME));
        }

        let json: serde_json::Value =
            serde_json::from_str(&body_text).map_err(|e| LlmError::ParseError {
                message: format!("Failed to parse response: {}", e),
            })?;

        let content = extract_generated_text(&json)?;
        Ok(LlmResponse {
            content,
            model: self.config.model.clone(),
        })
    }

    fn config(&self) -> &ProviderConfig {
        &self.config
    }
}
