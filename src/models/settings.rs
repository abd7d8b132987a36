//! Settings Models
//!
//! Application configuration and settings data structures.

use serde::{Deserialize, Serialize};
use supplement_advisor_llm::{
    GenerationConfig, ProviderConfig, DEFAULT_BASE_URL, DEFAULT_MODEL, DEFAULT_TIMEOUT_SECS,
};

/// Application configuration stored in config.json.
///
/// The API key is not part of it; it lives in the OS keyring.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    /// Model used for every generation request
    #[serde(default = "default_model")]
    pub model: String,
    /// API base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Whole-request timeout in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Sampling parameters
    #[serde(default)]
    pub generation: GenerationConfig,
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_request_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            base_url: default_base_url(),
            request_timeout_secs: default_request_timeout_secs(),
            generation: GenerationConfig::default(),
        }
    }
}

/// Settings update request (partial update)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SettingsUpdate {
    pub model: Option<String>,
    pub base_url: Option<String>,
    pub request_timeout_secs: Option<u64>,
    pub temperature: Option<f32>,
    pub top_p: Option<f32>,
    pub top_k: Option<u32>,
    pub max_output_tokens: Option<u32>,
}

impl AppConfig {
    /// Apply a partial update to the configuration
    pub fn apply_update(&mut self, update: SettingsUpdate) {
        if let Some(model) = update.model {
            self.model = model;
        }
        if let Some(base_url) = update.base_url {
            self.base_url = base_url;
        }
        if let Some(timeout) = update.request_timeout_secs {
            self.request_timeout_secs = timeout;
        }
        if let Some(temperature) = update.temperature {
            self.generation.temperature = temperature;
        }
        if let Some(top_p) = update.top_p {
            self.generation.top_p = top_p;
        }
        if let Some(top_k) = update.top_k {
            self.generation.top_k = top_k;
        }
        if let Some(max) = update.max_output_tokens {
            self.generation.max_output_tokens = max;
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.model.trim().is_empty() {
            return Err("model must not be empty".to_string());
        }

        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(format!(
                "Invalid base_url: {}. Must start with http:// or https://",
                self.base_url
            ));
        }

        if !(1..=600).contains(&self.request_timeout_secs) {
            return Err("request_timeout_secs must be between 1 and 600".to_string());
        }

        let g = &self.generation;
        if !(0.0_f32..=2.0).contains(&g.temperature) {
            return Err("temperature must be between 0.0 and 2.0".to_string());
        }
        if !(0.0_f32..=1.0).contains(&g.top_p) {
            return Err("top_p must be between 0.0 and 1.0".to_string());
        }
        if g.top_k == 0 {
            return Err("top_k must be at least 1".to_string());
        }
        if !(1..=8192).contains(&g.max_output_tokens) {
            return Err("max_output_tokens must be between 1 and 8192".to_string());
        }

        Ok(())
    }

    /// Provider configuration for these settings. The credential is supplied
    /// per request.
    pub fn provider_config(&self) -> ProviderConfig {
        ProviderConfig {
            api_key: None,
            base_url: Some(self.base_url.clone()),
            model: self.model.clone(),
            generation: self.generation,
            timeout_secs: self.request_timeout_secs,
        }
    }
}

/// Mask a secret for display: all but the first and last four characters
/// are hidden.
pub fn mask_secret(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 8 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}...{}", head, tail)
}
