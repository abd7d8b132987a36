//! Supplement Advisor LLM
//!
//! Provides the interface the advisor uses to talk to a generative text
//! backend, plus its implementation for Google Gemini.
//!
//! Also includes the HTTP client factory shared by providers.

pub mod gemini;
pub mod http_client;
pub mod provider;
pub mod types;

// Re-export main types
pub use gemini::GeminiProvider;
pub use http_client::build_http_client;
pub use provider::LlmProvider;
pub use types::*;
