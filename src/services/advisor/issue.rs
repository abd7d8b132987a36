//! Advisories raised when generated content falls back.

use serde::Serialize;
use supplement_advisor_core::SchemaError;
use supplement_advisor_llm::LlmError;
use thiserror::Error;

/// Why a generation request was answered with fallback content.
///
/// Never returned as an `Err`; it travels alongside the fallback value so the
/// caller can tell the user what happened.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AdvisorIssue {
    /// No credential configured
    #[error("No API key provided. Please add your Gemini API key in settings.")]
    MissingCredential,

    /// Backend unreachable, non-2xx, or an error payload
    #[error("Failed to get AI response: {message}")]
    Transport { message: String },

    /// Reply received but not in the expected shape
    #[error("Received invalid response format from AI: {message}")]
    InvalidResponse { message: String },
}

impl AdvisorIssue {
    /// Short category name: `configuration`, `transport` or `schema`.
    pub fn category(&self) -> &'static str {
        match self {
            Self::MissingCredential => "configuration",
            Self::Transport { .. } => "transport",
            Self::InvalidResponse { .. } => "schema",
        }
    }

    /// Whether the user can fix this in settings.
    pub fn needs_configuration(&self) -> bool {
        matches!(self, Self::MissingCredential)
    }
}

impl From<LlmError> for AdvisorIssue {
    fn from(err: LlmError) -> Self {
        Self::Transport {
            message: err.to_string(),
        }
    }
}

impl From<SchemaError> for AdvisorIssue {
    fn from(err: SchemaError) -> Self {
        Self::InvalidResponse {
            message: err.reason,
        }
    }
}

/// Where a generated value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentSource {
    Backend,
    Fallback,
}

/// A generation result: always a usable value, plus an advisory when the
/// value is fallback content.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Generated<T> {
    pub value: T,
    pub source: ContentSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issue: Option<AdvisorIssue>,
}

impl<T> Generated<T> {
    pub fn backend(value: T) -> Self {
        Self {
            value,
            source: ContentSource::Backend,
            issue: None,
        }
    }

    pub fn fallback(value: T, issue: AdvisorIssue) -> Self {
        Self {
            value,
            source: ContentSource::Fallback,
            issue: Some(issue),
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.source == ContentSource::Fallback
    }

    pub fn into_value(self) -> T {
        self.value
    }
}
