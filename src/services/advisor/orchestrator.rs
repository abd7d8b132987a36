//! Health Advisor
//!
//! Turns an answer snapshot into follow-up questions, a health analysis and
//! supplement recommendations via the generative backend. Every operation is
//! total: a missing credential, a transport failure or a malformed reply
//! yields deterministic fallback content plus an [`AdvisorIssue`].

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, warn};

use supplement_advisor_core::schema::{
    parse_follow_up_questions, parse_health_analysis, parse_recommendations,
};
use supplement_advisor_core::{AnswerRecord, FollowUpQuestion, Recommendation, SchemaError};
use supplement_advisor_llm::{LlmProvider, LlmRequestOptions};

use super::fallback::{
    fallback_follow_up_questions, fallback_health_analysis, fallback_recommendations,
};
use super::issue::{AdvisorIssue, Generated};
use super::prompts::{
    build_follow_up_prompt, build_health_analysis_prompt, build_recommendations_prompt,
};
use crate::services::credentials::CredentialStore;

/// Which generation request is being made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Purpose {
    FollowUpQuestions,
    HealthAnalysis,
    Recommendations,
}

impl Purpose {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FollowUpQuestions => "follow_up_questions",
            Self::HealthAnalysis => "health_analysis",
            Self::Recommendations => "recommendations",
        }
    }
}

/// Orchestrates generation requests against one provider.
pub struct HealthAdvisor {
    provider: Arc<dyn LlmProvider>,
    credentials: CredentialStore,
}

impl HealthAdvisor {
    pub fn new(provider: Arc<dyn LlmProvider>, credentials: CredentialStore) -> Self {
        Self {
            provider,
            credentials,
        }
    }

    /// The credential handle this advisor reads at call time.
    pub fn credentials(&self) -> &CredentialStore {
        &self.credentials
    }

    /// Exactly three schema-valid follow-up questions.
    pub async fn generate_follow_up_questions(
        &self,
        answers: &AnswerRecord,
    ) -> Generated<Vec<FollowUpQuestion>> {
        self.generate(
            Purpose::FollowUpQuestions,
            || build_follow_up_prompt(answers),
            parse_follow_up_questions,
            fallback_follow_up_questions,
        )
        .await
    }

    /// Non-empty markdown-style health analysis.
    pub async fn generate_health_analysis(&self, answers: &AnswerRecord) -> Generated<String> {
        self.generate(
            Purpose::HealthAnalysis,
            || build_health_analysis_prompt(answers),
            parse_health_analysis,
            fallback_health_analysis,
        )
        .await
    }

    /// At least five recommendations, at least two of them high priority.
    pub async fn generate_recommendations(
        &self,
        answers: &AnswerRecord,
    ) -> Generated<Vec<Recommendation>> {
        self.generate(
            Purpose::Recommendations,
            || build_recommendations_prompt(answers),
            parse_recommendations,
            fallback_recommendations,
        )
        .await
    }

    /// Shared request path: credential check, one backend attempt, schema
    /// validation, fallback on any failure.
    async fn generate<T, B, P, F>(
        &self,
        purpose: Purpose,
        build_prompt: B,
        parse: P,
        fallback: F,
    ) -> Generated<T>
    where
        B: FnOnce() -> String,
        P: FnOnce(&str) -> Result<T, SchemaError>,
        F: FnOnce() -> T,
    {
        let Some(api_key) = self.credentials.get_credential() else {
            warn!(purpose = purpose.as_str(), "no API key configured, using fallback content");
            return Generated::fallback(fallback(), AdvisorIssue::MissingCredential);
        };

        let prompt = build_prompt();
        debug!(
            purpose = purpose.as_str(),
            provider = self.provider.name(),
            model = self.provider.model(),
            prompt_len = prompt.len(),
            "requesting generated content"
        );

        let options = LlmRequestOptions::with_api_key(api_key).purpose(purpose.as_str());
        let response = match self.provider.generate(&prompt, options).await {
            Ok(response) => response,
            Err(e) => {
                warn!(purpose = purpose.as_str(), error = %e, "backend request failed, using fallback content");
                return Generated::fallback(fallback(), AdvisorIssue::from(e));
            }
        };

        match parse(&response.content) {
            Ok(value) => {
                debug!(purpose = purpose.as_str(), "generated content accepted");
                Generated::backend(value)
            }
            Err(e) => {
                warn!(
                    purpose = purpose.as_str(),
                    reason = %e.reason,
                    preview = %response.content.chars().take(200).collect::<String>(),
                    "backend reply rejected, using fallback content"
                );
                Generated::fallback(fallback(), AdvisorIssue::from(e))
            }
        }
    }
}
