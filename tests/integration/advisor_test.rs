//! Advisor Integration Tests
//!
//! Generation with and without a credential, schema enforcement on replies,
//! and the concurrent results stage.

use std::sync::Arc;

use supplement_advisor::services::advisor::fallback::{
    fallback_follow_up_questions, fallback_health_analysis, fallback_recommendations,
};
use supplement_advisor::services::advisor::{AdvisorIssue, ContentSource, Purpose};
use supplement_advisor_core::{AnswerRecord, AnswerValue, Priority, SupplementTag};
use supplement_advisor_llm::LlmError;

use crate::mock_provider::{
    advisor_with, ScriptedProvider, ANALYSIS, FOLLOW_UPS, RECOMMENDATIONS, VALID_QUESTIONS,
    VALID_RECOMMENDATIONS,
};

fn sample_answers() -> AnswerRecord {
    [
        ("age", AnswerValue::text("34")),
        ("gender", AnswerValue::text("male")),
        (
            "health_goals",
            AnswerValue::selection(["Better sleep quality"]),
        ),
        ("stress_level", AnswerValue::text("8")),
    ]
    .into_iter()
    .collect()
}

fn names(items: &[supplement_advisor_core::ClassifiedRecommendation]) -> Vec<&str> {
    items.iter().map(|r| r.name()).collect()
}

// ============================================================================
// Generation without a credential
// ============================================================================

#[tokio::test]
async fn test_report_without_credential_uses_fallback_plan() {
    let provider = Arc::new(ScriptedProvider::new());
    let advisor = advisor_with(&provider, None);

    let report = advisor.generate_report(sample_answers()).await.unwrap();

    assert_eq!(
        names(&report.plan.high_priority),
        ["Vitamin D3", "Magnesium Glycinate"]
    );
    assert_eq!(
        names(&report.plan.medium_priority),
        ["Omega-3 EPA/DHA", "B-Complex", "Probiotic Complex"]
    );
    assert_eq!(report.analysis, fallback_health_analysis());
    assert_eq!(report.analysis_source, ContentSource::Fallback);
    assert!(report
        .advisories
        .iter()
        .all(|a| a.issue == AdvisorIssue::MissingCredential));
    assert!(provider.calls().is_empty());
}

#[tokio::test]
async fn test_fallback_is_deterministic() {
    let provider = Arc::new(ScriptedProvider::new());
    let advisor = advisor_with(&provider, None);

    let first = advisor.generate_recommendations(&sample_answers()).await;
    let second = advisor.generate_recommendations(&AnswerRecord::new()).await;

    assert_eq!(first.value, second.value);
    assert_eq!(first.value, fallback_recommendations());

    let questions = advisor.generate_follow_up_questions(&sample_answers()).await;
    assert_eq!(questions.value, fallback_follow_up_questions());
}

#[tokio::test]
async fn test_missing_credential_message() {
    let provider = Arc::new(ScriptedProvider::new());
    let advisor = advisor_with(&provider, None);

    let analysis = advisor.generate_health_analysis(&sample_answers()).await;

    let issue = analysis.issue.unwrap();
    assert_eq!(
        issue.to_string(),
        "No API key provided. Please add your Gemini API key in settings."
    );
    assert!(issue.needs_configuration());
}

// ============================================================================
// Generation with a credential
// ============================================================================

#[tokio::test]
async fn test_valid_replies_are_used() {
    let provider = Arc::new(ScriptedProvider::new());
    provider.reply(FOLLOW_UPS, VALID_QUESTIONS);
    provider.reply(RECOMMENDATIONS, VALID_RECOMMENDATIONS);
    let advisor = advisor_with(&provider, Some("AIza-test"));

    let questions = advisor.generate_follow_up_questions(&sample_answers()).await;
    assert_eq!(questions.source, ContentSource::Backend);
    assert_eq!(questions.value.len(), 3);
    assert_eq!(questions.value[0].options().len(), 3);

    let recs = advisor.generate_recommendations(&sample_answers()).await;
    assert_eq!(recs.source, ContentSource::Backend);
    assert!(recs.value.len() >= 5);
    assert!(
        recs.value
            .iter()
            .filter(|r| r.priority == Priority::High)
            .count()
            >= 2
    );
}

#[tokio::test]
async fn test_prompt_carries_answers_and_key() {
    let provider = Arc::new(ScriptedProvider::new());
    provider.reply(ANALYSIS, "**Sleep & Recovery**: needs work");
    let advisor = advisor_with(&provider, Some("AIza-test"));

    advisor.generate_health_analysis(&sample_answers()).await;

    let calls = provider.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].api_key.as_deref(), Some("AIza-test"));
    assert_eq!(calls[0].purpose.as_deref(), Some(Purpose::HealthAnalysis.as_str()));
    assert!(calls[0].prompt.contains("Better sleep quality"));
    assert!(calls[0].prompt.contains("\"stress_level\": \"8\""));
}

#[tokio::test]
async fn test_malformed_reply_uses_fallback() {
    let provider = Arc::new(ScriptedProvider::new());
    provider.reply(FOLLOW_UPS, "Sure! Here are some questions: 1. How do you sleep?");
    provider.reply(
        RECOMMENDATIONS,
        r#"[{"id": 1, "name": "Vitamin C", "dosage": "500mg", "priority": "high", "category": "x", "reason": "y", "benefits": [], "timing": "z"}]"#,
    );
    let advisor = advisor_with(&provider, Some("AIza-test"));

    let questions = advisor.generate_follow_up_questions(&sample_answers()).await;
    let recs = advisor.generate_recommendations(&sample_answers()).await;

    assert_eq!(questions.value, fallback_follow_up_questions());
    assert_eq!(recs.value, fallback_recommendations());
    assert_eq!(questions.issue.unwrap().category(), "schema");
    assert_eq!(recs.issue.unwrap().category(), "schema");
}

#[tokio::test]
async fn test_backend_errors_use_fallback() {
    let provider = Arc::new(ScriptedProvider::new());
    provider.fail(ANALYSIS, LlmError::AuthenticationFailed {
        message: "API key not valid".to_string(),
    });
    provider.fail(RECOMMENDATIONS, LlmError::RateLimited {
        message: "quota exceeded".to_string(),
    });
    let advisor = advisor_with(&provider, Some("AIza-bad"));

    let report = advisor.generate_report(sample_answers()).await.unwrap();

    assert!(report.used_fallback());
    assert_eq!(report.plan.high_count(), 2);
    assert_eq!(report.advisories.len(), 2);
    for advisory in &report.advisories {
        assert!(matches!(advisory.issue, AdvisorIssue::Transport { .. }));
        assert!(advisory
            .issue
            .to_string()
            .starts_with("Failed to get AI response: "));
    }
}

// ============================================================================
// Results stage
// ============================================================================

#[tokio::test]
async fn test_report_requests_run_concurrently() {
    let provider = Arc::new(ScriptedProvider::new());
    let analysis_gate = provider.gated_reply(ANALYSIS, "**Energy**: steady");
    provider.reply(RECOMMENDATIONS, VALID_RECOMMENDATIONS);
    let advisor = advisor_with(&provider, Some("AIza-test"));

    let task = {
        let advisor = advisor.clone();
        tokio::spawn(async move { advisor.generate_report(sample_answers()).await })
    };

    // Both requests are issued while the analysis is still held back
    for _ in 0..50 {
        if provider.calls().len() == 2 {
            break;
        }
        tokio::task::yield_now().await;
    }
    assert_eq!(provider.calls_for(ANALYSIS), 1);
    assert_eq!(provider.calls_for(RECOMMENDATIONS), 1);

    analysis_gate.send(()).unwrap();
    let report = task.await.unwrap().unwrap();

    assert!(!report.used_fallback());
    assert_eq!(report.analysis, "**Energy**: steady");
    assert_eq!(
        names(&report.plan.high_priority),
        ["Vitamin D3", "Magnesium Citrate"]
    );
    assert_eq!(
        names(&report.plan.medium_priority),
        ["Fish Oil Omega-3", "Ashwagandha"]
    );
    assert_eq!(report.plan.total(), 5);
    assert_eq!(report.plan.all[2].tag, SupplementTag::Omega);
    assert_eq!(report.plan.all[4].tag, SupplementTag::General);
}

#[tokio::test]
async fn test_report_rejects_empty_answers() {
    let provider = Arc::new(ScriptedProvider::new());
    let advisor = advisor_with(&provider, Some("AIza-test"));

    let err = advisor.generate_report(AnswerRecord::new()).await.unwrap_err();

    assert!(err.to_string().contains("No assessment data found"));
    assert!(provider.calls().is_empty());
}
