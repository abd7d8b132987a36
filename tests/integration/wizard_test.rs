//! Wizard Integration Tests
//!
//! Step navigation, follow-up fetch ordering and the submission rules.

use std::sync::Arc;

use supplement_advisor::services::advisor::ContentSource;
use supplement_advisor::services::assessment::{Advance, AssessmentWizard, WizardPhase};
use supplement_advisor::AppError;
use supplement_advisor_core::AnswerValue;

use crate::mock_provider::{
    advisor_with, ScriptedProvider, FOLLOW_UPS, OTHER_QUESTIONS, VALID_QUESTIONS,
};

fn advance_to_ai_step(wizard: &mut AssessmentWizard) {
    while !wizard.current_step().is_ai_step {
        wizard.advance().unwrap();
    }
}

fn ids(wizard: &AssessmentWizard) -> Vec<String> {
    wizard
        .follow_ups()
        .questions
        .into_iter()
        .map(|q| q.id)
        .collect()
}

// ============================================================================
// Follow-up fetch ordering
// ============================================================================

#[tokio::test]
async fn test_only_latest_fetch_commits() {
    let provider = Arc::new(ScriptedProvider::new());
    let first_gate = provider.gated_reply(FOLLOW_UPS, VALID_QUESTIONS);
    provider.reply(FOLLOW_UPS, OTHER_QUESTIONS);
    let mut wizard = AssessmentWizard::new(advisor_with(&provider, Some("AIza-test")));

    advance_to_ai_step(&mut wizard);
    assert!(wizard.is_loading());
    let first_generation = wizard.follow_ups().generation;
    while provider.calls_for(FOLLOW_UPS) == 0 {
        tokio::task::yield_now().await;
    }

    // Go back, change an answer, re-enter the AI step
    wizard.retreat();
    wizard
        .set_answer("stress_level", AnswerValue::text("9"))
        .unwrap();
    assert_eq!(wizard.advance().unwrap(), Advance::Moved(4));

    let state = wizard.wait_for_follow_ups().await;
    assert!(state.generation > first_generation);
    assert_eq!(state.source, Some(ContentSource::Backend));
    assert_eq!(ids(&wizard), ["second_1", "second_2", "second_3"]);

    // Releasing the superseded request changes nothing
    let _ = first_gate.send(());
    for _ in 0..10 {
        tokio::task::yield_now().await;
    }
    assert_eq!(ids(&wizard), ["second_1", "second_2", "second_3"]);
    assert!(!wizard.is_loading());

    let last_prompt = provider.calls().last().unwrap().prompt.clone();
    assert!(last_prompt.contains("\"stress_level\": \"9\""));
}

#[tokio::test]
async fn test_fetch_uses_answers_at_entry() {
    let provider = Arc::new(ScriptedProvider::new());
    provider.reply(FOLLOW_UPS, VALID_QUESTIONS);
    let mut wizard = AssessmentWizard::new(advisor_with(&provider, Some("AIza-test")));

    wizard.set_answer("age", AnswerValue::text("34")).unwrap();
    advance_to_ai_step(&mut wizard);
    wizard.wait_for_follow_ups().await;

    let calls = provider.calls();
    assert_eq!(calls.len(), 1);
    assert!(calls[0].prompt.contains("\"age\": \"34\""));
}

// ============================================================================
// Submission
// ============================================================================

#[tokio::test]
async fn test_submit_blocked_while_loading() {
    let provider = Arc::new(ScriptedProvider::new());
    let gate = provider.gated_reply(FOLLOW_UPS, VALID_QUESTIONS);
    let mut wizard = AssessmentWizard::new(advisor_with(&provider, Some("AIza-test")));

    advance_to_ai_step(&mut wizard);
    assert!(wizard.is_last_step());
    assert!(matches!(wizard.advance(), Err(AppError::InvalidState(_))));
    assert_eq!(wizard.phase(), WizardPhase::Collecting);

    gate.send(()).unwrap();
    wizard.wait_for_follow_ups().await;

    wizard
        .set_answer("afternoon_energy", AnswerValue::text("Afternoon"))
        .unwrap();
    assert!(wizard
        .set_answer("afternoon_energy", AnswerValue::text("Night"))
        .is_err());
    assert!(wizard.set_answer("caffeine", AnswerValue::text("11")).is_err());

    match wizard.advance().unwrap() {
        Advance::Submitted(record) => {
            assert_eq!(
                record.get("afternoon_energy"),
                Some(&AnswerValue::text("Afternoon"))
            );
        }
        other => panic!("Expected submission, got {:?}", other),
    }
}

#[tokio::test]
async fn test_submitted_snapshot_is_final() {
    let provider = Arc::new(ScriptedProvider::new());
    let mut wizard = AssessmentWizard::new(advisor_with(&provider, None));

    wizard
        .set_answer("health_goals", AnswerValue::selection(["Heart health"]))
        .unwrap();
    advance_to_ai_step(&mut wizard);
    wizard.wait_for_follow_ups().await;
    let Advance::Submitted(record) = wizard.advance().unwrap() else {
        panic!("Expected submission");
    };

    assert!(matches!(
        wizard.set_answer("age", AnswerValue::text("50")),
        Err(AppError::InvalidState(_))
    ));
    assert_eq!(wizard.answers(), record);
    assert!(provider.calls().is_empty());
}
