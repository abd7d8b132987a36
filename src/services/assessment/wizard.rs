//! Assessment Wizard
//!
//! Drives one user through the fixed step sequence. Entering the AI step
//! starts a background fetch of follow-up questions; only the most recently
//! started fetch may commit its result.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Serialize};
use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tracing::debug;

use supplement_advisor_core::steps::{find_field, validate_steps};
use supplement_advisor_core::{
    AnswerRecord, AnswerStore, AnswerValue, FollowUpQuestion, WizardStep, ASSESSMENT_STEPS,
};

use crate::services::advisor::{AdvisorIssue, ContentSource, HealthAdvisor};
use crate::utils::error::{AppError, AppResult};

/// Wizard lifecycle phase
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WizardPhase {
    /// Answers are being collected
    Collecting,
    /// Final snapshot handed off; no further changes
    Submitted,
}

/// Outcome of [`AssessmentWizard::advance`].
#[derive(Debug, Clone, PartialEq)]
pub enum Advance {
    /// Moved to the step at this index
    Moved(usize),
    /// The last step was completed; the final answers
    Submitted(AnswerRecord),
}

/// Snapshot of the AI step's follow-up questions.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FollowUpState {
    /// Token of the most recently started fetch; 0 before the first
    pub generation: u64,
    pub loading: bool,
    pub questions: Vec<FollowUpQuestion>,
    pub source: Option<ContentSource>,
    pub issue: Option<AdvisorIssue>,
}

fn lock_slot(slot: &Mutex<FollowUpState>) -> MutexGuard<'_, FollowUpState> {
    slot.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Step/answer state machine for one assessment session.
pub struct AssessmentWizard {
    steps: &'static [WizardStep],
    current: usize,
    answers: AnswerStore,
    phase: WizardPhase,
    advisor: Arc<HealthAdvisor>,
    follow_ups: Arc<Mutex<FollowUpState>>,
    follow_ups_changed: Arc<Notify>,
    in_flight: Option<JoinHandle<()>>,
}

impl AssessmentWizard {
    /// Wizard over the standard assessment steps
    pub fn new(advisor: Arc<HealthAdvisor>) -> Self {
        Self::build(advisor, ASSESSMENT_STEPS)
    }

    /// Wizard over a custom step sequence
    pub fn with_steps(advisor: Arc<HealthAdvisor>, steps: &'static [WizardStep]) -> AppResult<Self> {
        validate_steps(steps)?;
        Ok(Self::build(advisor, steps))
    }

    fn build(advisor: Arc<HealthAdvisor>, steps: &'static [WizardStep]) -> Self {
        Self {
            steps,
            current: 0,
            answers: AnswerStore::new(),
            phase: WizardPhase::Collecting,
            advisor,
            follow_ups: Arc::new(Mutex::new(FollowUpState::default())),
            follow_ups_changed: Arc::new(Notify::new()),
            in_flight: None,
        }
    }

    pub fn steps(&self) -> &'static [WizardStep] {
        self.steps
    }

    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    pub fn current_step_index(&self) -> usize {
        self.current
    }

    pub fn current_step(&self) -> &'static WizardStep {
        &self.steps[self.current]
    }

    pub fn is_last_step(&self) -> bool {
        self.current + 1 == self.steps.len()
    }

    pub fn phase(&self) -> WizardPhase {
        self.phase
    }

    pub fn is_submitted(&self) -> bool {
        self.phase == WizardPhase::Submitted
    }

    /// Percent of steps reached, counting the current one.
    pub fn progress_percent(&self) -> f32 {
        (self.current + 1) as f32 / self.steps.len() as f32 * 100.0
    }

    /// Snapshot of the answers so far
    pub fn answers(&self) -> AnswerRecord {
        self.answers.snapshot()
    }

    /// Snapshot of the follow-up questions
    pub fn follow_ups(&self) -> FollowUpState {
        lock_slot(&self.follow_ups).clone()
    }

    pub fn is_loading(&self) -> bool {
        lock_slot(&self.follow_ups).loading
    }

    /// Wait until no follow-up fetch is pending, then return the snapshot.
    pub async fn wait_for_follow_ups(&self) -> FollowUpState {
        loop {
            let changed = self.follow_ups_changed.notified();
            {
                let slot = lock_slot(&self.follow_ups);
                if !slot.loading {
                    return slot.clone();
                }
            }
            changed.await;
        }
    }

    /// Record an answer. Rejected once the assessment is submitted, and when
    /// the value does not fit the field or follow-up question it answers.
    pub fn set_answer(&mut self, key: &str, value: AnswerValue) -> AppResult<()> {
        if self.is_submitted() {
            return Err(AppError::invalid_state(
                "assessment already submitted; answers can no longer change",
            ));
        }

        if let Some(field) = find_field(self.steps, key) {
            field.check(&value).map_err(AppError::validation)?;
        } else {
            let slot = lock_slot(&self.follow_ups);
            if let Some(question) = slot.questions.iter().find(|q| q.id == key) {
                question.check_answer(&value).map_err(AppError::validation)?;
            }
        }

        self.answers.set(key, value)?;
        Ok(())
    }

    /// Move forward one step, or submit from the last step.
    ///
    /// Submitting is refused while follow-up questions are loading.
    pub fn advance(&mut self) -> AppResult<Advance> {
        if self.is_submitted() {
            return Err(AppError::invalid_state("assessment already submitted"));
        }

        if !self.is_last_step() {
            let next = self.current + 1;
            if self.steps[next].is_ai_step {
                self.start_follow_up_fetch()?;
            }
            self.current = next;
            return Ok(Advance::Moved(self.current));
        }

        if self.is_loading() {
            return Err(AppError::invalid_state(
                "follow-up questions are still loading",
            ));
        }

        self.phase = WizardPhase::Submitted;
        debug!(answers = self.answers.len(), "assessment submitted");
        Ok(Advance::Submitted(self.answers.snapshot()))
    }

    /// Move back one step. No-op on the first step and after submission.
    pub fn retreat(&mut self) {
        if !self.is_submitted() && self.current > 0 {
            self.current -= 1;
        }
    }

    fn start_follow_up_fetch(&mut self) -> AppResult<()> {
        let runtime = tokio::runtime::Handle::try_current()
            .map_err(|e| AppError::internal(format!("no async runtime for follow-up fetch: {}", e)))?;

        let generation = {
            let mut slot = lock_slot(&self.follow_ups);
            slot.generation += 1;
            slot.loading = true;
            slot.questions.clear();
            slot.source = None;
            slot.issue = None;
            slot.generation
        };

        if let Some(previous) = self.in_flight.take() {
            previous.abort();
        }

        let snapshot = self.answers.snapshot();
        let advisor = Arc::clone(&self.advisor);
        let follow_ups = Arc::clone(&self.follow_ups);
        let changed = Arc::clone(&self.follow_ups_changed);
        debug!(generation, answers = snapshot.len(), "fetching follow-up questions");

        self.in_flight = Some(runtime.spawn(async move {
            let generated = advisor.generate_follow_up_questions(&snapshot).await;
            let committed = {
                let mut slot = lock_slot(&follow_ups);
                if slot.generation == generation {
                    slot.loading = false;
                    slot.questions = generated.value;
                    slot.source = Some(generated.source);
                    slot.issue = generated.issue;
                    true
                } else {
                    false
                }
            };
            if committed {
                changed.notify_waiters();
            } else {
                debug!(generation, "discarding superseded follow-up questions");
            }
        }));
        Ok(())
    }
}

impl Drop for AssessmentWizard {
    fn drop(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            handle.abort();
        }
    }
}
