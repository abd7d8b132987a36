//! Assessment
//!
//! The step-by-step questionnaire that collects answers for the advisor.

pub mod wizard;

pub use wizard::{Advance, AssessmentWizard, FollowUpState, WizardPhase};
