//! Supplement Advisor Core
//!
//! Domain types shared across the Supplement Advisor workspace: the answer
//! model, follow-up questions, recommendations, the assessment step catalog,
//! response schema validation, and recommendation classification. This crate
//! has no dependency on the generative backend or on application-level code.
//!
//! ## Module Organization
//!
//! - `error` - Core error types (`CoreError`, `CoreResult`, `SchemaError`)
//! - `answers` - Answer values, snapshots, and the per-session `AnswerStore`
//! - `question` - `FollowUpQuestion` and its answer domains
//! - `recommendation` - `Recommendation` and `Priority`
//! - `steps` - The fixed assessment step sequence and its static fields
//! - `schema` - One validator per generated-content type
//! - `classifier` - Display tags and priority views for recommendation lists

pub mod answers;
pub mod classifier;
pub mod error;
pub mod question;
pub mod recommendation;
pub mod schema;
pub mod steps;

// ── Error Types ────────────────────────────────────────────────────────
pub use error::{CoreError, CoreResult, SchemaError};

// ── Answers ────────────────────────────────────────────────────────────
pub use answers::{AnswerRecord, AnswerStore, AnswerValue};

// ── Generated Content ──────────────────────────────────────────────────
pub use question::{FollowUpQuestion, QuestionType};
pub use recommendation::{Priority, Recommendation};

// ── Steps ──────────────────────────────────────────────────────────────
pub use steps::{FieldKind, StepField, WizardStep, ASSESSMENT_STEPS};

// ── Classification ─────────────────────────────────────────────────────
pub use classifier::{classify, ClassifiedRecommendation, RecommendationPlan, SupplementTag};
