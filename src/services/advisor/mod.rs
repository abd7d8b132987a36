//! Health Advisor
//!
//! Generation of follow-up questions, health analysis and supplement
//! recommendations, with deterministic fallbacks and the results report.

pub mod fallback;
pub mod issue;
pub mod orchestrator;
pub mod prompts;
pub mod report;

pub use issue::{AdvisorIssue, ContentSource, Generated};
pub use orchestrator::{HealthAdvisor, Purpose};
pub use report::{AssessmentReport, StageAdvisory, NEXT_STEPS};
