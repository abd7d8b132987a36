//! Results stage: analysis and recommendations for a submitted assessment.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use supplement_advisor_core::{classify, AnswerRecord, RecommendationPlan};

use super::issue::{AdvisorIssue, ContentSource};
use super::orchestrator::{HealthAdvisor, Purpose};
use crate::utils::error::{AppError, AppResult};

/// Fixed guidance shown after every report.
pub const NEXT_STEPS: [&str; 4] = [
    "Start with high-priority supplements first",
    "Give each supplement 2-4 weeks to show effects",
    "Add medium-priority supplements gradually",
    "Retake assessment in 3 months to track progress",
];

/// An advisory raised while producing one part of the report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StageAdvisory {
    pub stage: Purpose,
    pub issue: AdvisorIssue,
}

/// Everything the results view renders.
#[derive(Debug, Clone, Serialize)]
pub struct AssessmentReport {
    pub id: String,
    pub generated_at: DateTime<Utc>,
    pub answers: AnswerRecord,
    pub analysis: String,
    pub analysis_source: ContentSource,
    pub plan: RecommendationPlan,
    pub recommendations_source: ContentSource,
    pub advisories: Vec<StageAdvisory>,
    pub next_steps: Vec<String>,
}

impl AssessmentReport {
    /// Whether any part of the report is fallback content.
    pub fn used_fallback(&self) -> bool {
        self.analysis_source == ContentSource::Fallback
            || self.recommendations_source == ContentSource::Fallback
    }
}

impl HealthAdvisor {
    /// Produce the report for a submitted answer record.
    ///
    /// The analysis and recommendation requests run concurrently; each falls
    /// back independently.
    pub async fn generate_report(&self, answers: AnswerRecord) -> AppResult<AssessmentReport> {
        if answers.is_empty() {
            return Err(AppError::validation("No assessment data found"));
        }

        let (analysis, recommendations) = tokio::join!(
            self.generate_health_analysis(&answers),
            self.generate_recommendations(&answers)
        );

        let advisories: Vec<StageAdvisory> = [
            (Purpose::HealthAnalysis, analysis.issue.clone()),
            (Purpose::Recommendations, recommendations.issue.clone()),
        ]
        .into_iter()
        .filter_map(|(stage, issue)| issue.map(|issue| StageAdvisory { stage, issue }))
        .collect();

        let plan = classify(&recommendations.value);
        info!(
            total = plan.total(),
            high = plan.high_count(),
            medium = plan.medium_count(),
            fallback = analysis.is_fallback() || recommendations.is_fallback(),
            "assessment report generated"
        );

        Ok(AssessmentReport {
            id: Uuid::new_v4().to_string(),
            generated_at: Utc::now(),
            answers,
            analysis: analysis.value,
            analysis_source: analysis.source,
            plan,
            recommendations_source: recommendations.source,
            advisories,
            next_steps: NEXT_STEPS.iter().map(|s| s.to_string()).collect(),
        })
    }
}
