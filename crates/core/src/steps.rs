//! Assessment Steps
//!
//! The fixed step sequence of the assessment wizard and the static fields on
//! each step. Answers written for a catalog field are checked against its
//! [`FieldKind`].

use serde::Serialize;

use crate::answers::AnswerValue;
use crate::error::{CoreError, CoreResult};
use crate::question::check_scale;

/// How a static field is answered.
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldKind {
    /// Number within an inclusive range
    Number { min: f64, max: f64, unit: Option<&'static str> },
    /// One option
    Select { options: &'static [&'static str] },
    /// Any subset of options
    MultiSelect { options: &'static [&'static str] },
    /// Whole number from 1 to 10
    Scale,
    /// Free text
    Text,
}

/// A static question on an assessment step.
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct StepField {
    pub key: &'static str,
    pub label: &'static str,
    #[serde(flatten)]
    pub kind: FieldKind,
}

impl StepField {
    /// Check an answer against this field.
    pub fn check(&self, value: &AnswerValue) -> Result<(), String> {
        match self.kind {
            FieldKind::Number { min, max, .. } => {
                let n = value
                    .as_f64()
                    .ok_or_else(|| format!("'{}' expects a number", self.key))?;
                if n < min || n > max {
                    return Err(format!(
                        "'{}' must be between {} and {}, got {}",
                        self.key, min, max, n
                    ));
                }
                Ok(())
            }
            FieldKind::Select { options } => {
                let choice = value.as_text().ok_or_else(|| {
                    format!("'{}' expects one option, got a {}", self.key, value.kind())
                })?;
                if options.contains(&choice) {
                    Ok(())
                } else {
                    Err(format!("'{}' is not an option of '{}'", choice, self.key))
                }
            }
            FieldKind::MultiSelect { options } => {
                let chosen = value.as_selection().ok_or_else(|| {
                    format!("'{}' expects a selection, got a {}", self.key, value.kind())
                })?;
                match chosen.iter().find(|c| !options.contains(&c.as_str())) {
                    Some(unknown) => Err(format!("'{}' is not an option of '{}'", unknown, self.key)),
                    None => Ok(()),
                }
            }
            FieldKind::Scale => check_scale(self.key, value),
            FieldKind::Text => match value {
                AnswerValue::Selection(_) => {
                    Err(format!("'{}' expects a text answer", self.key))
                }
                _ => Ok(()),
            },
        }
    }
}

/// One page of the assessment.
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct WizardStep {
    pub title: &'static str,
    pub description: &'static str,
    pub is_ai_step: bool,
    /// Static fields; empty on the AI step, whose questions are generated
    pub fields: &'static [StepField],
}

pub const GENDER_OPTIONS: &[&str] = &["male", "female", "other", "prefer-not-to-say"];

pub const ACTIVITY_LEVELS: &[&str] = &["sedentary", "light", "moderate", "high", "very-high"];

pub const HEALTH_GOALS: &[&str] = &[
    "Improve energy levels",
    "Better sleep quality",
    "Weight management",
    "Immune system support",
    "Mental clarity & focus",
    "Stress management",
    "Heart health",
    "Digestive health",
    "Joint & bone health",
    "Skin health",
    "Athletic performance",
    "General wellness",
];

pub const SLEEP_QUALITY: &[&str] = &["poor", "fair", "good", "excellent"];

pub const DIET_TYPES: &[&str] = &[
    "omnivore",
    "vegetarian",
    "vegan",
    "keto",
    "paleo",
    "mediterranean",
    "other",
];

pub const WATER_INTAKE: &[&str] = &["less-than-4", "4-6", "6-8", "more-than-8"];

pub const DIGESTIVE_ISSUES: &[&str] = &[
    "Bloating",
    "Gas",
    "Constipation",
    "Diarrhea",
    "Acid reflux",
    "Food sensitivities",
    "None",
];

/// The assessment, in order.
pub const ASSESSMENT_STEPS: &[WizardStep] = &[
    WizardStep {
        title: "Basic Information",
        description: "Let's start with some basic details about you",
        is_ai_step: false,
        fields: &[
            StepField {
                key: "age",
                label: "Age",
                kind: FieldKind::Number { min: 1.0, max: 120.0, unit: None },
            },
            StepField {
                key: "gender",
                label: "Gender",
                kind: FieldKind::Select { options: GENDER_OPTIONS },
            },
            StepField {
                key: "height",
                label: "Height",
                kind: FieldKind::Number { min: 50.0, max: 272.0, unit: Some("cm") },
            },
            StepField {
                key: "weight",
                label: "Weight",
                kind: FieldKind::Number { min: 20.0, max: 400.0, unit: Some("kg") },
            },
            StepField {
                key: "activity_level",
                label: "Activity Level",
                kind: FieldKind::Select { options: ACTIVITY_LEVELS },
            },
        ],
    },
    WizardStep {
        title: "Health Goals",
        description: "What are your primary health objectives?",
        is_ai_step: false,
        fields: &[
            StepField {
                key: "health_goals",
                label: "Select your health goals",
                kind: FieldKind::MultiSelect { options: HEALTH_GOALS },
            },
            StepField {
                key: "specific_concerns",
                label: "Specific health concerns or symptoms",
                kind: FieldKind::Text,
            },
        ],
    },
    WizardStep {
        title: "Current Health Status",
        description: "Tell us about your current health situation",
        is_ai_step: false,
        fields: &[
            StepField {
                key: "medical_conditions",
                label: "Medical conditions",
                kind: FieldKind::Text,
            },
            StepField {
                key: "medications",
                label: "Current medications & supplements",
                kind: FieldKind::Text,
            },
            StepField {
                key: "energy_level",
                label: "Energy level (1-10)",
                kind: FieldKind::Scale,
            },
            StepField {
                key: "sleep_quality",
                label: "Sleep quality",
                kind: FieldKind::Select { options: SLEEP_QUALITY },
            },
        ],
    },
    WizardStep {
        title: "Lifestyle & Diet",
        description: "Understanding your daily habits and nutrition",
        is_ai_step: false,
        fields: &[
            StepField {
                key: "diet_type",
                label: "Diet type",
                kind: FieldKind::Select { options: DIET_TYPES },
            },
            StepField {
                key: "stress_level",
                label: "Stress level (1-10)",
                kind: FieldKind::Scale,
            },
            StepField {
                key: "water_intake",
                label: "Daily water intake (glasses)",
                kind: FieldKind::Select { options: WATER_INTAKE },
            },
            StepField {
                key: "digestive_issues",
                label: "Digestive issues",
                kind: FieldKind::MultiSelect { options: DIGESTIVE_ISSUES },
            },
        ],
    },
    WizardStep {
        title: "AI Follow-up Questions",
        description: "Personalized questions based on your responses",
        is_ai_step: true,
        fields: &[],
    },
];

/// Look up a static field by answer key across all steps.
pub fn find_field(steps: &[WizardStep], key: &str) -> Option<&'static StepField> {
    steps
        .iter()
        .flat_map(|step| step.fields.iter())
        .find(|field| field.key == key)
}

/// Check that a step sequence is usable by the wizard: at least two steps and
/// exactly one AI step, which is not the first.
pub fn validate_steps(steps: &[WizardStep]) -> CoreResult<()> {
    if steps.len() < 2 {
        return Err(CoreError::validation("an assessment needs at least two steps"));
    }
    let ai_steps: Vec<usize> = steps
        .iter()
        .enumerate()
        .filter(|(_, s)| s.is_ai_step)
        .map(|(i, _)| i)
        .collect();
    match ai_steps.as_slice() {
        [0] => Err(CoreError::validation("the AI step cannot be the first step")),
        [_] => Ok(()),
        _ => Err(CoreError::validation(format!(
            "expected exactly one AI step, found {}",
            ai_steps.len()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assessment_steps_are_valid() {
        validate_steps(ASSESSMENT_STEPS).unwrap();
        assert_eq!(ASSESSMENT_STEPS.len(), 5);
        assert!(ASSESSMENT_STEPS[4].is_ai_step);
        assert_eq!(ASSESSMENT_STEPS[1].title, "Health Goals");
    }

    #[test]
    fn test_validate_steps_rejects_bad_sequences() {
        let basic = ASSESSMENT_STEPS[0];
        let ai = ASSESSMENT_STEPS[4];
        assert!(validate_steps(&[ai]).is_err());
        assert!(validate_steps(&[ai, basic]).is_err());
        assert!(validate_steps(&[basic, basic]).is_err());
        assert!(validate_steps(&[basic, ai, ai]).is_err());
        assert!(validate_steps(&[basic, ai]).is_ok());
        assert!(validate_steps(&[basic, ai, basic]).is_ok());
    }

    #[test]
    fn test_field_keys_unique() {
        let mut keys: Vec<&str> = ASSESSMENT_STEPS
            .iter()
            .flat_map(|s| s.fields.iter().map(|f| f.key))
            .collect();
        let total = keys.len();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), total);
    }

    #[test]
    fn test_number_field() {
        let age = find_field(ASSESSMENT_STEPS, "age").unwrap();
        assert!(age.check(&AnswerValue::text("34")).is_ok());
        assert!(age.check(&AnswerValue::integer(34)).is_ok());
        assert!(age.check(&AnswerValue::text("0")).is_err());
        assert!(age.check(&AnswerValue::text("thirty")).is_err());
    }

    #[test]
    fn test_select_field() {
        let gender = find_field(ASSESSMENT_STEPS, "gender").unwrap();
        assert!(gender.check(&AnswerValue::text("male")).is_ok());
        assert!(gender.check(&AnswerValue::text("Male")).is_err());
        assert!(gender.check(&AnswerValue::selection(["male"])).is_err());
    }

    #[test]
    fn test_multi_select_field() {
        let goals = find_field(ASSESSMENT_STEPS, "health_goals").unwrap();
        assert!(goals
            .check(&AnswerValue::selection(["Better sleep quality"]))
            .is_ok());
        assert!(goals.check(&AnswerValue::Selection(Vec::new())).is_ok());
        assert!(goals
            .check(&AnswerValue::selection(["Better sleep quality", "Fly"]))
            .is_err());
    }

    #[test]
    fn test_scale_field() {
        let stress = find_field(ASSESSMENT_STEPS, "stress_level").unwrap();
        assert!(stress.check(&AnswerValue::text("8")).is_ok());
        assert!(stress.check(&AnswerValue::text("11")).is_err());
    }

    #[test]
    fn test_unknown_field() {
        assert!(find_field(ASSESSMENT_STEPS, "ai_question_1").is_none());
    }
}
