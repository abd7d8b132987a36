//! Follow-up Questions
//!
//! Questions generated for the AI step of the assessment. A question's `id`
//! becomes the answer key once the user responds.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::answers::AnswerValue;

/// Fixed answer domain for `scale` questions.
pub const SCALE_RANGE: RangeInclusive<i64> = 1..=10;

/// How a follow-up question is answered.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum QuestionType {
    /// Free text
    Text,
    /// Exactly one of `options`
    Select,
    /// Any subset of `options`
    Checkbox,
    /// Integer in [`SCALE_RANGE`]
    Scale,
}

impl QuestionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Select => "select",
            Self::Checkbox => "checkbox",
            Self::Scale => "scale",
        }
    }

    /// Whether the question must carry an option list.
    pub fn requires_options(&self) -> bool {
        matches!(self, Self::Select | Self::Checkbox)
    }
}

impl std::fmt::Display for QuestionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for QuestionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(Self::Text),
            "select" => Ok(Self::Select),
            "checkbox" => Ok(Self::Checkbox),
            "scale" => Ok(Self::Scale),
            other => Err(format!("unknown question type '{}'", other)),
        }
    }
}

/// A dynamically generated assessment question.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FollowUpQuestion {
    pub id: String,
    pub question: String,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    /// Present only for `select` and `checkbox` questions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
}

impl FollowUpQuestion {
    pub fn new(id: impl Into<String>, question: impl Into<String>, question_type: QuestionType) -> Self {
        Self {
            id: id.into(),
            question: question.into(),
            question_type,
            options: None,
        }
    }

    pub fn with_options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = Some(options.into_iter().map(Into::into).collect());
        self
    }

    /// The option list, empty when the type takes none.
    pub fn options(&self) -> &[String] {
        self.options.as_deref().unwrap_or(&[])
    }

    /// Check an answer against this question's domain.
    pub fn check_answer(&self, value: &AnswerValue) -> Result<(), String> {
        match self.question_type {
            QuestionType::Text => match value {
                AnswerValue::Selection(_) => Err(format!(
                    "'{}' expects a text answer, got a {}",
                    self.id,
                    value.kind()
                )),
                _ => Ok(()),
            },
            QuestionType::Scale => check_scale(&self.id, value),
            QuestionType::Select => {
                let choice = value.as_text().ok_or_else(|| {
                    format!("'{}' expects one option, got a {}", self.id, value.kind())
                })?;
                if self.options().iter().any(|o| o == choice) {
                    Ok(())
                } else {
                    Err(format!("'{}' is not an option of '{}'", choice, self.id))
                }
            }
            QuestionType::Checkbox => {
                let chosen = value.as_selection().ok_or_else(|| {
                    format!("'{}' expects a selection, got a {}", self.id, value.kind())
                })?;
                match chosen.iter().find(|c| !self.options().contains(c)) {
                    Some(unknown) => Err(format!("'{}' is not an option of '{}'", unknown, self.id)),
                    None => Ok(()),
                }
            }
        }
    }
}

/// Accept an integer in [`SCALE_RANGE`], given as a number or numeric text.
pub fn check_scale(key: &str, value: &AnswerValue) -> Result<(), String> {
    let n = value
        .as_f64()
        .ok_or_else(|| format!("'{}' expects a number from 1 to 10", key))?;
    if n.fract() == 0.0 && SCALE_RANGE.contains(&(n as i64)) {
        Ok(())
    } else {
        Err(format!("'{}' must be a whole number from 1 to 10, got {}", key, n))
    }
}
