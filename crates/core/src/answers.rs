//! Answer Model
//!
//! The per-session accumulator of user responses. Every value is one of a
//! small set of shapes ([`AnswerValue`]) checked when it is written, so prompt
//! construction downstream never has to guess what a key holds.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// A single answer.
///
/// Serialized untagged, so a record renders as the plain JSON object the
/// generative backend is shown: strings, numbers and string arrays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    /// Free text, a select value, or a number typed as text ("34")
    Text(String),
    /// A numeric answer
    Number(serde_json::Number),
    /// Ordered list of selected options
    Selection(Vec<String>),
}

impl AnswerValue {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Build a numeric answer. Non-finite floats are not representable and
    /// fall back to their text form.
    pub fn number(value: f64) -> Self {
        match serde_json::Number::from_f64(value) {
            Some(n) => Self::Number(n),
            None => Self::Text(value.to_string()),
        }
    }

    pub fn integer(value: i64) -> Self {
        Self::Number(value.into())
    }

    pub fn selection<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Selection(values.into_iter().map(Into::into).collect())
    }

    /// Text form of the answer, if it is a single value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Numeric reading of the answer. Text answers are parsed, so
    /// number-as-string values ("8") read the same as numbers.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => n.as_f64(),
            Self::Text(s) => s.trim().parse::<f64>().ok(),
            Self::Selection(_) => None,
        }
    }

    pub fn as_selection(&self) -> Option<&[String]> {
        match self {
            Self::Selection(items) => Some(items),
            _ => None,
        }
    }

    /// Short name of the shape, used in validation messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Number(_) => "number",
            Self::Selection(_) => "selection",
        }
    }
}

impl From<&str> for AnswerValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for AnswerValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Vec<String>> for AnswerValue {
    fn from(value: Vec<String>) -> Self {
        Self::Selection(value)
    }
}

impl From<i64> for AnswerValue {
    fn from(value: i64) -> Self {
        Self::integer(value)
    }
}

/// Read-only snapshot of the answers collected so far.
///
/// Keys are kept sorted so two snapshots of the same answers serialize
/// identically.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerRecord(BTreeMap<String, AnswerValue>);

impl AnswerRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&AnswerValue> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &AnswerValue)> {
        self.0.iter()
    }

    /// Pretty-printed JSON object, as embedded in backend prompts.
    pub fn to_pretty_json(&self) -> String {
        serde_json::to_string_pretty(&self.0).unwrap_or_else(|_| "{}".to_string())
    }
}

impl<K: Into<String>> FromIterator<(K, AnswerValue)> for AnswerRecord {
    fn from_iter<T: IntoIterator<Item = (K, AnswerValue)>>(iter: T) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// Accumulates answers for one session.
///
/// Writes are last-write-wins per key and keys are never removed. The store
/// checks that a value is well-formed; field-specific rules (ranges, option
/// lists) are applied by the caller before writing.
#[derive(Debug, Clone, Default)]
pub struct AnswerStore {
    record: AnswerRecord,
}

impl AnswerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write an answer, replacing any previous value for `key` wholesale.
    pub fn set(&mut self, key: impl Into<String>, value: AnswerValue) -> CoreResult<()> {
        let key = key.into();
        if key.trim().is_empty() {
            return Err(CoreError::validation("answer key must not be empty"));
        }
        if let AnswerValue::Selection(items) = &value {
            if items.iter().any(|item| item.trim().is_empty()) {
                return Err(CoreError::validation(format!(
                    "answer '{}' contains an empty selection",
                    key
                )));
            }
        }
        self.record.0.insert(key, value);
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&AnswerValue> {
        self.record.get(key)
    }

    pub fn len(&self) -> usize {
        self.record.len()
    }

    pub fn is_empty(&self) -> bool {
        self.record.is_empty()
    }

    /// Copy of the current answers. Later writes do not affect it.
    pub fn snapshot(&self) -> AnswerRecord {
        self.record.clone()
    }
}
