//! Supplement recommendation types.

use serde::{Deserialize, Serialize};

/// Recommendation priority.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }

    /// Badge text shown next to a recommendation.
    pub fn label(&self) -> &'static str {
        match self {
            Self::High => "HIGH",
            Self::Medium => "MEDIUM",
            Self::Low => "LOW",
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single supplement recommendation.
///
/// `benefits` normally holds three entries, but any length is accepted and
/// rendered as-is.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Recommendation {
    pub id: u32,
    pub name: String,
    pub dosage: String,
    pub priority: Priority,
    pub category: String,
    pub reason: String,
    pub benefits: Vec<String>,
    pub timing: String,
}

impl Recommendation {
    pub fn is_high_priority(&self) -> bool {
        self.priority == Priority::High
    }
}
