//! Recommendation Classifier
//!
//! Pure post-processing of a recommendation list: a display tag per item,
//! derived from its name, and the high/medium priority views.

use serde::Serialize;

use crate::recommendation::{Priority, Recommendation};

/// Display tag derived from a supplement's name.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SupplementTag {
    Vitamin,
    Magnesium,
    Omega,
    BComplex,
    Probiotic,
    General,
}

impl SupplementTag {
    /// Match rules in precedence order. The first substring found wins.
    const RULES: [(&'static [&'static str], SupplementTag); 5] = [
        (&["vitamin"], SupplementTag::Vitamin),
        (&["magnesium"], SupplementTag::Magnesium),
        (&["omega"], SupplementTag::Omega),
        (&["b-complex", "b complex"], SupplementTag::BComplex),
        (&["probiotic"], SupplementTag::Probiotic),
    ];

    /// Tag for a supplement name. Case-insensitive substring match.
    pub fn for_name(name: &str) -> Self {
        let name = name.to_lowercase();
        Self::RULES
            .iter()
            .find(|(needles, _)| needles.iter().any(|n| name.contains(*n)))
            .map(|(_, tag)| *tag)
            .unwrap_or(SupplementTag::General)
    }

    /// Icon name used by front ends.
    pub fn icon(&self) -> &'static str {
        match self {
            Self::Vitamin => "star",
            Self::Magnesium => "clock",
            Self::Omega => "heart",
            Self::BComplex => "trending-up",
            Self::Probiotic => "shield",
            Self::General => "star",
        }
    }
}

/// A recommendation with its derived display tag.
///
/// Equality compares the recommendation only; the tag is decoration.
#[derive(Debug, Clone, Serialize)]
pub struct ClassifiedRecommendation {
    #[serde(flatten)]
    pub recommendation: Recommendation,
    pub tag: SupplementTag,
}

impl ClassifiedRecommendation {
    pub fn new(recommendation: Recommendation) -> Self {
        let tag = SupplementTag::for_name(&recommendation.name);
        Self { recommendation, tag }
    }

    pub fn priority(&self) -> Priority {
        self.recommendation.priority
    }

    pub fn name(&self) -> &str {
        &self.recommendation.name
    }
}

impl PartialEq for ClassifiedRecommendation {
    fn eq(&self, other: &Self) -> bool {
        self.recommendation == other.recommendation
    }
}

impl Eq for ClassifiedRecommendation {}

/// Classified recommendations plus the priority views.
///
/// `high_priority` and `medium_priority` keep the original relative order.
/// Low-priority items appear only in `all`.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RecommendationPlan {
    pub all: Vec<ClassifiedRecommendation>,
    pub high_priority: Vec<ClassifiedRecommendation>,
    pub medium_priority: Vec<ClassifiedRecommendation>,
}

impl RecommendationPlan {
    pub fn total(&self) -> usize {
        self.all.len()
    }

    pub fn high_count(&self) -> usize {
        self.high_priority.len()
    }

    pub fn medium_count(&self) -> usize {
        self.medium_priority.len()
    }
}

/// Tag every recommendation and split out the priority views.
pub fn classify(recommendations: &[Recommendation]) -> RecommendationPlan {
    let all: Vec<ClassifiedRecommendation> = recommendations
        .iter()
        .cloned()
        .map(ClassifiedRecommendation::new)
        .collect();

    let with_priority = |priority: Priority| {
        all.iter()
            .filter(|r| r.priority() == priority)
            .cloned()
            .collect::<Vec<_>>()
    };
    let high_priority = with_priority(Priority::High);
    let medium_priority = with_priority(Priority::Medium);

    RecommendationPlan {
        all,
        high_priority,
        medium_priority,
    }
}
